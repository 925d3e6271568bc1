/// Access and refresh tokens
///
/// Identity travels as an HS256-signed JWT whose subject is the user ID.
/// Access tokens are presented on every request and live for a day;
/// refresh tokens live for thirty days and can only be exchanged for new
/// access tokens, never used directly. Validation checks the signature,
/// the expiry/nbf window, and the issuer.
///
/// # Example
///
/// ```
/// use taskboard_shared::auth::jwt::{create_token, validate_token, Claims, TokenType};
/// use uuid::Uuid;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let user_id = Uuid::new_v4();
///
/// let token = create_token(&Claims::new(user_id, TokenType::Access), "signing-secret")?;
/// let claims = validate_token(&token, "signing-secret")?;
/// assert_eq!(claims.sub, user_id);
/// # Ok(())
/// # }
/// ```

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Issuer stamped into and required from every token
const ISSUER: &str = "taskboard";

/// Error type for JWT operations
#[derive(Debug, thiserror::Error)]
pub enum JwtError {
    /// Failed to create token
    #[error("Failed to create token: {0}")]
    CreateError(String),

    /// Failed to validate token
    #[error("Failed to validate token: {0}")]
    ValidationError(String),

    /// Token has expired
    #[error("Token has expired")]
    Expired,

    /// Token was signed for a different issuer
    #[error("Invalid token issuer")]
    InvalidIssuer,
}

/// Distinguishes the two token lifetimes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    /// Presented on every API request; lives 24 hours
    Access,

    /// Exchanged for new access tokens; lives 30 days
    Refresh,
}

impl TokenType {
    /// How long a freshly minted token of this type stays valid
    pub fn default_expiration(&self) -> Duration {
        match self {
            TokenType::Access => Duration::hours(24),
            TokenType::Refresh => Duration::days(30),
        }
    }

    fn label(&self) -> &'static str {
        match self {
            TokenType::Access => "access",
            TokenType::Refresh => "refresh",
        }
    }
}

/// Claim set carried by every token
///
/// The registered claims plus a `token_type` discriminator. The subject is
/// the only identity the service needs; project access is decided
/// per-resource by the board core, not baked into the token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: user ID
    pub sub: Uuid,

    /// Issuer
    pub iss: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Not before (Unix timestamp)
    pub nbf: i64,

    /// Access or refresh
    pub token_type: TokenType,
}

impl Claims {
    /// Claims for a user with the type's standard lifetime
    pub fn new(user_id: Uuid, token_type: TokenType) -> Self {
        Self::with_expiration(user_id, token_type, token_type.default_expiration())
    }

    /// Claims with an explicit lifetime (tests use negative durations)
    pub fn with_expiration(user_id: Uuid, token_type: TokenType, expires_in: Duration) -> Self {
        let now = Utc::now();

        Self {
            sub: user_id,
            iss: ISSUER.to_string(),
            iat: now.timestamp(),
            exp: (now + expires_in).timestamp(),
            nbf: now.timestamp(),
            token_type,
        }
    }

    /// Whether the expiry timestamp has passed
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }
}

fn validation_rules() -> Validation {
    let mut rules = Validation::new(Algorithm::HS256);
    rules.set_issuer(&[ISSUER]);
    rules.validate_exp = true;
    rules.validate_nbf = true;
    rules
}

/// Signs a claim set into a compact JWT
pub fn create_token(claims: &Claims, secret: &str) -> Result<String, JwtError> {
    encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| JwtError::CreateError(e.to_string()))
}

/// Verifies a token's signature, window, and issuer, returning its claims
pub fn validate_token(token: &str, secret: &str) -> Result<Claims, JwtError> {
    let decoded = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation_rules(),
    )
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => JwtError::Expired,
        jsonwebtoken::errors::ErrorKind::InvalidIssuer => JwtError::InvalidIssuer,
        _ => JwtError::ValidationError(e.to_string()),
    })?;

    Ok(decoded.claims)
}

fn validate_typed(token: &str, secret: &str, expected: TokenType) -> Result<Claims, JwtError> {
    let claims = validate_token(token, secret)?;

    if claims.token_type != expected {
        return Err(JwtError::ValidationError(format!(
            "Expected {} token, got {} token",
            expected.label(),
            claims.token_type.label()
        )));
    }

    Ok(claims)
}

/// Validates a token that must be an access token
pub fn validate_access_token(token: &str, secret: &str) -> Result<Claims, JwtError> {
    validate_typed(token, secret, TokenType::Access)
}

/// Validates a token that must be a refresh token
pub fn validate_refresh_token(token: &str, secret: &str) -> Result<Claims, JwtError> {
    validate_typed(token, secret, TokenType::Refresh)
}

/// Mints a new access token from a valid refresh token
pub fn refresh_access_token(refresh_token: &str, secret: &str) -> Result<String, JwtError> {
    let refresh_claims = validate_refresh_token(refresh_token, secret)?;

    create_token(&Claims::new(refresh_claims.sub, TokenType::Access), secret)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret-key-at-least-32-bytes-long";

    #[test]
    fn test_lifetimes_per_type() {
        assert_eq!(TokenType::Access.default_expiration(), Duration::hours(24));
        assert_eq!(TokenType::Refresh.default_expiration(), Duration::days(30));
    }

    #[test]
    fn test_claims_carry_subject_and_issuer() {
        let user_id = Uuid::new_v4();
        let claims = Claims::new(user_id, TokenType::Access);

        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.iss, "taskboard");
        assert!(!claims.is_expired());
    }

    #[test]
    fn test_sign_then_validate() {
        let user_id = Uuid::new_v4();
        let token = create_token(&Claims::new(user_id, TokenType::Access), SECRET).expect("sign");

        let claims = validate_token(&token, SECRET).expect("validate");
        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.token_type, TokenType::Access);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token =
            create_token(&Claims::new(Uuid::new_v4(), TokenType::Access), SECRET).expect("sign");

        assert!(validate_token(&token, "a-completely-different-secret-key").is_err());
    }

    #[test]
    fn test_expired_token_rejected() {
        let stale =
            Claims::with_expiration(Uuid::new_v4(), TokenType::Access, Duration::seconds(-120));
        let token = create_token(&stale, SECRET).expect("sign");

        assert!(matches!(
            validate_token(&token, SECRET),
            Err(JwtError::Expired)
        ));
    }

    #[test]
    fn test_token_types_are_not_interchangeable() {
        let refresh =
            create_token(&Claims::new(Uuid::new_v4(), TokenType::Refresh), SECRET).expect("sign");

        assert!(validate_access_token(&refresh, SECRET).is_err());
        assert!(validate_refresh_token(&refresh, SECRET).is_ok());
    }

    #[test]
    fn test_refresh_mints_valid_access_token() {
        let user_id = Uuid::new_v4();
        let refresh =
            create_token(&Claims::new(user_id, TokenType::Refresh), SECRET).expect("sign");

        let access = refresh_access_token(&refresh, SECRET).expect("refresh");
        let claims = validate_access_token(&access, SECRET).expect("validate");
        assert_eq!(claims.sub, user_id);
    }

    #[test]
    fn test_access_token_cannot_refresh() {
        let access =
            create_token(&Claims::new(Uuid::new_v4(), TokenType::Access), SECRET).expect("sign");

        assert!(refresh_access_token(&access, SECRET).is_err());
    }
}
