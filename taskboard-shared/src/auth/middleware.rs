/// Authentication context for request handling
///
/// The API server's JWT middleware validates the Bearer token on each
/// request and stores an [`AuthContext`] in the request extensions.
/// Handlers extract it with axum's `Extension` extractor and pass the
/// user ID on to the board core, which treats it as trusted.
///
/// # Example
///
/// ```
/// use axum::Extension;
/// use taskboard_shared::auth::middleware::AuthContext;
///
/// async fn handler(Extension(auth): Extension<AuthContext>) -> String {
///     format!("User: {}", auth.user_id)
/// }
/// ```

use axum::http::{header, HeaderMap};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Authentication context attached to each authenticated request
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AuthContext {
    /// Authenticated user ID
    pub user_id: Uuid,
}

impl AuthContext {
    /// Creates an auth context from validated JWT claims
    pub fn from_jwt(user_id: Uuid) -> Self {
        Self { user_id }
    }
}

/// Error type for authentication failures
///
/// These are raised by the transport layer before the board core ever
/// runs; the API maps them to 401/400 responses.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// No Authorization header was sent
    #[error("Missing credentials")]
    MissingCredentials,

    /// The Authorization header was not a Bearer token
    #[error("Invalid authorization header: {0}")]
    InvalidFormat(String),

    /// Token failed validation
    #[error("Invalid token: {0}")]
    InvalidToken(String),
}

/// Extracts the Bearer token from a request's headers
///
/// # Errors
///
/// Returns `MissingCredentials` when no Authorization header is present
/// and `InvalidFormat` when the header is not a Bearer scheme.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let auth_header = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(AuthError::MissingCredentials)?;

    auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AuthError::InvalidFormat("Expected Bearer token".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_bearer_token_extraction() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Bearer abc.def.ghi"),
        );

        assert_eq!(bearer_token(&headers).unwrap(), "abc.def.ghi");
    }

    #[test]
    fn test_missing_header() {
        let headers = HeaderMap::new();
        assert!(matches!(
            bearer_token(&headers),
            Err(AuthError::MissingCredentials)
        ));
    }

    #[test]
    fn test_wrong_scheme() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Basic dXNlcjpwYXNz"),
        );

        assert!(matches!(
            bearer_token(&headers),
            Err(AuthError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_auth_context_from_jwt() {
        let user_id = Uuid::new_v4();
        let ctx = AuthContext::from_jwt(user_id);
        assert_eq!(ctx.user_id, user_id);
    }
}
