/// Password hashing
///
/// Credentials are stored as Argon2id PHC strings. The parameters (memory
/// cost, passes, lanes) are embedded in each hash alongside its salt, so
/// stored hashes keep verifying even if the defaults below change later.
///
/// # Example
///
/// ```
/// use taskboard_shared::auth::password::{hash_password, verify_password};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let hash = hash_password("super_secret_password_123")?;
///
/// assert!(verify_password("super_secret_password_123", &hash)?);
/// assert!(!verify_password("wrong_password", &hash)?);
/// # Ok(())
/// # }
/// ```

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};

/// Memory cost in KiB (64 MiB)
const M_COST: u32 = 65536;

/// Number of passes over memory
const T_COST: u32 = 3;

/// Degree of parallelism
const P_COST: u32 = 4;

/// Hash output length in bytes
const OUTPUT_LEN: usize = 32;

/// Error type for password hashing operations
#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    /// Failed to hash password
    #[error("Failed to hash password: {0}")]
    HashError(String),

    /// Failed to verify password
    #[error("Failed to verify password: {0}")]
    VerifyError(String),

    /// Invalid password hash format
    #[error("Invalid password hash format: {0}")]
    InvalidHash(String),
}

fn hasher() -> Result<Argon2<'static>, PasswordError> {
    let params = Params::new(M_COST, T_COST, P_COST, Some(OUTPUT_LEN))
        .map_err(|e| PasswordError::HashError(format!("Bad Argon2 parameters: {}", e)))?;

    Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
}

/// Hashes a password with a fresh random salt
///
/// The result is a PHC string such as
/// `$argon2id$v=19$m=65536,t=3,p=4$...$...`, ready to store.
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);

    hasher()?
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| PasswordError::HashError(format!("Hashing failed: {}", e)))
}

/// Checks a password against a stored PHC string
///
/// A wrong password is `Ok(false)`; only a hash that cannot be parsed or a
/// backend failure is an error. The parameters come from the hash itself,
/// not from the constants above.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, PasswordError> {
    let parsed = PasswordHash::new(hash)
        .map_err(|e| PasswordError::InvalidHash(format!("Unparseable hash: {}", e)))?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(PasswordError::VerifyError(e.to_string())),
    }
}

/// Minimum acceptable password: 8+ characters mixing case and a digit
pub fn validate_password_strength(password: &str) -> Result<(), String> {
    if password.len() < 8 {
        return Err("Password must be at least 8 characters long".to_string());
    }

    if !password.chars().any(|c| c.is_uppercase()) {
        return Err("Password must contain at least one uppercase letter".to_string());
    }

    if !password.chars().any(|c| c.is_lowercase()) {
        return Err("Password must contain at least one lowercase letter".to_string());
    }

    if !password.chars().any(|c| c.is_numeric()) {
        return Err("Password must contain at least one digit".to_string());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_embeds_parameters() {
        let hash = hash_password("test_password_123").expect("hash");

        assert!(hash.starts_with("$argon2id$"));
        for param in ["v=19", "m=65536", "t=3", "p=4"] {
            assert!(hash.contains(param), "hash missing {param}: {hash}");
        }
    }

    #[test]
    fn test_same_password_different_salts() {
        let one = hash_password("same_password").expect("hash");
        let two = hash_password("same_password").expect("hash");
        assert_ne!(one, two);
    }

    #[test]
    fn test_verify_roundtrip() {
        let hash = hash_password("correct_password").expect("hash");

        assert!(verify_password("correct_password", &hash).expect("verify"));
        assert!(!verify_password("wrong_password", &hash).expect("verify"));
    }

    #[test]
    fn test_garbage_hash_is_an_error() {
        assert!(matches!(
            verify_password("password", "not-a-valid-hash"),
            Err(PasswordError::InvalidHash(_))
        ));
    }

    #[test]
    fn test_strength_rules() {
        assert!(validate_password_strength("MyPassw0rd").is_ok());
        assert!(validate_password_strength("Sh0rt").is_err());
        assert!(validate_password_strength("alllowercase1").is_err());
        assert!(validate_password_strength("ALLUPPERCASE1").is_err());
        assert!(validate_password_strength("NoDigitsHere").is_err());
    }
}
