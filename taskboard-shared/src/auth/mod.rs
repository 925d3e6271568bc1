/// Authentication utilities
///
/// The board core itself never verifies credentials; it trusts the user ID
/// handed to it. These modules produce that trusted identity:
///
/// - [`password`]: Argon2id password hashing and verification
/// - [`jwt`]: HS256 access/refresh token generation and validation
/// - [`middleware`]: the authentication context extracted per request
///
/// # Example
///
/// ```no_run
/// use taskboard_shared::auth::password::{hash_password, verify_password};
/// use taskboard_shared::auth::jwt::{create_token, Claims, TokenType};
/// use uuid::Uuid;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let hash = hash_password("user_password")?;
/// assert!(verify_password("user_password", &hash)?);
///
/// let claims = Claims::new(Uuid::new_v4(), TokenType::Access);
/// let token = create_token(&claims, "secret-key-at-least-32-bytes-long")?;
/// # Ok(())
/// # }
/// ```

pub mod jwt;
pub mod middleware;
pub mod password;
