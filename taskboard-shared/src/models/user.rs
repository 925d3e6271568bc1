/// User model and database operations
///
/// Users register once and can then own or join any number of projects via
/// the membership table. Passwords are stored as Argon2id hashes, never in
/// plaintext.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE users (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     email VARCHAR(255) NOT NULL UNIQUE,
///     password_hash VARCHAR(255) NOT NULL,
///     full_name VARCHAR(255),
///     avatar_url VARCHAR(500),
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use taskboard_shared::models::user::{User, CreateUser};
/// use sqlx::PgPool;
///
/// # async fn example(pool: PgPool) -> Result<(), sqlx::Error> {
/// let user = User::create(&pool, CreateUser {
///     email: "user@example.com".to_string(),
///     password_hash: "$argon2id$...".to_string(),
///     full_name: Some("Jane Doe".to_string()),
///     avatar_url: None,
/// }).await?;
///
/// let found = User::find_by_email(&pool, "user@example.com").await?;
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgExecutor;
use uuid::Uuid;

/// User model representing an account
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Unique user ID (UUID v4)
    pub id: Uuid,

    /// Email address, unique across all users
    pub email: String,

    /// Argon2id password hash (PHC string format)
    #[serde(skip_serializing)]
    pub password_hash: String,

    /// Optional display name
    pub full_name: Option<String>,

    /// Optional avatar/profile picture URL
    pub avatar_url: Option<String>,

    /// When the account was created
    pub created_at: DateTime<Utc>,

    /// When the account was last updated
    pub updated_at: DateTime<Utc>,
}

/// The public subset of user fields embedded in API responses
///
/// Used wherever another entity references a user (project owner, task
/// assignee/creator, comment author). Never carries the password hash.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct UserSummary {
    /// User ID
    pub id: Uuid,

    /// Email address
    pub email: String,

    /// Optional display name
    pub full_name: Option<String>,

    /// Optional avatar URL
    pub avatar_url: Option<String>,
}

/// Input for creating a new user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    /// Email address
    pub email: String,

    /// Argon2id password hash (NOT a plaintext password)
    pub password_hash: String,

    /// Optional display name
    pub full_name: Option<String>,

    /// Optional avatar URL
    pub avatar_url: Option<String>,
}

/// Input for updating profile fields
///
/// Only non-None fields are written; `Some(None)` clears a field.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProfile {
    /// New display name (use Some(None) to clear)
    pub full_name: Option<Option<String>>,

    /// New avatar URL (use Some(None) to clear)
    pub avatar_url: Option<Option<String>>,
}

impl User {
    /// Creates a new user
    ///
    /// # Errors
    ///
    /// Returns an error if the email already exists (unique constraint) or
    /// the database operation fails.
    pub async fn create(db: impl PgExecutor<'_>, data: CreateUser) -> Result<Self, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, password_hash, full_name, avatar_url)
            VALUES ($1, $2, $3, $4)
            RETURNING id, email, password_hash, full_name, avatar_url, created_at, updated_at
            "#,
        )
        .bind(data.email)
        .bind(data.password_hash)
        .bind(data.full_name)
        .bind(data.avatar_url)
        .fetch_one(db)
        .await?;

        Ok(user)
    }

    /// Finds a user by ID
    pub async fn find_by_id(
        db: impl PgExecutor<'_>,
        id: Uuid,
    ) -> Result<Option<Self>, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, password_hash, full_name, avatar_url, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await?;

        Ok(user)
    }

    /// Finds a user by email address
    pub async fn find_by_email(
        db: impl PgExecutor<'_>,
        email: &str,
    ) -> Result<Option<Self>, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, password_hash, full_name, avatar_url, created_at, updated_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(db)
        .await?;

        Ok(user)
    }

    /// Updates profile fields (display name, avatar)
    ///
    /// Only fields present in `data` are written; the `updated_at` timestamp
    /// is always refreshed.
    pub async fn update_profile(
        db: impl PgExecutor<'_>,
        id: Uuid,
        data: UpdateProfile,
    ) -> Result<Option<Self>, sqlx::Error> {
        let mut query = String::from("UPDATE users SET updated_at = NOW()");
        let mut bind_count = 1;

        if data.full_name.is_some() {
            bind_count += 1;
            query.push_str(&format!(", full_name = ${}", bind_count));
        }
        if data.avatar_url.is_some() {
            bind_count += 1;
            query.push_str(&format!(", avatar_url = ${}", bind_count));
        }

        query.push_str(
            " WHERE id = $1 RETURNING id, email, password_hash, full_name, avatar_url, created_at, updated_at",
        );

        let mut q = sqlx::query_as::<_, User>(&query).bind(id);

        if let Some(full_name) = data.full_name {
            q = q.bind(full_name);
        }
        if let Some(avatar_url) = data.avatar_url {
            q = q.bind(avatar_url);
        }

        let user = q.fetch_optional(db).await?;

        Ok(user)
    }

    /// Returns the public view of this user
    pub fn summary(&self) -> UserSummary {
        UserSummary {
            id: self.id,
            email: self.email.clone(),
            full_name: self.full_name.clone(),
            avatar_url: self.avatar_url.clone(),
        }
    }
}

impl UserSummary {
    /// Finds the public view of a user by ID
    pub async fn find_by_id(
        db: impl PgExecutor<'_>,
        id: Uuid,
    ) -> Result<Option<Self>, sqlx::Error> {
        let summary = sqlx::query_as::<_, UserSummary>(
            r#"
            SELECT id, email, full_name, avatar_url
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await?;

        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_drops_password_hash() {
        let user = User {
            id: Uuid::new_v4(),
            email: "test@example.com".to_string(),
            password_hash: "$argon2id$secret".to_string(),
            full_name: Some("Test User".to_string()),
            avatar_url: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let summary = user.summary();
        assert_eq!(summary.id, user.id);
        assert_eq!(summary.email, "test@example.com");

        let json = serde_json::to_value(&summary).unwrap();
        assert!(json.get("password_hash").is_none());
    }

    #[test]
    fn test_user_serialization_skips_password_hash() {
        let user = User {
            id: Uuid::new_v4(),
            email: "test@example.com".to_string(),
            password_hash: "$argon2id$secret".to_string(),
            full_name: None,
            avatar_url: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["email"], "test@example.com");
    }

    #[test]
    fn test_update_profile_default() {
        let update = UpdateProfile::default();
        assert!(update.full_name.is_none());
        assert!(update.avatar_url.is_none());
    }
}
