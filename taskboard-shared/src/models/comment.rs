/// Comment model and database operations
///
/// Comments form a flat, append-only thread under a task. They are
/// immutable once written; the only mutation is deletion, and only by the
/// author.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE comments (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     content TEXT NOT NULL,
///     task_id UUID NOT NULL REFERENCES tasks(id) ON DELETE CASCADE,
///     user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgExecutor;
use uuid::Uuid;

/// Comment model
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Comment {
    /// Unique comment ID (UUID v4)
    pub id: Uuid,

    /// Comment text (non-empty)
    pub content: String,

    /// Task the comment belongs to
    pub task_id: Uuid,

    /// Author
    pub user_id: Uuid,

    /// When the comment was written
    pub created_at: DateTime<Utc>,

    /// When the comment row was last touched
    pub updated_at: DateTime<Utc>,
}

/// A comment row joined with the author's public user fields
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct CommentWithAuthor {
    /// Comment ID
    pub id: Uuid,

    /// Comment text
    pub content: String,

    /// Task the comment belongs to
    pub task_id: Uuid,

    /// Author
    pub user_id: Uuid,

    /// When the comment was written
    pub created_at: DateTime<Utc>,

    /// Author's email
    pub author_email: String,

    /// Author's display name
    pub author_full_name: Option<String>,

    /// Author's avatar URL
    pub author_avatar_url: Option<String>,
}

impl Comment {
    /// Inserts a comment
    pub async fn create(
        db: impl PgExecutor<'_>,
        task_id: Uuid,
        user_id: Uuid,
        content: &str,
    ) -> Result<Self, sqlx::Error> {
        let comment = sqlx::query_as::<_, Comment>(
            r#"
            INSERT INTO comments (task_id, user_id, content)
            VALUES ($1, $2, $3)
            RETURNING id, content, task_id, user_id, created_at, updated_at
            "#,
        )
        .bind(task_id)
        .bind(user_id)
        .bind(content)
        .fetch_one(db)
        .await?;

        Ok(comment)
    }

    /// Finds a comment by ID
    pub async fn find_by_id(
        db: impl PgExecutor<'_>,
        id: Uuid,
    ) -> Result<Option<Self>, sqlx::Error> {
        let comment = sqlx::query_as::<_, Comment>(
            r#"
            SELECT id, content, task_id, user_id, created_at, updated_at
            FROM comments
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await?;

        Ok(comment)
    }

    /// Finds a comment with the author's user fields
    pub async fn find_with_author(
        db: impl PgExecutor<'_>,
        id: Uuid,
    ) -> Result<Option<CommentWithAuthor>, sqlx::Error> {
        let comment = sqlx::query_as::<_, CommentWithAuthor>(
            r#"
            SELECT c.id, c.content, c.task_id, c.user_id, c.created_at,
                   u.email AS author_email, u.full_name AS author_full_name,
                   u.avatar_url AS author_avatar_url
            FROM comments c
            INNER JOIN users u ON u.id = c.user_id
            WHERE c.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await?;

        Ok(comment)
    }

    /// Lists a task's comments with author fields, oldest first
    pub async fn list_with_authors(
        db: impl PgExecutor<'_>,
        task_id: Uuid,
    ) -> Result<Vec<CommentWithAuthor>, sqlx::Error> {
        let comments = sqlx::query_as::<_, CommentWithAuthor>(
            r#"
            SELECT c.id, c.content, c.task_id, c.user_id, c.created_at,
                   u.email AS author_email, u.full_name AS author_full_name,
                   u.avatar_url AS author_avatar_url
            FROM comments c
            INNER JOIN users u ON u.id = c.user_id
            WHERE c.task_id = $1
            ORDER BY c.created_at ASC
            "#,
        )
        .bind(task_id)
        .fetch_all(db)
        .await?;

        Ok(comments)
    }

    /// Deletes a comment
    pub async fn delete(db: impl PgExecutor<'_>, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
