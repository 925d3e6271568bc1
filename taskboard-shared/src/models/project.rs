/// Project model and database operations
///
/// A project is a named workspace with exactly one owner and a member
/// roster (see `membership`). The owner is recorded twice: as `owner_id`
/// here and as a membership row with role `owner`; the board core keeps
/// the two in sync by creating both in one transaction and refusing to
/// remove the owner's membership.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE projects (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     name VARCHAR(255) NOT NULL,
///     description TEXT,
///     color VARCHAR(7) NOT NULL DEFAULT '#3B82F6',
///     owner_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     CONSTRAINT projects_color_check CHECK (color ~* '^#[0-9A-F]{6}$')
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgExecutor;
use uuid::Uuid;

/// Default accent color assigned when a project is created without one
pub const DEFAULT_COLOR: &str = "#3B82F6";

/// Project model representing a workspace
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Project {
    /// Unique project ID (UUID v4)
    pub id: Uuid,

    /// Project name
    pub name: String,

    /// Optional description
    pub description: Option<String>,

    /// Accent color as a `#RRGGBB` hex code
    pub color: String,

    /// User who owns the project
    pub owner_id: Uuid,

    /// When the project was created
    pub created_at: DateTime<Utc>,

    /// When the project was last updated
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new project
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProject {
    /// Project name
    pub name: String,

    /// Optional description
    pub description: Option<String>,

    /// Accent color; defaults to [`DEFAULT_COLOR`] when absent
    #[serde(default = "default_color")]
    pub color: String,
}

fn default_color() -> String {
    DEFAULT_COLOR.to_string()
}

/// Input for updating an existing project
///
/// Only non-None fields are written. The owner cannot be changed here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProject {
    /// New name
    pub name: Option<String>,

    /// New description (use Some(None) to clear)
    pub description: Option<Option<String>>,

    /// New accent color
    pub color: Option<String>,
}

impl Project {
    /// Creates a new project row
    ///
    /// The board core pairs this with the owner's membership row inside a
    /// transaction; call through `board::projects::create_project` rather
    /// than directly.
    pub async fn create(
        db: impl PgExecutor<'_>,
        owner_id: Uuid,
        data: CreateProject,
    ) -> Result<Self, sqlx::Error> {
        let project = sqlx::query_as::<_, Project>(
            r#"
            INSERT INTO projects (name, description, color, owner_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, description, color, owner_id, created_at, updated_at
            "#,
        )
        .bind(data.name)
        .bind(data.description)
        .bind(data.color)
        .bind(owner_id)
        .fetch_one(db)
        .await?;

        Ok(project)
    }

    /// Finds a project by ID
    pub async fn find_by_id(
        db: impl PgExecutor<'_>,
        id: Uuid,
    ) -> Result<Option<Self>, sqlx::Error> {
        let project = sqlx::query_as::<_, Project>(
            r#"
            SELECT id, name, description, color, owner_id, created_at, updated_at
            FROM projects
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await?;

        Ok(project)
    }

    /// Lists all projects a user is a member of, newest first
    pub async fn list_for_member(
        db: impl PgExecutor<'_>,
        user_id: Uuid,
    ) -> Result<Vec<Self>, sqlx::Error> {
        let projects = sqlx::query_as::<_, Project>(
            r#"
            SELECT p.id, p.name, p.description, p.color, p.owner_id, p.created_at, p.updated_at
            FROM projects p
            INNER JOIN project_members pm ON pm.project_id = p.id
            WHERE pm.user_id = $1
            ORDER BY p.created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(db)
        .await?;

        Ok(projects)
    }

    /// Updates name/description/color
    ///
    /// Only fields present in `data` are written.
    pub async fn update(
        db: impl PgExecutor<'_>,
        id: Uuid,
        data: UpdateProject,
    ) -> Result<Option<Self>, sqlx::Error> {
        let mut query = String::from("UPDATE projects SET updated_at = NOW()");
        let mut bind_count = 1;

        if data.name.is_some() {
            bind_count += 1;
            query.push_str(&format!(", name = ${}", bind_count));
        }
        if data.description.is_some() {
            bind_count += 1;
            query.push_str(&format!(", description = ${}", bind_count));
        }
        if data.color.is_some() {
            bind_count += 1;
            query.push_str(&format!(", color = ${}", bind_count));
        }

        query.push_str(
            " WHERE id = $1 RETURNING id, name, description, color, owner_id, created_at, updated_at",
        );

        let mut q = sqlx::query_as::<_, Project>(&query).bind(id);

        if let Some(name) = data.name {
            q = q.bind(name);
        }
        if let Some(description) = data.description {
            q = q.bind(description);
        }
        if let Some(color) = data.color {
            q = q.bind(color);
        }

        let project = q.fetch_optional(db).await?;

        Ok(project)
    }

    /// Deletes a project
    ///
    /// Cascades to memberships, tasks, and (through tasks) comments via the
    /// schema's ON DELETE CASCADE rules.
    pub async fn delete(db: impl PgExecutor<'_>, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_color() {
        assert_eq!(default_color(), "#3B82F6");
    }

    #[test]
    fn test_create_project_deserializes_with_default_color() {
        let data: CreateProject = serde_json::from_str(r#"{"name": "Launch"}"#).unwrap();
        assert_eq!(data.name, "Launch");
        assert_eq!(data.color, DEFAULT_COLOR);
        assert!(data.description.is_none());
    }

    #[test]
    fn test_update_project_default() {
        let update = UpdateProject::default();
        assert!(update.name.is_none());
        assert!(update.description.is_none());
        assert!(update.color.is_none());
    }
}
