/// Project membership model and role-based access control
///
/// Memberships are the join table between users and projects, carrying the
/// member's role. A user belongs to a project at most once (composite
/// primary key), and every project has exactly one `owner` row.
///
/// # Schema
///
/// ```sql
/// CREATE TYPE member_role AS ENUM ('owner', 'admin', 'member');
///
/// CREATE TABLE project_members (
///     project_id UUID NOT NULL REFERENCES projects(id) ON DELETE CASCADE,
///     user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     role member_role NOT NULL DEFAULT 'member',
///     joined_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     PRIMARY KEY (project_id, user_id)
/// );
/// ```
///
/// # Roles
///
/// - **owner**: full control; the only role that may delete the project
/// - **admin**: manage project settings and members, delete any task
/// - **member**: create and work on tasks

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgExecutor;
use uuid::Uuid;

/// Role of a user within a project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "member_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MemberRole {
    /// Full control, including project deletion
    Owner,

    /// Can manage the project and its members
    Admin,

    /// Can view the project and work on tasks
    Member,
}

impl MemberRole {
    /// Converts role to string for display
    pub fn as_str(&self) -> &'static str {
        match self {
            MemberRole::Owner => "owner",
            MemberRole::Admin => "admin",
            MemberRole::Member => "member",
        }
    }

    /// Whether this role may update the project or manage its members
    pub fn can_manage_project(&self) -> bool {
        matches!(self, MemberRole::Owner | MemberRole::Admin)
    }
}

impl Default for MemberRole {
    fn default() -> Self {
        MemberRole::Member
    }
}

impl std::fmt::Display for MemberRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Membership row linking a user to a project with a role
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ProjectMember {
    /// Project ID
    pub project_id: Uuid,

    /// User ID
    pub user_id: Uuid,

    /// Role within the project
    pub role: MemberRole,

    /// When the user joined the project
    pub joined_at: DateTime<Utc>,
}

/// A membership row joined with the member's public user fields
///
/// Returned by project detail responses so clients can render the roster
/// without extra lookups.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct MemberWithUser {
    /// User ID
    pub user_id: Uuid,

    /// Role within the project
    pub role: MemberRole,

    /// When the user joined
    pub joined_at: DateTime<Utc>,

    /// Member's email
    pub email: String,

    /// Member's display name
    pub full_name: Option<String>,

    /// Member's avatar URL
    pub avatar_url: Option<String>,
}

impl ProjectMember {
    /// Inserts a membership row
    ///
    /// # Errors
    ///
    /// Fails with a unique-constraint violation if the user is already a
    /// member of the project.
    pub async fn create(
        db: impl PgExecutor<'_>,
        project_id: Uuid,
        user_id: Uuid,
        role: MemberRole,
    ) -> Result<Self, sqlx::Error> {
        let member = sqlx::query_as::<_, ProjectMember>(
            r#"
            INSERT INTO project_members (project_id, user_id, role)
            VALUES ($1, $2, $3)
            RETURNING project_id, user_id, role, joined_at
            "#,
        )
        .bind(project_id)
        .bind(user_id)
        .bind(role)
        .fetch_one(db)
        .await?;

        Ok(member)
    }

    /// Finds a membership row for a user in a project
    pub async fn find(
        db: impl PgExecutor<'_>,
        project_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<Self>, sqlx::Error> {
        let member = sqlx::query_as::<_, ProjectMember>(
            r#"
            SELECT project_id, user_id, role, joined_at
            FROM project_members
            WHERE project_id = $1 AND user_id = $2
            "#,
        )
        .bind(project_id)
        .bind(user_id)
        .fetch_optional(db)
        .await?;

        Ok(member)
    }

    /// Checks whether a user is a member of a project (any role)
    pub async fn exists(
        db: impl PgExecutor<'_>,
        project_id: Uuid,
        user_id: Uuid,
    ) -> Result<bool, sqlx::Error> {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM project_members
                WHERE project_id = $1 AND user_id = $2
            )
            "#,
        )
        .bind(project_id)
        .bind(user_id)
        .fetch_one(db)
        .await?;

        Ok(exists)
    }

    /// Deletes a membership row
    ///
    /// Returns false if no such membership existed. Tasks created by or
    /// assigned to the removed member are left untouched.
    pub async fn delete(
        db: impl PgExecutor<'_>,
        project_id: Uuid,
        user_id: Uuid,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM project_members WHERE project_id = $1 AND user_id = $2",
        )
        .bind(project_id)
        .bind(user_id)
        .execute(db)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Lists a project's members with their public user fields, in join order
    pub async fn list_with_users(
        db: impl PgExecutor<'_>,
        project_id: Uuid,
    ) -> Result<Vec<MemberWithUser>, sqlx::Error> {
        let members = sqlx::query_as::<_, MemberWithUser>(
            r#"
            SELECT pm.user_id, pm.role, pm.joined_at, u.email, u.full_name, u.avatar_url
            FROM project_members pm
            INNER JOIN users u ON u.id = pm.user_id
            WHERE pm.project_id = $1
            ORDER BY pm.joined_at ASC
            "#,
        )
        .bind(project_id)
        .fetch_all(db)
        .await?;

        Ok(members)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_member_role_as_str() {
        assert_eq!(MemberRole::Owner.as_str(), "owner");
        assert_eq!(MemberRole::Admin.as_str(), "admin");
        assert_eq!(MemberRole::Member.as_str(), "member");
    }

    #[test]
    fn test_can_manage_project() {
        assert!(MemberRole::Owner.can_manage_project());
        assert!(MemberRole::Admin.can_manage_project());
        assert!(!MemberRole::Member.can_manage_project());
    }

    #[test]
    fn test_default_role_is_member() {
        assert_eq!(MemberRole::default(), MemberRole::Member);
    }

    #[test]
    fn test_role_serde_lowercase() {
        assert_eq!(serde_json::to_string(&MemberRole::Owner).unwrap(), r#""owner""#);
        let role: MemberRole = serde_json::from_str(r#""admin""#).unwrap();
        assert_eq!(role, MemberRole::Admin);
    }
}
