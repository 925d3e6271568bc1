/// Project lifecycle and member management
///
/// One function per operation. Mutations run check-then-act inside a
/// single transaction: the membership row read by the access check cannot
/// be removed out from under the write it authorizes.

use sqlx::PgPool;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::access;
use super::error::BoardError;
use crate::models::membership::{MemberRole, MemberWithUser, ProjectMember};
use crate::models::project::{CreateProject, Project, UpdateProject};
use crate::models::user::{User, UserSummary};

/// A project together with its owner and member roster
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectDetail {
    /// The project row
    #[serde(flatten)]
    pub project: Project,

    /// Owner's public user fields
    pub owner: UserSummary,

    /// Member roster in join order, with roles
    pub members: Vec<MemberWithUser>,
}

/// Creates a project and its owner membership atomically
///
/// The project row and the owner's `owner`-role membership row are written
/// in one transaction: both land or neither does, so every project starts
/// with exactly one owner member.
pub async fn create_project(
    pool: &PgPool,
    owner_id: Uuid,
    data: CreateProject,
) -> Result<Project, BoardError> {
    let mut tx = pool.begin().await?;

    let project = Project::create(&mut *tx, owner_id, data).await?;
    ProjectMember::create(&mut *tx, project.id, owner_id, MemberRole::Owner).await?;

    tx.commit().await?;

    tracing::info!(project_id = %project.id, owner_id = %owner_id, "Project created");
    Ok(project)
}

/// Lists the projects a user is a member of, newest first
pub async fn list_projects(pool: &PgPool, user_id: Uuid) -> Result<Vec<Project>, BoardError> {
    Ok(Project::list_for_member(pool, user_id).await?)
}

/// Fetches a project with owner and member roster
///
/// Requires the requester to be a member. A missing project is reported
/// before the membership check runs.
pub async fn get_project(
    pool: &PgPool,
    project_id: Uuid,
    user_id: Uuid,
) -> Result<ProjectDetail, BoardError> {
    let project = Project::find_by_id(pool, project_id)
        .await?
        .ok_or(BoardError::ProjectNotFound)?;

    access::require_member(pool, project_id, user_id).await?;

    let owner = UserSummary::find_by_id(pool, project.owner_id)
        .await?
        .ok_or(BoardError::UserNotFound)?;
    let members = ProjectMember::list_with_users(pool, project_id).await?;

    Ok(ProjectDetail {
        project,
        owner,
        members,
    })
}

/// Updates a project's name, description, or color
///
/// Requires an owner or admin role. The owner itself cannot be changed
/// through this operation.
pub async fn update_project(
    pool: &PgPool,
    project_id: Uuid,
    user_id: Uuid,
    data: UpdateProject,
) -> Result<Project, BoardError> {
    let mut tx = pool.begin().await?;

    Project::find_by_id(&mut *tx, project_id)
        .await?
        .ok_or(BoardError::ProjectNotFound)?;

    access::require_manager(&mut *tx, project_id, user_id).await?;

    let updated = Project::update(&mut *tx, project_id, data)
        .await?
        .ok_or(BoardError::ProjectNotFound)?;

    tx.commit().await?;
    Ok(updated)
}

/// Deletes a project and everything under it
///
/// Owner only; admins may manage a project but not destroy it. Members,
/// tasks, and comments go with it via the schema's cascade rules, so no
/// reader can observe a child outliving the project row.
pub async fn delete_project(
    pool: &PgPool,
    project_id: Uuid,
    user_id: Uuid,
) -> Result<(), BoardError> {
    let mut tx = pool.begin().await?;

    let project = Project::find_by_id(&mut *tx, project_id)
        .await?
        .ok_or(BoardError::ProjectNotFound)?;

    access::require_project_owner(&project, user_id)?;

    Project::delete(&mut *tx, project_id).await?;

    tx.commit().await?;

    tracing::info!(project_id = %project_id, "Project deleted");
    Ok(())
}

/// Adds a member to a project by email
///
/// Requires an owner or admin role. The email must resolve to a registered
/// user, the user must not already be a member, and the `owner` role can
/// never be granted here; it exists only through project creation.
pub async fn add_member(
    pool: &PgPool,
    project_id: Uuid,
    requester_id: Uuid,
    email: &str,
    role: MemberRole,
) -> Result<MemberWithUser, BoardError> {
    let mut tx = pool.begin().await?;

    Project::find_by_id(&mut *tx, project_id)
        .await?
        .ok_or(BoardError::ProjectNotFound)?;

    access::require_manager(&mut *tx, project_id, requester_id).await?;

    if role == MemberRole::Owner {
        return Err(BoardError::OwnerRoleReserved);
    }

    let user = User::find_by_email(&mut *tx, email)
        .await?
        .ok_or(BoardError::UserNotFound)?;

    if ProjectMember::exists(&mut *tx, project_id, user.id).await? {
        return Err(BoardError::AlreadyMember);
    }

    let member = ProjectMember::create(&mut *tx, project_id, user.id, role).await?;

    tx.commit().await?;

    tracing::info!(
        project_id = %project_id,
        user_id = %user.id,
        role = member.role.as_str(),
        "Member added"
    );

    Ok(MemberWithUser {
        user_id: user.id,
        role: member.role,
        joined_at: member.joined_at,
        email: user.email,
        full_name: user.full_name,
        avatar_url: user.avatar_url,
    })
}

/// Removes a member from a project
///
/// Requires an owner or admin role. The project owner can never be removed,
/// no matter who asks. Tasks the member created or was assigned remain
/// untouched.
pub async fn remove_member(
    pool: &PgPool,
    project_id: Uuid,
    requester_id: Uuid,
    target_user_id: Uuid,
) -> Result<(), BoardError> {
    let mut tx = pool.begin().await?;

    let project = Project::find_by_id(&mut *tx, project_id)
        .await?
        .ok_or(BoardError::ProjectNotFound)?;

    access::require_manager(&mut *tx, project_id, requester_id).await?;

    if project.owner_id == target_user_id {
        return Err(BoardError::CannotRemoveOwner);
    }

    let removed = ProjectMember::delete(&mut *tx, project_id, target_user_id).await?;
    if !removed {
        return Err(BoardError::MemberNotFound);
    }

    tx.commit().await?;

    tracing::info!(project_id = %project_id, user_id = %target_user_id, "Member removed");
    Ok(())
}
