/// Access control decision functions
///
/// Every board operation funnels its authorization through here. The
/// database-backed checks (`require_member`, `require_manager`) take an
/// executor so callers can run them inside the same transaction as the
/// write they guard; the per-entity rules (`can_delete_task`,
/// `can_delete_comment`, `require_project_owner`) are pure functions over
/// rows the caller has already loaded.
///
/// # Decision table
///
/// | Action                    | Rule                                         |
/// |---------------------------|----------------------------------------------|
/// | view project/task/comment | any membership row                           |
/// | update project, members   | role owner or admin                          |
/// | delete project            | project.owner_id only                        |
/// | delete task               | creator, assignee, project owner, or admin   |
/// | delete comment            | author only (no role escalation)             |
/// | remove member             | manager, and never the project owner         |

use sqlx::PgExecutor;
use uuid::Uuid;

use super::error::BoardError;
use crate::models::comment::Comment;
use crate::models::membership::{MemberRole, ProjectMember};
use crate::models::project::Project;
use crate::models::task::Task;

/// Checks whether a user may read a project and everything under it
pub async fn can_view(
    db: impl PgExecutor<'_>,
    project_id: Uuid,
    user_id: Uuid,
) -> Result<bool, BoardError> {
    Ok(ProjectMember::exists(db, project_id, user_id).await?)
}

/// Requires any membership in the project, returning the row
///
/// # Errors
///
/// Returns `BoardError::NotMember` if the user has no membership row.
pub async fn require_member(
    db: impl PgExecutor<'_>,
    project_id: Uuid,
    user_id: Uuid,
) -> Result<ProjectMember, BoardError> {
    ProjectMember::find(db, project_id, user_id)
        .await?
        .ok_or(BoardError::NotMember)
}

/// Requires a role that can manage the project (owner or admin)
///
/// # Errors
///
/// Returns `NotMember` for non-members and `InsufficientRole` for plain
/// members.
pub async fn require_manager(
    db: impl PgExecutor<'_>,
    project_id: Uuid,
    user_id: Uuid,
) -> Result<ProjectMember, BoardError> {
    let member = require_member(db, project_id, user_id).await?;

    if !member.role.can_manage_project() {
        return Err(BoardError::InsufficientRole {
            required: MemberRole::Admin,
            actual: member.role,
        });
    }

    Ok(member)
}

/// Requires that the user is the project's owner
///
/// Stricter than `require_manager`: admins do not pass. This gate is keyed
/// on `projects.owner_id`, not the membership role, so it holds even if the
/// two ever disagreed.
pub fn require_project_owner(project: &Project, user_id: Uuid) -> Result<(), BoardError> {
    if project.owner_id != user_id {
        return Err(BoardError::NotProjectOwner);
    }

    Ok(())
}

/// Whether a user may delete a task
///
/// True for the task's creator, its assignee, the project's owner, or any
/// admin. A plain member who is neither creator nor assignee may not.
pub fn can_delete_task(user_id: Uuid, task: &Task, project: &Project, role: MemberRole) -> bool {
    task.created_by == user_id
        || task.assignee_id == Some(user_id)
        || project.owner_id == user_id
        || role == MemberRole::Admin
}

/// Whether a user may delete a comment
///
/// Author only. Deliberately no role escalation: not even the project owner
/// can delete someone else's comment.
pub fn can_delete_comment(user_id: Uuid, comment: &Comment) -> bool {
    comment.user_id == user_id
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::task::{TaskPriority, TaskStatus};
    use chrono::Utc;

    fn sample_project(owner_id: Uuid) -> Project {
        Project {
            id: Uuid::new_v4(),
            name: "Launch".to_string(),
            description: None,
            color: "#3B82F6".to_string(),
            owner_id,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn sample_task(project_id: Uuid, created_by: Uuid, assignee_id: Option<Uuid>) -> Task {
        Task {
            id: Uuid::new_v4(),
            title: "Write copy".to_string(),
            description: None,
            status: TaskStatus::Todo,
            priority: TaskPriority::Medium,
            position: 1,
            due_date: None,
            project_id,
            assignee_id,
            created_by,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_creator_can_delete_task() {
        let owner = Uuid::new_v4();
        let creator = Uuid::new_v4();
        let project = sample_project(owner);
        let task = sample_task(project.id, creator, None);

        assert!(can_delete_task(creator, &task, &project, MemberRole::Member));
    }

    #[test]
    fn test_assignee_can_delete_task() {
        let owner = Uuid::new_v4();
        let assignee = Uuid::new_v4();
        let project = sample_project(owner);
        let task = sample_task(project.id, Uuid::new_v4(), Some(assignee));

        assert!(can_delete_task(assignee, &task, &project, MemberRole::Member));
    }

    #[test]
    fn test_owner_and_admin_can_delete_task() {
        let owner = Uuid::new_v4();
        let admin = Uuid::new_v4();
        let project = sample_project(owner);
        let task = sample_task(project.id, Uuid::new_v4(), None);

        assert!(can_delete_task(owner, &task, &project, MemberRole::Owner));
        assert!(can_delete_task(admin, &task, &project, MemberRole::Admin));
    }

    #[test]
    fn test_uninvolved_member_cannot_delete_task() {
        let project = sample_project(Uuid::new_v4());
        let task = sample_task(project.id, Uuid::new_v4(), Some(Uuid::new_v4()));
        let bystander = Uuid::new_v4();

        assert!(!can_delete_task(bystander, &task, &project, MemberRole::Member));
    }

    #[test]
    fn test_comment_delete_is_author_only() {
        let author = Uuid::new_v4();
        let comment = Comment {
            id: Uuid::new_v4(),
            content: "Looks good".to_string(),
            task_id: Uuid::new_v4(),
            user_id: author,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        assert!(can_delete_comment(author, &comment));
        // Even a project owner is just "someone else" here.
        assert!(!can_delete_comment(Uuid::new_v4(), &comment));
    }

    #[test]
    fn test_require_project_owner() {
        let owner = Uuid::new_v4();
        let project = sample_project(owner);

        assert!(require_project_owner(&project, owner).is_ok());
        assert!(matches!(
            require_project_owner(&project, Uuid::new_v4()),
            Err(BoardError::NotProjectOwner)
        ));
    }
}
