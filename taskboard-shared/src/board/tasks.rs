/// The task board engine
///
/// Owns task creation, editing, Kanban moves, and deletion. Any project
/// member may create and edit tasks; deletion is restricted to the task's
/// creator, its assignee, the project owner, or an admin.
///
/// # Ordering model
///
/// A column is the set of tasks sharing (project, status). `create_task`
/// appends at the end: it reads the column's max position and writes
/// max + 1, which yields 1..N for tasks created sequentially. `move_task`
/// stores the caller's position verbatim and never renumbers siblings, so
/// concurrent moves into one column can produce duplicate positions, and
/// the read side resolves ties by creation time. Plain edits through
/// `update_task` cannot touch the position at all.

use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use super::access;
use super::error::BoardError;
use crate::models::project::Project;
use crate::models::task::{
    CreateTask, Task, TaskPriority, TaskStatus, TaskWithUsers, UpdateTask,
};

/// Input for creating a task
///
/// The position is not part of the input; the engine assigns it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTask {
    /// Task title
    pub title: String,

    /// Optional description
    pub description: Option<String>,

    /// Target column (defaults to todo)
    #[serde(default)]
    pub status: TaskStatus,

    /// Priority (defaults to medium)
    #[serde(default)]
    pub priority: TaskPriority,

    /// Optional assignee
    pub assignee_id: Option<Uuid>,

    /// Optional due date
    pub due_date: Option<chrono::DateTime<chrono::Utc>>,
}

/// Creates a task at the end of its column
///
/// Requires project membership. The new task's position is the column's
/// current maximum plus one (1 for an empty column).
pub async fn create_task(
    pool: &PgPool,
    project_id: Uuid,
    requester_id: Uuid,
    data: NewTask,
) -> Result<Task, BoardError> {
    let mut tx = pool.begin().await?;

    Project::find_by_id(&mut *tx, project_id)
        .await?
        .ok_or(BoardError::ProjectNotFound)?;

    access::require_member(&mut *tx, project_id, requester_id).await?;

    let position = Task::max_position(&mut *tx, project_id, data.status).await? + 1;

    let task = Task::create(
        &mut *tx,
        CreateTask {
            project_id,
            created_by: requester_id,
            position,
            title: data.title,
            description: data.description,
            status: data.status,
            priority: data.priority,
            assignee_id: data.assignee_id,
            due_date: data.due_date,
        },
    )
    .await?;

    tx.commit().await?;

    tracing::debug!(
        task_id = %task.id,
        project_id = %project_id,
        status = task.status.as_str(),
        position = task.position,
        "Task created"
    );
    Ok(task)
}

/// Lists a project's tasks in board order
///
/// Position ascending, ties broken by creation time. Requires membership.
pub async fn list_tasks(
    pool: &PgPool,
    project_id: Uuid,
    requester_id: Uuid,
) -> Result<Vec<TaskWithUsers>, BoardError> {
    Project::find_by_id(pool, project_id)
        .await?
        .ok_or(BoardError::ProjectNotFound)?;

    access::require_member(pool, project_id, requester_id).await?;

    Ok(Task::list_with_users(pool, project_id).await?)
}

/// Fetches a single task
///
/// The owning project is resolved through the task's foreign key; a
/// missing task is reported before the membership check.
pub async fn get_task(
    pool: &PgPool,
    task_id: Uuid,
    requester_id: Uuid,
) -> Result<TaskWithUsers, BoardError> {
    let task = Task::find_with_users(pool, task_id)
        .await?
        .ok_or(BoardError::TaskNotFound)?;

    access::require_member(pool, task.project_id, requester_id).await?;

    Ok(task)
}

/// Applies a partial update to a task
///
/// Requires membership. Status and priority changes here do not recompute
/// the position; ordering changes only happen through [`move_task`].
pub async fn update_task(
    pool: &PgPool,
    task_id: Uuid,
    requester_id: Uuid,
    data: UpdateTask,
) -> Result<Task, BoardError> {
    let mut tx = pool.begin().await?;

    let task = Task::find_by_id(&mut *tx, task_id)
        .await?
        .ok_or(BoardError::TaskNotFound)?;

    access::require_member(&mut *tx, task.project_id, requester_id).await?;

    let updated = Task::update(&mut *tx, task_id, data)
        .await?
        .ok_or(BoardError::TaskNotFound)?;

    tx.commit().await?;
    Ok(updated)
}

/// Moves a task within or across columns (the drag-and-drop primitive)
///
/// The supplied position is written verbatim: the client owns the
/// ordering it wants, and siblings are never renumbered (last write wins).
/// A differing status lands in the same UPDATE as the position, so a
/// cross-column drag is atomic.
pub async fn move_task(
    pool: &PgPool,
    task_id: Uuid,
    requester_id: Uuid,
    position: i32,
    status: Option<TaskStatus>,
) -> Result<Task, BoardError> {
    let mut tx = pool.begin().await?;

    let task = Task::find_by_id(&mut *tx, task_id)
        .await?
        .ok_or(BoardError::TaskNotFound)?;

    access::require_member(&mut *tx, task.project_id, requester_id).await?;

    let moved = Task::set_position(&mut *tx, task_id, position, status)
        .await?
        .ok_or(BoardError::TaskNotFound)?;

    tx.commit().await?;

    tracing::debug!(
        task_id = %task_id,
        position = position,
        status = ?status,
        "Task moved"
    );
    Ok(moved)
}

/// Changes a task's status without touching its position
pub async fn set_status(
    pool: &PgPool,
    task_id: Uuid,
    requester_id: Uuid,
    status: TaskStatus,
) -> Result<Task, BoardError> {
    let mut tx = pool.begin().await?;

    let task = Task::find_by_id(&mut *tx, task_id)
        .await?
        .ok_or(BoardError::TaskNotFound)?;

    access::require_member(&mut *tx, task.project_id, requester_id).await?;

    let updated = Task::set_status(&mut *tx, task_id, status)
        .await?
        .ok_or(BoardError::TaskNotFound)?;

    tx.commit().await?;
    Ok(updated)
}

/// Deletes a task and its comments
///
/// Allowed for the task's creator, its assignee, the project owner, or an
/// admin. A plain member who is neither creator nor assignee is refused.
pub async fn delete_task(
    pool: &PgPool,
    task_id: Uuid,
    requester_id: Uuid,
) -> Result<(), BoardError> {
    let mut tx = pool.begin().await?;

    let task = Task::find_by_id(&mut *tx, task_id)
        .await?
        .ok_or(BoardError::TaskNotFound)?;

    let member = access::require_member(&mut *tx, task.project_id, requester_id).await?;

    let project = Project::find_by_id(&mut *tx, task.project_id)
        .await?
        .ok_or(BoardError::ProjectNotFound)?;

    if !access::can_delete_task(requester_id, &task, &project, member.role) {
        return Err(BoardError::TaskDeleteDenied);
    }

    Task::delete(&mut *tx, task_id).await?;

    tx.commit().await?;

    tracing::debug!(task_id = %task_id, "Task deleted");
    Ok(())
}
