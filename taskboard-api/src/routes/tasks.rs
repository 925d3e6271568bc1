/// Task endpoints
///
/// # Endpoints
///
/// - `POST   /v1/projects/:id/tasks` - Create a task (appends to its column)
/// - `GET    /v1/projects/:id/tasks` - List tasks in board order
/// - `GET    /v1/tasks/:id` - Fetch a single task
/// - `PUT    /v1/tasks/:id` - Partial update (never touches position)
/// - `DELETE /v1/tasks/:id` - Delete (creator/assignee/owner/admin)
/// - `PATCH  /v1/tasks/:id/status` - Status-only change
/// - `PATCH  /v1/tasks/:id/position` - Kanban drag-and-drop move

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{Path, State},
    Extension, Json,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use taskboard_shared::{
    auth::middleware::AuthContext,
    board,
    board::tasks::NewTask,
    models::task::{Task, TaskPriority, TaskStatus, TaskWithUsers, UpdateTask},
};
use uuid::Uuid;
use validator::Validate;

/// Create task request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTaskRequest {
    /// Task title
    #[validate(length(min = 1, max = 255, message = "Task title is required"))]
    pub title: String,

    /// Optional description
    pub description: Option<String>,

    /// Target column (defaults to todo)
    pub status: Option<TaskStatus>,

    /// Priority (defaults to medium)
    pub priority: Option<TaskPriority>,

    /// Optional assignee
    pub assignee_id: Option<Uuid>,

    /// Optional due date
    pub due_date: Option<DateTime<Utc>>,
}

/// Update task request
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateTaskRequest {
    /// New title
    #[validate(length(min = 1, max = 255, message = "Task title cannot be empty"))]
    pub title: Option<String>,

    /// New description
    pub description: Option<String>,

    /// New status
    pub status: Option<TaskStatus>,

    /// New priority
    pub priority: Option<TaskPriority>,

    /// New assignee
    pub assignee_id: Option<Uuid>,

    /// New due date
    pub due_date: Option<DateTime<Utc>>,
}

/// Status change request
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    /// Target status
    pub status: TaskStatus,
}

/// Position change request (Kanban drag & drop)
#[derive(Debug, Deserialize, Validate)]
pub struct UpdatePositionRequest {
    /// Target position, written verbatim
    #[validate(range(min = 0, message = "Position must be non-negative"))]
    pub position: i32,

    /// Target column, when the drag crossed columns
    pub status: Option<TaskStatus>,
}

/// Creates a task at the end of its column
pub async fn create_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(project_id): Path<Uuid>,
    Json(req): Json<CreateTaskRequest>,
) -> ApiResult<Json<Task>> {
    req.validate().map_err(ApiError::from_validation)?;

    let task = board::tasks::create_task(
        &state.db,
        project_id,
        auth.user_id,
        NewTask {
            title: req.title,
            description: req.description,
            status: req.status.unwrap_or_default(),
            priority: req.priority.unwrap_or_default(),
            assignee_id: req.assignee_id,
            due_date: req.due_date,
        },
    )
    .await?;

    Ok(Json(task))
}

/// Lists a project's tasks in board order
pub async fn list_tasks(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(project_id): Path<Uuid>,
) -> ApiResult<Json<Vec<TaskWithUsers>>> {
    let tasks = board::tasks::list_tasks(&state.db, project_id, auth.user_id).await?;

    Ok(Json(tasks))
}

/// Fetches a single task
pub async fn get_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(task_id): Path<Uuid>,
) -> ApiResult<Json<TaskWithUsers>> {
    let task = board::tasks::get_task(&state.db, task_id, auth.user_id).await?;

    Ok(Json(task))
}

/// Applies a partial update to a task
pub async fn update_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(task_id): Path<Uuid>,
    Json(req): Json<UpdateTaskRequest>,
) -> ApiResult<Json<Task>> {
    req.validate().map_err(ApiError::from_validation)?;

    let task = board::tasks::update_task(
        &state.db,
        task_id,
        auth.user_id,
        UpdateTask {
            title: req.title,
            description: req.description.map(Some),
            status: req.status,
            priority: req.priority,
            assignee_id: req.assignee_id.map(Some),
            due_date: req.due_date.map(Some),
        },
    )
    .await?;

    Ok(Json(task))
}

/// Changes a task's status without touching its position
pub async fn update_status(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(task_id): Path<Uuid>,
    Json(req): Json<UpdateStatusRequest>,
) -> ApiResult<Json<Task>> {
    let task = board::tasks::set_status(&state.db, task_id, auth.user_id, req.status).await?;

    Ok(Json(task))
}

/// Moves a task within or across columns
pub async fn update_position(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(task_id): Path<Uuid>,
    Json(req): Json<UpdatePositionRequest>,
) -> ApiResult<Json<Task>> {
    req.validate().map_err(ApiError::from_validation)?;

    let task =
        board::tasks::move_task(&state.db, task_id, auth.user_id, req.position, req.status).await?;

    Ok(Json(task))
}

/// Deletes a task and its comments
pub async fn delete_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(task_id): Path<Uuid>,
) -> ApiResult<Json<serde_json::Value>> {
    board::tasks::delete_task(&state.db, task_id, auth.user_id).await?;

    Ok(Json(
        serde_json::json!({ "message": "Task deleted successfully" }),
    ))
}
