/// Comment endpoints
///
/// # Endpoints
///
/// - `POST   /v1/tasks/:id/comments` - Comment on a task
/// - `GET    /v1/tasks/:id/comments` - List a task's comments, oldest first
/// - `DELETE /v1/comments/:id` - Delete a comment (author only)

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{Path, State},
    Extension, Json,
};
use serde::Deserialize;
use taskboard_shared::{
    auth::middleware::AuthContext, board, models::comment::CommentWithAuthor,
};
use uuid::Uuid;
use validator::Validate;

/// Create comment request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCommentRequest {
    /// Comment text; must be non-empty after trimming
    #[validate(length(min = 1, max = 5000, message = "Comment content is required"))]
    pub content: String,
}

/// Adds a comment to a task's thread
pub async fn create_comment(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(task_id): Path<Uuid>,
    Json(req): Json<CreateCommentRequest>,
) -> ApiResult<Json<CommentWithAuthor>> {
    req.validate().map_err(ApiError::from_validation)?;

    let comment =
        board::comments::add_comment(&state.db, task_id, auth.user_id, &req.content).await?;

    Ok(Json(comment))
}

/// Lists a task's comments, oldest first
pub async fn list_comments(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(task_id): Path<Uuid>,
) -> ApiResult<Json<Vec<CommentWithAuthor>>> {
    let comments = board::comments::list_comments(&state.db, task_id, auth.user_id).await?;

    Ok(Json(comments))
}

/// Deletes a comment (author only)
pub async fn delete_comment(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(comment_id): Path<Uuid>,
) -> ApiResult<Json<serde_json::Value>> {
    board::comments::delete_comment(&state.db, comment_id, auth.user_id).await?;

    Ok(Json(
        serde_json::json!({ "message": "Comment deleted successfully" }),
    ))
}
