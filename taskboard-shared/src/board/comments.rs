/// Comment thread management
///
/// Authorization is entirely delegated to the access module via the task's
/// owning project: any member may read and write the thread. Deletion is
/// the exception: author only, with no role escalation.

use sqlx::PgPool;
use uuid::Uuid;

use super::access;
use super::error::BoardError;
use crate::models::comment::{Comment, CommentWithAuthor};
use crate::models::task::Task;

/// Adds a comment to a task's thread
///
/// Content is trimmed; an empty result is rejected before anything is
/// looked up. Requires membership of the task's project.
pub async fn add_comment(
    pool: &PgPool,
    task_id: Uuid,
    requester_id: Uuid,
    content: &str,
) -> Result<CommentWithAuthor, BoardError> {
    let content = content.trim();
    if content.is_empty() {
        return Err(BoardError::EmptyComment);
    }

    let mut tx = pool.begin().await?;

    let task = Task::find_by_id(&mut *tx, task_id)
        .await?
        .ok_or(BoardError::TaskNotFound)?;

    access::require_member(&mut *tx, task.project_id, requester_id).await?;

    let comment = Comment::create(&mut *tx, task_id, requester_id, content).await?;
    let with_author = Comment::find_with_author(&mut *tx, comment.id)
        .await?
        .ok_or(BoardError::CommentNotFound)?;

    tx.commit().await?;
    Ok(with_author)
}

/// Lists a task's comments, oldest first
///
/// Requires membership of the task's project; a missing task is reported
/// before the membership check.
pub async fn list_comments(
    pool: &PgPool,
    task_id: Uuid,
    requester_id: Uuid,
) -> Result<Vec<CommentWithAuthor>, BoardError> {
    let task = Task::find_by_id(pool, task_id)
        .await?
        .ok_or(BoardError::TaskNotFound)?;

    access::require_member(pool, task.project_id, requester_id).await?;

    Ok(Comment::list_with_authors(pool, task_id).await?)
}

/// Deletes a comment
///
/// Author only. Membership and role are irrelevant here, and even the
/// project owner cannot delete someone else's comment.
pub async fn delete_comment(
    pool: &PgPool,
    comment_id: Uuid,
    requester_id: Uuid,
) -> Result<(), BoardError> {
    let mut tx = pool.begin().await?;

    let comment = Comment::find_by_id(&mut *tx, comment_id)
        .await?
        .ok_or(BoardError::CommentNotFound)?;

    if !access::can_delete_comment(requester_id, &comment) {
        return Err(BoardError::NotCommentAuthor);
    }

    Comment::delete(&mut *tx, comment_id).await?;

    tx.commit().await?;
    Ok(())
}
