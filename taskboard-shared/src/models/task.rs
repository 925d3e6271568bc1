/// Task model and database operations
///
/// Tasks are the units of work on a project's Kanban board. Each task sits
/// in a status column and carries an integer `position` ordering it within
/// that column.
///
/// # Ordering
///
/// Positions are bare integers: a new task gets (column max + 1), and a
/// move writes the caller's position verbatim; siblings are never
/// renumbered. Concurrent writers can therefore produce duplicate
/// positions; readers break ties on `created_at`, which keeps the board
/// stable.
///
/// # Schema
///
/// ```sql
/// CREATE TYPE task_status AS ENUM ('todo', 'in_progress', 'done', 'archived');
/// CREATE TYPE task_priority AS ENUM ('low', 'medium', 'high', 'urgent');
///
/// CREATE TABLE tasks (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     title VARCHAR(255) NOT NULL,
///     description TEXT,
///     status task_status NOT NULL DEFAULT 'todo',
///     priority task_priority NOT NULL DEFAULT 'medium',
///     position INTEGER NOT NULL DEFAULT 0,
///     due_date TIMESTAMPTZ,
///     project_id UUID NOT NULL REFERENCES projects(id) ON DELETE CASCADE,
///     assignee_id UUID REFERENCES users(id) ON DELETE SET NULL,
///     created_by UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgExecutor;
use uuid::Uuid;

/// Kanban column a task currently sits in
///
/// Transitions are unrestricted; any status may move to any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "task_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Not started
    Todo,

    /// Being worked on
    InProgress,

    /// Finished
    Done,

    /// Hidden from the active board
    Archived,
}

impl TaskStatus {
    /// Converts status to string for display
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Todo => "todo",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Done => "done",
            TaskStatus::Archived => "archived",
        }
    }
}

impl Default for TaskStatus {
    fn default() -> Self {
        TaskStatus::Todo
    }
}

/// Task priority level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "task_priority", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    Low,
    Medium,
    High,
    Urgent,
}

impl TaskPriority {
    /// Converts priority to string for display
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskPriority::Low => "low",
            TaskPriority::Medium => "medium",
            TaskPriority::High => "high",
            TaskPriority::Urgent => "urgent",
        }
    }
}

impl Default for TaskPriority {
    fn default() -> Self {
        TaskPriority::Medium
    }
}

/// Task model representing a unit of work on the board
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Task {
    /// Unique task ID (UUID v4)
    pub id: Uuid,

    /// Task title
    pub title: String,

    /// Optional longer description
    pub description: Option<String>,

    /// Current Kanban column
    pub status: TaskStatus,

    /// Priority level
    pub priority: TaskPriority,

    /// Ordering key within the (project, status) column
    pub position: i32,

    /// Optional due date
    pub due_date: Option<DateTime<Utc>>,

    /// Project this task belongs to
    pub project_id: Uuid,

    /// Assigned user, if any (cleared when that account is deleted)
    pub assignee_id: Option<Uuid>,

    /// User who created the task; immutable after creation
    pub created_by: Uuid,

    /// When the task was created
    pub created_at: DateTime<Utc>,

    /// When the task was last updated
    pub updated_at: DateTime<Utc>,
}

/// A task row joined with assignee and creator user fields
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct TaskWithUsers {
    /// Task ID
    pub id: Uuid,

    /// Task title
    pub title: String,

    /// Optional description
    pub description: Option<String>,

    /// Current Kanban column
    pub status: TaskStatus,

    /// Priority level
    pub priority: TaskPriority,

    /// Ordering key within the column
    pub position: i32,

    /// Optional due date
    pub due_date: Option<DateTime<Utc>>,

    /// Owning project
    pub project_id: Uuid,

    /// Assigned user, if any
    pub assignee_id: Option<Uuid>,

    /// Creator
    pub created_by: Uuid,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last update timestamp
    pub updated_at: DateTime<Utc>,

    /// Creator's email
    pub creator_email: String,

    /// Creator's display name
    pub creator_full_name: Option<String>,

    /// Creator's avatar URL
    pub creator_avatar_url: Option<String>,

    /// Assignee's email (None when unassigned)
    pub assignee_email: Option<String>,

    /// Assignee's display name
    pub assignee_full_name: Option<String>,

    /// Assignee's avatar URL
    pub assignee_avatar_url: Option<String>,
}

/// Input for inserting a task row
///
/// `position` is computed by the board core (column max + 1); route
/// handlers never supply it directly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTask {
    /// Owning project
    pub project_id: Uuid,

    /// Creating user
    pub created_by: Uuid,

    /// Ordering key within the target column
    pub position: i32,

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
    pub due_date: Option<DateTime<Utc>>,
}

/// Input for a partial task update
///
/// `position` is deliberately absent: ordering changes go through the move
/// operation so that plain edits can never reorder a column.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTask {
    /// New title
    pub title: Option<String>,

    /// New description (use Some(None) to clear)
    pub description: Option<Option<String>>,

    /// New status
    pub status: Option<TaskStatus>,

    /// New priority
    pub priority: Option<TaskPriority>,

    /// New assignee (use Some(None) to unassign)
    pub assignee_id: Option<Option<Uuid>>,

    /// New due date (use Some(None) to clear)
    pub due_date: Option<Option<DateTime<Utc>>>,
}

const TASK_COLUMNS: &str = "id, title, description, status, priority, position, due_date, \
                            project_id, assignee_id, created_by, created_at, updated_at";

impl Task {
    /// Inserts a new task row
    pub async fn create(db: impl PgExecutor<'_>, data: CreateTask) -> Result<Self, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks (project_id, created_by, position, title, description,
                               status, priority, assignee_id, due_date)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id, title, description, status, priority, position, due_date,
                      project_id, assignee_id, created_by, created_at, updated_at
            "#,
        )
        .bind(data.project_id)
        .bind(data.created_by)
        .bind(data.position)
        .bind(data.title)
        .bind(data.description)
        .bind(data.status)
        .bind(data.priority)
        .bind(data.assignee_id)
        .bind(data.due_date)
        .fetch_one(db)
        .await?;

        Ok(task)
    }

    /// Finds a task by ID
    pub async fn find_by_id(
        db: impl PgExecutor<'_>,
        id: Uuid,
    ) -> Result<Option<Self>, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(&format!(
            "SELECT {} FROM tasks WHERE id = $1",
            TASK_COLUMNS
        ))
        .bind(id)
        .fetch_optional(db)
        .await?;

        Ok(task)
    }

    /// Returns the highest position currently used in a (project, status)
    /// column, or 0 when the column is empty
    ///
    /// The read is not serialized against concurrent inserts; two tasks
    /// created at the same moment can land on the same position, and
    /// readers break the tie on creation time.
    pub async fn max_position(
        db: impl PgExecutor<'_>,
        project_id: Uuid,
        status: TaskStatus,
    ) -> Result<i32, sqlx::Error> {
        let max: i32 = sqlx::query_scalar(
            "SELECT COALESCE(MAX(position), 0) FROM tasks WHERE project_id = $1 AND status = $2",
        )
        .bind(project_id)
        .bind(status)
        .fetch_one(db)
        .await?;

        Ok(max)
    }

    /// Applies a partial update
    ///
    /// Only fields present in `data` are written; `position` is never
    /// touched here.
    pub async fn update(
        db: impl PgExecutor<'_>,
        id: Uuid,
        data: UpdateTask,
    ) -> Result<Option<Self>, sqlx::Error> {
        let mut query = String::from("UPDATE tasks SET updated_at = NOW()");
        let mut bind_count = 1;

        if data.title.is_some() {
            bind_count += 1;
            query.push_str(&format!(", title = ${}", bind_count));
        }
        if data.description.is_some() {
            bind_count += 1;
            query.push_str(&format!(", description = ${}", bind_count));
        }
        if data.status.is_some() {
            bind_count += 1;
            query.push_str(&format!(", status = ${}", bind_count));
        }
        if data.priority.is_some() {
            bind_count += 1;
            query.push_str(&format!(", priority = ${}", bind_count));
        }
        if data.assignee_id.is_some() {
            bind_count += 1;
            query.push_str(&format!(", assignee_id = ${}", bind_count));
        }
        if data.due_date.is_some() {
            bind_count += 1;
            query.push_str(&format!(", due_date = ${}", bind_count));
        }

        query.push_str(&format!(" WHERE id = $1 RETURNING {}", TASK_COLUMNS));

        let mut q = sqlx::query_as::<_, Task>(&query).bind(id);

        if let Some(title) = data.title {
            q = q.bind(title);
        }
        if let Some(description) = data.description {
            q = q.bind(description);
        }
        if let Some(status) = data.status {
            q = q.bind(status);
        }
        if let Some(priority) = data.priority {
            q = q.bind(priority);
        }
        if let Some(assignee_id) = data.assignee_id {
            q = q.bind(assignee_id);
        }
        if let Some(due_date) = data.due_date {
            q = q.bind(due_date);
        }

        let task = q.fetch_optional(db).await?;

        Ok(task)
    }

    /// Writes a position (and optionally a status) in a single UPDATE
    ///
    /// The position is stored verbatim, with no sibling renumbering. When
    /// `status` is supplied the column change lands atomically with the
    /// position write.
    pub async fn set_position(
        db: impl PgExecutor<'_>,
        id: Uuid,
        position: i32,
        status: Option<TaskStatus>,
    ) -> Result<Option<Self>, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(&format!(
            r#"
            UPDATE tasks
            SET position = $2,
                status = COALESCE($3, status),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            TASK_COLUMNS
        ))
        .bind(id)
        .bind(position)
        .bind(status)
        .fetch_optional(db)
        .await?;

        Ok(task)
    }

    /// Writes a status only; position is untouched
    pub async fn set_status(
        db: impl PgExecutor<'_>,
        id: Uuid,
        status: TaskStatus,
    ) -> Result<Option<Self>, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(&format!(
            r#"
            UPDATE tasks
            SET status = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            TASK_COLUMNS
        ))
        .bind(id)
        .bind(status)
        .fetch_optional(db)
        .await?;

        Ok(task)
    }

    /// Deletes a task
    ///
    /// Cascades to the task's comments.
    pub async fn delete(db: impl PgExecutor<'_>, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Lists a project's tasks with user fields, board order
    ///
    /// Ordered by position ascending, ties broken by creation time so the
    /// ordering is stable under duplicate positions.
    pub async fn list_with_users(
        db: impl PgExecutor<'_>,
        project_id: Uuid,
    ) -> Result<Vec<TaskWithUsers>, sqlx::Error> {
        let tasks = sqlx::query_as::<_, TaskWithUsers>(
            r#"
            SELECT t.id, t.title, t.description, t.status, t.priority, t.position, t.due_date,
                   t.project_id, t.assignee_id, t.created_by, t.created_at, t.updated_at,
                   c.email AS creator_email, c.full_name AS creator_full_name,
                   c.avatar_url AS creator_avatar_url,
                   a.email AS assignee_email, a.full_name AS assignee_full_name,
                   a.avatar_url AS assignee_avatar_url
            FROM tasks t
            INNER JOIN users c ON c.id = t.created_by
            LEFT JOIN users a ON a.id = t.assignee_id
            WHERE t.project_id = $1
            ORDER BY t.position ASC, t.created_at ASC
            "#,
        )
        .bind(project_id)
        .fetch_all(db)
        .await?;

        Ok(tasks)
    }

    /// Finds a single task with user fields
    pub async fn find_with_users(
        db: impl PgExecutor<'_>,
        id: Uuid,
    ) -> Result<Option<TaskWithUsers>, sqlx::Error> {
        let task = sqlx::query_as::<_, TaskWithUsers>(
            r#"
            SELECT t.id, t.title, t.description, t.status, t.priority, t.position, t.due_date,
                   t.project_id, t.assignee_id, t.created_by, t.created_at, t.updated_at,
                   c.email AS creator_email, c.full_name AS creator_full_name,
                   c.avatar_url AS creator_avatar_url,
                   a.email AS assignee_email, a.full_name AS assignee_full_name,
                   a.avatar_url AS assignee_avatar_url
            FROM tasks t
            INNER JOIN users c ON c.id = t.created_by
            LEFT JOIN users a ON a.id = t.assignee_id
            WHERE t.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await?;

        Ok(task)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_status_as_str() {
        assert_eq!(TaskStatus::Todo.as_str(), "todo");
        assert_eq!(TaskStatus::InProgress.as_str(), "in_progress");
        assert_eq!(TaskStatus::Done.as_str(), "done");
        assert_eq!(TaskStatus::Archived.as_str(), "archived");
    }

    #[test]
    fn test_task_status_serde_snake_case() {
        assert_eq!(
            serde_json::to_string(&TaskStatus::InProgress).unwrap(),
            r#""in_progress""#
        );
        let status: TaskStatus = serde_json::from_str(r#""archived""#).unwrap();
        assert_eq!(status, TaskStatus::Archived);
    }

    #[test]
    fn test_task_priority_as_str() {
        assert_eq!(TaskPriority::Low.as_str(), "low");
        assert_eq!(TaskPriority::Medium.as_str(), "medium");
        assert_eq!(TaskPriority::High.as_str(), "high");
        assert_eq!(TaskPriority::Urgent.as_str(), "urgent");
    }

    #[test]
    fn test_defaults() {
        assert_eq!(TaskStatus::default(), TaskStatus::Todo);
        assert_eq!(TaskPriority::default(), TaskPriority::Medium);
    }

    #[test]
    fn test_update_task_has_no_position_field() {
        // A full update body must not be able to reorder a column.
        let update: UpdateTask =
            serde_json::from_str(r#"{"title": "New title", "position": 99}"#).unwrap();
        assert_eq!(update.title.as_deref(), Some("New title"));
        let json = serde_json::to_value(&update).unwrap();
        assert!(json.get("position").is_none());
    }
}
