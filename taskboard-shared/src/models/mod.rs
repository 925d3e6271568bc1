/// Database models for Taskboard
///
/// Each model owns its CRUD queries. Functions take `impl PgExecutor<'_>`
/// so they run equally against the pool or inside a transaction opened by
/// the board core.
///
/// # Models
///
/// - `user`: User accounts and profile data
/// - `project`: Projects (named workspaces with one owner)
/// - `membership`: Project membership rows carrying a role
/// - `task`: Tasks on the Kanban board (status column + position)
/// - `comment`: Comment threads attached to tasks

pub mod comment;
pub mod membership;
pub mod project;
pub mod task;
pub mod user;
