/// The board core
///
/// Everything with a real invariant lives here: who may read or mutate a
/// project, task, or comment, and how Kanban ordering (status column +
/// integer position) is maintained. Route handlers call exactly one
/// function per operation and translate the returned [`BoardError`] into a
/// transport status; the core itself never sees HTTP.
///
/// Every mutating operation resolves the owning project first (directly or
/// through the task/comment foreign key), then runs its access check, then
/// performs the write, all inside one transaction, so a membership revoked
/// mid-request cannot slip between the check and the write.
///
/// # Modules
///
/// - `access`: membership and role decision functions
/// - `projects`: project lifecycle and member management
/// - `tasks`: the task board engine (create/update/move/delete, ordering)
/// - `comments`: comment threads
/// - `error`: the core's error taxonomy

pub mod access;
pub mod comments;
pub mod error;
pub mod projects;
pub mod tasks;

pub use error::{BoardError, ErrorKind};
