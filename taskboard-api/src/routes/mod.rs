/// API route handlers
///
/// Handlers validate request shape, then call exactly one board core
/// function and serialize its result. All authorization lives in the core.
///
/// - `health`: Health check endpoint
/// - `auth`: Registration, login, token refresh
/// - `users`: Current-user profile
/// - `projects`: Project lifecycle and member management
/// - `tasks`: The Kanban board
/// - `comments`: Comment threads

pub mod auth;
pub mod comments;
pub mod health;
pub mod projects;
pub mod tasks;
pub mod users;
