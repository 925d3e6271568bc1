/// HTTP middleware for the API server
///
/// - `security`: response security headers (OWASP baseline)
///
/// Authentication middleware lives in `app.rs` (it needs the application
/// state); CORS and tracing come from tower-http.

pub mod security;
