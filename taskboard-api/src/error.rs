/// HTTP error mapping
///
/// Handlers return `ApiResult<T>`; every failure funnels into [`ApiError`]
/// and out as a JSON body with a stable `error` code. The board core only
/// reports error *kinds* — the pairing of kind to status code lives here
/// and nowhere else, which is what keeps the core transport-agnostic.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use taskboard_shared::auth::jwt::JwtError;
use taskboard_shared::auth::middleware::AuthError;
use taskboard_shared::auth::password::PasswordError;
use taskboard_shared::board::{BoardError, ErrorKind};

/// Result alias for route handlers
pub type ApiResult<T> = Result<T, ApiError>;

/// Every failure a handler can surface
#[derive(Debug)]
pub enum ApiError {
    /// 400: request is well-formed but violates a domain rule
    BadRequest(String),

    /// 401: missing or bad credentials
    Unauthorized(String),

    /// 403: authenticated but not allowed
    Forbidden(String),

    /// 404: referenced entity does not exist
    NotFound(String),

    /// 409: uniqueness violation
    Conflict(String),

    /// 422: request shape failed validation
    ValidationError(Vec<ValidationErrorDetail>),

    /// 500: something we did not anticipate
    InternalError(String),
}

/// One field's validation failure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationErrorDetail {
    /// Offending field
    pub field: String,

    /// What was wrong with it
    pub message: String,
}

/// Wire format for every error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Stable machine-readable code ("not_found", "conflict", ...)
    pub error: String,

    /// Human-readable explanation
    pub message: String,

    /// Per-field details, present only for validation failures
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<ValidationErrorDetail>>,
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::ValidationError(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            ApiError::BadRequest(_) => "bad_request",
            ApiError::Unauthorized(_) => "unauthorized",
            ApiError::Forbidden(_) => "forbidden",
            ApiError::NotFound(_) => "not_found",
            ApiError::Conflict(_) => "conflict",
            ApiError::ValidationError(_) => "validation_error",
            ApiError::InternalError(_) => "internal_error",
        }
    }

    /// Collects validator's per-field errors into a 422
    pub fn from_validation(errors: validator::ValidationErrors) -> Self {
        let details = errors
            .field_errors()
            .iter()
            .flat_map(|(field, field_errors)| {
                field_errors.iter().map(move |e| ValidationErrorDetail {
                    field: field.to_string(),
                    message: e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| "Validation failed".to_string()),
                })
            })
            .collect();

        ApiError::ValidationError(details)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::ValidationError(details) => {
                write!(f, "Validation failed: {} errors", details.len())
            }
            ApiError::BadRequest(msg)
            | ApiError::Unauthorized(msg)
            | ApiError::Forbidden(msg)
            | ApiError::NotFound(msg)
            | ApiError::Conflict(msg)
            | ApiError::InternalError(msg) => write!(f, "{}: {}", self.code(), msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.code();

        let (message, details) = match self {
            ApiError::ValidationError(details) => {
                ("Request validation failed".to_string(), Some(details))
            }
            ApiError::InternalError(msg) => {
                // Full detail goes to the log; the client gets a stub.
                tracing::error!("Internal error: {}", msg);
                ("An internal error occurred".to_string(), None)
            }
            ApiError::BadRequest(msg)
            | ApiError::Unauthorized(msg)
            | ApiError::Forbidden(msg)
            | ApiError::NotFound(msg)
            | ApiError::Conflict(msg) => (msg, None),
        };

        let body = Json(ErrorResponse {
            error: code.to_string(),
            message,
            details,
        });

        (status, body).into_response()
    }
}

impl From<BoardError> for ApiError {
    fn from(err: BoardError) -> Self {
        match err.kind() {
            ErrorKind::NotFound => ApiError::NotFound(err.to_string()),
            ErrorKind::Forbidden => ApiError::Forbidden(err.to_string()),
            ErrorKind::Conflict => ApiError::Conflict(err.to_string()),
            ErrorKind::InvalidState => ApiError::BadRequest(err.to_string()),
            ErrorKind::Internal => match err {
                BoardError::Database(db_err) => ApiError::from(db_err),
                other => ApiError::InternalError(other.to_string()),
            },
        }
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => ApiError::NotFound("Resource not found".to_string()),
            sqlx::Error::Database(db_err) => match db_err.constraint() {
                // Races on unique rows surface as constraint hits even after
                // an explicit existence check; report them as the same
                // conflict the check would have produced.
                Some(c) if c.contains("email") => {
                    ApiError::Conflict("Email already exists".to_string())
                }
                Some(c) if c.contains("project_members") => {
                    ApiError::Conflict("User is already a member of this project".to_string())
                }
                Some(c) => ApiError::Conflict(format!("Constraint violation: {}", c)),
                None => ApiError::InternalError(format!("Database error: {}", err)),
            },
            _ => ApiError::InternalError(format!("Database error: {}", err)),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::MissingCredentials => {
                ApiError::Unauthorized("Missing credentials".to_string())
            }
            AuthError::InvalidFormat(msg) => ApiError::BadRequest(msg),
            AuthError::InvalidToken(msg) => ApiError::Unauthorized(msg),
        }
    }
}

impl From<JwtError> for ApiError {
    fn from(err: JwtError) -> Self {
        ApiError::Unauthorized(match err {
            JwtError::Expired => "Token expired".to_string(),
            JwtError::InvalidIssuer => "Invalid token issuer".to_string(),
            other => format!("Invalid token: {}", other),
        })
    }
}

impl From<PasswordError> for ApiError {
    fn from(err: PasswordError) -> Self {
        ApiError::InternalError(format!("Password operation failed: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ApiError::NotFound("x".into()).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::Conflict("x".into()).status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ApiError::ValidationError(vec![]).status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[test]
    fn test_board_error_kinds_map_to_statuses() {
        assert!(matches!(
            ApiError::from(BoardError::TaskNotFound),
            ApiError::NotFound(_)
        ));
        assert!(matches!(
            ApiError::from(BoardError::NotMember),
            ApiError::Forbidden(_)
        ));
        assert!(matches!(
            ApiError::from(BoardError::NotCommentAuthor),
            ApiError::Forbidden(_)
        ));
        assert!(matches!(
            ApiError::from(BoardError::AlreadyMember),
            ApiError::Conflict(_)
        ));
        assert!(matches!(
            ApiError::from(BoardError::EmptyComment),
            ApiError::BadRequest(_)
        ));
        assert!(matches!(
            ApiError::from(BoardError::CannotRemoveOwner),
            ApiError::BadRequest(_)
        ));
    }

    #[test]
    fn test_validation_display_counts_fields() {
        let err = ApiError::ValidationError(vec![
            ValidationErrorDetail {
                field: "email".to_string(),
                message: "Invalid email format".to_string(),
            },
            ValidationErrorDetail {
                field: "password".to_string(),
                message: "Too short".to_string(),
            },
        ]);
        assert_eq!(err.to_string(), "Validation failed: 2 errors");
    }
}
