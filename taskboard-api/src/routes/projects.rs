/// Project endpoints
///
/// # Endpoints
///
/// - `POST   /v1/projects` - Create a project (requester becomes owner)
/// - `GET    /v1/projects` - List the requester's projects
/// - `GET    /v1/projects/:id` - Project detail with member roster
/// - `PUT    /v1/projects/:id` - Update name/description/color (owner/admin)
/// - `DELETE /v1/projects/:id` - Delete the project (owner only)
/// - `POST   /v1/projects/:id/members` - Invite a member by email (owner/admin)
/// - `DELETE /v1/projects/:id/members/:user_id` - Remove a member (owner/admin)

use crate::{
    app::AppState,
    error::{ApiError, ApiResult, ValidationErrorDetail},
};
use axum::{
    extract::{Path, State},
    Extension, Json,
};
use serde::Deserialize;
use taskboard_shared::{
    auth::middleware::AuthContext,
    board,
    board::projects::ProjectDetail,
    models::membership::{MemberRole, MemberWithUser},
    models::project::{CreateProject, Project, UpdateProject, DEFAULT_COLOR},
};
use uuid::Uuid;
use validator::Validate;

/// Create project request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateProjectRequest {
    /// Project name
    #[validate(length(min = 1, max = 255, message = "Project name is required"))]
    pub name: String,

    /// Optional description
    pub description: Option<String>,

    /// Optional accent color as `#RRGGBB`
    pub color: Option<String>,
}

/// Update project request
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProjectRequest {
    /// New name
    #[validate(length(min = 1, max = 255, message = "Project name cannot be empty"))]
    pub name: Option<String>,

    /// New description
    pub description: Option<String>,

    /// New accent color as `#RRGGBB`
    pub color: Option<String>,
}

/// Add member request
#[derive(Debug, Deserialize, Validate)]
pub struct AddMemberRequest {
    /// Email of the user to invite
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// Role to grant (defaults to member; owner cannot be granted)
    #[serde(default)]
    pub role: MemberRole,
}

/// Checks a `#RRGGBB` hex color code
fn is_hex_color(s: &str) -> bool {
    match s.strip_prefix('#') {
        Some(hex) => hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit()),
        None => false,
    }
}

fn validate_color(color: &Option<String>) -> Result<(), ApiError> {
    if let Some(color) = color {
        if !is_hex_color(color) {
            return Err(ApiError::ValidationError(vec![ValidationErrorDetail {
                field: "color".to_string(),
                message: "Color must be a valid hex code (e.g., #3B82F6)".to_string(),
            }]));
        }
    }
    Ok(())
}

/// Creates a project owned by the requester
pub async fn create_project(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<CreateProjectRequest>,
) -> ApiResult<Json<Project>> {
    req.validate().map_err(ApiError::from_validation)?;
    validate_color(&req.color)?;

    let project = board::projects::create_project(
        &state.db,
        auth.user_id,
        CreateProject {
            name: req.name,
            description: req.description,
            color: req.color.unwrap_or_else(|| DEFAULT_COLOR.to_string()),
        },
    )
    .await?;

    Ok(Json(project))
}

/// Lists the requester's projects, newest first
pub async fn list_projects(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<Vec<Project>>> {
    let projects = board::projects::list_projects(&state.db, auth.user_id).await?;

    Ok(Json(projects))
}

/// Fetches a project with its owner and member roster
pub async fn get_project(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(project_id): Path<Uuid>,
) -> ApiResult<Json<ProjectDetail>> {
    let detail = board::projects::get_project(&state.db, project_id, auth.user_id).await?;

    Ok(Json(detail))
}

/// Updates a project's name, description, or color
pub async fn update_project(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(project_id): Path<Uuid>,
    Json(req): Json<UpdateProjectRequest>,
) -> ApiResult<Json<Project>> {
    req.validate().map_err(ApiError::from_validation)?;
    validate_color(&req.color)?;

    let project = board::projects::update_project(
        &state.db,
        project_id,
        auth.user_id,
        UpdateProject {
            name: req.name,
            description: req.description.map(Some),
            color: req.color,
        },
    )
    .await?;

    Ok(Json(project))
}

/// Deletes a project and everything in it
pub async fn delete_project(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(project_id): Path<Uuid>,
) -> ApiResult<Json<serde_json::Value>> {
    board::projects::delete_project(&state.db, project_id, auth.user_id).await?;

    Ok(Json(
        serde_json::json!({ "message": "Project deleted successfully" }),
    ))
}

/// Invites a user to the project by email
pub async fn add_member(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(project_id): Path<Uuid>,
    Json(req): Json<AddMemberRequest>,
) -> ApiResult<Json<MemberWithUser>> {
    req.validate().map_err(ApiError::from_validation)?;

    let member =
        board::projects::add_member(&state.db, project_id, auth.user_id, &req.email, req.role)
            .await?;

    Ok(Json(member))
}

/// Removes a member from the project
pub async fn remove_member(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path((project_id, target_user_id)): Path<(Uuid, Uuid)>,
) -> ApiResult<Json<serde_json::Value>> {
    board::projects::remove_member(&state.db, project_id, auth.user_id, target_user_id).await?;

    Ok(Json(
        serde_json::json!({ "message": "Member removed successfully" }),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_hex_color() {
        assert!(is_hex_color("#3B82F6"));
        assert!(is_hex_color("#ffffff"));
        assert!(is_hex_color("#000000"));

        assert!(!is_hex_color("3B82F6"));
        assert!(!is_hex_color("#3B82F"));
        assert!(!is_hex_color("#3B82F6A"));
        assert!(!is_hex_color("#GGGGGG"));
        assert!(!is_hex_color(""));
    }

    #[test]
    fn test_add_member_role_defaults_to_member() {
        let req: AddMemberRequest =
            serde_json::from_str(r#"{"email": "bob@example.com"}"#).unwrap();
        assert_eq!(req.role, MemberRole::Member);
    }
}
