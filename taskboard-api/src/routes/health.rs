/// Liveness endpoint
///
/// `GET /health` is public and answers even when the database is down, so
/// load balancers can tell "process up, storage down" from "process gone":
///
/// ```json
/// { "status": "healthy", "version": "0.1.0", "database": "connected" }
/// ```

use crate::{app::AppState, error::ApiResult};
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use taskboard_shared::db::pool;

/// Health check response body
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// "healthy" or "degraded"
    pub status: String,

    /// Crate version of the running binary
    pub version: String,

    /// "connected" or "disconnected"
    pub database: String,
}

/// Reports process liveness and database reachability
pub async fn health_check(State(state): State<AppState>) -> ApiResult<Json<HealthResponse>> {
    let database_up = pool::health_check(&state.db).await.is_ok();

    let (status, database) = if database_up {
        ("healthy", "connected")
    } else {
        ("degraded", "disconnected")
    };

    Ok(Json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: database.to_string(),
    }))
}
