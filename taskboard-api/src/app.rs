/// Router assembly and shared state
///
/// `build_router` wires every route group, the JWT gate, CORS, request
/// tracing, and the security-header layer into one `Router`. The same
/// function serves `main` and the integration tests, so the tests exercise
/// exactly what production runs.
///
/// # Route map
///
/// ```text
/// /
/// ├── /health                                # public
/// └── /v1/
///     ├── /auth/                             # public
///     │   ├── POST /register
///     │   ├── POST /login
///     │   ├── POST /refresh
///     │   └── POST /logout
///     ├── /users/me                          # GET, PUT
///     ├── /projects                          # POST, GET
///     │   └── /:id                           # GET, PUT, DELETE
///     │       ├── /members                   # POST
///     │       ├── /members/:user_id          # DELETE
///     │       └── /tasks                     # POST, GET
///     ├── /tasks/:id                         # GET, PUT, DELETE
///     │   ├── /status                        # PATCH
///     │   ├── /position                      # PATCH
///     │   └── /comments                      # POST, GET
///     └── /comments/:id                      # DELETE
/// ```
///
/// Everything under `/v1` except `/v1/auth` sits behind the Bearer-token
/// gate; authorization beyond "is logged in" belongs to the board core.

use crate::{
    config::{ApiConfig, Config},
    error::ApiError,
    middleware::security::SecurityHeadersLayer,
    routes,
};
use axum::{
    extract::{Request, State},
    http::{header, HeaderValue, Method},
    middleware::Next,
    response::Response,
    routing::{delete, get, patch, post},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use taskboard_shared::auth::{jwt, middleware as auth_middleware, middleware::AuthContext};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// State cloned into every handler
///
/// The pool is itself an Arc internally and the config is wrapped in one,
/// so the per-request clone is two pointer bumps.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: PgPool,

    /// Loaded configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Wraps the pool and config for sharing across handlers
    pub fn new(db: PgPool, config: Config) -> Self {
        Self {
            db,
            config: Arc::new(config),
        }
    }

    /// Signing secret for token mint and validation
    pub fn jwt_secret(&self) -> &str {
        &self.config.jwt.secret
    }
}

/// Assembles the full application router
pub fn build_router(state: AppState) -> Router {
    let public = Router::new().route("/health", get(routes::health::health_check));

    let auth_routes = Router::new()
        .route("/register", post(routes::auth::register))
        .route("/login", post(routes::auth::login))
        .route("/refresh", post(routes::auth::refresh))
        .route("/logout", post(routes::auth::logout));

    let user_routes = Router::new().route(
        "/me",
        get(routes::users::get_me).put(routes::users::update_me),
    );

    let project_routes = Router::new()
        .route(
            "/",
            post(routes::projects::create_project).get(routes::projects::list_projects),
        )
        .route(
            "/:id",
            get(routes::projects::get_project)
                .put(routes::projects::update_project)
                .delete(routes::projects::delete_project),
        )
        .route("/:id/members", post(routes::projects::add_member))
        .route(
            "/:id/members/:user_id",
            delete(routes::projects::remove_member),
        )
        .route(
            "/:id/tasks",
            post(routes::tasks::create_task).get(routes::tasks::list_tasks),
        );

    let task_routes = Router::new()
        .route(
            "/:id",
            get(routes::tasks::get_task)
                .put(routes::tasks::update_task)
                .delete(routes::tasks::delete_task),
        )
        .route("/:id/status", patch(routes::tasks::update_status))
        .route("/:id/position", patch(routes::tasks::update_position))
        .route(
            "/:id/comments",
            post(routes::comments::create_comment).get(routes::comments::list_comments),
        );

    let comment_routes = Router::new().route("/:id", delete(routes::comments::delete_comment));

    let gated = Router::new()
        .nest("/users", user_routes)
        .nest("/projects", project_routes)
        .nest("/tasks", task_routes)
        .nest("/comments", comment_routes)
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            require_auth,
        ));

    let v1 = Router::new().nest("/auth", auth_routes).merge(gated);

    let cors = cors_layer(&state.config.api);

    Router::new()
        .merge(public)
        .nest("/v1", v1)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors)
        .layer(SecurityHeadersLayer::new(state.config.api.production))
        .with_state(state)
}

/// CORS policy from configuration
///
/// A lone "*" origin keeps the permissive development policy; anything
/// else becomes an explicit allow-list with credentials enabled.
fn cors_layer(api: &ApiConfig) -> CorsLayer {
    if api.cors_origins.iter().any(|o| o == "*") {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = api
        .cors_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .allow_credentials(true)
        .max_age(std::time::Duration::from_secs(3600))
}

/// Bearer-token gate for the authenticated section
///
/// Validates the access token and parks the resulting [`AuthContext`] in
/// the request extensions, where handlers pick it up via `Extension`.
async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = auth_middleware::bearer_token(req.headers())?;
    let claims = jwt::validate_access_token(token, state.jwt_secret())?;

    req.extensions_mut()
        .insert(AuthContext::from_jwt(claims.sub));

    Ok(next.run(req).await)
}
