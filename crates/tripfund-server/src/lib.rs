//! Tripfund Web Server
//!
//! Axum-based REST API over the Tripfund planning core.
//!
//! Every endpoint is a pure computation over the request body; the server
//! keeps no per-user state. Dates travel as `YYYY-MM-DD` and an unbounded
//! savings horizon is the string `"unbounded"`.

use std::sync::Arc;

use axum::{
    http::{header, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use tower_http::{cors::CorsLayer, set_header::SetResponseHeaderLayer, trace::TraceLayer};
use tracing::{error, info};

use tripfund_core::{RecommendationProvider, StaticAdviceProvider, TripPlanner};

mod handlers;

/// Maximum request body size (64 KB)
pub const MAX_BODY_SIZE: usize = 64 * 1024;

/// Server configuration
#[derive(Clone, Default)]
pub struct ServerConfig {
    /// Allowed CORS origins (empty = same-origin only)
    pub allowed_origins: Vec<String>,
}

impl ServerConfig {
    /// Read settings from the environment
    ///
    /// - `TRIPFUND_ALLOWED_ORIGINS`: comma-separated CORS origins
    pub fn from_env() -> Self {
        let allowed_origins = std::env::var("TRIPFUND_ALLOWED_ORIGINS")
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Self { allowed_origins }
    }
}

/// Shared application state
pub struct AppState {
    pub planner: TripPlanner,
    pub advice: Arc<dyn RecommendationProvider>,
    pub config: ServerConfig,
}

impl AppState {
    pub fn new(planner: TripPlanner, config: ServerConfig) -> Self {
        Self {
            planner,
            advice: Arc::new(StaticAdviceProvider::new()),
            config,
        }
    }

    /// Swap in a different advice provider
    pub fn with_advice(mut self, provider: Arc<dyn RecommendationProvider>) -> Self {
        self.advice = provider;
        self
    }
}

/// Create the application router
pub fn create_router(planner: TripPlanner, config: ServerConfig) -> Router {
    create_router_with_state(AppState::new(planner, config))
}

/// Create the application router from prepared state (for custom providers)
pub fn create_router_with_state(state: AppState) -> Router {
    info!(
        "Advice provider: {} ({} CORS origin(s))",
        state.advice.name(),
        state.config.allowed_origins.len()
    );

    let cors = if state.config.allowed_origins.is_empty() {
        // Restrictive default: only allow same-origin
        CorsLayer::new()
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE])
    } else {
        let origins: Vec<HeaderValue> = state
            .config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE])
    };

    let state = Arc::new(state);

    let api_routes = Router::new()
        .route("/health", get(handlers::health))
        // Full pipeline
        .route("/plan", post(handlers::create_plan))
        .route("/advice", post(handlers::get_advice))
        // Individual engine steps
        .route("/estimate", post(handlers::estimate_costs))
        .route("/points", post(handlers::value_points))
        .route("/allocate", post(handlers::allocate_savings))
        .route("/project", post(handlers::project_timeline))
        .route("/recommend", get(handlers::recommend_savings));

    Router::new()
        .nest("/api", api_routes)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        // Security headers
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
}

/// Start the server
pub async fn serve_with_config(
    planner: TripPlanner,
    host: &str,
    port: u16,
    config: ServerConfig,
) -> anyhow::Result<()> {
    let app = create_router(planner, config);
    let addr = format!("{}:{}", host, port);

    info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// ============================================================================
// Error Handling
// ============================================================================

/// Application error type with proper HTTP status codes
#[derive(Debug)]
pub struct AppError {
    status: StatusCode,
    message: String,
    internal: Option<anyhow::Error>,
}

impl AppError {
    pub fn bad_request(msg: &str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: msg.to_string(),
            internal: None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log the full internal error if present
        if let Some(err) = &self.internal {
            error!(error = %err, "Internal error");
        }

        let body = Json(serde_json::json!({
            "error": self.message
        }));

        (self.status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        let err = err.into();
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            // Return generic message to client
            message: "An internal error occurred".to_string(),
            // Keep full error for logging
            internal: Some(err),
        }
    }
}

#[cfg(test)]
mod tests;
