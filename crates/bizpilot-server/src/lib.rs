//! Bizpilot Web Server
//!
//! Axum-based JSON API behind the single-page dashboard. Every action is
//! request/response: training and prediction run to completion (on the
//! blocking pool) before the handler returns.
//!
//! Security features:
//! - Restrictive CORS policy
//! - Security headers (CSP, nosniff, frame denial)
//! - Sanitized error responses for unexpected failures

use std::sync::Arc;

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::{header, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer, services::ServeDir, set_header::SetResponseHeaderLayer, trace::TraceLayer,
};
use tracing::{error, info, warn};

use bizpilot_core::{AppConfig, ScenarioPipeline};

mod handlers;

/// Maximum request body size (1 MB), enough for a few thousand records
pub const MAX_BODY_SIZE: usize = 1024 * 1024;

/// Server configuration
#[derive(Clone, Default)]
pub struct ServerConfig {
    /// Allowed CORS origins (empty = same-origin only)
    pub allowed_origins: Vec<String>,
}

/// Shared application state
///
/// The pipeline is owned here and handed to handlers explicitly; there is no
/// process-wide model.
pub struct AppState {
    pub app: AppConfig,
    pub pipeline: ScenarioPipeline,
    pub config: ServerConfig,
}

impl AppState {
    pub fn new(app: AppConfig, config: ServerConfig) -> Self {
        let pipeline = app.scenario.pipeline();
        Self {
            app,
            pipeline,
            config,
        }
    }
}

/// Parse a comma-separated list of CORS origins
pub fn parse_origins(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Create the application router
pub fn create_router(app: AppConfig, static_dir: Option<&str>, config: ServerConfig) -> Router {
    let state = Arc::new(AppState::new(app, config.clone()));

    info!(
        artifact = %state.pipeline.store().path().display(),
        n_trees = state.pipeline.params().n_trees,
        "Scenario model store configured"
    );

    let api_routes = Router::new()
        .route("/health", get(handlers::health))
        // Scenario model
        .route("/scenario/train", post(handlers::train_scenario))
        .route("/scenario/predict", post(handlers::predict_scenario))
        .route("/scenario/model", get(handlers::get_model_info))
        // Dataset for charting
        .route("/dataset", get(handlers::get_dataset))
        // Workflow
        .route("/workflow/suggestion", get(handlers::get_workflow_suggestion))
        // Compliance
        .route("/compliance/industries", get(handlers::list_industries))
        .route("/compliance/check", post(handlers::check_compliance));

    // Build CORS layer
    let cors = if config.allowed_origins.is_empty() {
        // Restrictive default: only allow same-origin
        CorsLayer::new()
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE])
    } else {
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE])
    };

    // CSP: restrict scripts to same-origin, allow inline styles
    let csp_value = HeaderValue::from_static(
        "default-src 'self'; script-src 'self'; style-src 'self' 'unsafe-inline'; img-src 'self' data:; connect-src 'self'; frame-ancestors 'none'",
    );

    let mut app = Router::new()
        .nest("/api", api_routes)
        .with_state(state)
        .layer(axum::extract::DefaultBodyLimit::max(MAX_BODY_SIZE))
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
        .layer(SetResponseHeaderLayer::overriding(
            header::CONTENT_SECURITY_POLICY,
            csp_value,
        ));

    // Serve the dashboard UI if a directory is provided
    if let Some(dir) = static_dir {
        app = app.fallback_service(ServeDir::new(dir));
    }

    app
}

/// Start the server
pub async fn serve(
    app: AppConfig,
    host: &str,
    port: u16,
    static_dir: Option<&str>,
    config: ServerConfig,
) -> anyhow::Result<()> {
    match app.scenario.pipeline().model_info() {
        Ok(info) => info!(
            samples = info.samples,
            created_at = %info.created_at,
            "Scenario model artifact found"
        ),
        Err(bizpilot_core::Error::ModelNotFound(_)) => {
            info!("ℹ️  No scenario model yet (train from the dashboard or `bizpilot train`)")
        }
        Err(e) => warn!("⚠️  Scenario model artifact unreadable: {}", e),
    }

    let router = create_router(app, static_dir, config);
    let addr = format!("{}:{}", host, port);

    info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, router).await?;

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

    /// Malformed JSON body, keeping axum's status (400, 415 or 422)
    pub fn json_rejection(rejection: JsonRejection) -> Self {
        Self {
            status: rejection.status(),
            message: rejection.body_text(),
            internal: None,
        }
    }

    /// Malformed query string
    pub fn query_rejection(rejection: QueryRejection) -> Self {
        Self {
            status: rejection.status(),
            message: rejection.body_text(),
            internal: None,
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
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
        use bizpilot_core::Error as CoreError;

        let err = err.into();

        // Domain errors are shown to the user as-is
        let status = match err.downcast_ref::<CoreError>() {
            Some(CoreError::Schema(_))
            | Some(CoreError::InvalidData(_))
            | Some(CoreError::InsufficientData(_)) => Some(StatusCode::BAD_REQUEST),
            Some(CoreError::ModelNotFound(_)) => Some(StatusCode::NOT_FOUND),
            Some(CoreError::CorruptArtifact(_)) | Some(CoreError::Training(_)) => {
                Some(StatusCode::INTERNAL_SERVER_ERROR)
            }
            _ => None,
        };

        match status {
            Some(status) => {
                let message = err.to_string();
                Self {
                    status,
                    message,
                    internal: status.is_server_error().then_some(err),
                }
            }
            None => Self {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                // Return generic message to client
                message: "An internal error occurred".to_string(),
                // Keep full error for logging
                internal: Some(err),
            },
        }
    }
}
