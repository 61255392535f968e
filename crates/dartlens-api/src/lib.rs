//! HTTP API server
//!
//! Routes are organized into modules:
//! - routes::analysis: statement analysis
//! - routes::narrative: narrative rendering
//! - routes::amounts: amount formatting
//! - routes::settings: configuration display

pub mod error;
pub mod routes;

use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, CorsLayer};

use dartlens_config::Config;
use dartlens_core::Analyzer;
use dartlens_parser::{DefaultNarrativeParser, ParserRef};

pub use error::{ApiError, ApiResult};

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub analyzer: Analyzer,
    pub parser: ParserRef,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            analyzer: Analyzer::new(config.analysis.clone()),
            parser: Arc::new(DefaultNarrativeParser),
            config: Arc::new(config),
        }
    }
}

/// CORS restricted to the configured origins
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                log::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
}

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    use routes::amounts::api_format_amount;
    use routes::analysis::api_analysis;
    use routes::narrative::api_narrative;
    use routes::settings::api_settings;

    let cors = cors_layer(&state.config.server.allowed_origins);

    Router::new()
        .route("/api/health", get(health_check))
        .route("/api/settings", get(api_settings))
        .route("/api/analysis", post(api_analysis))
        .route("/api/narrative", post(api_narrative))
        .route("/api/format-amount", post(api_format_amount))
        .layer(cors)
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

/// Bind and serve until the process is stopped
pub async fn start_server(config: Config) -> std::io::Result<()> {
    let addr = config.bind_address();
    let router = create_router(AppState::new(config));

    let listener = TcpListener::bind(&addr).await?;
    log::info!("Starting dartlens server on http://{}", addr);
    log::info!("Available routes:");
    log::info!("  - GET  /api/health");
    log::info!("  - GET  /api/settings");
    log::info!("  - POST /api/analysis");
    log::info!("  - POST /api/narrative");
    log::info!("  - POST /api/format-amount");

    axum::serve(listener, router).await?;
    log::info!("Server stopped gracefully");
    Ok(())
}

// ==================== Tests ====================
