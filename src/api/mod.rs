//! HTTP API handlers

use axum::{
    extract::State,
    routing::get,
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, services::ServeDir, trace::TraceLayer,
};

use crate::config::Config;
use crate::ui;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
        }
    }
}

/// General status response
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub service: &'static str,
    pub version: &'static str,
    pub git_sha: &'static str,
}

/// GET /status - Health check
pub async fn status_handler(State(_state): State<AppState>) -> Json<StatusResponse> {
    Json(StatusResponse {
        service: "harbor-console",
        version: env!("HARBOR_VERSION"),
        git_sha: env!("HARBOR_GIT_SHA"),
    })
}

/// Build the full router: pages, status, and the browser client bundle under /pkg
pub fn router(state: AppState) -> Router {
    let assets = ServeDir::new(&state.config.assets_dir);
    Router::new()
        .route("/status", get(status_handler))
        .route("/", get(ui::workflows_page))
        .route("/setup", get(ui::setup_page))
        .route("/conversion", get(ui::conversion_page))
        .nest_service("/pkg", assets)
        .layer(CorsLayer::permissive())
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
