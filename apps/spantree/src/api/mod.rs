//! # spantree HTTP API Module
//!
//! This module implements the controller's HTTP surface using axum.
//!
//! ## Endpoints
//!
//! - `GET  /health` - Health check
//! - `GET  /status` - Topology/MST summary
//! - `GET  /topocosts` - Configured cost table
//! - `POST /topocosts` - Bulk cost update (atomic validation)
//! - `GET  /topoedges` - Live topology as edge records
//! - `GET  /mstedges` - Current spanning forest
//! - `GET  /redundantedges` - Blocked loop-redundant links
//! - `POST /links` - Link-added notification from discovery
//! - `DELETE /links` - Link-removed notification from discovery
//!
//! ## Security Configuration (Environment Variables)
//!
//! - `SPANTREE_CORS_ORIGINS`: Comma-separated list of allowed origins, or
//!   "*" for all (default: localhost only)

mod handlers;
mod types;

// Re-export handlers and types for integration tests (via `spantree::api::*`)
#[allow(unused_imports)]
pub use handlers::{
    health_handler, link_added_handler, link_removed_handler, list_mstedges_handler,
    list_redundantedges_handler, list_topocosts_handler, list_topoedges_handler,
    set_topocosts_handler, status_handler,
};
#[allow(unused_imports)]
pub use types::{
    COSTS_REJECTED_STATUS, COSTS_SET_STATUS, CostUpdateResponse, HealthResponse, LinkEventRequest,
    LinkEventResponse, SetCostsRequest, StatusResponse,
};

use crate::sink::LogPortControl;
use axum::{
    Router,
    http::{HeaderValue, Method, header},
    routing::{get, post},
};
use spantree_core::{Controller, SpantreeError};
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

// =============================================================================
// SERVER STATE
// =============================================================================

/// Shared server state containing the controller.
///
/// The `RwLock` is the single-writer gate the engine's concurrency model
/// assumes: link events and configuration updates serialize behind the
/// write half, introspection reads share the read half.
#[derive(Clone)]
pub struct AppState {
    /// The loop-prevention controller.
    pub controller: Arc<RwLock<Controller<LogPortControl>>>,
}

impl AppState {
    /// Create new app state around a controller.
    #[must_use]
    pub fn new(controller: Controller<LogPortControl>) -> Self {
        Self {
            controller: Arc::new(RwLock::new(controller)),
        }
    }
}

// =============================================================================
// CORS CONFIGURATION
// =============================================================================

/// Build CORS layer from environment configuration.
///
/// Reads the `SPANTREE_CORS_ORIGINS` environment variable:
/// - If "*": allows all origins (development mode - use with caution!)
/// - If not set: defaults to localhost only (restrictive default)
/// - Otherwise: parses comma-separated list of allowed origins
fn build_cors_layer() -> CorsLayer {
    let origins_env = std::env::var("SPANTREE_CORS_ORIGINS").ok();

    match origins_env.as_deref() {
        Some("*") => {
            tracing::warn!(
                "CORS: Allowing ALL origins (SPANTREE_CORS_ORIGINS=*). This is insecure for production!"
            );
            CorsLayer::permissive()
        }
        Some(origins) => {
            let allowed_origins: Vec<HeaderValue> = origins
                .split(',')
                .filter_map(|s| {
                    let trimmed = s.trim();
                    match trimmed.parse::<HeaderValue>() {
                        Ok(hv) => {
                            tracing::info!("CORS: Allowing origin: {}", trimmed);
                            Some(hv)
                        }
                        Err(e) => {
                            tracing::warn!("CORS: Invalid origin '{}': {}", trimmed, e);
                            None
                        }
                    }
                })
                .collect();

            if allowed_origins.is_empty() {
                tracing::warn!(
                    "CORS: No valid origins in SPANTREE_CORS_ORIGINS, defaulting to localhost only"
                );
                build_localhost_cors()
            } else {
                CorsLayer::new()
                    .allow_origin(allowed_origins)
                    .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
                    .allow_headers([header::CONTENT_TYPE])
            }
        }
        None => {
            tracing::info!("CORS: No SPANTREE_CORS_ORIGINS set, defaulting to localhost only");
            build_localhost_cors()
        }
    }
}

/// Build a restrictive CORS layer that only allows localhost origins.
fn build_localhost_cors() -> CorsLayer {
    let localhost_origins = vec![
        "http://localhost:3000".parse::<HeaderValue>().ok(),
        "http://localhost:8080".parse::<HeaderValue>().ok(),
        "http://127.0.0.1:3000".parse::<HeaderValue>().ok(),
        "http://127.0.0.1:8080".parse::<HeaderValue>().ok(),
    ];
    let origins: Vec<HeaderValue> = localhost_origins.into_iter().flatten().collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}

// =============================================================================
// ROUTER CREATION
// =============================================================================

/// Create the axum router with all endpoints and middleware.
///
/// Middleware stack (outer to inner):
/// 1. Tracing - logs all requests
/// 2. CORS - handles preflight requests
/// 3. Body limit - bounds configuration payloads
pub fn create_router(state: AppState) -> Router {
    let cors = build_cors_layer();

    Router::new()
        .route("/health", get(handlers::health_handler))
        .route("/status", get(handlers::status_handler))
        .route(
            "/topocosts",
            get(handlers::list_topocosts_handler).post(handlers::set_topocosts_handler),
        )
        .route("/topoedges", get(handlers::list_topoedges_handler))
        .route("/mstedges", get(handlers::list_mstedges_handler))
        .route(
            "/redundantedges",
            get(handlers::list_redundantedges_handler),
        )
        .route(
            "/links",
            post(handlers::link_added_handler).delete(handlers::link_removed_handler),
        )
        .layer(axum::extract::DefaultBodyLimit::max(2 * 1024 * 1024))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// =============================================================================
// SERVER STARTUP
// =============================================================================

/// Start the HTTP server around an already-configured controller.
pub async fn run_server(
    addr: &str,
    controller: Controller<LogPortControl>,
) -> Result<(), SpantreeError> {
    let state = AppState::new(controller);
    let router = create_router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| SpantreeError::IoError(format!("Bind failed: {}", e)))?;

    tracing::info!("spantree HTTP surface listening on {}", addr);

    axum::serve(listener, router)
        .await
        .map_err(|e| SpantreeError::IoError(format!("Server error: {}", e)))
}
