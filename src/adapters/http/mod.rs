//! HTTP adapters - the router served by the binary.
//!
//! ```text
//! GET /health           liveness plus session/topic counts
//! GET /api/admin/live   WebSocket upgrade for admin dashboards
//! ```

pub mod health;

use axum::{http::HeaderValue, routing::get, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::adapters::websocket::{realtime_router, RealtimeState};
use crate::config::ServerConfig;

pub use health::{health_check, HealthResponse};

/// Builds the full application router.
pub fn app_router(state: RealtimeState, server: &ServerConfig) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api", realtime_router())
        .layer(cors_layer(server))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Allows the configured origins, or any origin when none are configured
/// outside production.
fn cors_layer(server: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = server
        .cors_origins_list()
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring unparseable CORS origin");
                None
            }
        })
        .collect();

    if origins.is_empty() && !server.is_production() {
        CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)
    } else {
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}
