//! Health check endpoint

use axum::{extract::State, Json};
use serde::Serialize;

use crate::adapters::websocket::RealtimeState;
use crate::domain::foundation::Timestamp;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    /// Live admin sessions.
    pub sessions: usize,
    /// Topics with at least one subscriber.
    pub topics: usize,
    /// Sessions with an open outbound queue.
    pub connections: usize,
    pub timestamp: String,
}

/// Route: `GET /health`
pub async fn health_check(State(state): State<RealtimeState>) -> Json<HealthResponse> {
    let registry = state.gateway.registry();
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        sessions: registry.session_count().await,
        topics: registry.topics().await.len(),
        connections: state.gateway.hub().connection_count().await,
        timestamp: Timestamp::now().to_rfc3339(),
    })
}
