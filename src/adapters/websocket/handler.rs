//! WebSocket upgrade handler for the admin live channel.
//!
//! Handles the HTTP → WebSocket upgrade and manages the connection lifecycle:
//! 1. Upgrade to WebSocket
//! 2. Open a session and send `connected`
//! 3. Forward the session's outbound queue to the socket, with heartbeats
//! 4. Apply join/leave/ping frames from the client
//! 5. Drop the session on disconnect

use std::fmt::Display;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::Response,
};
use futures::{Sink, SinkExt, StreamExt};
use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};

use crate::config::RealtimeConfig;
use crate::ports::SessionId;

use super::gateway::SessionGateway;
use super::hub::Outbound;
use super::messages::ServerMessage;

/// State required for WebSocket handling.
#[derive(Clone)]
pub struct RealtimeState {
    pub gateway: Arc<SessionGateway>,
    /// Server ping cadence; `None` disables heartbeats.
    pub heartbeat: Option<Duration>,
    pub write_timeout: Duration,
}

impl RealtimeState {
    pub fn new(gateway: Arc<SessionGateway>, config: &RealtimeConfig) -> Self {
        Self {
            gateway,
            heartbeat: config.heartbeat_interval(),
            write_timeout: config.write_timeout(),
        }
    }
}

/// Handle WebSocket upgrade requests for the admin dashboard.
///
/// Route: `GET /api/admin/live`
///
/// Callers are expected to be authenticated admins; authorization happens
/// in front of this route.
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<RealtimeState>) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Runs for the lifetime of one connection.
async fn handle_socket(socket: WebSocket, state: RealtimeState) {
    let (sender, mut receiver) = socket.split();
    let gateway = state.gateway.clone();

    let session = gateway.on_connect().await;
    let session_id = session.id;

    if let Err(e) = gateway
        .reply(session_id, &ServerMessage::connected(session_id))
        .await
    {
        tracing::debug!(session_id = %session_id, "Failed to queue connected message: {}", e);
        gateway.on_disconnect(session_id).await;
        return;
    }

    // Forward the outbound queue (events and control replies) to the client
    let mut send_task = tokio::spawn(forward_outbound(
        sender,
        session.outbound,
        session_id,
        state.heartbeat,
        state.write_timeout,
    ));

    // Handle incoming messages from client
    let recv_gateway = gateway.clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(result) = receiver.next().await {
            match result {
                Ok(Message::Text(text)) => {
                    let reply = recv_gateway.handle_client_frame(session_id, &text).await;
                    if let Err(e) = recv_gateway.reply(session_id, &reply).await {
                        tracing::debug!(session_id = %session_id, "Reply not queued: {}", e);
                        break;
                    }
                }
                Ok(Message::Binary(_)) => {
                    tracing::warn!(session_id = %session_id, "Received unsupported binary message");
                    let reply = ServerMessage::error("UNSUPPORTED", "Binary frames are not supported");
                    if recv_gateway.reply(session_id, &reply).await.is_err() {
                        break;
                    }
                }
                Ok(Message::Ping(_)) | Ok(Message::Pong(_)) => {
                    // Protocol-level keepalive, answered by axum
                }
                Ok(Message::Close(_)) => {
                    tracing::debug!(session_id = %session_id, "Client sent close frame");
                    break;
                }
                Err(e) => {
                    tracing::debug!(session_id = %session_id, "Receive error: {}", e);
                    break;
                }
            }
        }
    });

    // Wait for either task to finish
    tokio::select! {
        _ = &mut send_task => recv_task.abort(),
        _ = &mut recv_task => send_task.abort(),
    }

    gateway.on_disconnect(session_id).await;
}

/// Drains the session queue onto the socket until either side closes.
///
/// Heartbeats go out only after a full interval without any other frame.
/// A frame the socket does not accept within `write_timeout` ends the
/// connection.
async fn forward_outbound<S>(
    mut sender: S,
    mut outbound: Outbound,
    session_id: SessionId,
    heartbeat: Option<Duration>,
    write_timeout: Duration,
) where
    S: Sink<Message> + Unpin,
    S::Error: Display,
{
    let mut ticker = heartbeat.map(|period| {
        let mut ticker = interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        ticker
    });

    loop {
        let frame = tokio::select! {
            next = outbound.recv() => match next {
                Some(payload) => Message::Text(payload.to_string()),
                // Queue closed: the session was dropped
                None => break,
            },
            _ = next_heartbeat(&mut ticker) => Message::Ping(Vec::new()),
        };

        match tokio::time::timeout(write_timeout, sender.send(frame)).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                tracing::debug!(session_id = %session_id, "Send error, closing connection: {}", e);
                break;
            }
            Err(_) => {
                tracing::warn!(
                    session_id = %session_id,
                    timeout_ms = write_timeout.as_millis() as u64,
                    "Socket write timed out, closing connection"
                );
                break;
            }
        }

        if let Some(ticker) = ticker.as_mut() {
            ticker.reset();
        }
    }

    let _ = tokio::time::timeout(write_timeout, sender.close()).await;
}

async fn next_heartbeat(ticker: &mut Option<Interval>) {
    match ticker {
        Some(ticker) => {
            ticker.tick().await;
        }
        None => std::future::pending::<()>().await,
    }
}

/// Create axum router for the live endpoint.
///
/// # Example
///
/// ```ignore
/// let app = Router::new()
///     .nest("/api", realtime_router())
///     .with_state(realtime_state);
/// ```
pub fn realtime_router() -> axum::Router<RealtimeState> {
    use axum::routing::get;

    axum::Router::new().route("/admin/live", get(ws_handler))
}
