//! ConnectionTransport port - per-session push to connected dashboards.
//!
//! Each connected admin client is one session. The transport knows how to
//! get a serialized payload onto that client's connection; it does not
//! know about topics.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use uuid::Uuid;

/// Unique identifier for one live dashboard connection.
///
/// Generated server-side when a client connects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(Uuid);

impl SessionId {
    /// Create a new random session ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SessionId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Reasons a push to one session failed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DeliveryError {
    /// The session is not (or no longer) connected.
    #[error("Session {0} is not connected")]
    UnknownSession(SessionId),

    /// The connection closed while the push was in flight.
    #[error("Connection for session {0} is closed")]
    Closed(SessionId),

    /// The session did not accept the payload within the push timeout.
    #[error("Push to session {0} timed out")]
    TimedOut(SessionId),

    /// The message could not be serialized for the wire.
    #[error("Failed to encode message: {0}")]
    Encode(String),
}

/// Port for pushing payloads to individual sessions.
///
/// Implementations must bound `send` in time: a stalled client must
/// produce `TimedOut` rather than hold the caller.
#[async_trait]
pub trait ConnectionTransport: Send + Sync {
    /// Push one serialized payload to a session.
    async fn send(&self, session_id: &SessionId, payload: Arc<str>) -> Result<(), DeliveryError>;

    /// Tear down a session's outbound path. No-op if already gone.
    async fn close(&self, session_id: &SessionId);
}
