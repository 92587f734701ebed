//! Connection hub: the outbound side of every live session.
//!
//! Each session owns a bounded queue. Pushing enqueues the payload and
//! the session's socket task drains the queue onto the wire, so a push
//! never waits on network I/O. A full queue means the client is not
//! keeping up; the push waits at most `push_timeout` for room and then
//! reports `TimedOut`.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::{mpsc, RwLock};

use crate::config::RealtimeConfig;
use crate::ports::{ConnectionTransport, DeliveryError, SessionId};

/// Receiving end of a session's outbound queue.
pub type Outbound = mpsc::Receiver<Arc<str>>;

/// Per-session outbound queues.
pub struct ConnectionHub {
    senders: RwLock<HashMap<SessionId, mpsc::Sender<Arc<str>>>>,
    buffer: usize,
    push_timeout: Duration,
}

impl ConnectionHub {
    /// Creates a hub with `buffer` slots per session.
    pub fn new(buffer: usize, push_timeout: Duration) -> Self {
        Self {
            senders: RwLock::new(HashMap::new()),
            buffer: buffer.max(1),
            push_timeout,
        }
    }

    pub fn from_config(config: &RealtimeConfig) -> Self {
        Self::new(config.session_buffer, config.push_timeout())
    }

    /// Opens the outbound queue for a session.
    ///
    /// Registering an id twice replaces the earlier queue; its receiver
    /// then sees the channel close.
    pub async fn register(&self, session_id: SessionId) -> Outbound {
        let (tx, rx) = mpsc::channel(self.buffer);
        self.senders.write().await.insert(session_id, tx);
        rx
    }

    pub async fn is_connected(&self, session_id: &SessionId) -> bool {
        self.senders.read().await.contains_key(session_id)
    }

    pub async fn connection_count(&self) -> usize {
        self.senders.read().await.len()
    }
}

#[async_trait]
impl ConnectionTransport for ConnectionHub {
    async fn send(&self, session_id: &SessionId, payload: Arc<str>) -> Result<(), DeliveryError> {
        // Clone the sender so the map lock is not held while waiting.
        let tx = self
            .senders
            .read()
            .await
            .get(session_id)
            .cloned()
            .ok_or(DeliveryError::UnknownSession(*session_id))?;

        match tokio::time::timeout(self.push_timeout, tx.send(payload)).await {
            Ok(Ok(())) => Ok(()),
            Ok(Err(_)) => Err(DeliveryError::Closed(*session_id)),
            Err(_) => Err(DeliveryError::TimedOut(*session_id)),
        }
    }

    async fn close(&self, session_id: &SessionId) {
        if self.senders.write().await.remove(session_id).is_some() {
            tracing::debug!(session_id = %session_id, "Outbound queue closed");
        }
    }
}
