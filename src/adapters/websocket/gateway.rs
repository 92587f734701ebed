//! Session gateway: lifecycle of one live admin connection.
//!
//! The socket handler drives a session through the gateway:
//! `on_connect` → any number of `handle_client_frame` → `on_disconnect`.
//! Everything addressed to the client, control replies and domain events
//! alike, travels through the session's hub queue.

use std::sync::Arc;

use crate::application::errors::CommandError;
use crate::domain::events::DomainEvent;
use crate::domain::foundation::{ErrorCode, RestaurantId};
use crate::ports::{ConnectionTransport, DeliveryError, SessionId};

use super::dispatcher::encode;
use super::hub::{ConnectionHub, Outbound};
use super::messages::{ClientMessage, ServerMessage, TopicRequest};
use super::registry::TopicRegistry;
use super::topics::{Topic, TopicKind};

/// A freshly connected session and its outbound queue.
pub struct LiveSession {
    pub id: SessionId,
    pub outbound: Outbound,
}

/// Entry point for connection events.
pub struct SessionGateway {
    registry: Arc<TopicRegistry>,
    hub: Arc<ConnectionHub>,
}

impl SessionGateway {
    pub fn new(registry: Arc<TopicRegistry>, hub: Arc<ConnectionHub>) -> Self {
        Self { registry, hub }
    }

    pub fn registry(&self) -> &Arc<TopicRegistry> {
        &self.registry
    }

    pub fn hub(&self) -> &Arc<ConnectionHub> {
        &self.hub
    }

    /// Creates a session with no subscriptions.
    pub async fn on_connect(&self) -> LiveSession {
        let id = SessionId::new();
        let outbound = self.hub.register(id).await;
        self.registry.add_session(id).await;
        tracing::info!(session_id = %id, "Admin session connected");
        LiveSession { id, outbound }
    }

    /// Subscribes the session to the topic built from `kind`.
    pub async fn on_subscribe(
        &self,
        session_id: SessionId,
        kind: TopicKind,
        restaurant_id: Option<RestaurantId>,
    ) -> Result<Topic, CommandError> {
        let topic = Topic::from_kind(kind, restaurant_id)?;
        if self.registry.subscribe(session_id, topic).await {
            tracing::debug!(session_id = %session_id, topic = %topic, "Subscribed");
        }
        Ok(topic)
    }

    /// Unsubscribes the session. Leaving a topic never joined is fine.
    pub async fn on_unsubscribe(
        &self,
        session_id: SessionId,
        kind: TopicKind,
        restaurant_id: Option<RestaurantId>,
    ) -> Result<Topic, CommandError> {
        let topic = Topic::from_kind(kind, restaurant_id)?;
        if self.registry.unsubscribe(session_id, topic).await {
            tracing::debug!(session_id = %session_id, topic = %topic, "Unsubscribed");
        }
        Ok(topic)
    }

    /// Forgets the session and closes its queue.
    pub async fn on_disconnect(&self, session_id: SessionId) {
        let topics = self.registry.drop_session(session_id).await;
        self.hub.close(&session_id).await;
        tracing::info!(
            session_id = %session_id,
            topics = topics.len(),
            "Admin session disconnected"
        );
    }

    /// Delivers one event to one session, bounded by the push timeout.
    pub async fn push(&self, session_id: SessionId, event: &DomainEvent) -> Result<(), DeliveryError> {
        let payload = encode(event).map_err(|e| DeliveryError::Encode(e.to_string()))?;
        self.hub.send(&session_id, payload).await
    }

    /// Queues a control frame for the session.
    pub async fn reply(&self, session_id: SessionId, message: &ServerMessage) -> Result<(), DeliveryError> {
        let json =
            serde_json::to_string(message).map_err(|e| DeliveryError::Encode(e.to_string()))?;
        self.hub.send(&session_id, Arc::from(json)).await
    }

    /// Applies one text frame from the client and returns the reply.
    pub async fn handle_client_frame(&self, session_id: SessionId, text: &str) -> ServerMessage {
        let message = match serde_json::from_str::<ClientMessage>(text) {
            Ok(message) => message,
            Err(e) => {
                tracing::debug!(session_id = %session_id, error = %e, "Malformed client frame");
                return ServerMessage::error(ErrorCode::InvalidFormat, e.to_string());
            }
        };

        match message {
            ClientMessage::JoinTopic(TopicRequest {
                topic,
                restaurant_id,
            }) => match self.on_subscribe(session_id, topic, restaurant_id).await {
                Ok(topic) => ServerMessage::subscribed(&topic),
                Err(e) => ServerMessage::error(e.code(), e.to_string()),
            },
            ClientMessage::LeaveTopic(TopicRequest {
                topic,
                restaurant_id,
            }) => match self.on_unsubscribe(session_id, topic, restaurant_id).await {
                Ok(topic) => ServerMessage::unsubscribed(&topic),
                Err(e) => ServerMessage::error(e.code(), e.to_string()),
            },
            ClientMessage::Ping => ServerMessage::pong(),
        }
    }
}
