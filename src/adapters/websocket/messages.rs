//! WebSocket message types for the admin live channel.
//!
//! Defines the control protocol between server and connected dashboards:
//! - Server → Client: connection status, subscription acks, errors, pongs
//! - Client → Server: join/leave topic, pings
//!
//! Domain events are not listed here; they go out as
//! [`EventMessage`](crate::domain::events::EventMessage) payloads.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{RestaurantId, Timestamp};

use super::topics::{Topic, TopicKind};

// ============================================
// Server → Client Messages
// ============================================

/// Control frames sent from server to client.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// Connection established; carries the server-assigned session id.
    Connected(ConnectedMessage),

    /// A join request was applied.
    Subscribed(TopicAck),

    /// A leave request was applied.
    Unsubscribed(TopicAck),

    /// A client frame could not be handled.
    Error(ErrorMessage),

    /// Reply to a client ping.
    Pong(PongMessage),
}

impl ServerMessage {
    pub fn connected(session_id: impl ToString) -> Self {
        ServerMessage::Connected(ConnectedMessage {
            session_id: session_id.to_string(),
            timestamp: Timestamp::now().to_rfc3339(),
        })
    }

    pub fn subscribed(topic: &Topic) -> Self {
        ServerMessage::Subscribed(TopicAck {
            topic: topic.to_string(),
        })
    }

    pub fn unsubscribed(topic: &Topic) -> Self {
        ServerMessage::Unsubscribed(TopicAck {
            topic: topic.to_string(),
        })
    }

    pub fn error(code: impl ToString, message: impl Into<String>) -> Self {
        ServerMessage::Error(ErrorMessage {
            code: code.to_string(),
            message: message.into(),
            timestamp: Timestamp::now().to_rfc3339(),
        })
    }

    pub fn pong() -> Self {
        ServerMessage::Pong(PongMessage {
            timestamp: Timestamp::now().to_rfc3339(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectedMessage {
    pub session_id: String,
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopicAck {
    pub topic: String,
}

/// Error message sent to client.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorMessage {
    pub code: String,
    pub message: String,
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PongMessage {
    pub timestamp: String,
}

// ============================================
// Client → Server Messages
// ============================================

/// Frames accepted from the client.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Subscribe to a topic. Idempotent.
    JoinTopic(TopicRequest),

    /// Unsubscribe from a topic. Idempotent.
    LeaveTopic(TopicRequest),

    /// Heartbeat request.
    Ping,
}

/// Topic selection in a join or leave request.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicRequest {
    pub topic: TopicKind,
    /// Required for `menu-updates`, ignored otherwise.
    #[serde(default)]
    pub restaurant_id: Option<RestaurantId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_topic_parses_with_restaurant_id() {
        let msg: ClientMessage = serde_json::from_str(
            r#"{"type":"join_topic","topic":"menu-updates","restaurantId":3}"#,
        )
        .unwrap();
        assert_eq!(
            msg,
            ClientMessage::JoinTopic(TopicRequest {
                topic: TopicKind::Menu,
                restaurant_id: Some(RestaurantId::new(3)),
            })
        );
    }

    #[test]
    fn leave_topic_parses_without_params() {
        let msg: ClientMessage =
            serde_json::from_str(r#"{"type":"leave_topic","topic":"order-updates"}"#).unwrap();
        assert!(matches!(msg, ClientMessage::LeaveTopic(TopicRequest { restaurant_id: None, .. })));
    }

    #[test]
    fn ping_parses() {
        let msg: ClientMessage = serde_json::from_str(r#"{"type":"ping"}"#).unwrap();
        assert_eq!(msg, ClientMessage::Ping);
    }

    #[test]
    fn unknown_type_is_rejected() {
        assert!(serde_json::from_str::<ClientMessage>(r#"{"type":"request.state"}"#).is_err());
    }

    #[test]
    fn connected_serializes_with_tag() {
        let json = serde_json::to_value(ServerMessage::connected("abc")).unwrap();
        assert_eq!(json["type"], "connected");
        assert_eq!(json["sessionId"], "abc");
        assert!(json["timestamp"].is_string());
    }

    #[test]
    fn subscribed_carries_topic_name() {
        let topic = Topic::MenuUpdates(RestaurantId::new(3));
        let json = serde_json::to_value(ServerMessage::subscribed(&topic)).unwrap();
        assert_eq!(json["type"], "subscribed");
        assert_eq!(json["topic"], "menu-updates:3");
    }

    #[test]
    fn error_carries_code_and_message() {
        let json =
            serde_json::to_value(ServerMessage::error("VALIDATION_FAILED", "bad frame")).unwrap();
        assert_eq!(json["type"], "error");
        assert_eq!(json["code"], "VALIDATION_FAILED");
        assert_eq!(json["message"], "bad frame");
    }
}
