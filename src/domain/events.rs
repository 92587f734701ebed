//! Domain events pushed to admin dashboards.
//!
//! A closed set: every state change the dashboards care about is one
//! variant of [`DomainEvent`], and consumers dispatch on it with an
//! exhaustive `match`.
//!
//! # Wire shape
//!
//! ```text
//! { "type": "order_status_changed", "data": { ... }, "timestamp": "2024-01-15T10:30:00.000Z" }
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::domain::catalog::{MenuChange, RestaurantChange};
use crate::domain::foundation::{NotificationId, OrderId, RestaurantId, TicketId, Timestamp};
use crate::domain::notification::Notification;
use crate::domain::order::OrderStatus;
use crate::domain::stats::{NotificationStats, OrderStats, SupportStats};
use crate::domain::support::{SupportTicket, TicketStatus};

// ============================================
// Event payloads
// ============================================

/// An order moved along its lifecycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderStatusChanged {
    pub order_id: OrderId,
    pub restaurant_id: RestaurantId,
    pub old_status: OrderStatus,
    pub new_status: OrderStatus,
    pub changed_at: Timestamp,
    /// Recomputed after the change; absent if the recount failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<OrderStats>,
}

/// An admin answered (or amended the answer to) a support ticket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupportResponded {
    pub ticket: SupportTicket,
    pub responded_at: Timestamp,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<SupportStats>,
}

/// A support ticket was soft-deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupportDeleted {
    pub ticket_id: TicketId,
    pub previous_status: TicketStatus,
    pub deleted_at: Timestamp,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<SupportStats>,
}

/// A recipient opened a notification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationOpened {
    pub notification_id: NotificationId,
    pub open_count: u32,
    pub total_sent: u32,
    pub open_rate: f64,
    pub opened_at: Timestamp,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<NotificationStats>,
}

/// An admin sent a new notification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationCreated {
    pub notification: Notification,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<NotificationStats>,
}

/// A restaurant record changed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantChanged {
    #[serde(flatten)]
    pub change: RestaurantChange,
    pub changed_at: Timestamp,
}

/// A menu item of one restaurant changed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuChanged {
    #[serde(flatten)]
    pub change: MenuChange,
    pub changed_at: Timestamp,
}

// ============================================
// The closed event type
// ============================================

/// Tag identifying the kind of a [`DomainEvent`] on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    OrderStatusChanged,
    SupportResponded,
    SupportDeleted,
    NotificationOpened,
    NotificationCreated,
    RestaurantChanged,
    MenuChanged,
}

impl EventType {
    /// The wire tag, as sent in the `type` field.
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::OrderStatusChanged => "order_status_changed",
            EventType::SupportResponded => "support_responded",
            EventType::SupportDeleted => "support_deleted",
            EventType::NotificationOpened => "notification_opened",
            EventType::NotificationCreated => "notification_created",
            EventType::RestaurantChanged => "restaurant_changed",
            EventType::MenuChanged => "menu_changed",
        }
    }
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A state change worth telling connected dashboards about.
#[derive(Debug, Clone, PartialEq)]
pub enum DomainEvent {
    OrderStatusChanged(OrderStatusChanged),
    SupportResponded(SupportResponded),
    SupportDeleted(SupportDeleted),
    NotificationOpened(NotificationOpened),
    NotificationCreated(NotificationCreated),
    RestaurantChanged(RestaurantChanged),
    MenuChanged(MenuChanged),
}

impl DomainEvent {
    /// The event's tag.
    pub fn event_type(&self) -> EventType {
        match self {
            DomainEvent::OrderStatusChanged(_) => EventType::OrderStatusChanged,
            DomainEvent::SupportResponded(_) => EventType::SupportResponded,
            DomainEvent::SupportDeleted(_) => EventType::SupportDeleted,
            DomainEvent::NotificationOpened(_) => EventType::NotificationOpened,
            DomainEvent::NotificationCreated(_) => EventType::NotificationCreated,
            DomainEvent::RestaurantChanged(_) => EventType::RestaurantChanged,
            DomainEvent::MenuChanged(_) => EventType::MenuChanged,
        }
    }

    /// When the underlying state change happened.
    pub fn occurred_at(&self) -> Timestamp {
        match self {
            DomainEvent::OrderStatusChanged(e) => e.changed_at,
            DomainEvent::SupportResponded(e) => e.responded_at,
            DomainEvent::SupportDeleted(e) => e.deleted_at,
            DomainEvent::NotificationOpened(e) => e.opened_at,
            DomainEvent::NotificationCreated(e) => e.notification.created_at,
            DomainEvent::RestaurantChanged(e) => e.changed_at,
            DomainEvent::MenuChanged(e) => e.changed_at,
        }
    }

    /// Identifier of the entity the event is about, for logging.
    pub fn subject_id(&self) -> String {
        match self {
            DomainEvent::OrderStatusChanged(e) => e.order_id.to_string(),
            DomainEvent::SupportResponded(e) => e.ticket.id.to_string(),
            DomainEvent::SupportDeleted(e) => e.ticket_id.to_string(),
            DomainEvent::NotificationOpened(e) => e.notification_id.to_string(),
            DomainEvent::NotificationCreated(e) => e.notification.id.to_string(),
            DomainEvent::RestaurantChanged(e) => e.change.restaurant_id.to_string(),
            DomainEvent::MenuChanged(e) => e.change.menu_item_id.to_string(),
        }
    }

    /// Serializes the event-specific payload.
    pub fn data(&self) -> Result<JsonValue, serde_json::Error> {
        match self {
            DomainEvent::OrderStatusChanged(e) => serde_json::to_value(e),
            DomainEvent::SupportResponded(e) => serde_json::to_value(e),
            DomainEvent::SupportDeleted(e) => serde_json::to_value(e),
            DomainEvent::NotificationOpened(e) => serde_json::to_value(e),
            DomainEvent::NotificationCreated(e) => serde_json::to_value(e),
            DomainEvent::RestaurantChanged(e) => serde_json::to_value(e),
            DomainEvent::MenuChanged(e) => serde_json::to_value(e),
        }
    }

    /// Builds the tagged wire message for this event.
    pub fn to_message(&self) -> Result<EventMessage, serde_json::Error> {
        Ok(EventMessage {
            event_type: self.event_type(),
            data: self.data()?,
            timestamp: self.occurred_at().to_rfc3339(),
        })
    }
}

/// Tagged wire representation of a [`DomainEvent`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventMessage {
    #[serde(rename = "type")]
    pub event_type: EventType,
    pub data: JsonValue,
    pub timestamp: String,
}
