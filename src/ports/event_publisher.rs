//! EventPublisher port - Interface for publishing domain events.
//!
//! Command handlers publish through this port without knowing how the
//! event reaches dashboards.

use async_trait::async_trait;

use crate::domain::events::DomainEvent;

/// Port for publishing domain events to live dashboards.
///
/// Delivery is best-effort: implementations must not report delivery
/// problems back to the publisher. A state change that has been
/// persisted stays successful whether or not anyone saw the event.
///
/// # Example
///
/// ```ignore
/// let event = DomainEvent::OrderStatusChanged(changed);
/// publisher.publish(event).await;
/// ```
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Publish a single event.
    async fn publish(&self, event: DomainEvent);
}
