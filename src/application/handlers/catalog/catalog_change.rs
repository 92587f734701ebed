//! CatalogChangeHandler - announces restaurant and menu edits.
//!
//! The catalog itself is written elsewhere; this handler only turns a
//! completed write into an event for the dashboards.

use std::sync::Arc;

use crate::domain::catalog::{MenuChange, RestaurantChange};
use crate::domain::events::{DomainEvent, MenuChanged, RestaurantChanged};
use crate::domain::foundation::Timestamp;
use crate::ports::EventPublisher;

/// Handler for catalog change notices.
pub struct CatalogChangeHandler {
    event_publisher: Arc<dyn EventPublisher>,
}

impl CatalogChangeHandler {
    pub fn new(event_publisher: Arc<dyn EventPublisher>) -> Self {
        Self { event_publisher }
    }

    /// Publishes a restaurant change.
    pub async fn restaurant_changed(&self, change: RestaurantChange) -> RestaurantChanged {
        let event = RestaurantChanged {
            change,
            changed_at: Timestamp::now(),
        };
        self.event_publisher
            .publish(DomainEvent::RestaurantChanged(event.clone()))
            .await;
        event
    }

    /// Publishes a menu change, scoped to the item's restaurant.
    pub async fn menu_changed(&self, change: MenuChange) -> MenuChanged {
        let event = MenuChanged {
            change,
            changed_at: Timestamp::now(),
        };
        self.event_publisher
            .publish(DomainEvent::MenuChanged(event.clone()))
            .await;
        event
    }
}
