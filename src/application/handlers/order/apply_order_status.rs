//! ApplyOrderStatusHandler - Command handler for moving an order along
//! its fulfilment lifecycle.

use std::sync::Arc;

use crate::application::errors::{CommandError, EntityKind};
use crate::application::handlers::stats::{StatisticsAggregator, StatsSection};
use crate::domain::events::{DomainEvent, OrderStatusChanged};
use crate::domain::foundation::{OrderId, Timestamp};
use crate::domain::order::{Order, OrderStatus};
use crate::ports::{EventPublisher, OrderRepository};

/// Command to change an order's status.
#[derive(Debug, Clone)]
pub struct ApplyOrderStatusCommand {
    pub order_id: OrderId,
    pub status: OrderStatus,
}

/// Result of a successful status change.
#[derive(Debug, Clone)]
pub struct ApplyOrderStatusResult {
    pub order: Order,
    pub event: OrderStatusChanged,
}

/// Handler for order status changes.
pub struct ApplyOrderStatusHandler {
    repository: Arc<dyn OrderRepository>,
    stats: Arc<StatisticsAggregator>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl ApplyOrderStatusHandler {
    pub fn new(
        repository: Arc<dyn OrderRepository>,
        stats: Arc<StatisticsAggregator>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            repository,
            stats,
            event_publisher,
        }
    }

    pub async fn handle(
        &self,
        cmd: ApplyOrderStatusCommand,
    ) -> Result<ApplyOrderStatusResult, CommandError> {
        // 1. Load order
        let current = self
            .repository
            .get_order(cmd.order_id)
            .await?
            .ok_or_else(|| CommandError::not_found(EntityKind::Order, cmd.order_id))?;

        // 2. Validate transition
        let changed_at = Timestamp::now();
        let proposed = current.with_status(cmd.status, changed_at)?;

        // 3. Persist, failing if another writer got there first
        let order = self
            .repository
            .set_order_status(current.id, current.status, proposed.status, changed_at)
            .await?;

        // 4. Recount and publish, serialized with other order events
        let _section = self.stats.publish_section(StatsSection::Orders).await;
        let stats = self.stats.order_stats_for_event().await;

        let event = OrderStatusChanged {
            order_id: order.id,
            restaurant_id: order.restaurant_id,
            old_status: current.status,
            new_status: order.status,
            changed_at,
            stats,
        };
        self.event_publisher
            .publish(DomainEvent::OrderStatusChanged(event.clone()))
            .await;

        tracing::info!(
            order_id = %order.id,
            old_status = %event.old_status,
            new_status = %event.new_status,
            "Order status changed"
        );

        Ok(ApplyOrderStatusResult { order, event })
    }
}
