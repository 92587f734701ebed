//! Statistics reader port (read side).
//!
//! Supplies the raw material for dashboard aggregates. The counting
//! itself is done by the pure functions in `domain::stats`.
//!
//! # Consistency
//!
//! Every method must return a point-in-time snapshot: one query
//! transaction, or one read lock in process memory. A snapshot may be
//! stale by the time it is counted, but it must never reflect a
//! half-applied write.

use async_trait::async_trait;

use crate::domain::foundation::DomainError;
use crate::domain::order::OrderStatus;
use crate::domain::stats::NotificationTally;
use crate::domain::support::TicketStatus;

/// Reader port for aggregate statistics.
#[async_trait]
pub trait StatisticsReader: Send + Sync {
    /// Status of every order.
    async fn order_statuses(&self) -> Result<Vec<OrderStatus>, DomainError>;

    /// Status of every ticket ever created, deleted ones included.
    async fn ticket_statuses(&self) -> Result<Vec<TicketStatus>, DomainError>;

    /// Send/open counters and creation time of every notification.
    async fn notification_tallies(&self) -> Result<Vec<NotificationTally>, DomainError>;
}
