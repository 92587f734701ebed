//! Order repository port.
//!
//! The relational store owns order records. This port exposes the two
//! calls the status workflow needs.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, OrderId, Timestamp};
use crate::domain::order::{Order, OrderStatus};

/// Repository port for order status persistence.
///
/// Implementations must make `set_order_status` a compare-and-set: two
/// writers that both validated against the same `expected` status must
/// not both succeed.
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Find an order by its ID.
    ///
    /// Returns `None` if not found.
    ///
    /// # Errors
    ///
    /// - `StorageUnavailable` if the store cannot be reached
    async fn get_order(&self, id: OrderId) -> Result<Option<Order>, DomainError>;

    /// Move the order to `status` if it is still in `expected`.
    ///
    /// # Errors
    ///
    /// - `OrderNotFound` if the order vanished
    /// - `Conflict` if the stored status is no longer `expected`
    /// - `StorageUnavailable` if the store cannot be reached
    async fn set_order_status(
        &self,
        id: OrderId,
        expected: OrderStatus,
        status: OrderStatus,
        at: Timestamp,
    ) -> Result<Order, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn OrderRepository) {}
    }
}
