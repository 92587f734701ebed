//! Order entity.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    CustomerId, OrderId, RestaurantId, StateMachine, Timestamp, ValidationError,
};

use super::OrderStatus;

/// A customer order as far as the admin dashboard cares about it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub customer_id: CustomerId,
    pub restaurant_id: RestaurantId,
    pub status: OrderStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Order {
    /// Creates a freshly placed order in `New`.
    pub fn new(id: OrderId, customer_id: CustomerId, restaurant_id: RestaurantId) -> Self {
        let now = Timestamp::now();
        Self {
            id,
            customer_id,
            restaurant_id,
            status: OrderStatus::New,
            created_at: now,
            updated_at: now,
        }
    }

    /// Returns a copy of the order with the status moved to `target`.
    ///
    /// The order itself is left untouched so a rejected transition never
    /// leaves a partially-applied value behind.
    pub fn with_status(&self, target: OrderStatus, at: Timestamp) -> Result<Self, ValidationError> {
        let status = self.status.transition_to(target)?;
        Ok(Self {
            status,
            updated_at: at,
            ..self.clone()
        })
    }
}
