//! Strongly-typed identifier value objects.
//!
//! Entity records are owned by the relational store, so their identities
//! are the store's integer keys wrapped in distinct newtypes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ValidationError;

/// Declares a `u64`-backed identifier newtype with the usual conversions.
macro_rules! numeric_id {
    ($(#[$meta:meta])* $name:ident, $field:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            /// Wraps a raw storage key.
            pub const fn new(value: u64) -> Self {
                Self(value)
            }

            /// Returns the raw storage key.
            pub const fn value(&self) -> u64 {
                self.0
            }
        }

        impl From<u64> for $name {
            fn from(value: u64) -> Self {
                Self(value)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim()
                    .parse::<u64>()
                    .map(Self)
                    .map_err(|e| ValidationError::invalid_format($field, e.to_string()))
            }
        }
    };
}

numeric_id!(
    /// Identifier of a customer order.
    OrderId,
    "order_id"
);

numeric_id!(
    /// Identifier of a customer-support ticket.
    TicketId,
    "ticket_id"
);

numeric_id!(
    /// Identifier of an admin-authored notification.
    NotificationId,
    "notification_id"
);

numeric_id!(
    /// Identifier of a restaurant.
    RestaurantId,
    "restaurant_id"
);

numeric_id!(
    /// Identifier of a menu item within a restaurant.
    MenuItemId,
    "menu_item_id"
);

numeric_id!(
    /// Identifier of a customer account.
    CustomerId,
    "customer_id"
);
