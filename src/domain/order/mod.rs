//! Order domain - fulfilment lifecycle of customer orders.

mod aggregate;
mod status;

pub use aggregate::Order;
pub use status::OrderStatus;
