//! Order command handlers.

mod apply_order_status;

pub use apply_order_status::{
    ApplyOrderStatusCommand, ApplyOrderStatusHandler, ApplyOrderStatusResult,
};
