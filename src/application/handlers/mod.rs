//! Application handlers.
//!
//! Command handlers persist a state change, then publish the matching
//! domain event. Query-side aggregates live in `stats`.

pub mod catalog;
pub mod notification;
pub mod order;
pub mod stats;
pub mod support;

#[cfg(test)]
pub(crate) mod test_support;

pub use catalog::CatalogChangeHandler;
pub use notification::{
    CreateNotificationCommand, CreateNotificationHandler, CreateNotificationResult,
    RecordNotificationOpenCommand, RecordNotificationOpenHandler, RecordNotificationOpenResult,
};
pub use order::{ApplyOrderStatusCommand, ApplyOrderStatusHandler, ApplyOrderStatusResult};
pub use stats::StatisticsAggregator;
pub use support::{
    DeleteTicketCommand, DeleteTicketHandler, DeleteTicketResult, RespondToTicketCommand,
    RespondToTicketHandler, RespondToTicketResult,
};
