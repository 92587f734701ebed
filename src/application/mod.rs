//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Each command handler follows the same shape: load, validate, persist,
//! recount, publish.

pub mod errors;
pub mod handlers;

pub use errors::{CommandError, EntityKind};
pub use handlers::{
    ApplyOrderStatusCommand, ApplyOrderStatusHandler, ApplyOrderStatusResult,
    CatalogChangeHandler, CreateNotificationCommand, CreateNotificationHandler,
    CreateNotificationResult, DeleteTicketCommand, DeleteTicketHandler, DeleteTicketResult,
    RecordNotificationOpenCommand, RecordNotificationOpenHandler, RecordNotificationOpenResult,
    RespondToTicketCommand, RespondToTicketHandler, RespondToTicketResult, StatisticsAggregator,
};
