//! Notification command handlers.

mod create_notification;
mod record_open;

pub use create_notification::{
    CreateNotificationCommand, CreateNotificationHandler, CreateNotificationResult,
};
pub use record_open::{
    RecordNotificationOpenCommand, RecordNotificationOpenHandler, RecordNotificationOpenResult,
};
