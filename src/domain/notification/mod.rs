//! Notification domain - admin broadcasts and open tracking.

mod aggregate;

pub use aggregate::{Notification, NotificationDraft, Recipient};
