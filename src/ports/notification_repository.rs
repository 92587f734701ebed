//! Notification repository port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, NotificationId};
use crate::domain::notification::{Notification, NotificationDraft};

/// Repository port for notification persistence and open tracking.
#[async_trait]
pub trait NotificationRepository: Send + Sync {
    /// Find a notification by its ID.
    ///
    /// Returns `None` if not found.
    async fn get_notification(
        &self,
        id: NotificationId,
    ) -> Result<Option<Notification>, DomainError>;

    /// Store a new notification, assigning its ID and creation time.
    async fn create_notification(
        &self,
        draft: NotificationDraft,
    ) -> Result<Notification, DomainError>;

    /// Atomically count one open, never exceeding `total_sent`.
    ///
    /// Returns the notification after the increment.
    ///
    /// # Errors
    ///
    /// - `NotificationNotFound` if the notification does not exist
    /// - `StorageUnavailable` if the store cannot be reached
    async fn increment_notification_open(
        &self,
        id: NotificationId,
    ) -> Result<Notification, DomainError>;
}
