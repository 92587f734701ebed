//! Admin notification entity with delivery/open tracking.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{NotificationId, Timestamp, ValidationError};

/// Who a notification was addressed to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recipient {
    /// Broadcast to every customer.
    All,
    /// A single named recipient.
    Named(String),
}

/// A notification sent by an admin.
///
/// Invariant: `open_count <= total_sent`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: NotificationId,
    pub title: String,
    pub message: String,
    pub recipient: Recipient,
    pub total_sent: u32,
    pub open_count: u32,
    pub created_at: Timestamp,
}

/// A validated notification that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationDraft {
    pub title: String,
    pub message: String,
    pub recipient: Recipient,
    pub total_sent: u32,
}

impl NotificationDraft {
    /// Validates the fields of a notification about to be sent to
    /// `total_sent` devices.
    ///
    /// # Errors
    ///
    /// `EmptyField` if the title or message is blank, or if a named
    /// recipient has an empty name.
    pub fn new(
        title: impl Into<String>,
        message: impl Into<String>,
        recipient: Recipient,
        total_sent: u32,
    ) -> Result<Self, ValidationError> {
        let title = title.into();
        let message = message.into();
        if title.trim().is_empty() {
            return Err(ValidationError::empty_field("title"));
        }
        if message.trim().is_empty() {
            return Err(ValidationError::empty_field("message"));
        }
        if let Recipient::Named(name) = &recipient {
            if name.trim().is_empty() {
                return Err(ValidationError::empty_field("recipient"));
            }
        }
        Ok(Self {
            title,
            message,
            recipient,
            total_sent,
        })
    }

    /// Turns the draft into a stored notification with no opens.
    pub fn into_notification(self, id: NotificationId, created_at: Timestamp) -> Notification {
        Notification {
            id,
            title: self.title,
            message: self.message,
            recipient: self.recipient,
            total_sent: self.total_sent,
            open_count: 0,
            created_at,
        }
    }
}

impl Notification {
    /// Creates a notification that has been sent to `total_sent` devices.
    pub fn new(
        id: NotificationId,
        title: impl Into<String>,
        message: impl Into<String>,
        recipient: Recipient,
        total_sent: u32,
    ) -> Result<Self, ValidationError> {
        Ok(NotificationDraft::new(title, message, recipient, total_sent)?
            .into_notification(id, Timestamp::now()))
    }

    /// Returns the notification with one more open recorded.
    ///
    /// Clamped: once every sent copy has been opened, further opens are
    /// accepted but leave the count unchanged.
    pub fn opened(&self) -> Self {
        Self {
            open_count: self.open_count.saturating_add(1).min(self.total_sent),
            ..self.clone()
        }
    }

    /// Fraction of sent copies that were opened, 0 when nothing was sent.
    pub fn open_rate(&self) -> f64 {
        if self.total_sent == 0 {
            0.0
        } else {
            f64::from(self.open_count) / f64::from(self.total_sent)
        }
    }
}
