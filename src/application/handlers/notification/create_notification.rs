//! CreateNotificationHandler - Command handler for sending notifications.

use std::sync::Arc;

use crate::application::errors::CommandError;
use crate::application::handlers::stats::{StatisticsAggregator, StatsSection};
use crate::domain::events::{DomainEvent, NotificationCreated};
use crate::domain::notification::{Notification, NotificationDraft, Recipient};
use crate::ports::{EventPublisher, NotificationRepository};

/// Command to record a notification sent to `total_sent` devices.
#[derive(Debug, Clone)]
pub struct CreateNotificationCommand {
    pub title: String,
    pub message: String,
    pub recipient: Recipient,
    pub total_sent: u32,
}

/// Result of a created notification.
#[derive(Debug, Clone)]
pub struct CreateNotificationResult {
    pub notification: Notification,
    pub event: NotificationCreated,
}

/// Handler for creating notifications.
pub struct CreateNotificationHandler {
    repository: Arc<dyn NotificationRepository>,
    stats: Arc<StatisticsAggregator>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl CreateNotificationHandler {
    pub fn new(
        repository: Arc<dyn NotificationRepository>,
        stats: Arc<StatisticsAggregator>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            repository,
            stats,
            event_publisher,
        }
    }

    pub async fn handle(
        &self,
        cmd: CreateNotificationCommand,
    ) -> Result<CreateNotificationResult, CommandError> {
        // 1. Validate
        let draft = NotificationDraft::new(cmd.title, cmd.message, cmd.recipient, cmd.total_sent)?;

        // 2. Persist
        let notification = self.repository.create_notification(draft).await?;

        // 3. Recount and publish
        let _section = self.stats.publish_section(StatsSection::Notifications).await;
        let stats = self.stats.notification_stats_for_event().await;
        let event = NotificationCreated {
            notification: notification.clone(),
            stats,
        };
        self.event_publisher
            .publish(DomainEvent::NotificationCreated(event.clone()))
            .await;

        tracing::info!(
            notification_id = %notification.id,
            total_sent = notification.total_sent,
            "Notification created"
        );

        Ok(CreateNotificationResult {
            notification,
            event,
        })
    }
}
