//! RecordNotificationOpenHandler - counts a recipient opening a notification.

use std::sync::Arc;

use crate::application::errors::CommandError;
use crate::application::handlers::stats::{StatisticsAggregator, StatsSection};
use crate::domain::events::{DomainEvent, NotificationOpened};
use crate::domain::foundation::{NotificationId, Timestamp};
use crate::domain::notification::Notification;
use crate::ports::{EventPublisher, NotificationRepository};

/// Command to record one open.
#[derive(Debug, Clone)]
pub struct RecordNotificationOpenCommand {
    pub notification_id: NotificationId,
}

/// Result of a recorded open.
#[derive(Debug, Clone)]
pub struct RecordNotificationOpenResult {
    pub notification: Notification,
    pub event: NotificationOpened,
}

/// Handler for notification opens.
///
/// Opens beyond `total_sent` are accepted but not counted. An event is
/// published either way.
pub struct RecordNotificationOpenHandler {
    repository: Arc<dyn NotificationRepository>,
    stats: Arc<StatisticsAggregator>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl RecordNotificationOpenHandler {
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
        cmd: RecordNotificationOpenCommand,
    ) -> Result<RecordNotificationOpenResult, CommandError> {
        // 1. Atomic clamped increment
        let notification = self
            .repository
            .increment_notification_open(cmd.notification_id)
            .await?;

        // 2. Recount and publish
        let _section = self.stats.publish_section(StatsSection::Notifications).await;
        let stats = self.stats.notification_stats_for_event().await;
        let event = NotificationOpened {
            notification_id: notification.id,
            open_count: notification.open_count,
            total_sent: notification.total_sent,
            open_rate: notification.open_rate(),
            opened_at: Timestamp::now(),
            stats,
        };
        self.event_publisher
            .publish(DomainEvent::NotificationOpened(event.clone()))
            .await;

        tracing::debug!(
            notification_id = %notification.id,
            open_count = notification.open_count,
            total_sent = notification.total_sent,
            "Notification open recorded"
        );

        Ok(RecordNotificationOpenResult {
            notification,
            event,
        })
    }
}
