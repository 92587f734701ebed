//! StatisticsAggregator - dashboard aggregates over a storage snapshot.

use std::sync::Arc;

use tokio::sync::{Mutex, MutexGuard};

use crate::application::errors::CommandError;
use crate::domain::foundation::Timestamp;
use crate::domain::stats::{NotificationStats, OrderStats, SupportStats};
use crate::ports::StatisticsReader;

/// The aggregate an event carries, one per dashboard topic family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StatsSection {
    Orders,
    Support,
    Notifications,
}

/// Computes order, support and notification aggregates.
///
/// Every call reads a fresh snapshot; nothing is cached between calls.
/// Command handlers sharing one aggregator also share its publish
/// sections, see [`StatisticsAggregator::publish_section`].
pub struct StatisticsAggregator {
    reader: Arc<dyn StatisticsReader>,
    new_window_days: u32,
    orders_section: Mutex<()>,
    support_section: Mutex<()>,
    notifications_section: Mutex<()>,
}

impl StatisticsAggregator {
    /// Creates an aggregator that counts notifications created within the
    /// last `new_window_days` days as new.
    pub fn new(reader: Arc<dyn StatisticsReader>, new_window_days: u32) -> Self {
        Self {
            reader,
            new_window_days,
            orders_section: Mutex::new(()),
            support_section: Mutex::new(()),
            notifications_section: Mutex::new(()),
        }
    }

    pub fn new_window_days(&self) -> u32 {
        self.new_window_days
    }

    /// Order counts per status.
    pub async fn order_stats(&self) -> Result<OrderStats, CommandError> {
        let statuses = self.reader.order_statuses().await?;
        Ok(OrderStats::from_statuses(statuses))
    }

    /// Ticket counts per status, deleted tickets included.
    pub async fn support_stats(&self) -> Result<SupportStats, CommandError> {
        let statuses = self.reader.ticket_statuses().await?;
        Ok(SupportStats::from_statuses(statuses))
    }

    /// Notification totals, counting as new anything created at or after
    /// `cutoff`.
    pub async fn notification_stats_since(
        &self,
        cutoff: Timestamp,
    ) -> Result<NotificationStats, CommandError> {
        let tallies = self.reader.notification_tallies().await?;
        Ok(NotificationStats::from_tallies(tallies, cutoff))
    }

    /// Notification totals using the configured window.
    pub async fn notification_stats(&self) -> Result<NotificationStats, CommandError> {
        let cutoff = Timestamp::now().minus_days(i64::from(self.new_window_days));
        self.notification_stats_since(cutoff).await
    }

    // ------------------------------------------------------------------
    // Attachments for outgoing events. A failed recount is logged and the
    // event goes out without stats.
    // ------------------------------------------------------------------

    /// Serializes recount-then-publish for one aggregate.
    ///
    /// Hold the guard from the recount until the event carrying it has
    /// been published. A recount taken under the guard sees every write
    /// that finished before it, so the last event published for a section
    /// always carries the newest snapshot.
    pub(crate) async fn publish_section(&self, section: StatsSection) -> MutexGuard<'_, ()> {
        match section {
            StatsSection::Orders => self.orders_section.lock().await,
            StatsSection::Support => self.support_section.lock().await,
            StatsSection::Notifications => self.notifications_section.lock().await,
        }
    }

    pub(crate) async fn order_stats_for_event(&self) -> Option<OrderStats> {
        match self.order_stats().await {
            Ok(stats) => Some(stats),
            Err(e) => {
                tracing::warn!(error = %e, "Order stats recount failed; publishing without stats");
                None
            }
        }
    }

    pub(crate) async fn support_stats_for_event(&self) -> Option<SupportStats> {
        match self.support_stats().await {
            Ok(stats) => Some(stats),
            Err(e) => {
                tracing::warn!(error = %e, "Support stats recount failed; publishing without stats");
                None
            }
        }
    }

    pub(crate) async fn notification_stats_for_event(&self) -> Option<NotificationStats> {
        match self.notification_stats().await {
            Ok(stats) => Some(stats),
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    "Notification stats recount failed; publishing without stats"
                );
                None
            }
        }
    }
}
