//! Aggregate statistics for the admin dashboard.
//!
//! Pure functions over an entity snapshot. Callers are responsible for
//! handing in a point-in-time view (see `ports::StatisticsReader`).

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Timestamp;
use crate::domain::order::OrderStatus;
use crate::domain::support::TicketStatus;

/// Order counts per status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderStats {
    pub new: u64,
    pub in_progress: u64,
    pub delivered: u64,
    pub canceled: u64,
    pub total: u64,
}

impl OrderStats {
    /// Tallies a snapshot of order statuses.
    pub fn from_statuses<I>(statuses: I) -> Self
    where
        I: IntoIterator<Item = OrderStatus>,
    {
        statuses.into_iter().fold(Self::default(), |mut acc, status| {
            match status {
                OrderStatus::New => acc.new += 1,
                OrderStatus::InProgress => acc.in_progress += 1,
                OrderStatus::Delivered => acc.delivered += 1,
                OrderStatus::Canceled => acc.canceled += 1,
            }
            acc.total += 1;
            acc
        })
    }

    /// Count for a single status.
    pub fn count(&self, status: OrderStatus) -> u64 {
        match status {
            OrderStatus::New => self.new,
            OrderStatus::InProgress => self.in_progress,
            OrderStatus::Delivered => self.delivered,
            OrderStatus::Canceled => self.canceled,
        }
    }
}

/// Support ticket counts. Deleted tickets are counted on their own.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupportStats {
    pub pending: u64,
    pub responded: u64,
    pub deleted: u64,
}

impl SupportStats {
    /// Tallies a snapshot of ticket statuses.
    pub fn from_statuses<I>(statuses: I) -> Self
    where
        I: IntoIterator<Item = TicketStatus>,
    {
        statuses.into_iter().fold(Self::default(), |mut acc, status| {
            match status {
                TicketStatus::Pending => acc.pending += 1,
                TicketStatus::Responded => acc.responded += 1,
                TicketStatus::Deleted => acc.deleted += 1,
            }
            acc
        })
    }

    /// Every ticket ever created, deleted ones included.
    pub fn total(&self) -> u64 {
        self.pending + self.responded + self.deleted
    }
}

/// The slice of a notification the statistics need.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotificationTally {
    pub total_sent: u32,
    pub open_count: u32,
    pub created_at: Timestamp,
}

/// Notification delivery and engagement figures.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationStats {
    /// Number of notifications.
    pub total: u64,
    /// Notifications created at or after the cutoff.
    pub new: u64,
    /// Sum of `total_sent`.
    pub total_sent: u64,
    /// Sum of `open_count`.
    pub total_opened: u64,
    /// `total_opened / total_sent`, 0 when nothing was sent.
    pub open_rate: f64,
}

impl NotificationStats {
    /// Tallies a snapshot, counting as "new" anything created at or
    /// after `new_since`.
    pub fn from_tallies<I>(tallies: I, new_since: Timestamp) -> Self
    where
        I: IntoIterator<Item = NotificationTally>,
    {
        let mut stats = tallies.into_iter().fold(Self::default(), |mut acc, t| {
            acc.total += 1;
            if !t.created_at.is_before(&new_since) {
                acc.new += 1;
            }
            acc.total_sent += u64::from(t.total_sent);
            acc.total_opened += u64::from(t.open_count);
            acc
        });
        stats.open_rate = if stats.total_sent == 0 {
            0.0
        } else {
            stats.total_opened as f64 / stats.total_sent as f64
        };
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_stats_counts_each_status() {
        let stats = OrderStats::from_statuses([
            OrderStatus::New,
            OrderStatus::New,
            OrderStatus::InProgress,
            OrderStatus::Delivered,
            OrderStatus::Canceled,
        ]);
        assert_eq!(stats.new, 2);
        assert_eq!(stats.in_progress, 1);
        assert_eq!(stats.delivered, 1);
        assert_eq!(stats.canceled, 1);
        assert_eq!(stats.total, 5);
        assert_eq!(stats.count(OrderStatus::New), 2);
    }

    #[test]
    fn order_stats_of_nothing_is_zero() {
        assert_eq!(OrderStats::from_statuses(Vec::<OrderStatus>::new()), OrderStats::default());
    }

    #[test]
    fn support_stats_total_includes_deleted() {
        let stats = SupportStats::from_statuses([
            TicketStatus::Pending,
            TicketStatus::Responded,
            TicketStatus::Responded,
            TicketStatus::Deleted,
        ]);
        assert_eq!(stats.pending, 1);
        assert_eq!(stats.responded, 2);
        assert_eq!(stats.deleted, 1);
        assert_eq!(stats.total(), 4);
    }

    #[test]
    fn notification_stats_sums_and_rates() {
        let now = Timestamp::now();
        let old = now.minus_days(30);
        let stats = NotificationStats::from_tallies(
            [
                NotificationTally {
                    total_sent: 10,
                    open_count: 4,
                    created_at: old,
                },
                NotificationTally {
                    total_sent: 10,
                    open_count: 6,
                    created_at: now,
                },
            ],
            now.minus_days(7),
        );
        assert_eq!(stats.total, 2);
        assert_eq!(stats.new, 1);
        assert_eq!(stats.total_sent, 20);
        assert_eq!(stats.total_opened, 10);
        assert!((stats.open_rate - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn notification_open_rate_is_zero_without_sends() {
        let stats = NotificationStats::from_tallies(
            [NotificationTally {
                total_sent: 0,
                open_count: 0,
                created_at: Timestamp::now(),
            }],
            Timestamp::now().minus_days(7),
        );
        assert_eq!(stats.open_rate, 0.0);
    }
}
