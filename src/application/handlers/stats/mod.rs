//! Dashboard statistics.

mod statistics_aggregator;

pub(crate) use statistics_aggregator::StatsSection;
pub use statistics_aggregator::StatisticsAggregator;
