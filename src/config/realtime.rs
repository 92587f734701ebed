//! Live channel configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Tuning for the admin live channel.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct RealtimeConfig {
    /// Upper bound on a single push to one session, in milliseconds
    #[serde(default = "default_push_timeout_ms")]
    pub push_timeout_ms: u64,

    /// Outbound queue depth per session
    #[serde(default = "default_session_buffer")]
    pub session_buffer: usize,

    /// Notifications younger than this count as new in dashboard stats
    #[serde(default = "default_new_notification_window_days")]
    pub new_notification_window_days: u32,

    /// Server ping cadence in seconds; 0 disables heartbeats
    #[serde(default = "default_heartbeat_interval_secs")]
    pub heartbeat_interval_secs: u64,

    /// Upper bound on writing one frame to a client socket, in seconds
    #[serde(default = "default_write_timeout_secs")]
    pub write_timeout_secs: u64,
}

impl RealtimeConfig {
    pub fn push_timeout(&self) -> Duration {
        Duration::from_millis(self.push_timeout_ms)
    }

    pub fn heartbeat_interval(&self) -> Option<Duration> {
        (self.heartbeat_interval_secs > 0).then(|| Duration::from_secs(self.heartbeat_interval_secs))
    }

    pub fn write_timeout(&self) -> Duration {
        Duration::from_secs(self.write_timeout_secs)
    }

    /// Validate live channel configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(1..=10_000).contains(&self.push_timeout_ms) {
            return Err(ValidationError::InvalidPushTimeout);
        }
        if self.session_buffer == 0 {
            return Err(ValidationError::InvalidSessionBuffer);
        }
        if self.new_notification_window_days == 0 {
            return Err(ValidationError::InvalidNotificationWindow);
        }
        if !(1..=300).contains(&self.write_timeout_secs) {
            return Err(ValidationError::InvalidWriteTimeout);
        }
        Ok(())
    }
}

impl Default for RealtimeConfig {
    fn default() -> Self {
        Self {
            push_timeout_ms: default_push_timeout_ms(),
            session_buffer: default_session_buffer(),
            new_notification_window_days: default_new_notification_window_days(),
            heartbeat_interval_secs: default_heartbeat_interval_secs(),
            write_timeout_secs: default_write_timeout_secs(),
        }
    }
}

fn default_push_timeout_ms() -> u64 {
    250
}

fn default_session_buffer() -> usize {
    64
}

fn default_new_notification_window_days() -> u32 {
    7
}

fn default_heartbeat_interval_secs() -> u64 {
    30
}

fn default_write_timeout_secs() -> u64 {
    10
}
