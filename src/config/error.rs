//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid bind address '{0}'")]
    InvalidBindAddress(String),

    #[error("Push timeout must be between 1 and 10000 ms")]
    InvalidPushTimeout,

    #[error("Session buffer must hold at least one message")]
    InvalidSessionBuffer,

    #[error("New-notification window must be at least one day")]
    InvalidNotificationWindow,

    #[error("Socket write timeout must be between 1 and 300 seconds")]
    InvalidWriteTimeout,
}
