//! Errors surfaced to callers of state-changing operations.
//!
//! Delivery problems never appear here: once a change is persisted the
//! caller sees success, whatever happens on the dashboard side channel.

use std::fmt;

use crate::domain::foundation::{DomainError, ErrorCode, ValidationError};

/// The kind of entity a command addressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Order,
    Ticket,
    Notification,
}

impl EntityKind {
    fn from_code(code: ErrorCode) -> Option<Self> {
        match code {
            ErrorCode::OrderNotFound => Some(EntityKind::Order),
            ErrorCode::TicketNotFound => Some(EntityKind::Ticket),
            ErrorCode::NotificationNotFound => Some(EntityKind::Notification),
            _ => None,
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            EntityKind::Order => "Order",
            EntityKind::Ticket => "Ticket",
            EntityKind::Notification => "Notification",
        };
        write!(f, "{}", s)
    }
}

/// Failure of a command handler.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    /// The referenced entity does not exist.
    #[error("{entity} {id} not found")]
    NotFound { entity: EntityKind, id: String },

    /// The requested status is not reachable from the current one.
    #[error("Cannot transition from {from} to {to}")]
    InvalidTransition { from: String, to: String },

    /// The entity is in a state that forbids the operation.
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// The input violates the operation's contract.
    #[error("Invalid argument '{field}': {message}")]
    InvalidArgument { field: String, message: String },

    /// A concurrent writer changed the entity first. Retryable.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// The storage collaborator could not be reached. Retryable.
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

impl CommandError {
    pub fn not_found(entity: EntityKind, id: impl ToString) -> Self {
        CommandError::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub fn invalid_state(message: impl Into<String>) -> Self {
        CommandError::InvalidState(message.into())
    }

    pub fn invalid_argument(field: impl Into<String>, message: impl Into<String>) -> Self {
        CommandError::InvalidArgument {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Error code for API responses and logs.
    pub fn code(&self) -> ErrorCode {
        match self {
            CommandError::NotFound { entity, .. } => match entity {
                EntityKind::Order => ErrorCode::OrderNotFound,
                EntityKind::Ticket => ErrorCode::TicketNotFound,
                EntityKind::Notification => ErrorCode::NotificationNotFound,
            },
            CommandError::InvalidTransition { .. } => ErrorCode::InvalidStateTransition,
            CommandError::InvalidState(_) => ErrorCode::TicketDeleted,
            CommandError::InvalidArgument { .. } => ErrorCode::ValidationFailed,
            CommandError::Conflict(_) => ErrorCode::Conflict,
            CommandError::Unavailable(_) => ErrorCode::StorageUnavailable,
        }
    }

    /// True when the caller may retry the same command.
    pub fn is_retryable(&self) -> bool {
        matches!(self, CommandError::Conflict(_) | CommandError::Unavailable(_))
    }
}

impl From<ValidationError> for CommandError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::EmptyField { field } => {
                CommandError::invalid_argument(field, "must not be empty")
            }
            ValidationError::InvalidFormat { field, reason } => {
                CommandError::invalid_argument(field, reason)
            }
            ValidationError::InvalidTransition { from, to } => {
                CommandError::InvalidTransition { from, to }
            }
        }
    }
}

impl From<DomainError> for CommandError {
    fn from(err: DomainError) -> Self {
        if let Some(entity) = EntityKind::from_code(err.code) {
            let id = err.details.get("id").cloned().unwrap_or(err.message);
            return CommandError::NotFound { entity, id };
        }
        match err.code {
            ErrorCode::Conflict => CommandError::Conflict(err.message),
            ErrorCode::InvalidStateTransition | ErrorCode::TicketDeleted => {
                CommandError::InvalidState(err.message)
            }
            ErrorCode::ValidationFailed | ErrorCode::EmptyField | ErrorCode::InvalidFormat => {
                let field = err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string());
                CommandError::invalid_argument(field, err.message)
            }
            _ => CommandError::Unavailable(err.message),
        }
    }
}
