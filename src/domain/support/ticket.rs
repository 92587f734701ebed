//! Customer-support ticket entity.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    CustomerId, OrderId, StateMachine, TicketId, Timestamp, ValidationError,
};

use super::TicketStatus;

/// A customer-support ticket.
///
/// Invariant: when `status` is `Responded`, `response` is non-empty and
/// `responded_at` is set. Only [`SupportTicket::respond`] moves a ticket
/// into `Responded`, and it enforces both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupportTicket {
    pub id: TicketId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_id: Option<OrderId>,
    pub customer_id: CustomerId,
    pub message: String,
    pub status: TicketStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub responded_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

impl SupportTicket {
    /// Opens a new pending ticket.
    pub fn open(
        id: TicketId,
        customer_id: CustomerId,
        order_id: Option<OrderId>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            id,
            order_id,
            customer_id,
            message: message.into(),
            status: TicketStatus::Pending,
            response: None,
            responded_at: None,
            created_at: Timestamp::now(),
        }
    }

    /// Returns the ticket answered with `text` at `at`.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if `text` is blank
    /// - `InvalidTransition` if the ticket is deleted
    pub fn respond(&self, text: &str, at: Timestamp) -> Result<Self, ValidationError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ValidationError::empty_field("response"));
        }
        let status = self.status.transition_to(TicketStatus::Responded)?;
        Ok(Self {
            status,
            response: Some(text.to_string()),
            responded_at: Some(at),
            ..self.clone()
        })
    }

    /// Returns the ticket soft-deleted. Deleting twice is a no-op.
    pub fn deleted(&self) -> Self {
        Self {
            status: TicketStatus::Deleted,
            ..self.clone()
        }
    }

    /// Checks the responded-state invariant.
    pub fn is_consistent(&self) -> bool {
        match self.status {
            TicketStatus::Responded => {
                self.response.as_deref().is_some_and(|r| !r.is_empty())
                    && self.responded_at.is_some()
            }
            _ => true,
        }
    }
}
