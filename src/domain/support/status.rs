//! Support ticket status state machine.

use crate::domain::foundation::StateMachine;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a customer-support ticket.
///
/// `Deleted` is a soft delete: the record stays in storage and is still
/// counted, separately, by the support statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TicketStatus {
    /// Awaiting an admin response.
    #[default]
    Pending,
    /// An admin has answered. The answer may be amended.
    Responded,
    /// Soft-deleted. Terminal.
    Deleted,
}

impl StateMachine for TicketStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use TicketStatus::*;
        matches!(
            (self, target),
            (Pending, Responded)
                | (Pending, Deleted)
                | (Responded, Responded) // Amended response
                | (Responded, Deleted)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use TicketStatus::*;
        match self {
            Pending => vec![Responded, Deleted],
            Responded => vec![Responded, Deleted],
            Deleted => vec![],
        }
    }
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TicketStatus::Pending => "Pending",
            TicketStatus::Responded => "Responded",
            TicketStatus::Deleted => "Deleted",
        };
        write!(f, "{}", s)
    }
}
