//! Support ticket repository port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, TicketId, Timestamp};
use crate::domain::support::{SupportTicket, TicketStatus};

/// Result of overwriting a ticket's status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketStatusChange {
    pub ticket: SupportTicket,
    /// The status the write replaced, read in the same atomic step.
    pub previous_status: TicketStatus,
}

/// Repository port for support ticket persistence.
#[async_trait]
pub trait SupportTicketRepository: Send + Sync {
    /// Find a ticket by its ID.
    ///
    /// Returns `None` if not found.
    async fn get_ticket(&self, id: TicketId) -> Result<Option<SupportTicket>, DomainError>;

    /// Store a response on a ticket that is still in `expected`.
    ///
    /// Sets status to `Responded`, the response text and its timestamp in
    /// one write.
    ///
    /// # Errors
    ///
    /// - `TicketNotFound` if the ticket vanished
    /// - `Conflict` if the stored status is no longer `expected`
    /// - `StorageUnavailable` if the store cannot be reached
    async fn set_ticket_response(
        &self,
        id: TicketId,
        expected: TicketStatus,
        text: &str,
        at: Timestamp,
    ) -> Result<SupportTicket, DomainError>;

    /// Overwrite the ticket status, reporting the status it replaced.
    ///
    /// Used for soft delete, which is valid from any status. The returned
    /// `previous_status` is what storage held at the moment of the write,
    /// which may differ from an earlier `get_ticket` if another writer got
    /// in between.
    ///
    /// # Errors
    ///
    /// - `TicketNotFound` if the ticket vanished
    /// - `StorageUnavailable` if the store cannot be reached
    async fn set_ticket_status(
        &self,
        id: TicketId,
        status: TicketStatus,
    ) -> Result<TicketStatusChange, DomainError>;
}
