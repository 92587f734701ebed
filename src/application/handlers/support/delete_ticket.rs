//! DeleteTicketHandler - Command handler for soft-deleting support tickets.

use std::sync::Arc;

use crate::application::errors::{CommandError, EntityKind};
use crate::application::handlers::stats::{StatisticsAggregator, StatsSection};
use crate::domain::events::{DomainEvent, SupportDeleted};
use crate::domain::foundation::{TicketId, Timestamp};
use crate::domain::support::{SupportTicket, TicketStatus};
use crate::ports::{EventPublisher, SupportTicketRepository};

/// Command to soft-delete a ticket.
#[derive(Debug, Clone)]
pub struct DeleteTicketCommand {
    pub ticket_id: TicketId,
}

/// Result of a delete.
#[derive(Debug, Clone)]
pub struct DeleteTicketResult {
    pub ticket: SupportTicket,
    pub event: SupportDeleted,
}

/// Handler for ticket deletion.
///
/// Deleting an already-deleted ticket succeeds and announces the delete
/// again; the stored record is left as it is.
pub struct DeleteTicketHandler {
    repository: Arc<dyn SupportTicketRepository>,
    stats: Arc<StatisticsAggregator>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl DeleteTicketHandler {
    pub fn new(
        repository: Arc<dyn SupportTicketRepository>,
        stats: Arc<StatisticsAggregator>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            repository,
            stats,
            event_publisher,
        }
    }

    pub async fn handle(&self, cmd: DeleteTicketCommand) -> Result<DeleteTicketResult, CommandError> {
        // 1. Load ticket
        let current = self
            .repository
            .get_ticket(cmd.ticket_id)
            .await?
            .ok_or_else(|| CommandError::not_found(EntityKind::Ticket, cmd.ticket_id))?;

        // 2. Persist unless already deleted. The write reports what it
        //    replaced, which wins over the status loaded above.
        let (ticket, previous_status) = if current.status == TicketStatus::Deleted {
            (current, TicketStatus::Deleted)
        } else {
            let change = self
                .repository
                .set_ticket_status(current.id, TicketStatus::Deleted)
                .await?;
            (change.ticket, change.previous_status)
        };

        // 3. Recount and publish
        let _section = self.stats.publish_section(StatsSection::Support).await;
        let stats = self.stats.support_stats_for_event().await;
        let event = SupportDeleted {
            ticket_id: ticket.id,
            previous_status,
            deleted_at: Timestamp::now(),
            stats,
        };
        self.event_publisher
            .publish(DomainEvent::SupportDeleted(event.clone()))
            .await;

        tracing::info!(
            ticket_id = %ticket.id,
            previous_status = %previous_status,
            "Support ticket deleted"
        );

        Ok(DeleteTicketResult { ticket, event })
    }
}
