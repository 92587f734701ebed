//! RespondToTicketHandler - Command handler for answering support tickets.

use std::sync::Arc;

use crate::application::errors::{CommandError, EntityKind};
use crate::application::handlers::stats::{StatisticsAggregator, StatsSection};
use crate::domain::events::{DomainEvent, SupportResponded};
use crate::domain::foundation::{TicketId, Timestamp};
use crate::domain::support::{SupportTicket, TicketStatus};
use crate::ports::{EventPublisher, SupportTicketRepository};

/// Command to store an admin response on a ticket.
///
/// Answering an already-responded ticket replaces the previous response.
#[derive(Debug, Clone)]
pub struct RespondToTicketCommand {
    pub ticket_id: TicketId,
    pub response: String,
}

/// Result of a stored response.
#[derive(Debug, Clone)]
pub struct RespondToTicketResult {
    pub ticket: SupportTicket,
    pub event: SupportResponded,
}

/// Handler for ticket responses.
pub struct RespondToTicketHandler {
    repository: Arc<dyn SupportTicketRepository>,
    stats: Arc<StatisticsAggregator>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl RespondToTicketHandler {
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

    pub async fn handle(
        &self,
        cmd: RespondToTicketCommand,
    ) -> Result<RespondToTicketResult, CommandError> {
        // 1. Validate input before touching storage
        let text = cmd.response.trim();
        if text.is_empty() {
            return Err(CommandError::invalid_argument(
                "response",
                "must not be empty",
            ));
        }

        // 2. Load ticket
        let current = self
            .repository
            .get_ticket(cmd.ticket_id)
            .await?
            .ok_or_else(|| CommandError::not_found(EntityKind::Ticket, cmd.ticket_id))?;

        // 3. Deleted tickets are closed to responses
        if current.status == TicketStatus::Deleted {
            return Err(CommandError::invalid_state(format!(
                "Ticket {} is deleted",
                current.id
            )));
        }
        let responded_at = Timestamp::now();
        let proposed = current.respond(text, responded_at)?;

        // 4. Persist
        let ticket = self
            .repository
            .set_ticket_response(
                current.id,
                current.status,
                proposed.response.as_deref().unwrap_or(text),
                responded_at,
            )
            .await?;

        // 5. Recount and publish
        let _section = self.stats.publish_section(StatsSection::Support).await;
        let stats = self.stats.support_stats_for_event().await;
        let event = SupportResponded {
            ticket: ticket.clone(),
            responded_at,
            stats,
        };
        self.event_publisher
            .publish(DomainEvent::SupportResponded(event.clone()))
            .await;

        tracing::info!(ticket_id = %ticket.id, "Support ticket responded");

        Ok(RespondToTicketResult { ticket, event })
    }
}
