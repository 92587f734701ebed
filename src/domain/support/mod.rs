//! Support domain - customer tickets and their admin responses.

mod status;
mod ticket;

pub use status::TicketStatus;
pub use ticket::SupportTicket;
