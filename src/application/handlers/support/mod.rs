//! Support ticket command handlers.

mod delete_ticket;
mod respond_to_ticket;

pub use delete_ticket::{DeleteTicketCommand, DeleteTicketHandler, DeleteTicketResult};
pub use respond_to_ticket::{
    RespondToTicketCommand, RespondToTicketHandler, RespondToTicketResult,
};
