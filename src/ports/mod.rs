//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Storage Ports
//!
//! - `OrderRepository` - Order lookup and compare-and-set status writes
//! - `SupportTicketRepository` - Ticket lookup, responses, soft delete
//! - `NotificationRepository` - Notification creation and open counting
//! - `StatisticsReader` - Point-in-time snapshots for dashboard aggregates
//!
//! ## Distribution Ports
//!
//! - `EventPublisher` - Best-effort publishing of domain events
//! - `ConnectionTransport` - Per-session push to connected dashboards

mod connection_transport;
mod event_publisher;
mod notification_repository;
mod order_repository;
mod statistics_reader;
mod ticket_repository;

pub use connection_transport::{ConnectionTransport, DeliveryError, SessionId};
pub use event_publisher::EventPublisher;
pub use notification_repository::NotificationRepository;
pub use order_repository::OrderRepository;
pub use statistics_reader::StatisticsReader;
pub use ticket_repository::{SupportTicketRepository, TicketStatusChange};
