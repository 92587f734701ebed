//! WebSocket adapters for the admin live channel.
//!
//! Pushes domain events to connected admin dashboards, grouped by topic.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                  Command handlers (application)                      │
//! └─────────────────────────────────────────────────────────────────────┘
//!                                     │
//!                                     │ EventPublisher::publish
//!                                     ▼
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                       EventDispatcher                                │
//! │   - Routes DomainEvent → Topic(s)                                    │
//! │   - Snapshots subscribers from TopicRegistry                         │
//! │   - Pushes through ConnectionHub, drops failing sessions             │
//! └─────────────────────────────────────────────────────────────────────┘
//!                                     │
//!                                     │ per-session bounded queues
//!                                     ▼
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │   Topic: order-updates     Topic: menu-updates:3                     │
//! │   ├── session-a            ├── session-a                             │
//! │   └── session-b            └── session-c                             │
//! └─────────────────────────────────────────────────────────────────────┘
//!                                     │
//!                                     ▼
//!                 SessionGateway + axum socket handler
//! ```
//!
//! # Components
//!
//! - [`topics`] - Topic naming shared by publishers and subscribers
//! - [`registry`] - Topic → session subscriptions
//! - [`hub`] - Per-session outbound queues (the connection transport)
//! - [`dispatcher`] - Domain event fan-out
//! - [`gateway`] - Connection lifecycle and client frame handling
//! - [`messages`] - Control frame protocol types
//! - [`handler`] - Axum WebSocket upgrade handler

pub mod dispatcher;
pub mod gateway;
pub mod handler;
pub mod hub;
pub mod messages;
pub mod registry;
pub mod topics;

pub use dispatcher::{DispatchReport, EventDispatcher};
pub use gateway::{LiveSession, SessionGateway};
pub use handler::{realtime_router, ws_handler, RealtimeState};
pub use hub::{ConnectionHub, Outbound};
pub use messages::{ClientMessage, ServerMessage, TopicRequest};
pub use registry::TopicRegistry;
pub use topics::{Topic, TopicError, TopicKind};
