//! Adapters - Implementations of port interfaces.
//!
//! - `memory` - In-process storage for orders, tickets and notifications
//! - `websocket` - Topic registry, event dispatch and the admin session gateway
//! - `http` - The router served by the binary
//! - `services` - Wiring of store, dispatcher and command handlers

pub mod http;
pub mod memory;
pub mod services;
pub mod websocket;

pub use http::app_router;
pub use memory::InMemoryStore;
pub use services::RealtimeServices;
pub use websocket::{ConnectionHub, EventDispatcher, SessionGateway, TopicRegistry};
