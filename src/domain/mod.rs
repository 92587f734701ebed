//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, errors, state machine trait)
//! - `order` - Order fulfilment lifecycle
//! - `support` - Customer-support tickets and soft delete
//! - `notification` - Admin notifications and open tracking
//! - `catalog` - Restaurant and menu change notices
//! - `stats` - Dashboard aggregates computed from entity snapshots
//! - `events` - The closed set of events pushed to dashboards

pub mod catalog;
pub mod events;
pub mod foundation;
pub mod notification;
pub mod order;
pub mod stats;
pub mod support;
