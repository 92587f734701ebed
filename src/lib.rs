//! Food Realtime - live event distribution for the admin dashboard.
//!
//! State changes to orders, support tickets and notifications are
//! validated against their state machines, persisted, and fanned out as
//! domain events to every admin session subscribed to the matching topic.
//! Each event carries a freshly recomputed statistics snapshot so
//! dashboards never need to poll.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
