//! Shelfwatch Library
//!
//! Live, read-only view of a dark-kitchen order-shelving process: one
//! WebSocket channel to the upstream simulation, one view model derived
//! wholesale from its snapshots. Exposed for use by the binary and tests.

pub mod channel;
pub mod config;
pub mod models;
pub mod session;
pub mod view;
