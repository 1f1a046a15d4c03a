//! Task lifecycle management for Scriptorium.
//!
//! Every AI operation is wrapped in a [`domain::Task`] that records its
//! input, provider usage, outcome, and approval trail. The task status
//! state machine (`pending -> processing -> completed | failed`, with
//! `cancelled` reachable from any non-terminal state) is enforced by the
//! domain aggregate and persisted with compare-and-swap updates so that no
//! write can move a task out of a terminal state. The module follows
//! hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
