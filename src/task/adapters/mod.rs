//! Adapter implementations of task lifecycle ports.

pub mod memory;
pub mod postgres;
