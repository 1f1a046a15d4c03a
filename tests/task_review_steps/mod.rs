//! Step definitions for task review scenarios.

pub mod world;

mod given;
mod then;
mod when;
