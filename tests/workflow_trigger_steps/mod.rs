//! Step definitions for workflow trigger scenarios.

pub mod world;

mod given;
mod then;
mod when;
