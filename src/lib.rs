//! Scriptorium: AI-assisted content operations for nonprofit communications.
//!
//! This crate tracks every AI provider call as an auditable task, turns
//! briefs and stored templates into generated content, translates and edits
//! text, publishes posts downstream, and runs named workflows that chain
//! those operations.
//!
//! # Architecture
//!
//! Scriptorium follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, APIs, etc.)
//! - **Services**: Orchestration of domain logic over ports
//!
//! # Modules
//!
//! - [`task`]: Task lifecycle, review, and in-flight call cancellation
//! - [`gateway`]: Normalised access to the AI provider
//! - [`template`]: Reusable prompt templates
//! - [`operation`]: Task-wrapped execution shared by the operation services
//! - [`generation`], [`translation`], [`enhancement`]: Domain operations
//! - [`content`]: Generated content management
//! - [`publishing`]: Downstream social media publishing
//! - [`workflow`]: Named automations and their execution history

pub mod actor;
pub mod config;
pub mod content;
pub mod database;
pub mod enhancement;
pub mod error;
pub mod gateway;
pub mod generation;
pub mod language;
pub mod operation;
pub mod paging;
pub mod publishing;
pub mod quality;
pub mod task;
pub mod telemetry;
pub mod template;
pub mod translation;
pub mod workflow;

#[cfg(test)]
mod test_support;
