//! Uniform asynchronous boundary over the external AI provider.
//!
//! Text generation and image generation are ports so that the HTTP
//! deployment, scripted fakes, and placeholder strategies are
//! interchangeable. [`services::AiGateway`] composes them into the
//! translate, enhance, image, and batch capabilities and applies the
//! configured call timeout.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
