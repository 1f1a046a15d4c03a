//! Downstream publishing of generated content.
//!
//! A [`ports::Publisher`] hands a post to the social media service and
//! returns its confirmation; [`services::PublishingService`] ties that call
//! to the stored content and records the publication marker. A publish
//! that reaches the service is never compensated, even if recording the
//! marker later fails.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
