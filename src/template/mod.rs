//! Reusable prompt templates with `{name}` placeholders.
//!
//! A template's variable set is always derived from its prompt text;
//! rendering is strict and fails on the first placeholder without a value.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
