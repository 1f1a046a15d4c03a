//! Deterministic text generator for tests and local runs.

use crate::gateway::{
    domain::{ProviderError, TextRequest, TextResponse},
    ports::TextGenerator,
};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use std::time::Duration;

const SCRIPTED_MODEL: &str = "scripted";

#[derive(Debug, Clone)]
enum Outcome {
    Reply(String),
    Fail(ProviderError),
}

#[derive(Debug, Clone)]
struct Rule {
    needle: String,
    outcome: Outcome,
}

/// Text generator answering from a fixed script.
///
/// Rules are matched in insertion order against the prompt; the first rule
/// whose needle occurs in the prompt decides the outcome. Unmatched prompts
/// receive the default reply. Every request is recorded.
#[derive(Debug, Clone)]
pub struct ScriptedTextGenerator {
    rules: Vec<Rule>,
    default_reply: String,
    tokens_used: u32,
    delay: Duration,
    requests: Arc<Mutex<Vec<TextRequest>>>,
}

impl Default for ScriptedTextGenerator {
    fn default() -> Self {
        Self {
            rules: Vec::new(),
            default_reply: "Scripted reply".to_owned(),
            tokens_used: 10,
            delay: Duration::ZERO,
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl ScriptedTextGenerator {
    /// Creates a generator that answers every prompt with a default reply.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the reply used when no rule matches.
    #[must_use]
    pub fn with_default_reply(mut self, reply: impl Into<String>) -> Self {
        self.default_reply = reply.into();
        self
    }

    /// Answers prompts containing `needle` with `reply`.
    #[must_use]
    pub fn reply_when(mut self, needle: impl Into<String>, reply: impl Into<String>) -> Self {
        self.rules.push(Rule {
            needle: needle.into(),
            outcome: Outcome::Reply(reply.into()),
        });
        self
    }

    /// Fails prompts containing `needle` with `error`.
    #[must_use]
    pub fn fail_when(mut self, needle: impl Into<String>, error: ProviderError) -> Self {
        self.rules.push(Rule {
            needle: needle.into(),
            outcome: Outcome::Fail(error),
        });
        self
    }

    /// Sets the token count reported for every reply.
    #[must_use]
    pub const fn with_tokens_used(mut self, tokens_used: u32) -> Self {
        self.tokens_used = tokens_used;
        self
    }

    /// Delays every answer by `delay`.
    #[must_use]
    pub const fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Returns the requests received so far, oldest first.
    #[must_use]
    pub fn requests(&self) -> Vec<TextRequest> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl TextGenerator for ScriptedTextGenerator {
    async fn generate(&self, request: &TextRequest) -> Result<TextResponse, ProviderError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request.clone());
        }
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        let outcome = self
            .rules
            .iter()
            .find(|rule| request.prompt.contains(&rule.needle))
            .map_or_else(
                || Outcome::Reply(self.default_reply.clone()),
                |rule| rule.outcome.clone(),
            );
        match outcome {
            Outcome::Reply(text) => Ok(TextResponse {
                text,
                tokens_used: self.tokens_used,
                model_used: SCRIPTED_MODEL.to_owned(),
            }),
            Outcome::Fail(error) => Err(error),
        }
    }
}
