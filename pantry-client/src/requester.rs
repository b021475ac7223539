use std::sync::Arc;
use std::time::Duration;

use pantry::basic_models::DishResult;
use pantry::extraction::{parse_reply, ReplyError};
use tokio_retry::strategy::ExponentialBackoff;
use tokio_retry::Retry;

use crate::llm::{build_prompt, TextGenerator};
use crate::throttle::RateLimiter;

#[derive(thiserror::Error, Debug)]
pub enum ExtractError {
    #[error("Transport error: {0:#}")]
    Transport(anyhow::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] ReplyError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequesterSettings {
    /// Total number of attempts, including the first one.
    pub retries: u32,
    pub requests_per_minute: u32,
    /// Failed attempt `k` is followed by a pause of `backoff_base_secs^k` seconds.
    pub backoff_base_secs: u64,
}

impl Default for RequesterSettings {
    fn default() -> Self {
        Self {
            retries: 3,
            requests_per_minute: 25,
            backoff_base_secs: 2,
        }
    }
}

/// Asks the model for a dish's ingredients, throttled and retried.
pub struct Requester {
    generator: Arc<dyn TextGenerator>,
    rate_limiter: RateLimiter,
    settings: RequesterSettings,
}

impl Requester {
    pub fn new(generator: Arc<dyn TextGenerator>, settings: RequesterSettings) -> Self {
        Self {
            generator,
            rate_limiter: RateLimiter::per_minute(settings.requests_per_minute),
            settings,
        }
    }

    /// The pauses between attempts: one fewer than the number of attempts.
    pub fn backoff_schedule(&self) -> impl Iterator<Item = Duration> {
        // from_millis(b) yields b, b^2, b^3... and the factor scales that to seconds
        ExponentialBackoff::from_millis(self.settings.backoff_base_secs)
            .factor(1000)
            .take(self.settings.retries.max(1) as usize - 1)
    }

    /// Get the ingredients for `dish`.
    ///
    /// Never fails: transport and parse errors are logged and retried, and
    /// once every attempt is spent the empty record is returned instead.
    pub async fn analyze(&self, dish: &str) -> DishResult {
        let prompt = build_prompt(dish);
        let prompt = prompt.as_str();
        let mut attempt = 0;
        let outcome = Retry::spawn(self.backoff_schedule(), || {
            attempt += 1;
            let attempt = attempt;
            async move {
                self.attempt_once(dish, prompt).await.map_err(|err| {
                    tracing::warn!("Error on attempt {} for '{}': {}", attempt, dish, err);
                    err
                })
            }
        })
        .await;

        match outcome {
            Ok(result) => {
                tracing::info!("Extracted ingredients for '{}'", dish);
                result
            }
            Err(_) => {
                tracing::error!(
                    "Failed to analyze '{}' after {} attempts",
                    dish,
                    self.settings.retries.max(1)
                );
                DishResult::empty(dish)
            }
        }
    }

    async fn attempt_once(&self, dish: &str, prompt: &str) -> Result<DishResult, ExtractError> {
        self.rate_limiter.wait().await;
        let text = self
            .generator
            .generate(prompt)
            .await
            .map_err(ExtractError::Transport)?;
        let parsed = parse_reply(dish, text.trim())?;
        for skipped in &parsed.skipped {
            tracing::warn!(
                "Dropped ingredient #{} for '{}': {}",
                skipped.index,
                dish,
                skipped.reason
            );
        }
        Ok(parsed.result)
    }
}
