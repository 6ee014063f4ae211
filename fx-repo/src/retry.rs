//! Retry policy and backoff state machine for provider calls.
//!
//! [`Backoff`] only decides; sleeping goes through a [`Sleeper`] so the
//! schedule can be observed in tests without waiting on the wall clock.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use fx_types::ProviderError;
use tracing::warn;

/// How many times to try and how long to wait in between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts including the first one. Values below 1 are treated as 1.
    pub max_attempts: u32,
    /// Delay after the first failed attempt; doubled after each further failure.
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts,
            base_delay,
        }
    }

    /// `base_delay * 2^attempt_index`, saturating.
    pub fn delay_for(&self, attempt_index: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt_index);
        self.base_delay.saturating_mul(factor)
    }

    fn attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }
}

/// What to do after a failed attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// Wait this long, then try again.
    Retry(Duration),
    /// Stop and report this error.
    GiveUp(ProviderError),
}

/// Tracks attempts made so far and the last error seen.
#[derive(Debug, Clone)]
pub struct Backoff {
    policy: RetryPolicy,
    attempts: u32,
    last_error: Option<ProviderError>,
}

impl Backoff {
    pub fn new(policy: RetryPolicy) -> Self {
        Self {
            policy,
            attempts: 0,
            last_error: None,
        }
    }

    /// Attempts recorded so far.
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn last_error(&self) -> Option<&ProviderError> {
        self.last_error.as_ref()
    }

    /// Delay that would follow a retryable failure of the next attempt,
    /// or `None` if that attempt is the last one.
    pub fn next_delay(&self) -> Option<Duration> {
        (self.attempts + 1 < self.policy.attempts()).then(|| self.policy.delay_for(self.attempts))
    }

    /// Records a failed attempt and decides the next step.
    pub fn record_failure(&mut self, error: ProviderError) -> Step {
        let delay = self.next_delay();
        self.attempts += 1;
        self.last_error = Some(error.clone());

        if !error.is_retryable() {
            return Step::GiveUp(error);
        }

        match delay {
            Some(delay) => Step::Retry(delay),
            None => Step::GiveUp(ProviderError::RetriesExhausted {
                attempts: self.attempts,
                last: Box::new(error),
            }),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Sleeping
// ─────────────────────────────────────────────────────────────────────────────

/// Abstraction over waiting between attempts.
#[async_trait]
pub trait Sleeper: Send + Sync + 'static {
    async fn sleep(&self, duration: Duration);
}

/// Sleeps on the tokio timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Runs `op` until it succeeds, fails permanently, or the policy is exhausted.
///
/// Attempts are strictly sequential.
pub async fn retry_with_backoff<T, F, Fut>(
    policy: RetryPolicy,
    sleeper: &dyn Sleeper,
    mut op: F,
) -> Result<T, ProviderError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ProviderError>>,
{
    let mut backoff = Backoff::new(policy);
    loop {
        let error = match op().await {
            Ok(value) => return Ok(value),
            Err(error) => error,
        };

        match backoff.record_failure(error) {
            Step::Retry(delay) => {
                warn!(
                    attempt = backoff.attempts(),
                    delay_secs = delay.as_secs_f64(),
                    error = ?backoff.last_error(),
                    "Provider attempt failed, retrying"
                );
                sleeper.sleep(delay).await;
            }
            Step::GiveUp(error) => return Err(error),
        }
    }
}
