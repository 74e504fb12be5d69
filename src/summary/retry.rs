//! Retry logic for summary service calls
//!
//! Exponential backoff with a cap. Only transient failures
//! ([`SummaryError::is_retryable`]) are retried; fatal ones return at once.

use crate::config::SummaryConfig;
use crate::errors::{SummaryError, SummaryResult};
use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, error, warn};

/// Backoff parameters for one logical request
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Retries after the first attempt
    pub max_retries: usize,
    pub initial_backoff: Duration,
    pub multiplier: f64,
    pub max_backoff_seconds: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 2,
            initial_backoff: Duration::from_millis(1000),
            multiplier: 2.0,
            max_backoff_seconds: 10,
        }
    }
}

impl RetryPolicy {
    pub fn from_config(config: &SummaryConfig) -> Self {
        Self {
            max_retries: config.max_retries,
            initial_backoff: Duration::from_millis(config.initial_backoff_ms),
            multiplier: config.backoff_multiplier,
            max_backoff_seconds: config.max_backoff_seconds,
        }
    }

    pub fn max_attempts(&self) -> usize {
        self.max_retries + 1
    }
}

/// Calculate next backoff duration using exponential backoff with a maximum cap
///
/// `new_backoff = min(current_backoff * multiplier, max_backoff)`
///
/// # Example
/// ```
/// use std::time::Duration;
/// use sales_analytics::summary::calculate_next_backoff;
///
/// let backoff = Duration::from_millis(100);
/// let next = calculate_next_backoff(backoff, 2.0, 30);
/// assert_eq!(next, Duration::from_millis(200));
/// ```
pub fn calculate_next_backoff(
    current_backoff: Duration,
    multiplier: f64,
    max_backoff_seconds: u64,
) -> Duration {
    Duration::from_millis((current_backoff.as_millis() as f64 * multiplier) as u64)
        .min(Duration::from_secs(max_backoff_seconds))
}

/// Run `operation` until it succeeds, fails fatally, or the retry budget is spent
///
/// When transient failures outlast the budget the result is
/// [`SummaryError::MaxRetriesExceeded`].
pub async fn retry_with_backoff<T, F, Fut>(
    policy: &RetryPolicy,
    mut operation: F,
) -> SummaryResult<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = SummaryResult<T>>,
{
    let mut attempts = 0;
    let mut backoff = policy.initial_backoff;

    loop {
        match operation().await {
            Ok(value) => {
                if attempts > 0 {
                    debug!("Summary request succeeded after {} attempts", attempts + 1);
                }
                return Ok(value);
            }
            Err(e) if !e.is_retryable() => {
                debug!("Summary request failed (non-retryable): {}", e);
                return Err(e);
            }
            Err(e) => {
                attempts += 1;

                if attempts >= policy.max_attempts() {
                    error!(
                        "Summary request failed after {} attempts: {}",
                        attempts, e
                    );
                    return Err(SummaryError::MaxRetriesExceeded {
                        attempts,
                        last_error: e.to_string(),
                    });
                }

                warn!(
                    "Summary attempt {} failed, retrying in {:?}: {}",
                    attempts, backoff, e
                );
                sleep(backoff).await;

                backoff = calculate_next_backoff(
                    backoff,
                    policy.multiplier,
                    policy.max_backoff_seconds,
                );
            }
        }
    }
}
