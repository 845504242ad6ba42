use crate::{ConnectivityMonitor, SessionError};

use std::time::Duration;

use gf_config::RetryConfig;
use log::{debug, info, warn};
use tokio::time::sleep;

// Defaults for remote profile reads:
// - Try up to 3 times total (1 initial + 2 retries)
// - Start with 1s delay, double each time
// - Cap any single delay at 30 seconds
// - No jitter, so the schedule is exactly 1s, 2s
const DEFAULT_MAX_ATTEMPTS: u32 = 3;
const DEFAULT_BASE_DELAY_MS: u64 = 1000;
const DEFAULT_MAX_DELAY_SECS: u64 = 30;
const DEFAULT_BACKOFF_MULTIPLIER: f64 = 2.0;
const DEFAULT_JITTER_ENABLED: bool = false;

/// Retry behavior for remote calls
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Maximum number of attempts, including the first
    pub max_attempts: u32,
    /// Delay after the first failed attempt
    pub base_delay: Duration,
    /// Maximum delay between attempts
    pub max_delay: Duration,
    /// Multiplier for exponential backoff
    pub backoff_multiplier: f64,
    /// Scale each delay by a random factor in [0.5, 1.5)
    pub jitter: bool,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            base_delay: Duration::from_millis(DEFAULT_BASE_DELAY_MS),
            max_delay: Duration::from_secs(DEFAULT_MAX_DELAY_SECS),
            backoff_multiplier: DEFAULT_BACKOFF_MULTIPLIER,
            jitter: DEFAULT_JITTER_ENABLED,
        }
    }
}

impl From<&RetryConfig> for RetryPolicy {
    fn from(config: &RetryConfig) -> Self {
        Self {
            max_attempts: config.max_attempts,
            base_delay: config.base_delay(),
            max_delay: config.max_delay(),
            backoff_multiplier: config.backoff_multiplier,
            jitter: config.jitter,
        }
    }
}

impl RetryPolicy {
    /// Delay after failed attempt `attempt` (0-indexed), before jitter.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let exponent = i32::try_from(attempt).unwrap_or(i32::MAX);
        let secs = self.base_delay.as_secs_f64() * self.backoff_multiplier.powi(exponent);
        Duration::from_secs_f64(secs.min(self.max_delay.as_secs_f64()))
    }

    fn jittered(&self, delay: Duration) -> Duration {
        if !self.jitter {
            return delay;
        }
        let jitter_factor = 0.5 + rand::random::<f64>();
        Duration::from_secs_f64(delay.as_secs_f64() * jitter_factor)
    }
}

/// Errors a retried operation can fail with.
pub trait IsRetryable {
    fn is_retryable(&self) -> bool;

    /// Error reported when connectivity is down before an attempt.
    fn offline_error(operation_name: &str) -> Self;
}

impl IsRetryable for SessionError {
    fn is_retryable(&self) -> bool {
        matches!(self, Self::RemoteService { .. })
    }

    #[track_caller]
    fn offline_error(operation_name: &str) -> Self {
        SessionError::offline(format!(
            "Cannot {operation_name} while offline. Please check your internet connection and try again."
        ))
    }
}

/// Execute an async operation with bounded retries.
///
/// Offline is checked before every attempt, including right after each
/// backoff wait. Going offline aborts without using up an attempt.
pub async fn with_retry<F, Fut, T, E>(
    policy: &RetryPolicy,
    connectivity: &ConnectivityMonitor,
    operation_name: &str,
    mut operation: F,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display + IsRetryable,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt: u32 = 0;

    loop {
        if !connectivity.is_online() {
            debug!("{} skipped: offline", operation_name);
            return Err(E::offline_error(operation_name));
        }

        match operation().await {
            Ok(result) => {
                if attempt > 0 {
                    info!(
                        "{} succeeded after {} attempts",
                        operation_name,
                        attempt + 1
                    );
                }
                return Ok(result);
            }
            Err(e) => {
                if !e.is_retryable() || attempt + 1 >= max_attempts {
                    warn!(
                        "{} failed after {} attempts: {}",
                        operation_name,
                        attempt + 1,
                        e
                    );
                    return Err(e);
                }

                if !connectivity.is_online() {
                    debug!("{} went offline after attempt {}", operation_name, attempt + 1);
                    return Err(E::offline_error(operation_name));
                }

                let delay = policy.jittered(policy.delay_for(attempt));
                debug!(
                    "{} attempt {} failed: {}. Retrying in {:?}",
                    operation_name,
                    attempt + 1,
                    e,
                    delay
                );

                sleep(delay).await;
                attempt += 1;
            }
        }
    }
}
