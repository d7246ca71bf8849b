use std::future::Future;
use std::time::Duration;

use backoff::backoff::Backoff;
use backoff::ExponentialBackoff;
use tokio::time::sleep;
use tracing::warn;

use crate::types::{FetchError, Result};

/// Attempt budget and backoff base for one retry layer.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Retries granted after the first attempt; total attempts are
    /// `max_retries + 1`.
    pub max_retries: u32,
    pub base_delay: Duration,
}

impl RetryConfig {
    fn backoff(&self) -> ExponentialBackoff {
        ExponentialBackoff {
            current_interval: self.base_delay,
            initial_interval: self.base_delay,
            randomization_factor: 0.0,
            multiplier: 2.0,
            max_interval: self.base_delay * 64,
            max_elapsed_time: None,
            ..ExponentialBackoff::default()
        }
    }
}

/// Run `operation` under bounded exponential-backoff retry.
///
/// A failed attempt is retried only while the error reports itself
/// retryable and attempts remain; a non-retryable error returns unchanged
/// right away without consuming the budget. The delay before attempt `n + 1`
/// is `base_delay * 2^n`, applied as a suspension so sibling tasks keep
/// making progress. Once the budget is spent the last error is folded into
/// [`FetchError::RetryExhausted`].
pub async fn with_retry<T, F, Fut>(config: &RetryConfig, mut operation: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let mut backoff = config.backoff();
    let mut attempt: u32 = 0;

    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) if !err.is_retryable() => return Err(err),
            Err(err) if attempt >= config.max_retries => {
                return Err(FetchError::RetryExhausted(format!(
                    "giving up after {} attempts, last error: {}",
                    attempt + 1,
                    err
                )));
            }
            Err(err) => {
                let delay = match backoff.next_backoff() {
                    Some(delay) => delay,
                    None => {
                        return Err(FetchError::RetryExhausted(format!(
                            "backoff budget spent after {} attempts, last error: {}",
                            attempt + 1,
                            err
                        )));
                    }
                };
                warn!(
                    "attempt {}/{} failed ({}), retrying in {:?}",
                    attempt + 1,
                    config.max_retries + 1,
                    err,
                    delay
                );
                sleep(delay).await;
                attempt += 1;
            }
        }
    }
}
