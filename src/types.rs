use std::collections::HashMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::retry::RetryConfig;

/// One trending item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    pub title: String,
    pub url: String,
    pub hot: u64,
    /// 1-based position within the owning list.
    pub rank: u32,
    /// Platforms the topic was seen on. Empty for a single platform's feed;
    /// carries two or more ids only in the aggregated feed.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub platforms: Vec<String>,
}

/// One platform's topic list from a single successful fetch. Built once,
/// never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformResponse {
    pub platform: String,
    pub topics: Vec<Topic>,
    /// Fetch completion time, epoch milliseconds.
    pub fetched_at: i64,
}

/// Failure of one fetch attempt or of a whole aggregation cycle.
///
/// Retry eligibility is a property of the variant alone, see
/// [`FetchError::is_retryable`].
#[derive(Debug, Clone, thiserror::Error)]
pub enum FetchError {
    #[error("request timed out: {0}")]
    Timeout(String),

    #[error("network failure: {0}")]
    Network(String),

    #[error("upstream returned HTTP {0}")]
    HttpStatus(u16),

    #[error("retries exhausted: {0}")]
    RetryExhausted(String),

    #[error("unexpected failure: {0}")]
    Unknown(String),
}

impl FetchError {
    /// Whether another attempt could plausibly succeed. Timeouts, transport
    /// failures and 5xx answers are worth retrying; everything else is not.
    pub fn is_retryable(&self) -> bool {
        match self {
            FetchError::Timeout(_) | FetchError::Network(_) => true,
            FetchError::HttpStatus(status) => *status >= 500,
            FetchError::RetryExhausted(_) | FetchError::Unknown(_) => false,
        }
    }

    /// Whether a consumer should present this as a connection/retry problem
    /// rather than a generic data failure.
    pub fn is_connectivity_failure(&self) -> bool {
        matches!(
            self,
            FetchError::Timeout(_) | FetchError::Network(_) | FetchError::RetryExhausted(_)
        )
    }
}

/// Outcome of one aggregation cycle: exactly one slot per fetched platform
/// plus the `"aggregated"` pseudo-platform, each holding a feed or the error
/// that platform ended with.
#[derive(Debug, Clone)]
pub struct AggregateResponse {
    pub results: HashMap<String, Result<PlatformResponse>>,
}

impl AggregateResponse {
    pub fn get(&self, platform_id: &str) -> Option<&Result<PlatformResponse>> {
        self.results.get(platform_id)
    }

    /// Iterate the feeds that were fetched successfully.
    pub fn successes(&self) -> impl Iterator<Item = &PlatformResponse> {
        self.results
            .values()
            .filter_map(|outcome| outcome.as_ref().ok())
    }
}

/// Fixed knobs for one engine instance. Defaults are the production
/// constants; tests point `base_url` at a stub server and shrink the delays.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub base_url: String,
    pub user_agent: String,
    /// Per-attempt deadline for fetches running inside `fetch_all`.
    pub aggregate_timeout: Duration,
    /// Per-attempt deadline for a direct single-platform fetch.
    pub single_timeout: Duration,
    /// Retry budget wrapped around each platform fetch.
    pub platform_retry: RetryConfig,
    /// Retry budget wrapped around the whole fan-out.
    pub aggregate_retry: RetryConfig,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            base_url: "https://60s.viki.moe".to_string(),
            user_agent: "Trend-Aggregator/1.0".to_string(),
            aggregate_timeout: Duration::from_millis(20_000),
            single_timeout: Duration::from_millis(9_000),
            platform_retry: RetryConfig {
                max_retries: 2,
                base_delay: Duration::from_millis(800),
            },
            aggregate_retry: RetryConfig {
                max_retries: 1,
                base_delay: Duration::from_millis(900),
            },
        }
    }
}

pub type Result<T> = std::result::Result<T, FetchError>;
