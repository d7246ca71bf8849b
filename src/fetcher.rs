use std::time::Duration;

use reqwest::{header, Client};
use serde_json::Value;
use tracing::{debug, warn};

use crate::types::{FetchConfig, FetchError, Result};

/// Thin HTTP client: one bounded GET per call, failures classified onto the
/// [`FetchError`] taxonomy. Holds no mutable state.
pub struct Fetcher {
    client: Client,
    base_url: String,
}

impl Fetcher {
    pub fn new(config: &FetchConfig) -> Self {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .gzip(true)
            .deflate(true)
            .brotli(true)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Issue one GET against `endpoint`, with `deadline` as a hard
    /// wall-clock limit covering connect through body read. Exceeding it
    /// aborts the in-flight request.
    pub async fn fetch_json(&self, endpoint: &str, deadline: Duration) -> Result<Value> {
        let url = format!("{}{}", self.base_url, endpoint);
        debug!("GET {} (deadline {:?})", url, deadline);

        let response = self
            .client
            .get(&url)
            .header(header::ACCEPT, "application/json")
            // Live data only; intermediaries must not answer from cache.
            .header(header::CACHE_CONTROL, "no-cache")
            .timeout(deadline)
            .send()
            .await
            .map_err(|err| classify_transport(&url, &err))?;

        let status = response.status();
        if status.as_u16() >= 400 {
            warn!("{} answered HTTP {}", url, status);
            return Err(FetchError::HttpStatus(status.as_u16()));
        }

        response.json::<Value>().await.map_err(|err| {
            if err.is_timeout() {
                FetchError::Timeout(format!("{}: body read exceeded deadline", url))
            } else if err.is_decode() {
                FetchError::Unknown(format!("{}: invalid JSON payload: {}", url, err))
            } else {
                FetchError::Network(format!("{}: {}", url, err))
            }
        })
    }
}

fn classify_transport(url: &str, err: &reqwest::Error) -> FetchError {
    if err.is_timeout() {
        FetchError::Timeout(format!("{}: no response within deadline", url))
    } else {
        FetchError::Network(format!("{}: {}", url, err))
    }
}
