use std::collections::HashMap;
use std::time::Duration;

use chrono::Utc;
use futures::future;
use tracing::{info, warn};

use crate::assembler::assemble;
use crate::fetcher::Fetcher;
use crate::normalizer::{normalize, search_url};
use crate::platforms::{Platform, AGGREGATED_PLATFORM, WEB_SEARCH_TEMPLATE};
use crate::retry::with_retry;
use crate::types::{AggregateResponse, FetchConfig, FetchError, PlatformResponse, Result, Topic};

/// How many topics the derived cross-platform feed keeps.
const AGGREGATED_LIMIT: usize = 10;
/// Minimum distinct platforms for a topic to count as trending across them.
const MIN_PLATFORMS: usize = 2;
/// Title keys shorter than this are noise (placeholders, bare punctuation).
const MIN_KEY_CHARS: usize = 3;

/// The fetch-and-aggregate engine. Carries no mutable state; every call is
/// an independent cycle.
pub struct TrendAggregator {
    fetcher: Fetcher,
    config: FetchConfig,
}

impl TrendAggregator {
    pub fn new() -> Self {
        Self::with_config(FetchConfig::default())
    }

    pub fn with_config(config: FetchConfig) -> Self {
        let fetcher = Fetcher::new(&config);
        Self { fetcher, config }
    }

    /// Fetch and normalize one platform's feed, retry-wrapped, with the
    /// shorter direct-call deadline.
    pub async fn fetch_platform(&self, platform: Platform) -> Result<PlatformResponse> {
        self.fetch_platform_bounded(platform, self.config.single_timeout)
            .await
    }

    async fn fetch_platform_bounded(
        &self,
        platform: Platform,
        deadline: Duration,
    ) -> Result<PlatformResponse> {
        with_retry(&self.config.platform_retry, || async move {
            let payload = self.fetcher.fetch_json(platform.endpoint(), deadline).await?;
            let topics = normalize(platform, &payload);
            Ok(PlatformResponse {
                platform: platform.id().to_string(),
                topics,
                fetched_at: Utc::now().timestamp_millis(),
            })
        })
        .await
    }

    /// Fetch every platform concurrently and assemble one response.
    ///
    /// Fails only when not a single platform delivered; any other mix of
    /// outcomes is a normal partial result.
    pub async fn fetch_all(&self) -> Result<AggregateResponse> {
        with_retry(&self.config.aggregate_retry, || self.fetch_all_once()).await
    }

    async fn fetch_all_once(&self) -> Result<AggregateResponse> {
        let tasks = Platform::ALL.map(|platform| async move {
            let outcome = self
                .fetch_platform_bounded(platform, self.config.aggregate_timeout)
                .await;
            if let Err(err) = &outcome {
                warn!("{} fetch failed: {}", platform, err);
            }
            (platform, outcome)
        });

        // Join-all barrier: aggregation must not start before every platform
        // task has settled, and no task's failure cancels a sibling.
        let outcomes = future::join_all(tasks).await;

        if outcomes.iter().all(|(_, outcome)| outcome.is_err()) {
            return Err(FetchError::RetryExhausted(
                "all platform requests failed after retries".to_string(),
            ));
        }

        let succeeded = outcomes.iter().filter(|(_, outcome)| outcome.is_ok()).count();
        info!("fetched {}/{} platforms", succeeded, outcomes.len());

        Ok(assemble(outcomes))
    }
}

impl Default for TrendAggregator {
    fn default() -> Self {
        Self::new()
    }
}

struct MergedTopic {
    title: String,
    url: String,
    hot: u64,
    platforms: Vec<String>,
}

/// Derive the cross-platform feed from the successfully fetched feeds.
///
/// Topics merge by trimmed, lowercased title. A merged topic qualifies once
/// two or more distinct platforms reported it; qualifiers sort by platform
/// count, then peak popularity, ties keeping first-seen order, and the top
/// ten survive. An empty result is reported as an unavailable slot rather
/// than an empty feed, with the message telling "no overlap" apart from
/// "nothing to overlap".
pub fn cross_platform_feed(feeds: &[&PlatformResponse]) -> Result<PlatformResponse> {
    let mut merged: Vec<MergedTopic> = Vec::new();
    let mut index_by_key: HashMap<String, usize> = HashMap::new();
    let mut saw_topics = false;

    for feed in feeds {
        for topic in &feed.topics {
            saw_topics = true;
            let key = topic.title.trim().to_lowercase();
            if key.chars().count() < MIN_KEY_CHARS {
                continue;
            }
            match index_by_key.get(&key) {
                Some(&slot) => {
                    let entry = &mut merged[slot];
                    if !entry.platforms.contains(&feed.platform) {
                        entry.platforms.push(feed.platform.clone());
                    }
                    entry.hot = entry.hot.max(topic.hot);
                    // URL policy: the first non-empty one seen wins.
                    if entry.url.is_empty() && !topic.url.is_empty() {
                        entry.url = topic.url.clone();
                    }
                }
                None => {
                    index_by_key.insert(key.clone(), merged.len());
                    merged.push(MergedTopic {
                        title: key,
                        url: topic.url.clone(),
                        hot: topic.hot,
                        platforms: vec![feed.platform.clone()],
                    });
                }
            }
        }
    }

    let mut qualifying: Vec<MergedTopic> = merged
        .into_iter()
        .filter(|entry| entry.platforms.len() >= MIN_PLATFORMS)
        .collect();

    // Stable sort keeps first-insertion order across full ties.
    qualifying.sort_by(|a, b| {
        b.platforms
            .len()
            .cmp(&a.platforms.len())
            .then(b.hot.cmp(&a.hot))
    });
    qualifying.truncate(AGGREGATED_LIMIT);

    if qualifying.is_empty() {
        let reason = if saw_topics {
            "no topic was reported by two or more platforms"
        } else {
            "every source topic list was empty"
        };
        return Err(FetchError::Unknown(format!(
            "aggregated feed unavailable: {}",
            reason
        )));
    }

    let topics = qualifying
        .into_iter()
        .enumerate()
        .map(|(index, entry)| Topic {
            url: if entry.url.is_empty() {
                search_url(WEB_SEARCH_TEMPLATE, &entry.title)
            } else {
                entry.url
            },
            hot: entry.hot,
            rank: (index + 1) as u32,
            platforms: entry.platforms,
            title: entry.title,
        })
        .collect();

    Ok(PlatformResponse {
        platform: AGGREGATED_PLATFORM.to_string(),
        topics,
        fetched_at: Utc::now().timestamp_millis(),
    })
}
