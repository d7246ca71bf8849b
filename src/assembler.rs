use std::collections::HashMap;

use crate::aggregator::cross_platform_feed;
use crate::platforms::{Platform, AGGREGATED_PLATFORM};
use crate::types::{AggregateResponse, PlatformResponse, Result};

/// Merge per-platform outcomes into the final response.
///
/// Pure: no network, no retries. The output holds exactly one slot per
/// fetched platform plus the `"aggregated"` pseudo-platform, each either a
/// feed or an error, never both, never neither.
pub fn assemble(outcomes: Vec<(Platform, Result<PlatformResponse>)>) -> AggregateResponse {
    let successes: Vec<&PlatformResponse> = outcomes
        .iter()
        .filter_map(|(_, outcome)| outcome.as_ref().ok())
        .collect();
    let aggregated = cross_platform_feed(&successes);

    let mut results = HashMap::with_capacity(outcomes.len() + 1);
    for (platform, outcome) in outcomes {
        results.insert(platform.id().to_string(), outcome);
    }
    results.insert(AGGREGATED_PLATFORM.to_string(), aggregated);

    AggregateResponse { results }
}
