use serde_json::Value;

use crate::platforms::Platform;
use crate::types::Topic;

const BASE_HOT: u64 = 100_000;

/// Map one platform's raw payload onto the uniform topic list.
///
/// Pure and deterministic: the same payload always yields the same topics.
/// The upstream ordering is kept as-is and becomes the 1-based `rank`; a
/// missing or non-array `data` field yields an empty list.
pub fn normalize(platform: Platform, payload: &Value) -> Vec<Topic> {
    let items = match payload.get("data").and_then(Value::as_array) {
        Some(items) => items,
        None => return Vec::new(),
    };

    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let title = item_title(item);
            let url = match item.get("url").and_then(Value::as_str) {
                Some(url) if !url.is_empty() => url.to_string(),
                _ => search_url(platform.search_template(), &title),
            };

            Topic {
                url,
                hot: hot_value(item, index),
                rank: (index + 1) as u32,
                platforms: Vec::new(),
                title,
            }
        })
        .collect()
}

/// First of `title`, `name`, `word` that is present as a string. An absent
/// title comes out empty; the item still keeps its slot in the list.
fn item_title(item: &Value) -> String {
    ["title", "name", "word"]
        .iter()
        .find_map(|field| item.get(*field).and_then(Value::as_str))
        .unwrap_or_default()
        .to_string()
}

/// Upstream popularity when it is a positive number (`hot`, then
/// `hot_value`), taken verbatim. Otherwise a synthetic score that decays
/// with list position: `100_000 * max(1, 50 - index)`.
fn hot_value(item: &Value, index: usize) -> u64 {
    let upstream = item
        .get("hot")
        .and_then(Value::as_f64)
        .filter(|hot| *hot > 0.0)
        .or_else(|| {
            item.get("hot_value")
                .and_then(Value::as_f64)
                .filter(|hot| *hot > 0.0)
        });

    match upstream {
        Some(hot) => hot as u64,
        None => BASE_HOT * 50u64.saturating_sub(index as u64).max(1),
    }
}

/// Fill a search template's `{query}` placeholder with the encoded title.
pub(crate) fn search_url(template: &str, title: &str) -> String {
    let query: String = url::form_urlencoded::byte_serialize(title.as_bytes()).collect();
    template.replace("{query}", &query)
}
