use serde_json::json;

use trend_aggregator::{normalize, Platform};

#[test]
fn title_priority_is_title_then_name_then_word() {
    let payload = json!({
        "data": [
            { "title": "from title", "name": "from name", "word": "from word" },
            { "name": "from name", "word": "from word" },
            { "word": "from word" },
        ]
    });

    let topics = normalize(Platform::Weibo, &payload);

    assert_eq!(topics[0].title, "from title");
    assert_eq!(topics[1].title, "from name");
    assert_eq!(topics[2].title, "from word");
}

#[test]
fn missing_title_emits_empty_string_in_place() {
    let payload = json!({
        "data": [
            { "title": "first" },
            { "hot": 123 },
            { "title": "third" },
        ]
    });

    let topics = normalize(Platform::Zhihu, &payload);

    assert_eq!(topics.len(), 3, "untitled items keep their slot");
    assert_eq!(topics[1].title, "");
    assert_eq!(topics[1].rank, 2);
    assert_eq!(topics[2].rank, 3);
}

#[test]
fn upstream_url_is_kept_verbatim() {
    let payload = json!({
        "data": [ { "title": "story", "url": "https://example.com/story" } ]
    });

    let topics = normalize(Platform::Baidu, &payload);

    assert_eq!(topics[0].url, "https://example.com/story");
}

#[test]
fn missing_url_synthesizes_platform_search_link() {
    let payload = json!({ "data": [ { "title": "rust language" } ] });

    let topics = normalize(Platform::Weibo, &payload);

    assert_eq!(
        topics[0].url,
        "https://s.weibo.com/weibo?q=rust+language&typeall=1&suball=1"
    );
}

#[test]
fn empty_url_falls_back_to_search_link_too() {
    let payload = json!({ "data": [ { "title": "abc", "url": "" } ] });

    let topics = normalize(Platform::Douyin, &payload);

    assert_eq!(topics[0].url, "https://www.douyin.com/search/abc?type=general");
}

#[test]
fn positive_upstream_hot_is_used_verbatim() {
    let payload = json!({
        "data": [
            { "title": "with hot", "hot": 12345 },
            { "title": "with hot_value", "hot_value": 777 },
        ]
    });

    let topics = normalize(Platform::Toutiao, &payload);

    assert_eq!(topics[0].hot, 12345);
    assert_eq!(topics[1].hot, 777);
}

#[test]
fn zero_hot_falls_back_to_synthetic_score() {
    let payload = json!({
        "data": [ { "title": "quiet topic", "hot": 0 } ]
    });

    let topics = normalize(Platform::Bilibili, &payload);

    // Position 0 gives the top synthetic multiplier of 50.
    assert_eq!(topics[0].hot, 100_000 * 50);
}

#[test]
fn synthetic_hot_decays_with_position_and_floors_at_one() {
    let items: Vec<_> = (0..60)
        .map(|i| json!({ "title": format!("topic number {}", i) }))
        .collect();
    let payload = json!({ "data": items });

    let topics = normalize(Platform::Zhihu, &payload);

    assert_eq!(topics[0].hot, 100_000 * 50);
    assert_eq!(topics[1].hot, 100_000 * 49);
    assert_eq!(topics[48].hot, 100_000 * 2);
    assert_eq!(topics[49].hot, 100_000, "multiplier floors at 1");
    assert_eq!(topics[59].hot, 100_000, "and stays floored past position 49");
}

#[test]
fn ranks_follow_arrival_order() {
    let payload = json!({
        "data": [
            { "title": "c", "hot": 1 },
            { "title": "a", "hot": 999 },
            { "title": "b", "hot": 50 },
        ]
    });

    let topics = normalize(Platform::Baidu, &payload);

    // The upstream order is never re-sorted, whatever the hot values say.
    let titles: Vec<&str> = topics.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, vec!["c", "a", "b"]);
    let ranks: Vec<u32> = topics.iter().map(|t| t.rank).collect();
    assert_eq!(ranks, vec![1, 2, 3]);
}

#[test]
fn normalization_is_deterministic() {
    let payload = json!({
        "data": [
            { "title": "one", "hot": 10 },
            { "name": "two" },
            { "word": "three", "url": "https://example.com/3" },
        ]
    });

    let first = normalize(Platform::Weibo, &payload);
    let second = normalize(Platform::Weibo, &payload);

    assert_eq!(first, second);
}

#[test]
fn missing_data_field_yields_empty_list() {
    assert!(normalize(Platform::Weibo, &json!({})).is_empty());
    assert!(normalize(Platform::Weibo, &json!({ "data": null })).is_empty());
    assert!(normalize(Platform::Weibo, &json!({ "data": "nope" })).is_empty());
}

#[test]
fn per_platform_topics_carry_no_platform_set() {
    let payload = json!({ "data": [ { "title": "solo" } ] });

    let topics = normalize(Platform::Douyin, &payload);

    assert!(topics[0].platforms.is_empty());
}
