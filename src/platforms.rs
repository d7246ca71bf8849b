use std::fmt;

/// Pseudo-platform id under which the derived cross-platform feed is
/// reported.
pub const AGGREGATED_PLATFORM: &str = "aggregated";

/// Search template used when no platform-specific template applies.
pub(crate) const WEB_SEARCH_TEMPLATE: &str = "https://www.baidu.com/s?wd={query}";

/// The fixed set of upstream platforms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    Weibo,
    Douyin,
    Bilibili,
    Zhihu,
    Baidu,
    Toutiao,
}

impl Platform {
    pub const ALL: [Platform; 6] = [
        Platform::Weibo,
        Platform::Douyin,
        Platform::Bilibili,
        Platform::Zhihu,
        Platform::Baidu,
        Platform::Toutiao,
    ];

    /// Stable string id, also the key in an aggregation cycle's result map.
    pub fn id(self) -> &'static str {
        match self {
            Platform::Weibo => "weibo",
            Platform::Douyin => "douyin",
            Platform::Bilibili => "bilibili",
            Platform::Zhihu => "zhihu",
            Platform::Baidu => "baidu",
            Platform::Toutiao => "toutiao",
        }
    }

    /// API path of the platform's trending feed.
    pub fn endpoint(self) -> &'static str {
        match self {
            Platform::Weibo => "/v2/weibo",
            Platform::Douyin => "/v2/douyin",
            Platform::Bilibili => "/v2/bili",
            Platform::Zhihu => "/v2/zhihu",
            Platform::Baidu => "/v2/baidu/hot",
            Platform::Toutiao => "/v2/toutiao",
        }
    }

    /// Search URL template with a `{query}` placeholder, used for topics the
    /// upstream delivered without a URL of their own.
    pub fn search_template(self) -> &'static str {
        match self {
            Platform::Weibo => "https://s.weibo.com/weibo?q={query}&typeall=1&suball=1",
            Platform::Douyin => "https://www.douyin.com/search/{query}?type=general",
            Platform::Bilibili => "https://search.bilibili.com/all?keyword={query}&order=pubdate",
            Platform::Zhihu => "https://www.zhihu.com/search?q={query}&type=content",
            Platform::Baidu => "https://www.baidu.com/s?wd={query}&tn=baidu&ie=utf-8",
            Platform::Toutiao => "https://www.toutiao.com/search/?keyword={query}&autocomplete=true",
        }
    }

    pub fn from_id(id: &str) -> Option<Platform> {
        Platform::ALL.iter().copied().find(|platform| platform.id() == id)
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}
