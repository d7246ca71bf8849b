pub mod aggregator;
pub mod assembler;
pub mod fetcher;
pub mod normalizer;
pub mod platforms;
pub mod retry;
pub mod types;

pub use aggregator::{cross_platform_feed, TrendAggregator};
pub use assembler::assemble;
pub use fetcher::Fetcher;
pub use normalizer::normalize;
pub use platforms::{Platform, AGGREGATED_PLATFORM};
pub use retry::{with_retry, RetryConfig};
pub use types::{AggregateResponse, FetchConfig, FetchError, PlatformResponse, Result, Topic};
