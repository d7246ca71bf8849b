use clap::Parser;
use tracing::info;

use trend_aggregator::{
    FetchError, Platform, PlatformResponse, TrendAggregator, AGGREGATED_PLATFORM,
};

#[derive(Parser)]
#[command(
    name = "trend-aggregator",
    about = "Cross-platform trending topic aggregator"
)]
struct Cli {
    /// Fetch a single platform (weibo, douyin, bilibili, zhihu, baidu,
    /// toutiao) instead of all of them.
    #[arg(long)]
    platform: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let aggregator = TrendAggregator::new();

    match cli.platform {
        Some(id) => {
            let platform = Platform::from_id(&id)
                .ok_or_else(|| anyhow::anyhow!("unknown platform: {}", id))?;
            info!("Fetching {}", platform);
            let feed = aggregator.fetch_platform(platform).await?;
            print_feed(&feed);
        }
        None => {
            info!("Fetching all platforms");
            let response = aggregator.fetch_all().await?;
            for platform in Platform::ALL {
                print_slot(platform.id(), response.get(platform.id()));
            }
            print_slot(AGGREGATED_PLATFORM, response.get(AGGREGATED_PLATFORM));
        }
    }

    Ok(())
}

fn print_slot(platform_id: &str, outcome: Option<&Result<PlatformResponse, FetchError>>) {
    match outcome {
        Some(Ok(feed)) => print_feed(feed),
        Some(Err(err)) if err.is_connectivity_failure() => {
            println!("\n=== {} ===", platform_id);
            println!("connection/retry failure: {}", err);
        }
        Some(Err(err)) => {
            println!("\n=== {} ===", platform_id);
            println!("data fetch failed: {}", err);
        }
        None => {
            println!("\n=== {} ===", platform_id);
            println!("missing result slot");
        }
    }
}

fn print_feed(feed: &PlatformResponse) {
    println!("\n=== {} ({} topics) ===", feed.platform, feed.topics.len());
    for topic in feed.topics.iter().take(10) {
        if topic.platforms.is_empty() {
            println!("{:>3}. [{:>9}] {}", topic.rank, topic.hot, topic.title);
        } else {
            println!(
                "{:>3}. [{:>9}] {} ({})",
                topic.rank,
                topic.hot,
                topic.title,
                topic.platforms.join(", ")
            );
        }
    }
}
