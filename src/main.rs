mod config;
mod error;
mod models;
mod normalize;
mod output;
mod pipeline;
mod scrapers;

use config::Config;
use pipeline::Aggregator;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cfg = Config::from_env();

    // Initialize logging
    let filter = EnvFilter::try_new(&cfg.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("🕷️  DealTracker Scraper");
    info!("==========================================");

    let aggregator = Aggregator::with_default_sources()?;

    info!("Scraping Stekkerstore, MediaMarkt Outlet and Bol.com Breezy...");
    let batch = aggregator.run().await;

    output::write_batch(&cfg.output_path, &batch).await?;
    info!("💾 Saved {} deals to {}", batch.total, cfg.output_path);

    Ok(())
}
