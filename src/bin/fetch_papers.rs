//! One-shot ingestion run.
//!
//! Fetches the newest feed batch, deduplicates against the store,
//! summarizes what survives and bulk-inserts the result, then exits.
//! Scheduling (cron, worker queue) is external to this binary.

use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use arxiv_social::{
    config::AppConfig,
    db::Repository,
    feed::ArxivClient,
    metrics,
    services::ingest::IngestService,
    summarizer::OpenRouterSummarizer,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::build()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.server.rust_log))
        .init();

    tracing::info!("Starting ingestion run...");

    let metrics_handle = metrics::install_recorder()?;

    let repo = Repository::new(&config.database).await?;
    tracing::info!("Connected to database");

    let service = IngestService::new(
        Arc::new(ArxivClient::new(&config.feed)),
        Arc::new(repo),
        Arc::new(OpenRouterSummarizer::new(config.summarizer.clone())),
        config.feed.max_results,
    );

    let report = service.run().await?;

    if report.inserted == 0 {
        tracing::info!("No new papers");
    } else {
        tracing::info!(inserted = report.inserted, "Inserted new papers");
    }
    tracing::debug!(metrics = %metrics_handle.render(), "Run metrics");

    Ok(())
}
