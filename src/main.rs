use std::net::SocketAddr;
use tracing_subscriber::EnvFilter;

use arxiv_social::{config, db, metrics, routes, services};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = config::AppConfig::build()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.server.rust_log))
        .init();

    tracing::info!("Starting Arxiv Social API...");

    let repo = db::Repository::new(&config.database).await?;
    tracing::info!("Connected to database");

    let metrics_router = metrics::setup_metrics()?;
    let state = services::AppState::new(repo.clone());
    let app = routes::create_router(state, repo, metrics_router);

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
