//! Sugarcane Quality Analysis - reference prediction server

use std::net::SocketAddr;

use cane_quality_backend::{config::LogFormat, create_app, AppState, Config};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::load()?;

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "cqa_server=debug,cane_quality_backend=debug,tower_http=debug".into());
    let registry = tracing_subscriber::registry().with(filter);
    match config.logging.format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
    }

    tracing::info!("Starting Sugarcane Quality Analysis Server");
    tracing::info!("Environment: {}", config.environment);

    let host: std::net::IpAddr = config.server.host.parse()?;
    let addr = SocketAddr::new(host, config.server.port);

    // Build application
    let app = create_app(AppState::new(config));

    tracing::info!("Listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
