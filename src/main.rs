//! Tourist Safety Server
//!
//! REST API behind the tourist, police and tourism department dashboards.

use std::net::SocketAddr;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tourist_safety::{
    config::{AppConfig, LoggingConfig},
    create_router,
    repository::Repository,
    services::Services,
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("Failed to load configuration")?;

    init_tracing(&config.logging);

    tracing::info!(
        environment = %config.server.environment,
        "Starting Tourist Safety Server v{}",
        env!("CARGO_PKG_VERSION")
    );
    if config.auth.jwt_secret == tourist_safety::config::DEFAULT_JWT_SECRET {
        tracing::warn!("auth.jwt_secret is the built-in default; set JWT_SECRET outside development");
    }
    if !config.auth.enforce_roles {
        tracing::warn!("role enforcement is disabled; any authenticated user may call any dashboard route");
    }

    // Create repository and services
    let services = Services::new(Repository::new(), config.auth.clone());
    if config.server.seed_on_startup {
        services.seed().await.context("Failed to load demo data")?;
    }

    let addr = SocketAddr::new(
        config.server.host.parse().context("Invalid host address")?,
        config.server.port,
    );

    let app = create_router(AppState::new(config, services));

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

fn init_tracing(logging: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("tourist_safety={},tower_http=debug", logging.level).into());

    let registry = tracing_subscriber::registry().with(filter);
    if logging.format == "json" {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
