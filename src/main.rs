use anyhow::Context;
use tracing_subscriber::EnvFilter;

use bank_api_rust::{app, config, database, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Initialize configuration (this loads the config singleton)
    let config = config::config();
    tracing::info!("Starting bank API in {:?} mode", config.environment);
    if bank_api_rust::is_development!() {
        tracing::warn!("Development preset: default JWT secret unless JWT_SECRET is set");
    }
    if config.security.jwt_secret.is_empty() {
        anyhow::bail!("JWT_SECRET must be set outside development");
    }

    let store = database::connect_store(&config.database)
        .await
        .context("failed to initialize storage")?;

    let bind_addr = format!("0.0.0.0:{}", config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Bank API listening on http://{}", bind_addr);

    axum::serve(listener, app(AppState::new(store)))
        .await
        .context("server error")?;

    Ok(())
}
