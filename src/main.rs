mod config;
mod db;
mod filter;
mod handlers;
mod models;
mod progression;
mod service;
mod validation;

use anyhow::{Context, Result};
use config::Config;
use db::{InMemoryPlayerRepository, PlayerRepository, PlayerStore};
use service::PlayerService;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub struct AppState {
    pub players: PlayerService,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenv::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "player_catalog=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    let store = open_store(&config).await?;
    let state = Arc::new(AppState {
        players: PlayerService::new(store),
    });

    let app = handlers::router(state);

    // Start server
    let addr = config.bind_addr();
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn open_store(config: &Config) -> Result<Arc<dyn PlayerStore>> {
    let Some(database_url) = &config.database_url else {
        tracing::warn!("DATABASE_URL not set, players will be kept in memory");
        return Ok(Arc::new(InMemoryPlayerRepository::new()));
    };

    tracing::info!("Connecting to database: {}", database_url);
    let pool = db::create_pool(database_url).await
        .context("Failed to create database pool")?;

    tracing::info!("Running database migrations");
    db::run_migrations(&pool).await
        .context("Failed to run migrations")?;

    Ok(Arc::new(PlayerRepository::new(pool)))
}
