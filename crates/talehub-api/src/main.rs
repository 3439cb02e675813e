//! TaleHub API server entry point.

use std::error::Error;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::EnvFilter;

use talehub_api::config::AppConfig;
use talehub_api::state::AppState;
use talehub_core::clock::SystemClock;
use talehub_core::rng::SystemRng;
use talehub_store::{PgBlobStore, PgDocumentStore};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Initialize tracing subscriber.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    tracing::info!("Starting TaleHub API server");

    let config = AppConfig::from_env()?;

    // Create database connection pool and apply migrations.
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&config.database_url)
        .await?;
    sqlx::migrate!("../../migrations").run(&pool).await?;

    // Build application state from explicitly constructed seams.
    let documents = Arc::new(PgDocumentStore::new(pool.clone()));
    let blobs = Arc::new(PgBlobStore::new(pool, config.public_base_url.clone()));
    let app_state = AppState::new(
        documents,
        blobs,
        Arc::new(SystemClock),
        Arc::new(Mutex::new(SystemRng)),
        config.clone(),
    );

    let app = talehub_api::app(app_state);

    // Start server.
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .map_err(|e| format!("invalid HOST:PORT combination: {e}"))?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app).await?;

    Ok(())
}
