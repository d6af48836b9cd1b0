//! Shelf API server binary.
//!
//! Startup sequence: tracing, config, database (with migrations), then
//! the HTTP server with graceful shutdown.

use std::sync::Arc;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use shelf_api::routes;
use shelf_api::{ApiConfig, AppState};
use shelf_db::{Database, DbConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new("shelf_api=info,shelf_db=info,tower_http=info")
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ApiConfig::load()?;
    tracing::info!(
        bind = %config.bind_addr,
        database = %config.database_path,
        "Starting Shelf API"
    );

    let db = Database::new(DbConfig::new(&config.database_path)).await?;

    let bind_addr = config.bind_addr.clone();
    let state = Arc::new(AppState::new(config, db));

    routes::serve(state, &bind_addr).await
}
