mod config;
mod db;
mod editorial;
mod errors;
mod models;
mod routes;
mod state;
mod store;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::create_pool;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::{ContentStore, MemoryContentStore, PgContentStore};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Newsroom API v{}", env!("CARGO_PKG_VERSION"));

    let store: Arc<dyn ContentStore> = match &config.database_url {
        Some(url) => {
            let pool = create_pool(url, config.db_max_connections).await?;
            Arc::new(PgContentStore::new(pool))
        }
        None => {
            warn!("DATABASE_URL not set; serving from an empty in-memory store");
            Arc::new(MemoryContentStore::new())
        }
    };

    info!(
        "Auto-trending window: {}h, home tree path: {}",
        config.auto_trending_hours, config.home_tree_path
    );

    let state = AppState {
        store,
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
