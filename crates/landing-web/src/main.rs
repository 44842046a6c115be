//! TFX Exchange landing site.
//!
//! Serves the landing page, the live feed (snapshot and server-sent events),
//! the threat analyzer and the scenario generator.

mod config;
mod error;
mod routes;
mod state;

use exchange_core::{FeedHub, FeedTask, SignalGenerator};
use tower_http::services::ServeDir;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env()?;
    info!(
        addr = %config.addr,
        profile = config.profile.name(),
        "Starting landing web server"
    );

    // Start the live feed; the handle cancels it on shutdown
    let hub = FeedHub::new(config.profile.max_len());
    let generator = SignalGenerator::new(config.profile.clone());
    let feed_task = FeedTask::spawn(generator, hub.clone());

    let state = AppState::new(&config, hub);

    let app = routes::router()
        .nest_service("/static", ServeDir::new(&config.static_dir))
        .with_state(state);

    info!(addr = %config.addr, "Landing web server listening");
    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    feed_task.stop().await;
    info!("Landing web server stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
