//! Route handlers for the landing site.

pub mod analyze;
pub mod feed;
pub mod health;
pub mod page;
pub mod scenario;

use axum::routing::{get, post};
use axum::Router;

use crate::state::AppState;

/// Build the router with all routes.
pub fn router() -> Router<AppState> {
    Router::new()
        // HTML pages
        .route("/", get(page::landing_page))
        // Health check
        .route("/health", get(health::health))
        // API endpoints
        .route("/api/feed", get(feed::feed_api))
        .route("/api/feed/stream", get(feed::feed_stream))
        .route("/api/analyze", post(analyze::analyze_api))
        .route("/api/history", get(analyze::history_api))
        .route("/api/scenario", post(scenario::scenario_api))
}
