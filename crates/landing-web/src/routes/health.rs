//! Health check endpoint.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
pub struct Health {
    pub status: &'static str,
    pub feed_profile: &'static str,
    /// Events currently visible in the live feed.
    pub feed_events: usize,
}

/// Health check endpoint. Always `ok` while the server answers.
pub async fn health(State(state): State<AppState>) -> Json<Health> {
    Json(Health {
        status: "ok",
        feed_profile: state.feed_profile,
        feed_events: state.feed.snapshot().await.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::test_support::test_state;
    use exchange_core::{FeedProfile, SignalGenerator};

    #[tokio::test]
    async fn test_health_ok_before_and_after_seeding() {
        let state = test_state();
        let Json(before) = health(State(state.clone())).await;
        assert_eq!(before.status, "ok");
        assert_eq!(before.feed_events, 0);

        let mut generator = SignalGenerator::new(FeedProfile::exchange());
        state.feed.publish(generator.tick()).await;

        let Json(after) = health(State(state)).await;
        assert_eq!(after.status, "ok");
        assert_eq!(after.feed_events, 1);
        assert_eq!(after.feed_profile, "exchange");
    }

    #[tokio::test]
    async fn test_health_body_status_field() {
        let Json(body) = health(State(test_state())).await;
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["status"], "ok");
    }
}
