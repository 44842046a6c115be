//! Scenario generator route.

use axum::extract::State;
use axum::Json;
use serde::Serialize;
use tracing::debug;

use crate::state::AppState;

/// A generated scenario.
#[derive(Serialize)]
pub struct ScenarioResponse {
    pub scenario: String,
}

/// Pick a canned scenario after the simulated delay.
pub async fn scenario_api(State(state): State<AppState>) -> Json<ScenarioResponse> {
    let picker = state.scenarios.clone();
    let scenario = state
        .scenario_delay
        .complete(|| picker.pick(&mut rand::thread_rng()))
        .await;

    debug!(scenario, "Generated scenario");

    Json(ScenarioResponse {
        scenario: scenario.to_string(),
    })
}
