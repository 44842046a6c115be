//! Threat analyzer routes.

use axum::extract::State;
use axum::Json;
use exchange_core::{AssessmentRecord, ThreatAssessment};
use serde::Deserialize;
use tracing::info;

use crate::error::{Result, WebError};
use crate::state::AppState;

/// Longest text accepted by the analyzer.
pub const MAX_INPUT_CHARS: usize = 5000;

/// Request to analyze a carrier message.
#[derive(Deserialize)]
pub struct AnalyzeRequest {
    pub text: String,
}

/// Score the text after the simulated processing delay and record it.
pub async fn analyze_api(
    State(state): State<AppState>,
    Json(req): Json<AnalyzeRequest>,
) -> Result<Json<ThreatAssessment>> {
    if req.text.trim().is_empty() {
        return Err(WebError::EmptyInput);
    }
    if req.text.chars().count() > MAX_INPUT_CHARS {
        return Err(WebError::InputTooLong {
            max: MAX_INPUT_CHARS,
        });
    }

    let scorer = state.scorer.clone();
    let text = req.text;
    let assessment = state
        .analyze_delay
        .complete(|| scorer.analyze(&text))
        .await;

    info!(
        score = assessment.score,
        tier = %assessment.tier,
        "Analyzed message"
    );

    state.history.record(&text, assessment.clone()).await;

    Ok(Json(assessment))
}

/// Recent assessments, newest first.
pub async fn history_api(State(state): State<AppState>) -> Json<Vec<AssessmentRecord>> {
    Json(state.history.entries().await)
}
