//! Application state shared across handlers.

use std::sync::Arc;

use exchange_core::{AssessmentHistory, Delay, FeedHub, LexiconScorer, ScenarioPicker};

use crate::config::Config;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Live feed written by the background feed task.
    pub feed: FeedHub,
    /// Name of the active feed profile.
    pub feed_profile: &'static str,
    /// Most feed events the page shows at once.
    pub feed_max_len: usize,
    /// Threat lexicon scorer.
    pub scorer: LexiconScorer,
    /// Recent assessments.
    pub history: Arc<AssessmentHistory>,
    /// Scenario picker.
    pub scenarios: ScenarioPicker,
    /// Simulated latency before analysis results.
    pub analyze_delay: Delay,
    /// Simulated latency before a scenario.
    pub scenario_delay: Delay,
    /// External demo request URL.
    pub demo_url: String,
}

impl AppState {
    /// Create application state from configuration and a running feed hub.
    pub fn new(config: &Config, feed: FeedHub) -> Self {
        Self {
            feed,
            feed_profile: config.profile.name(),
            feed_max_len: config.profile.max_len(),
            scorer: LexiconScorer::new(),
            history: Arc::new(AssessmentHistory::new(config.history_limit)),
            scenarios: ScenarioPicker::new(),
            analyze_delay: Delay::new(config.analyze_delay),
            scenario_delay: Delay::new(config.scenario_delay),
            demo_url: config.demo_url.clone(),
        }
    }
}
