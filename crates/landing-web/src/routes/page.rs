//! Landing page route.

use askama::Template;
use axum::extract::State;
use exchange_core::{group_thousands, AssessmentRecord, Counter, FeedEvent};

use crate::state::AppState;

/// Landing page template.
#[derive(Template)]
#[template(path = "landing.html")]
pub struct LandingTemplate {
    pub demo_url: String,
    pub feed_profile: String,
    /// Feed cap the browser keeps to after live inserts.
    pub max_len: usize,
    pub stats: Vec<StatView>,
    pub feed: Vec<FeedRow>,
    pub history: Vec<HistoryRow>,
}

/// One hero statistic.
pub struct StatView {
    pub value: String,
    pub label: &'static str,
    /// Count-up target, if the statistic animates.
    pub count_to: Option<u64>,
    pub suffix: &'static str,
}

/// One rendered feed line.
pub struct FeedRow {
    pub id: u64,
    pub label: &'static str,
    pub tone: &'static str,
    pub subject: String,
    pub carrier: String,
    pub amount: String,
    pub timestamp: String,
}

impl From<FeedEvent> for FeedRow {
    fn from(event: FeedEvent) -> Self {
        Self {
            id: event.id,
            label: event.kind.label(),
            tone: event.kind.tone(),
            subject: event.subject,
            carrier: event.carrier,
            amount: event
                .amount
                .map(|rate| format!("${}", group_thousands(u64::from(rate))))
                .unwrap_or_default(),
            timestamp: event.timestamp,
        }
    }
}

/// One rendered assessment from the history.
pub struct HistoryRow {
    pub tier: &'static str,
    pub status: &'static str,
    pub excerpt: String,
}

impl From<AssessmentRecord> for HistoryRow {
    fn from(record: AssessmentRecord) -> Self {
        Self {
            tier: record.assessment.tier.label(),
            status: record.assessment.status.label(),
            excerpt: record.excerpt,
        }
    }
}

/// Render the landing page with the current feed and recent assessments.
pub async fn landing_page(State(state): State<AppState>) -> LandingTemplate {
    let feed = state
        .feed
        .snapshot()
        .await
        .into_iter()
        .map(FeedRow::from)
        .collect();

    let history = state
        .history
        .entries()
        .await
        .into_iter()
        .map(HistoryRow::from)
        .collect();

    LandingTemplate {
        demo_url: state.demo_url.clone(),
        feed_profile: state.feed_profile.to_string(),
        max_len: state.feed_max_len,
        stats: hero_stats(),
        feed,
        history,
    }
}

fn hero_stats() -> Vec<StatView> {
    let carriers = Counter::new(80, "K");
    let brokers = Counter::new(170, "+");

    vec![
        StatView {
            value: carriers.display_final(),
            label: "Carriers",
            count_to: Some(carriers.end),
            suffix: carriers.suffix,
        },
        StatView {
            value: brokers.display_final(),
            label: "Brokers",
            count_to: Some(brokers.end),
            suffix: brokers.suffix,
        },
        StatView {
            value: "0".to_string(),
            label: "Fraud",
            count_to: None,
            suffix: "",
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::test_support::test_state;
    use exchange_core::{EventKind, FeedProfile, SignalGenerator};

    #[tokio::test]
    async fn test_page_renders_feed_and_links() {
        let state = test_state();
        state
            .feed
            .publish(FeedEvent {
                id: 1,
                kind: EventKind::Matched,
                subject: "MIA→NYC".to_string(),
                carrier: "LANDSTAR".to_string(),
                amount: Some(2875),
                timestamp: "10:42:05".to_string(),
            })
            .await;

        let html = landing_page(State(state)).await.render().unwrap();

        assert!(html.contains("MIA→NYC"));
        assert!(html.contains("$2,875"));
        assert!(html.contains("MATCHED"));
        assert!(html.contains("trusted-freight-exchange#TFX-Demo"));
        assert!(html.contains("170+"));
    }

    #[tokio::test]
    async fn test_page_carries_profile_cap_before_feed_fills() {
        let state = test_state();

        let html = landing_page(State(state.clone())).await.render().unwrap();
        assert!(html.contains(r#"data-max-len="5""#));

        let mut generator = SignalGenerator::new(FeedProfile::exchange());
        for event in generator.seed_events().into_iter().rev() {
            state.feed.publish(event).await;
        }
        let html = landing_page(State(state)).await.render().unwrap();
        assert_eq!(html.matches("<li data-id=").count(), 4);
        assert!(html.contains(r#"data-max-len="5""#));
    }

    #[tokio::test]
    async fn test_page_uses_sentinel_cap() {
        let mut state = test_state();
        state.feed_profile = "sentinel";
        state.feed_max_len = FeedProfile::sentinel().max_len();

        let html = landing_page(State(state)).await.render().unwrap();
        assert!(html.contains(r#"data-max-len="6""#));
        assert!(html.contains(r#"data-profile="sentinel""#));
    }

    #[test]
    fn test_unpriced_row_has_empty_amount() {
        let row = FeedRow::from(FeedEvent {
            id: 2,
            kind: EventKind::Verified,
            subject: "LAX→SEA".to_string(),
            carrier: "XPO".to_string(),
            amount: None,
            timestamp: "10:42:08".to_string(),
        });
        assert!(row.amount.is_empty());
        assert_eq!(row.tone, "text-blue-400");
    }
}
