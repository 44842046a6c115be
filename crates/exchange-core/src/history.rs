//! Recent threat assessments.
//!
//! Keeps a short, newest-first trail of analyses so the analyzer panel can
//! show what was checked last. Older entries are dropped once the limit is
//! reached.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::RwLock;

use crate::lexicon::ThreatAssessment;

/// Default number of assessments kept.
pub const DEFAULT_HISTORY_LIMIT: usize = 5;

/// Maximum characters of input kept alongside an assessment.
const EXCERPT_CHARS: usize = 80;

/// One analyzed input and its result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssessmentRecord {
    /// Sequence number, increasing across the history's lifetime.
    pub id: u64,
    /// Leading part of the analyzed text.
    pub excerpt: String,
    pub assessment: ThreatAssessment,
    pub analyzed_at: DateTime<Utc>,
}

#[derive(Debug)]
struct Entries {
    records: VecDeque<AssessmentRecord>,
    next_id: u64,
}

/// Capped, newest-first assessment history.
///
/// # Example
///
/// ```rust
/// use exchange_core::{AssessmentHistory, LexiconScorer};
///
/// #[tokio::main(flavor = "current_thread")]
/// async fn main() {
///     let history = AssessmentHistory::new(2);
///     let scorer = LexiconScorer::new();
///
///     for text in ["first", "second", "third"] {
///         history.record(text, scorer.analyze(text)).await;
///     }
///
///     let entries = history.entries().await;
///     assert_eq!(entries.len(), 2);
///     assert_eq!(entries[0].excerpt, "third");
/// }
/// ```
#[derive(Debug)]
pub struct AssessmentHistory {
    entries: RwLock<Entries>,
    limit: usize,
}

impl Default for AssessmentHistory {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_LIMIT)
    }
}

impl AssessmentHistory {
    /// Create a history keeping at most `limit` assessments.
    pub fn new(limit: usize) -> Self {
        Self {
            entries: RwLock::new(Entries {
                records: VecDeque::with_capacity(limit + 1),
                next_id: 1,
            }),
            limit,
        }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Store an assessment at the head, evicting the oldest past the limit.
    pub async fn record(&self, text: &str, assessment: ThreatAssessment) -> AssessmentRecord {
        let mut entries = self.entries.write().await;

        let record = AssessmentRecord {
            id: entries.next_id,
            excerpt: excerpt(text),
            assessment,
            analyzed_at: Utc::now(),
        };
        entries.next_id += 1;

        entries.records.push_front(record.clone());
        entries.records.truncate(self.limit);

        record
    }

    /// Stored assessments, newest first.
    pub async fn entries(&self) -> Vec<AssessmentRecord> {
        self.entries.read().await.records.iter().cloned().collect()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.records.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.records.is_empty()
    }

    pub async fn clear(&self) {
        self.entries.write().await.records.clear();
    }
}

fn excerpt(text: &str) -> String {
    let trimmed = text.trim();
    if trimmed.chars().count() <= EXCERPT_CHARS {
        return trimmed.to_string();
    }
    let mut cut: String = trimmed.chars().take(EXCERPT_CHARS).collect();
    cut.push('…');
    cut
}
