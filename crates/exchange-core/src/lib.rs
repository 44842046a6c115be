//! Engines behind the TFX Exchange landing page.
//!
//! This crate holds everything on the page that is more than markup:
//!
//! - [`SignalGenerator`] draws synthetic carrier events from a [`FeedProfile`].
//! - [`FeedHub`] and [`FeedTask`] keep a capped, newest-first live feed moving
//!   on a fixed period, cancelled through a [`FeedHandle`].
//! - [`LexiconScorer`] classifies free text into a [`Tier`] with exactly three
//!   flags and a canned directive.
//! - [`AssessmentHistory`] keeps the last few assessments.
//! - [`ScenarioPicker`] returns a canned fraud narrative.
//! - [`Delay`] imitates processing latency before a result is shown.
//! - [`Counter`] computes the hero count-up values.
//!
//! # Example
//!
//! ```rust
//! use exchange_core::{LexiconScorer, Status, Tier};
//!
//! let scorer = LexiconScorer::new();
//! let result = scorer.analyze("URGENT wire transfer needed, contact via gmail, price is too good");
//!
//! assert_eq!(result.tier, Tier::Critical);
//! assert_eq!(result.status, Status::Compromised);
//! assert_eq!(result.flags.len(), 3);
//! ```

mod counter;
mod delay;
mod error;
mod feed;
mod history;
mod lexicon;
mod live;
mod scenario;

pub use counter::{group_thousands, Counter, DEFAULT_COUNTER_DURATION};
pub use delay::Delay;
pub use error::ExchangeError;
pub use feed::{EventKind, FeedEvent, FeedProfile, SignalGenerator};
pub use history::{AssessmentHistory, AssessmentRecord, DEFAULT_HISTORY_LIMIT};
pub use lexicon::{
    LexiconScorer, RuleGroup, Status, ThreatAssessment, Tier, CRITICAL_THRESHOLD, FILLER_FLAG,
    FLAG_COUNT, MEDIUM_THRESHOLD, RULE_GROUPS,
};
pub use live::{FeedHandle, FeedHub, FeedTask, LiveFeed};
pub use scenario::{ScenarioPicker, SCENARIOS};
