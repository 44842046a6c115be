//! Synthetic carrier events for the live exchange panel.
//!
//! A [`SignalGenerator`] draws events from a [`FeedProfile`]: a fixed set of
//! candidate pools, a weighted outcome split, a visible cap and a tick
//! period. Generation never fails because every pool is a non-empty
//! constant.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use chrono::{Local, NaiveTime};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ExchangeError;

const LANES: &[&str] = &["CHI→ATL", "DAL→PHX", "LAX→SEA", "MIA→NYC", "DEN→HOU", "ATL→CHI"];

const CARRIERS: &[&str] = &["SWIFT", "WERNER", "JB HUNT", "SCHNEIDER", "LANDSTAR", "XPO"];

const MC_NUMBERS: &[&str] = &[
    "MC-884213", "MC-102957", "MC-671140", "MC-330862", "MC-945017", "MC-218734",
];

/// Fixed timestamps for the records shown before the first tick.
const SEED_TIMES: &[&str] = &["10:42:01", "10:42:03", "10:42:05", "10:42:08"];

/// Kind of synthetic event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventKind {
    /// A load was matched with a verified carrier.
    Matched,
    /// A carrier identity passed verification.
    Verified,
    /// A carrier was blocked at verification.
    Blocked,
}

impl EventKind {
    /// Upper-case label shown in the feed.
    pub fn label(&self) -> &'static str {
        match self {
            EventKind::Matched => "MATCHED",
            EventKind::Verified => "VERIFIED",
            EventKind::Blocked => "BLOCKED",
        }
    }

    /// Text color class used when rendering the label.
    pub fn tone(&self) -> &'static str {
        match self {
            EventKind::Matched => "text-emerald-400",
            EventKind::Verified => "text-blue-400",
            EventKind::Blocked => "text-red-400",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One line item in the live feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedEvent {
    /// Monotonic identifier, unique per generator.
    pub id: u64,
    /// What happened.
    pub kind: EventKind,
    /// Lane code or carrier identifier.
    pub subject: String,
    /// Carrier name.
    pub carrier: String,
    /// Rate in dollars, only for the profile's priced kind.
    pub amount: Option<u32>,
    /// `HH:MM:SS` time of generation.
    pub timestamp: String,
}

/// Pools, weights and timing for one flavor of live feed.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedProfile {
    name: &'static str,
    primary: EventKind,
    secondary: EventKind,
    primary_weight: f64,
    subjects: &'static [&'static str],
    carriers: &'static [&'static str],
    priced: Option<EventKind>,
    rate_base: u32,
    rate_spread: u32,
    max_len: usize,
    period: Duration,
}

impl FeedProfile {
    /// Lane matching feed: 60% matched loads with a rate, 40% verifications.
    pub fn exchange() -> Self {
        Self {
            name: "exchange",
            primary: EventKind::Matched,
            secondary: EventKind::Verified,
            primary_weight: 0.6,
            subjects: LANES,
            carriers: CARRIERS,
            priced: Some(EventKind::Matched),
            rate_base: 1800,
            rate_spread: 1200,
            max_len: 5,
            period: Duration::from_millis(2500),
        }
    }

    /// Carrier screening feed: verifications and blocked carriers.
    pub fn sentinel() -> Self {
        Self {
            name: "sentinel",
            primary: EventKind::Verified,
            secondary: EventKind::Blocked,
            primary_weight: 0.7,
            subjects: MC_NUMBERS,
            carriers: CARRIERS,
            priced: None,
            rate_base: 0,
            rate_spread: 0,
            max_len: 6,
            period: Duration::from_millis(1500),
        }
    }

    /// Override the visible cap.
    pub fn with_max_len(mut self, max_len: usize) -> Result<Self, ExchangeError> {
        if max_len == 0 {
            return Err(ExchangeError::InvalidSetting {
                name: "max_len".to_string(),
                reason: "feed must show at least one event".to_string(),
            });
        }
        self.max_len = max_len;
        Ok(self)
    }

    /// Override the tick period.
    pub fn with_period(mut self, period: Duration) -> Result<Self, ExchangeError> {
        if period.is_zero() {
            return Err(ExchangeError::InvalidSetting {
                name: "period".to_string(),
                reason: "tick period must be positive".to_string(),
            });
        }
        self.period = period;
        Ok(self)
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Maximum number of visible events.
    pub fn max_len(&self) -> usize {
        self.max_len
    }

    /// Interval between ticks.
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Candidate subjects for this profile.
    pub fn subjects(&self) -> &'static [&'static str] {
        self.subjects
    }

    /// Candidate carriers for this profile.
    pub fn carriers(&self) -> &'static [&'static str] {
        self.carriers
    }

    /// Kinds this profile can produce.
    pub fn kinds(&self) -> [EventKind; 2] {
        [self.primary, self.secondary]
    }

    /// Range of rates for the priced kind, if any.
    pub fn rate_range(&self) -> Option<std::ops::Range<u32>> {
        self.priced
            .map(|_| self.rate_base..self.rate_base + self.rate_spread)
    }
}

impl Default for FeedProfile {
    fn default() -> Self {
        Self::exchange()
    }
}

impl FromStr for FeedProfile {
    type Err = ExchangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "exchange" => Ok(Self::exchange()),
            "sentinel" => Ok(Self::sentinel()),
            other => Err(ExchangeError::UnknownProfile(other.to_string())),
        }
    }
}

/// Draws synthetic feed events from a profile.
///
/// Generic over the random source so tests can use a seeded [`StdRng`].
///
/// # Example
///
/// ```rust
/// use exchange_core::{FeedProfile, SignalGenerator};
///
/// let mut generator = SignalGenerator::new(FeedProfile::exchange());
/// let event = generator.tick();
/// assert!(FeedProfile::exchange().subjects().contains(&event.subject.as_str()));
/// ```
#[derive(Debug)]
pub struct SignalGenerator<R = StdRng> {
    profile: FeedProfile,
    rng: R,
    next_id: u64,
}

impl SignalGenerator<StdRng> {
    /// Create a generator seeded from system entropy.
    pub fn new(profile: FeedProfile) -> Self {
        Self::with_rng(profile, StdRng::from_entropy())
    }
}

impl<R: Rng> SignalGenerator<R> {
    /// Create a generator with an explicit random source.
    pub fn with_rng(profile: FeedProfile, rng: R) -> Self {
        Self {
            profile,
            rng,
            next_id: 1,
        }
    }

    pub fn profile(&self) -> &FeedProfile {
        &self.profile
    }

    /// Produce the records shown before the first tick, newest first.
    pub fn seed_events(&mut self) -> Vec<FeedEvent> {
        let mut events: Vec<FeedEvent> = SEED_TIMES
            .iter()
            .map(|time| self.next_event(time.to_string()))
            .collect();
        events.reverse();
        events
    }

    /// Produce a new event stamped with the current local time.
    pub fn tick(&mut self) -> FeedEvent {
        let timestamp = Local::now().format("%H:%M:%S").to_string();
        self.next_event(timestamp)
    }

    /// Produce a new event stamped with the given time.
    pub fn tick_at(&mut self, at: NaiveTime) -> FeedEvent {
        self.next_event(at.format("%H:%M:%S").to_string())
    }

    fn next_event(&mut self, timestamp: String) -> FeedEvent {
        let profile = &self.profile;
        let kind = if self.rng.gen_bool(profile.primary_weight) {
            profile.primary
        } else {
            profile.secondary
        };

        let subject = pick(&mut self.rng, profile.subjects);
        let carrier = pick(&mut self.rng, profile.carriers);

        let amount = match profile.priced {
            Some(priced) if priced == kind => {
                Some(profile.rate_base + self.rng.gen_range(0..profile.rate_spread))
            }
            _ => None,
        };

        let id = self.next_id;
        self.next_id += 1;

        debug!(id, kind = %kind, subject, "Generated feed event");

        FeedEvent {
            id,
            kind,
            subject: subject.to_string(),
            carrier: carrier.to_string(),
            amount,
            timestamp,
        }
    }
}

fn pick<R: Rng>(rng: &mut R, pool: &'static [&'static str]) -> &'static str {
    pool[rng.gen_range(0..pool.len())]
}
