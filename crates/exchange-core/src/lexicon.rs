//! Keyword scoring of carrier communications.
//!
//! Each [`RuleGroup`] contributes its points and flag once when any of its
//! keywords occurs in the lowercased text. The total score maps to a
//! [`Tier`], and the report always carries exactly [`FLAG_COUNT`] flags.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Number of flags in every assessment.
pub const FLAG_COUNT: usize = 3;

/// Flag used to pad assessments with fewer matches than [`FLAG_COUNT`].
pub const FILLER_FLAG: &str = "No additional anomalies detected";

/// Minimum score for [`Tier::Critical`].
pub const CRITICAL_THRESHOLD: u32 = 6;

/// Minimum score for [`Tier::Medium`].
pub const MEDIUM_THRESHOLD: u32 = 4;

/// A fixed keyword set with its weight and report line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleGroup {
    pub name: &'static str,
    pub keywords: &'static [&'static str],
    pub points: u32,
    pub flag: &'static str,
}

impl RuleGroup {
    /// Whether any keyword occurs in already-lowercased text.
    pub fn matches(&self, lowered: &str) -> bool {
        self.keywords.iter().any(|keyword| lowered.contains(keyword))
    }
}

/// Rule groups in evaluation order. Flags are kept in this order.
pub const RULE_GROUPS: [RuleGroup; 6] = [
    RuleGroup {
        name: "urgency",
        keywords: &[
            "urgent",
            "immediately",
            "asap",
            "right away",
            "act now",
            "final notice",
            "expires today",
        ],
        points: 2,
        flag: "Urgency pressure language detected",
    },
    RuleGroup {
        name: "domain_mismatch",
        keywords: &[
            "gmail",
            "yahoo",
            "hotmail",
            "aol.com",
            "outlook.com",
            "protonmail",
            "icloud",
        ],
        points: 2,
        flag: "Free email domain does not match carrier of record",
    },
    RuleGroup {
        name: "price_anomaly",
        keywords: &[
            "too good",
            "above market",
            "double the rate",
            "premium rate",
            "guaranteed payout",
            "no questions asked",
        ],
        points: 3,
        flag: "Rate outside expected lane range",
    },
    RuleGroup {
        name: "generic_greeting",
        keywords: &[
            "dear sir",
            "dear customer",
            "dear valued",
            "to whom it may concern",
            "hello friend",
        ],
        points: 1,
        flag: "Generic greeting with no named contact",
    },
    RuleGroup {
        name: "advance_payment",
        keywords: &[
            "wire transfer",
            "advance payment",
            "upfront",
            "pay first",
            "deposit",
            "gift card",
            "western union",
            "zelle",
            "crypto",
        ],
        points: 3,
        flag: "Advance payment requested before pickup",
    },
    RuleGroup {
        name: "identity_spoof",
        keywords: &[
            "new bank",
            "updated banking",
            "changed our mc",
            "new mc number",
            "on behalf of",
            "dispatch service",
            "verify your login",
            "account suspended",
        ],
        points: 4,
        flag: "Possible carrier identity spoofing",
    },
];

/// Severity of an assessment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Tier {
    Low,
    Medium,
    Critical,
}

impl Tier {
    /// Map an accumulated score to a tier.
    pub fn from_score(score: u32) -> Self {
        if score >= CRITICAL_THRESHOLD {
            Tier::Critical
        } else if score >= MEDIUM_THRESHOLD {
            Tier::Medium
        } else {
            Tier::Low
        }
    }

    /// Status shown next to the tier.
    pub fn status(&self) -> Status {
        match self {
            Tier::Low => Status::Verified,
            Tier::Medium | Tier::Critical => Status::Compromised,
        }
    }

    /// Canned recommendation for the tier.
    pub fn directive(&self) -> &'static str {
        match self {
            Tier::Low => "No action required. Communication matches verified carrier patterns.",
            Tier::Medium => {
                "Hold for review. Confirm the carrier through a known-good phone number before booking."
            }
            Tier::Critical => {
                "Halt the tender. Do not release the load until carrier identity is re-verified on the exchange."
            }
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Tier::Low => "LOW",
            Tier::Medium => "MEDIUM",
            Tier::Critical => "CRITICAL",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Binary status derived from the tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    Verified,
    Compromised,
}

impl Status {
    pub fn label(&self) -> &'static str {
        match self {
            Status::Verified => "VERIFIED",
            Status::Compromised => "COMPROMISED",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Result of scoring one piece of text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreatAssessment {
    pub score: u32,
    pub tier: Tier,
    pub status: Status,
    /// Always exactly [`FLAG_COUNT`] entries.
    pub flags: Vec<String>,
    pub directive: String,
}

/// Scores text against a fixed set of rule groups.
#[derive(Debug, Clone)]
pub struct LexiconScorer {
    groups: &'static [RuleGroup],
}

impl Default for LexiconScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl LexiconScorer {
    /// Create a scorer over [`RULE_GROUPS`].
    pub fn new() -> Self {
        Self {
            groups: &RULE_GROUPS,
        }
    }

    pub fn groups(&self) -> &'static [RuleGroup] {
        self.groups
    }

    /// Classify text. Total over all inputs, including the empty string.
    pub fn analyze(&self, text: &str) -> ThreatAssessment {
        let lowered = text.to_lowercase();

        let mut score = 0;
        let mut flags = Vec::with_capacity(self.groups.len());
        for group in self.groups.iter().filter(|g| g.matches(&lowered)) {
            score += group.points;
            flags.push(group.flag.to_string());
        }

        while flags.len() < FLAG_COUNT {
            flags.push(FILLER_FLAG.to_string());
        }
        flags.truncate(FLAG_COUNT);

        let tier = Tier::from_score(score);
        debug!(score, tier = %tier, "Scored text");

        ThreatAssessment {
            score,
            tier,
            status: tier.status(),
            flags,
            directive: tier.directive().to_string(),
        }
    }
}
