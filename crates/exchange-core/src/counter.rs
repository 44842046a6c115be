//! Count-up values for the hero statistics.

use std::time::Duration;

/// Default time for a counter to reach its end value.
pub const DEFAULT_COUNTER_DURATION: Duration = Duration::from_millis(2000);

/// A statistic that counts up from zero to `end` over `duration`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Counter {
    pub end: u64,
    pub suffix: &'static str,
    pub duration: Duration,
}

impl Counter {
    pub fn new(end: u64, suffix: &'static str) -> Self {
        Self {
            end,
            suffix,
            duration: DEFAULT_COUNTER_DURATION,
        }
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Value shown after `elapsed`, clamped at `end`.
    pub fn value_at(&self, elapsed: Duration) -> u64 {
        if self.duration.is_zero() {
            return self.end;
        }
        let progress = (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0);
        (progress * self.end as f64).floor() as u64
    }

    /// Grouped value plus suffix after `elapsed`.
    pub fn display_at(&self, elapsed: Duration) -> String {
        format!("{}{}", group_thousands(self.value_at(elapsed)), self.suffix)
    }

    /// Grouped end value plus suffix.
    pub fn display_final(&self) -> String {
        format!("{}{}", group_thousands(self.end), self.suffix)
    }
}

/// Format a number with comma thousands separators.
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
