//! Error types for exchange engine configuration.

use thiserror::Error;

/// Errors that can occur while configuring the exchange engines.
///
/// The engines themselves are total; only settings can be rejected.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExchangeError {
    /// A setting was outside its accepted range.
    #[error("Invalid setting '{name}': {reason}")]
    InvalidSetting { name: String, reason: String },

    /// The named feed profile does not exist.
    #[error("Unknown feed profile: {0}")]
    UnknownProfile(String),
}
