//! Configuration loaded from environment variables.

use std::env;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use exchange_core::{ExchangeError, FeedProfile, DEFAULT_HISTORY_LIMIT};

/// Where the "Request Demo" links point.
pub const DEFAULT_DEMO_URL: &str = "https://highway.com/products/trusted-freight-exchange#TFX-Demo";

/// Landing web server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address.
    pub addr: SocketAddr,
    /// Live feed profile, with any cap/period overrides applied.
    pub profile: FeedProfile,
    /// Simulated analysis latency.
    pub analyze_delay: Duration,
    /// Simulated scenario generation latency.
    pub scenario_delay: Duration,
    /// Number of assessments kept for the analyzer panel.
    pub history_limit: usize,
    /// External demo request URL.
    pub demo_url: String,
    /// Directory served under `/static`.
    pub static_dir: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Description | Default |
    /// |----------|-------------|---------|
    /// | `LANDING_ADDR` | Server bind address | `127.0.0.1:8790` |
    /// | `FEED_PROFILE` | `exchange` or `sentinel` | `exchange` |
    /// | `FEED_MAX_LEN` | Visible feed events | profile default |
    /// | `FEED_PERIOD_MS` | Feed tick period | profile default |
    /// | `ANALYZE_DELAY_MS` | Simulated analysis delay | `1200` |
    /// | `SCENARIO_DELAY_MS` | Simulated scenario delay | `800` |
    /// | `HISTORY_LIMIT` | Assessments kept, at least 1 | `5` |
    /// | `DEMO_URL` | Demo request link | highway.com TFX demo |
    /// | `STATIC_DIR` | Static asset directory | `static` |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let addr = lookup("LANDING_ADDR")
            .unwrap_or_else(|| "127.0.0.1:8790".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidAddr)?;

        let mut profile: FeedProfile = match lookup("FEED_PROFILE") {
            Some(name) => name.parse()?,
            None => FeedProfile::exchange(),
        };

        if let Some(max_len) = parse_number::<usize, _>(&lookup, "FEED_MAX_LEN")? {
            profile = profile.with_max_len(max_len)?;
        }

        if let Some(period_ms) = parse_number::<u64, _>(&lookup, "FEED_PERIOD_MS")? {
            profile = profile.with_period(Duration::from_millis(period_ms))?;
        }

        let analyze_delay = parse_number::<u64, _>(&lookup, "ANALYZE_DELAY_MS")?.unwrap_or(1200);
        let scenario_delay = parse_number::<u64, _>(&lookup, "SCENARIO_DELAY_MS")?.unwrap_or(800);

        let history_limit =
            parse_number::<usize, _>(&lookup, "HISTORY_LIMIT")?.unwrap_or(DEFAULT_HISTORY_LIMIT);
        if history_limit == 0 {
            return Err(ExchangeError::InvalidSetting {
                name: "history_limit".to_string(),
                reason: "must keep at least one assessment".to_string(),
            }
            .into());
        }

        let demo_url = lookup("DEMO_URL").unwrap_or_else(|| DEFAULT_DEMO_URL.to_string());

        let static_dir = lookup("STATIC_DIR").unwrap_or_else(|| "static".to_string());

        Ok(Self {
            addr,
            profile,
            analyze_delay: Duration::from_millis(analyze_delay),
            scenario_delay: Duration::from_millis(scenario_delay),
            history_limit,
            demo_url,
            static_dir,
        })
    }
}

fn parse_number<T, L>(lookup: &L, key: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    L: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidNumber(key)),
        None => Ok(None),
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid LANDING_ADDR format")]
    InvalidAddr,

    #[error("{0} must be a non-negative integer")]
    InvalidNumber(&'static str),

    #[error(transparent)]
    Feed(#[from] ExchangeError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.addr, "127.0.0.1:8790".parse::<SocketAddr>().unwrap());
        assert_eq!(config.profile.name(), "exchange");
        assert_eq!(config.profile.max_len(), 5);
        assert_eq!(config.analyze_delay, Duration::from_millis(1200));
        assert_eq!(config.history_limit, 5);
        assert_eq!(config.demo_url, DEFAULT_DEMO_URL);
    }

    #[test]
    fn test_profile_overrides() {
        let config = config_from(&[
            ("FEED_PROFILE", "sentinel"),
            ("FEED_MAX_LEN", "4"),
            ("FEED_PERIOD_MS", "2000"),
        ])
        .unwrap();
        assert_eq!(config.profile.name(), "sentinel");
        assert_eq!(config.profile.max_len(), 4);
        assert_eq!(config.profile.period(), Duration::from_millis(2000));
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            config_from(&[("LANDING_ADDR", "nowhere")]),
            Err(ConfigError::InvalidAddr)
        ));
        assert!(matches!(
            config_from(&[("ANALYZE_DELAY_MS", "soon")]),
            Err(ConfigError::InvalidNumber("ANALYZE_DELAY_MS"))
        ));
        assert!(matches!(
            config_from(&[("FEED_PROFILE", "ticker")]),
            Err(ConfigError::Feed(ExchangeError::UnknownProfile(_)))
        ));
        assert!(matches!(
            config_from(&[("FEED_MAX_LEN", "0")]),
            Err(ConfigError::Feed(ExchangeError::InvalidSetting { .. }))
        ));
        assert!(matches!(
            config_from(&[("HISTORY_LIMIT", "0")]),
            Err(ConfigError::Feed(ExchangeError::InvalidSetting { ref name, .. })) if name == "history_limit"
        ));
        assert_eq!(
            config_from(&[("HISTORY_LIMIT", "1")]).unwrap().history_limit,
            1
        );
    }
}
