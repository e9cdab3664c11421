//! Server configuration from environment variables.

use log::warn;
use std::str::FromStr;
use std::time::Duration;

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Tournaments not accessed for this long are removed.
    pub inactivity_timeout: Duration,
    pub cleanup_interval: Duration,
    pub min_participants: usize,
    pub max_participants: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            inactivity_timeout: Duration::from_secs(12 * 3600),
            cleanup_interval: Duration::from_secs(30 * 60),
            min_participants: 4,
            max_participants: 32,
        }
    }
}

impl ServerConfig {
    /// Read HOST, PORT, INACTIVITY_TIMEOUT_HOURS, CLEANUP_INTERVAL_MINUTES, MIN_PARTICIPANTS and
    /// MAX_PARTICIPANTS from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as `from_env` with an arbitrary variable source. Unset or unparseable values keep the default.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let hours = scaled_secs(&lookup, "INACTIVITY_TIMEOUT_HOURS", 3600)
            .unwrap_or(defaults.inactivity_timeout);
        let minutes = scaled_secs(&lookup, "CLEANUP_INTERVAL_MINUTES", 60)
            .unwrap_or(defaults.cleanup_interval);
        let config = Self {
            host: lookup("HOST")
                .filter(|h| !h.trim().is_empty())
                .unwrap_or(defaults.host),
            port: parsed(&lookup, "PORT").unwrap_or(defaults.port),
            inactivity_timeout: hours,
            cleanup_interval: minutes,
            min_participants: parsed(&lookup, "MIN_PARTICIPANTS").unwrap_or(defaults.min_participants),
            max_participants: parsed(&lookup, "MAX_PARTICIPANTS").unwrap_or(defaults.max_participants),
        };
        if config.min_participants > config.max_participants {
            warn!(
                "MIN_PARTICIPANTS ({}) exceeds MAX_PARTICIPANTS ({}), using defaults",
                config.min_participants, config.max_participants
            );
            return Self {
                min_participants: defaults.min_participants,
                max_participants: defaults.max_participants,
                ..config
            };
        }
        config
    }
}

fn parsed<T, F>(lookup: &F, key: &str) -> Option<T>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(v) => Some(v),
        Err(_) => {
            warn!("Ignoring invalid {}={:?}", key, raw);
            None
        }
    }
}

/// Duration from a whole-unit variable; None when unset, unparseable or too large.
fn scaled_secs<F>(lookup: &F, key: &str, unit_secs: u64) -> Option<Duration>
where
    F: Fn(&str) -> Option<String>,
{
    let units: u64 = parsed(lookup, key)?;
    match units.checked_mul(unit_secs) {
        Some(secs) => Some(Duration::from_secs(secs)),
        None => {
            warn!("Ignoring invalid {}={:?}", key, units);
            None
        }
    }
}
