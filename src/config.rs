//! Configuration types.

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;

use crate::error::ConfigError;

/// Access code accepted by the gate when none is configured.
pub const DEFAULT_ACCESS_CODE: &str = "RC-ONBOARD-2024";

/// Simulated latency of the access-code check.
pub const TOKEN_CHECK_LATENCY: Duration = Duration::from_millis(1000);

/// Pause between the last Legal & Commercial step and unlocking the Lab track.
pub const TRACK_ADVANCE_DELAY: Duration = Duration::from_millis(1000);

/// Onboarding wizard configuration.
#[derive(Debug, Clone)]
pub struct OnboardConfig {
    /// Shared access code. Compared case-insensitively.
    pub access_code: SecretString,
    /// Path of the libSQL database backing the key-value store.
    pub db_path: PathBuf,
    /// Whether to insert the fixed delays that stand in for network calls.
    pub simulate_latency: bool,
}

impl Default for OnboardConfig {
    fn default() -> Self {
        Self {
            access_code: SecretString::from(DEFAULT_ACCESS_CODE),
            db_path: PathBuf::from("./data/client-onboard.db"),
            simulate_latency: true,
        }
    }
}

impl OnboardConfig {
    /// Load configuration from `ONBOARD_*` environment variables, falling back
    /// to defaults for anything unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let access_code = std::env::var("ONBOARD_ACCESS_CODE")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .map(SecretString::from)
            .unwrap_or(defaults.access_code);

        let db_path = std::env::var("ONBOARD_DB_PATH")
            .map(PathBuf::from)
            .unwrap_or(defaults.db_path);

        let simulate_latency = match std::env::var("ONBOARD_SIMULATE_LATENCY") {
            Ok(raw) => parse_bool("ONBOARD_SIMULATE_LATENCY", &raw)?,
            Err(_) => defaults.simulate_latency,
        };

        Ok(Self {
            access_code,
            db_path,
            simulate_latency,
        })
    }

    /// Configuration for tests and demos: default code, no artificial delays.
    pub fn instant() -> Self {
        Self {
            simulate_latency: false,
            ..Self::default()
        }
    }

    /// `latency` when simulation is on, zero otherwise.
    pub fn latency(&self, latency: Duration) -> Duration {
        if self.simulate_latency {
            latency
        } else {
            Duration::ZERO
        }
    }
}

fn parse_bool(key: &str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            message: format!("expected a boolean, got {other:?}"),
        }),
    }
}

#[cfg(test)]
mod tests {
    use secrecy::ExposeSecret;

    use super::*;

    #[test]
    fn defaults() {
        let config = OnboardConfig::default();
        assert_eq!(config.access_code.expose_secret(), DEFAULT_ACCESS_CODE);
        assert!(config.simulate_latency);
        assert_eq!(config.latency(TOKEN_CHECK_LATENCY), TOKEN_CHECK_LATENCY);
    }

    #[test]
    fn instant_config_has_no_latency() {
        let config = OnboardConfig::instant();
        assert_eq!(config.latency(TRACK_ADVANCE_DELAY), Duration::ZERO);
    }

    #[test]
    fn parse_bool_variants() {
        assert!(parse_bool("K", "TRUE").unwrap());
        assert!(parse_bool("K", " 1 ").unwrap());
        assert!(!parse_bool("K", "off").unwrap());
        let err = parse_bool("K", "maybe").unwrap_err();
        assert!(err.to_string().contains("maybe"));
    }
}
