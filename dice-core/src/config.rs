//! Roller configuration.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::dice::DieType;

/// Delay between computing a roll and publishing it (the rolling animation).
pub const DEFAULT_ROLL_DELAY: Duration = Duration::from_millis(2000);

pub const ENV_ROLL_DELAY_MS: &str = "DICE_ROLL_DELAY_MS";
pub const ENV_SEED: &str = "DICE_SEED";
pub const ENV_DEFAULT_DIE: &str = "DICE_DEFAULT_DIE";
pub const ENV_LOG_FILE: &str = "DICE_LOG_FILE";

/// Errors from reading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
}

/// Configuration for a roll session and its front-end.
#[derive(Debug, Clone, PartialEq)]
pub struct RollerConfig {
    /// How long a roll stays "rolling" before it is published.
    pub roll_delay: Duration,

    /// Fixed RNG seed; `None` seeds from OS entropy.
    pub seed: Option<u64>,

    /// Die selected when the controls start up or reset.
    pub default_die: DieType,

    /// Where to write logs in interactive mode.
    pub log_file: Option<PathBuf>,
}

impl Default for RollerConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl RollerConfig {
    pub fn new() -> Self {
        Self {
            roll_delay: DEFAULT_ROLL_DELAY,
            seed: None,
            default_die: DieType::D20,
            log_file: None,
        }
    }

    /// Read overrides from the process environment.
    ///
    /// Call `dotenvy::dotenv()` first if a `.env` file should apply.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read overrides through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::new();

        if let Some(value) = lookup(ENV_ROLL_DELAY_MS) {
            let ms: u64 = value.trim().parse().map_err(|_| ConfigError::InvalidValue {
                key: ENV_ROLL_DELAY_MS,
                value: value.clone(),
            })?;
            config.roll_delay = Duration::from_millis(ms);
        }

        if let Some(value) = lookup(ENV_SEED) {
            let seed: u64 = value.trim().parse().map_err(|_| ConfigError::InvalidValue {
                key: ENV_SEED,
                value: value.clone(),
            })?;
            config.seed = Some(seed);
        }

        if let Some(value) = lookup(ENV_DEFAULT_DIE) {
            config.default_die = value.parse().map_err(|_| ConfigError::InvalidValue {
                key: ENV_DEFAULT_DIE,
                value: value.clone(),
            })?;
        }

        if let Some(value) = lookup(ENV_LOG_FILE) {
            if !value.trim().is_empty() {
                config.log_file = Some(PathBuf::from(value));
            }
        }

        Ok(config)
    }

    pub fn with_roll_delay(mut self, delay: Duration) -> Self {
        self.roll_delay = delay;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_default_die(mut self, die: DieType) -> Self {
        self.default_die = die;
        self
    }

    pub fn with_log_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_file = Some(path.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = RollerConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, RollerConfig::new());
        assert_eq!(config.roll_delay, Duration::from_millis(2000));
        assert_eq!(config.default_die, DieType::D20);
    }

    #[test]
    fn test_env_overrides() {
        let config = RollerConfig::from_lookup(lookup(&[
            (ENV_ROLL_DELAY_MS, "250"),
            (ENV_SEED, "42"),
            (ENV_DEFAULT_DIE, "d6"),
            (ENV_LOG_FILE, "/tmp/dice.log"),
        ]))
        .unwrap();
        assert_eq!(config.roll_delay, Duration::from_millis(250));
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.default_die, DieType::D6);
        assert_eq!(config.log_file, Some(PathBuf::from("/tmp/dice.log")));
    }

    #[test]
    fn test_invalid_values() {
        let err = RollerConfig::from_lookup(lookup(&[(ENV_DEFAULT_DIE, "d7")])).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue { key: ENV_DEFAULT_DIE, .. }
        ));
        assert!(RollerConfig::from_lookup(lookup(&[(ENV_ROLL_DELAY_MS, "soon")])).is_err());
    }

    #[test]
    fn test_builder() {
        let config = RollerConfig::new()
            .with_roll_delay(Duration::ZERO)
            .with_seed(7)
            .with_default_die(DieType::D100)
            .with_log_file("dice.log");
        assert_eq!(config.roll_delay, Duration::ZERO);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.default_die, DieType::D100);
        assert_eq!(config.log_file, Some(PathBuf::from("dice.log")));
    }
}
