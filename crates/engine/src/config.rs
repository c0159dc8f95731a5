//! Environment-driven engine configuration.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::ConfigError;

pub const ENV_SEED: &str = "BLOCKFALL_SEED";
pub const ENV_MAX_PENDING: &str = "BLOCKFALL_MAX_PENDING";
pub const ENV_LOG_PATH: &str = "BLOCKFALL_LOG_PATH";
pub const ENV_FRAME_MS: &str = "BLOCKFALL_FRAME_MS";

pub const DEFAULT_MAX_PENDING: usize = 64;
pub const DEFAULT_FRAME_MS: u64 = 16;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Piece generator seed; `None` means pick one at startup
    pub seed: Option<u32>,
    /// Capacity of the command queue
    pub max_pending: usize,
    /// Where to write logs; logging is off when unset
    pub log_path: Option<PathBuf>,
    /// Input poll / frame budget
    pub frame_ms: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: None,
            max_pending: DEFAULT_MAX_PENDING,
            log_path: None,
            frame_ms: DEFAULT_FRAME_MS,
        }
    }
}

impl EngineConfig {
    /// Read the `BLOCKFALL_*` variables. Unset or blank variables keep their
    /// defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with a custom variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .and_then(|s| if s.is_empty() { None } else { Some(s) })
        };

        let mut config = Self::default();

        if let Some(raw) = get(ENV_SEED) {
            config.seed = Some(parse(ENV_SEED, &raw)?);
        }

        if let Some(raw) = get(ENV_MAX_PENDING) {
            let n: u64 = parse(ENV_MAX_PENDING, &raw)?;
            config.max_pending = at_least(ENV_MAX_PENDING, n, 1)? as usize;
        }

        config.log_path = get(ENV_LOG_PATH).map(PathBuf::from);

        if let Some(raw) = get(ENV_FRAME_MS) {
            let n: u64 = parse(ENV_FRAME_MS, &raw)?;
            config.frame_ms = at_least(ENV_FRAME_MS, n, 1)?;
        }

        Ok(config)
    }

    pub fn frame_duration(&self) -> Duration {
        Duration::from_millis(self.frame_ms)
    }

    /// The configured seed, or `fallback` when none was given.
    pub fn seed_or(&self, fallback: u32) -> u32 {
        self.seed.unwrap_or(fallback)
    }
}

fn parse<T: std::str::FromStr>(var: &'static str, raw: &str) -> Result<T, ConfigError> {
    raw.parse().map_err(|_| ConfigError::NotANumber {
        var,
        value: raw.to_string(),
    })
}

fn at_least(var: &'static str, value: u64, min: u64) -> Result<u64, ConfigError> {
    if value < min {
        return Err(ConfigError::TooSmall { var, value, min });
    }
    Ok(value)
}
