use std::env;

use serde::{Deserialize, Serialize};

/// Environment variable consulted by [`Config::from_env`].
pub const LOG_LEVEL_ENV: &str = "MODELKIT_LOG_LEVEL";

/// Runtime configuration for the command-line front end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Default tracing level: "trace", "debug", "info", "warn" or "error"
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
        }
    }
}

impl Config {
    /// Defaults, overridden by `MODELKIT_LOG_LEVEL` when set and non-empty.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(level) = lookup(LOG_LEVEL_ENV) {
            let level = level.trim();
            if !level.is_empty() {
                config.log_level = level.to_lowercase();
            }
        }
        config
    }

    /// Apply a command-line override on top of the loaded values.
    pub fn with_log_level(mut self, level: Option<String>) -> Self {
        if let Some(level) = level {
            self.log_level = level;
        }
        self
    }
}
