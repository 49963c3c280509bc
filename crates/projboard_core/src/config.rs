//! Core configuration.
//!
//! # Responsibility
//! - Describe logging and project input settings in one serde-friendly shape.
//! - Normalize log level and directory values before they reach the backend.
//!
//! # Invariants
//! - Store construction itself takes no configuration.
//! - A normalized log directory is always absolute.

use crate::validation::{NumberRule, TextRule};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

pub const ENV_LOG_LEVEL: &str = "PROJBOARD_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "PROJBOARD_LOG_DIR";

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    UnsupportedLogLevel(String),
    EmptyLogDir,
    RelativeLogDir(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnsupportedLogLevel(value) => write!(
                f,
                "unsupported log level `{value}`; expected trace|debug|info|warn|error"
            ),
            Self::EmptyLogDir => write!(f, "log_dir cannot be empty"),
            Self::RelativeLogDir(value) => {
                write!(f, "log_dir must be an absolute path, got `{value}`")
            }
        }
    }
}

impl Error for ConfigError {}

/// File logging settings. `log_dir = None` leaves logging disabled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
    pub log_dir: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level().to_string(),
            log_dir: None,
        }
    }
}

impl LogConfig {
    pub fn new(level: impl Into<String>, log_dir: impl Into<PathBuf>) -> Self {
        Self {
            level: level.into(),
            log_dir: Some(log_dir.into()),
        }
    }
}

/// Limits applied to project form input before it reaches the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputRules {
    pub title: TextRule,
    pub description: TextRule,
    pub people: NumberRule,
}

impl Default for InputRules {
    fn default() -> Self {
        Self {
            title: TextRule {
                required: true,
                min_len: None,
                max_len: None,
            },
            description: TextRule {
                required: true,
                min_len: Some(5),
                max_len: None,
            },
            people: NumberRule {
                required: true,
                min: Some(1),
                max: Some(10),
            },
        }
    }
}

/// Aggregate configuration for one running board.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoreConfig {
    pub log: LogConfig,
    pub input: InputRules,
}

impl CoreConfig {
    /// Reads `PROJBOARD_LOG_LEVEL` and `PROJBOARD_LOG_DIR` from the process
    /// environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(level) = lookup(ENV_LOG_LEVEL) {
            config.log.level = normalize_level(&level)?.to_string();
        }
        if let Some(dir) = lookup(ENV_LOG_DIR) {
            config.log.log_dir = Some(normalize_log_dir(&dir)?);
        }
        Ok(config)
    }
}

/// Returns the default log level for current build mode.
///
/// - `debug` builds -> `debug`
/// - `release` builds -> `info`
pub fn default_log_level() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    }
}

pub(crate) fn normalize_level(level: &str) -> Result<&'static str, ConfigError> {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => Ok("trace"),
        "debug" => Ok("debug"),
        "info" => Ok("info"),
        "warn" | "warning" => Ok("warn"),
        "error" => Ok("error"),
        other => Err(ConfigError::UnsupportedLogLevel(other.to_string())),
    }
}

pub(crate) fn normalize_log_dir(log_dir: &str) -> Result<PathBuf, ConfigError> {
    let trimmed = log_dir.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::EmptyLogDir);
    }
    let path = Path::new(trimmed);
    if !path.is_absolute() {
        return Err(ConfigError::RelativeLogDir(trimmed.to_string()));
    }
    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::{
        normalize_level, normalize_log_dir, ConfigError, CoreConfig, InputRules, ENV_LOG_DIR,
        ENV_LOG_LEVEL,
    };

    #[test]
    fn normalize_level_accepts_known_values() {
        assert_eq!(
            normalize_level("INFO").expect("INFO should normalize"),
            "info"
        );
        assert_eq!(
            normalize_level(" warning ").expect("warning should normalize"),
            "warn"
        );
        assert!(matches!(
            normalize_level("loud"),
            Err(ConfigError::UnsupportedLogLevel(_))
        ));
    }

    #[test]
    fn normalize_log_dir_rejects_relative_and_blank_paths() {
        assert_eq!(
            normalize_log_dir("logs/dev").expect_err("relative paths must be rejected"),
            ConfigError::RelativeLogDir("logs/dev".to_string())
        );
        assert_eq!(
            normalize_log_dir("   ").expect_err("blank paths must be rejected"),
            ConfigError::EmptyLogDir
        );
    }

    #[test]
    fn from_lookup_reads_and_normalizes_values() {
        let dir = std::env::temp_dir();
        let dir_value = dir.to_str().expect("temp dir should be UTF-8").to_string();
        let config = CoreConfig::from_lookup(|key| match key {
            ENV_LOG_LEVEL => Some("WARNING".to_string()),
            ENV_LOG_DIR => Some(dir_value.clone()),
            _ => None,
        })
        .expect("valid env should load");

        assert_eq!(config.log.level, "warn");
        assert_eq!(config.log.log_dir, Some(dir));
        assert_eq!(config.input, InputRules::default());
    }

    #[test]
    fn from_lookup_without_values_keeps_logging_disabled() {
        let config = CoreConfig::from_lookup(|_| None).expect("empty env should load");
        assert_eq!(config.log.log_dir, None);
    }
}
