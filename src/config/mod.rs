//! Configuration loading and validation.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

use crate::engine::RematchPolicy;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Database paths.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the tournament SQLite database
    #[serde(default = "default_tournament_path")]
    pub tournament_path: PathBuf,

    /// Path to the forum SQLite database
    #[serde(default = "default_forum_path")]
    pub forum_path: PathBuf,
}

fn default_tournament_path() -> PathBuf {
    PathBuf::from("./data/tournament.db")
}

fn default_forum_path() -> PathBuf {
    PathBuf::from("./data/forum.db")
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            tournament_path: default_tournament_path(),
            forum_path: default_forum_path(),
        }
    }
}

/// Pairing configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PairingConfig {
    /// What to do when only rematches remain for a player
    #[serde(default)]
    pub rematch_policy: RematchPolicy,
}

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub database: DatabaseConfig,

    #[serde(default)]
    pub pairing: PairingConfig,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            database: DatabaseConfig::default(),
            pairing: PairingConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &PathBuf) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        const LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];
        if !LEVELS.contains(&self.log_level.as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "Unknown log level: {}",
                self.log_level
            )));
        }

        if self.database.tournament_path.as_os_str().is_empty() {
            return Err(ConfigError::ValidationError(
                "Tournament database path must not be empty".to_string(),
            ));
        }

        if self.database.forum_path.as_os_str().is_empty() {
            return Err(ConfigError::ValidationError(
                "Forum database path must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}
