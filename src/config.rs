use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::game::{WinRule, DEFAULT_MAX_DIGITS};

/// Score entry settings.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Longest score the entry line accepts.
    pub max_digits: usize,
}

impl Default for InputConfig {
    fn default() -> Self {
        InputConfig {
            max_digits: DEFAULT_MAX_DIGITS,
        }
    }
}

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub win_rule: WinRule,
}

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PlayersConfig {
    /// Shuffle seating before the first round.
    pub shuffle: bool,
}

/// Where finished games and the log end up.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PersistenceConfig {
    pub enabled: bool,
    pub save_dir: PathBuf,
    pub log_file: PathBuf,
}

impl Default for PersistenceConfig {
    fn default() -> Self {
        PersistenceConfig {
            enabled: true,
            save_dir: PathBuf::from("games"),
            log_file: PathBuf::from("ace2king.log"),
        }
    }
}

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub input: InputConfig,
    pub scoring: ScoringConfig,
    pub players: PlayersConfig,
    pub persistence: PersistenceConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        // nine digits always fit in an i32
        if !(1..=9).contains(&self.input.max_digits) {
            return Err(ConfigError::Validation(
                "input.max_digits must be in 1..=9".into(),
            ));
        }
        if self.persistence.enabled && self.persistence.save_dir.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "persistence.save_dir must not be empty".into(),
            ));
        }
        if self.persistence.log_file.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "persistence.log_file must not be empty".into(),
            ));
        }
        Ok(())
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(&AppConfig::default())
    }
}
