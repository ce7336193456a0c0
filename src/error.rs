use std::path::PathBuf;

/// Errors raised while validating a score typed by the user.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScoreError {
    #[error("invalid score '{input}': expected a whole number")]
    InvalidScore { input: String },
}

/// Errors raised when a round index falls outside the card sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RangeError {
    #[error("round index {index} out of range (0..{len})")]
    RoundOutOfRange { index: usize, len: usize },
}

/// Errors that can occur while saving or loading a finished game.
#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error("failed to read saved game {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse saved game {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_error_display() {
        let err = ScoreError::InvalidScore {
            input: "abc".to_string(),
        };
        assert_eq!(err.to_string(), "invalid score 'abc': expected a whole number");
    }

    #[test]
    fn test_range_error_display() {
        let err = RangeError::RoundOutOfRange { index: 13, len: 13 };
        assert_eq!(err.to_string(), "round index 13 out of range (0..13)");
    }

    #[test]
    fn test_persist_error_display() {
        let err = PersistError::Read {
            path: PathBuf::from("games/game_1.json"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        assert_eq!(
            err.to_string(),
            "failed to read saved game games/game_1.json: missing"
        );
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::Validation("input.max_digits must be in 1..=9".to_string());
        assert_eq!(
            err.to_string(),
            "config validation error: input.max_digits must be in 1..=9"
        );
    }
}
