//! Application settings, loaded from a JSON file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::board::Color;
use crate::bot::Personality;
use crate::constants::{DEFAULT_SIZE, MAX_SIZE, MIN_SIZE};
use crate::error::ConfigError;

/// Runtime settings for a play session, loadable from JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AppConfig {
    pub board_size: usize,
    pub personality: Personality,
    /// Color the bot takes in a `play` session
    pub bot_color: Color,
    /// RNG seed; `None` draws one from the OS
    pub seed: Option<u64>,
    /// JSON puzzle catalog replacing the builtin puzzles
    pub puzzle_file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            board_size: DEFAULT_SIZE,
            personality: Personality::default(),
            bot_color: Color::White,
            seed: None,
            puzzle_file: None,
        }
    }
}

impl AppConfig {
    /// Load configuration from a JSON file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_json_str(&content)
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a JSON file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            debug!(path = %path.display(), "config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_SIZE..=MAX_SIZE).contains(&self.board_size) {
            return Err(ConfigError::BoardSize {
                size: self.board_size,
                min: MIN_SIZE,
                max: MAX_SIZE,
            });
        }
        Ok(())
    }

    /// A seeded RNG, drawing a fresh seed when none is configured.
    pub fn rng(&self) -> fastrand::Rng {
        match self.seed {
            Some(seed) => fastrand::Rng::with_seed(seed),
            None => fastrand::Rng::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::default();
        config.validate().unwrap();
        assert_eq!(config.board_size, 9);
        assert_eq!(config.personality, Personality::Cautious);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = AppConfig::from_json_str(r#"{"boardSize": 13, "personality": "aggressive"}"#).unwrap();
        assert_eq!(config.board_size, 13);
        assert_eq!(config.personality, Personality::Aggressive);
        assert_eq!(config.bot_color, Color::White);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_invalid_size_rejected() {
        let err = AppConfig::from_json_str(r#"{"boardSize": 42}"#).unwrap_err();
        assert!(matches!(err, ConfigError::BoardSize { size: 42, .. }));
    }

    #[test]
    fn test_bad_json_rejected() {
        assert!(matches!(
            AppConfig::from_json_str("{boardSize"),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn test_seeded_rng_is_reproducible() {
        let config = AppConfig {
            seed: Some(99),
            ..AppConfig::default()
        };
        assert_eq!(config.rng().u64(..), config.rng().u64(..));
    }

    #[test]
    fn test_missing_file_falls_back() {
        let config = AppConfig::load_or_default(Path::new("/nonexistent/goban-dojo.json")).unwrap();
        assert_eq!(config, AppConfig::default());
    }
}
