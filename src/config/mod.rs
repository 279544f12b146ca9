//! Configuration loading and validation.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::calculate::indicator::DEFAULT_SPLASH_MIN_GRADE;
use crate::models::Grade;

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

/// Archetype scoring parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Non-land cards counted toward an archetype's score
    #[serde(default = "default_deck_size")]
    pub deck_size: usize,

    /// Creatures an archetype wants before it stops being penalized
    #[serde(default = "default_creature_target")]
    pub creature_target: u32,

    /// Points lost per creature short of the target
    #[serde(default = "default_creature_penalty")]
    pub creature_penalty_per_missing: u32,

    /// Lowest grade considered for a splash
    #[serde(default = "default_splash_min_grade")]
    pub splash_min_grade: Grade,
}

fn default_deck_size() -> usize {
    23
}

fn default_creature_target() -> u32 {
    13
}

fn default_creature_penalty() -> u32 {
    10
}

fn default_splash_min_grade() -> Grade {
    DEFAULT_SPLASH_MIN_GRADE
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            deck_size: default_deck_size(),
            creature_target: default_creature_target(),
            creature_penalty_per_missing: default_creature_penalty(),
            splash_min_grade: default_splash_min_grade(),
        }
    }
}

/// Server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_cors_origin")]
    pub cors_origin: String,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_cors_origin() -> String {
    "*".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origin: default_cors_origin(),
        }
    }
}

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Rankings JSON file; the embedded table is used when unset
    #[serde(default)]
    pub rankings_path: Option<PathBuf>,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub scoring: ScoringConfig,

    #[serde(default)]
    pub server: ServerConfig,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            rankings_path: None,
            log_level: default_log_level(),
            scoring: ScoringConfig::default(),
            server: ServerConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load `path` if it exists, defaults otherwise.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.scoring.deck_size == 0 {
            return Err(ConfigError::ValidationError(
                "Deck size must be greater than 0".to_string(),
            ));
        }

        if self.server.port == 0 {
            return Err(ConfigError::ValidationError(
                "Server port must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert_eq!(config.rankings_path, None);
        assert_eq!(config.log_level, "info");
        assert_eq!(config.scoring.deck_size, 23);
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn test_scoring_config_default() {
        let scoring = ScoringConfig::default();

        assert_eq!(scoring.deck_size, 23);
        assert_eq!(scoring.creature_target, 13);
        assert_eq!(scoring.creature_penalty_per_missing, 10);
        assert_eq!(scoring.splash_min_grade, Grade::BMinus);
    }

    #[test]
    fn test_config_validation_ok() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_bad_deck_size() {
        let mut config = AppConfig::default();
        config.scoring.deck_size = 0;

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_bad_port() {
        let mut config = AppConfig::default();
        config.server.port = 0;

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            rankings_path = "rankings/fin.json"

            [scoring]
            splash_min_grade = "B"
            "#,
        )
        .unwrap();

        assert_eq!(config.rankings_path, Some(PathBuf::from("rankings/fin.json")));
        assert_eq!(config.scoring.splash_min_grade, Grade::B);
        assert_eq!(config.scoring.deck_size, 23);
        assert_eq!(config.server.host, "127.0.0.1");
    }

    #[test]
    fn test_from_file_validates() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[server]\nport = 0").unwrap();

        let err = AppConfig::from_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = AppConfig::load_or_default(Path::new("/no/such/config.toml")).unwrap();
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let toml_str = toml::to_string(&config).unwrap();

        // Should be parseable
        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(config.scoring, parsed.scoring);
    }
}
