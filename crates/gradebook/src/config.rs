//! Configuration management for gradebook.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::grade::GradeRange;

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default configuration directory name.
const CONFIG_DIR_NAME: &str = "gradebook";

/// Largest number of decimals accepted for averages.
const MAX_DECIMALS: usize = 10;

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `GRADEBOOK_`)
/// 2. TOML config file at `~/.config/gradebook/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Accepted grade range.
    pub grades: GradeRange,
    /// Display configuration.
    pub display: DisplayConfig,
    /// Terminal session configuration.
    pub session: SessionConfig,
}

/// How results are rendered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Number of decimals shown for averages.
    pub decimals: usize,
}

/// Terminal session configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Prompt printed before each command in interactive sessions.
    pub prompt: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self { decimals: 2 }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            prompt: "> ".to_string(),
        }
    }
}

impl Config {
    /// Load configuration, reading `config_path` or the default config file.
    ///
    /// Configuration is loaded in this order (later sources override earlier):
    /// 1. Default values
    /// 2. TOML config file (if exists)
    /// 3. Environment variables (prefixed with `GRADEBOOK_`)
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed("GRADEBOOK_").split("_"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(CONFIG_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        let GradeRange { min, max } = self.grades;
        if !min.is_finite() || !max.is_finite() {
            return Err(Error::ConfigValidation {
                message: format!("grade bounds must be finite (min {min}, max {max})"),
            });
        }

        if min > max {
            return Err(Error::ConfigValidation {
                message: format!("grades.min ({min}) cannot be greater than grades.max ({max})"),
            });
        }

        if self.display.decimals > MAX_DECIMALS {
            return Err(Error::ConfigValidation {
                message: format!(
                    "display.decimals ({}) cannot exceed {MAX_DECIMALS}",
                    self.display.decimals
                ),
            });
        }

        Ok(())
    }
}
