//! User configuration loaded from `config.toml`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::board::preset;
use crate::error::ConfigError;
use crate::records::DEFAULT_RETENTION_DAYS;

const APP_DIR: &str = "deckcalc";
const CONFIG_FILE: &str = "config.toml";

/// Settings for the estimator. Every field has a default.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory holding the saved quotes.
    pub data_dir: Option<PathBuf>,
    /// Directory quote cards are written to. Defaults to the working directory.
    pub export_dir: Option<PathBuf>,
    /// Unit price per board used when none is given.
    pub default_unit_price: f64,
    /// Catalogue entry used when no board is given.
    pub default_preset: String,
    /// Days a saved quote is kept.
    pub retention_days: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: None,
            export_dir: None,
            default_unit_price: 0.0,
            default_preset: "wpc-25x150x3000".to_string(),
            retention_days: DEFAULT_RETENTION_DAYS,
        }
    }
}

impl Config {
    /// Default location: `<config dir>/deckcalc/config.toml`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
    }

    /// Load from `path`, falling back to defaults when the file is absent.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No config file, using defaults");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        Self::parse(&content).map_err(|e| match e {
            ConfigError::Parse { source, .. } => ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })
    }

    /// Parse and validate TOML text.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: PathBuf::new(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !self.default_unit_price.is_finite() || self.default_unit_price < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "default_unit_price must be a non-negative number, got {}",
                self.default_unit_price
            )));
        }
        if self.retention_days == 0 {
            return Err(ConfigError::Invalid(
                "retention_days must be at least 1".to_string(),
            ));
        }
        preset(&self.default_preset).map_err(|e| ConfigError::Invalid(e.to_string()))?;
        Ok(())
    }

    /// Where saved quotes live.
    pub fn resolved_data_dir(&self) -> PathBuf {
        self.data_dir
            .clone()
            .or_else(|| dirs::data_dir().map(|dir| dir.join(APP_DIR)))
            .unwrap_or_else(|| PathBuf::from(".").join(APP_DIR))
    }

    /// Where quote cards are written.
    pub fn resolved_export_dir(&self) -> PathBuf {
        self.export_dir.clone().unwrap_or_else(|| PathBuf::from("."))
    }
}
