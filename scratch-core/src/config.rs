//! Game configuration (`configuration.toml`).

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;

/// Errors from loading the configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot read configuration {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("generate_amount must be at least 1")]
    NoAnswers,
}

/// Default configuration file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "configuration.toml";

/// Game constants from the `[const]` table.
#[derive(Debug, Clone, Deserialize)]
pub struct Constants {
    /// Number of titles hidden per game.
    pub generate_amount: usize,
    /// Opens available at the start.
    pub guess_chances: i64,
}

/// Folders from the `[path]` table.
#[derive(Debug, Clone, Deserialize)]
pub struct PathConfig {
    /// Folder holding one sub-folder per song library.
    pub dict_folder: PathBuf,
    /// Folder the progress files are written to.
    pub output_folder: PathBuf,
}

/// The whole configuration file.
#[derive(Debug, Clone, Deserialize)]
pub struct GameConfig {
    #[serde(rename = "const")]
    pub constants: Constants,
    pub path: PathConfig,
}

impl GameConfig {
    /// Parse configuration text. Paths are left as written.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file; relative folders resolve against its directory.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .await
            .map_err(|source| ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })?;

        let mut config = Self::from_toml_str(&text)?;
        if let Some(base) = path.parent() {
            config.resolve_paths(base);
        }
        log::info!(
            "Loaded configuration from {}: {} titles, {} chances",
            path.display(),
            config.constants.generate_amount,
            config.constants.guess_chances
        );
        Ok(config)
    }

    /// Make relative folders relative to `base`.
    pub fn resolve_paths(&mut self, base: &Path) {
        if self.path.dict_folder.is_relative() {
            self.path.dict_folder = base.join(&self.path.dict_folder);
        }
        if self.path.output_folder.is_relative() {
            self.path.output_folder = base.join(&self.path.output_folder);
        }
    }

    /// Override the number of hidden titles.
    pub fn with_answer_count(mut self, count: usize) -> Result<Self, ConfigError> {
        self.constants.generate_amount = count;
        self.validate()?;
        Ok(self)
    }

    /// Override the initial number of opens.
    pub fn with_chances(mut self, chances: i64) -> Self {
        self.constants.guess_chances = chances;
        self
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.constants.generate_amount == 0 {
            return Err(ConfigError::NoAnswers);
        }
        Ok(())
    }
}
