//! Study configuration
//!
//! Read from `config.toml` in the data directory. Every key is optional:
//! ```toml
//! stage_count = 4
//! peek_depth = 4
//! start_flipped = false
//! color = true
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::flashcards::{DEFAULT_PEEK_DEPTH, DEFAULT_STAGE_COUNT};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),

    #[error("Could not determine data directory")]
    DataDirNotFound,
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Stages a card climbs through before graduating
    pub stage_count: usize,
    /// Cards shown stacked behind the current one
    pub peek_depth: usize,
    /// Show the back face first
    pub start_flipped: bool,
    /// ANSI colors in terminal output
    pub color: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            stage_count: DEFAULT_STAGE_COUNT,
            peek_depth: DEFAULT_PEEK_DEPTH,
            start_flipped: false,
            color: true,
        }
    }
}

impl Config {
    pub const FILE_NAME: &'static str = "config.toml";

    /// Default data directory (e.g., ~/.local/share/flashcards)
    pub fn default_data_dir() -> Result<PathBuf> {
        dirs::data_local_dir()
            .map(|p| p.join("flashcards"))
            .ok_or(ConfigError::DataDirNotFound)
    }

    /// Load `config.toml` from `data_dir`, falling back to defaults when absent
    pub fn load(data_dir: &Path) -> Result<Self> {
        let path = data_dir.join(Self::FILE_NAME);
        if !path.exists() {
            log::debug!("No config at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)?;
        let config = Self::parse(&content)?;
        log::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    pub fn parse(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.stage_count == 0 {
            return Err(ConfigError::Invalid(
                "stage_count must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
