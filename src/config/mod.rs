//! Run configuration
//!
//! Settings come from three layers, highest priority first: command-line
//! flags, an optional TOML file, built-in defaults. The file is either the
//! one passed with `--config` or the first of [`CONFIG_CANDIDATES`] that
//! exists.

pub mod cli;

pub use cli::Cli;

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::monitor::AreaSource;

/// Files checked, in order, when no `--config` is given
pub const CONFIG_CANDIDATES: [&str; 2] = ["grid-stress.toml", "config/grid-stress.toml"];

/// Upper bound on cells in one run, across all monitors
///
/// Each cell gets its own worker thread and child process.
pub const MAX_CELLS: usize = 4096;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("grid must be at least 1x1, got {rows}x{cols}")]
    InvalidGrid { rows: u32, cols: u32 },
    #[error("a {rows}x{cols} grid exceeds the limit of {limit} cells")]
    TooManyCells { rows: u32, cols: u32, limit: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StressConfig {
    pub rows: u32,
    pub cols: u32,
    /// Companion tool that receives one launch command per cell
    pub executable: PathBuf,
    /// Seconds before the companion tool closes each window
    pub timeout_secs: u64,
    /// Pixels subtracted from the placeholder image height for browser chrome
    pub height_adjust: i32,
    pub text_color: String,
    pub placeholder_base: String,
    pub area: AreaSource,
    /// Randomize launch order across all monitors
    pub shuffle: bool,
    /// Fixed seed for colors and shuffle order
    pub seed: Option<u64>,
    /// Print commands instead of running them
    pub dry_run: bool,
    pub log_level: String,
}

impl Default for StressConfig {
    fn default() -> Self {
        Self {
            rows: 4,
            cols: 4,
            executable: PathBuf::from("debugchrome.exe"),
            timeout_secs: 30,
            height_adjust: 98,
            text_color: "FFF".to_string(),
            placeholder_base: "https://placehold.co".to_string(),
            area: AreaSource::WorkingArea,
            shuffle: false,
            seed: None,
            dry_run: false,
            log_level: "info".to_string(),
        }
    }
}

impl StressConfig {
    /// Loads a config file; missing keys fall back to defaults
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Builds the effective configuration for a command line
    pub fn resolve(cli: &Cli) -> Result<Self, ConfigError> {
        let path = cli.config.clone().or_else(find_config_file);
        let mut config = match path {
            Some(path) => Self::load(&path)?,
            None => Self::default(),
        };
        cli.apply(&mut config);
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rows == 0 || self.cols == 0 {
            return Err(ConfigError::InvalidGrid {
                rows: self.rows,
                cols: self.cols,
            });
        }
        match self.cells_per_monitor() {
            Some(cells) if cells <= MAX_CELLS => Ok(()),
            _ => Err(ConfigError::TooManyCells {
                rows: self.rows,
                cols: self.cols,
                limit: MAX_CELLS,
            }),
        }
    }

    /// Cells per monitor, `None` if the product does not fit in `usize`
    pub fn cells_per_monitor(&self) -> Option<usize> {
        (self.rows as usize).checked_mul(self.cols as usize)
    }
}

fn find_config_file() -> Option<PathBuf> {
    CONFIG_CANDIDATES
        .iter()
        .map(PathBuf::from)
        .find(|path| path.exists())
}
