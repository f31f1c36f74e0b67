//! Configuration file loading and settings resolution.
//!
//! Values are layered: command-line flags (and their `ZIPPY_*` environment
//! fallbacks) override the TOML config file, which overrides the defaults.
//!
//! ```toml
//! # ~/.config/zippy/config.toml
//! start_wpm = 400
//! lazy = false
//! log_file = "/tmp/zippy.log"
//! log_level = "debug"
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use serde::Deserialize;
use zippy_engine::{InputLocation, StreamMode};
use zippy_tui::player::{DEFAULT_WPM, clamp_wpm};

use crate::cli::{Cli, LogLevel};

/// Contents of the TOML config file. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub start_wpm: Option<u32>,
    pub lazy: Option<bool>,
    pub log_file: Option<PathBuf>,
    pub log_level: Option<String>,
}

/// `<config dir>/zippy/config.toml`, if the platform has a config dir.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("zippy").join("config.toml"))
}

/// Load the config file.
///
/// An explicitly given path must exist. The default path is optional; when
/// it is missing the defaults apply.
pub fn load(explicit: Option<&Path>) -> Result<FileConfig> {
    match explicit {
        Some(path) => read_config(path),
        None => match default_config_path() {
            Some(path) if path.exists() => read_config(&path),
            _ => Ok(FileConfig::default()),
        },
    }
}

fn read_config(path: &Path) -> Result<FileConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    toml::from_str(&content).with_context(|| format!("failed to parse config {}", path.display()))
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub input: InputLocation,
    pub mode: StreamMode,
    pub start_wpm: u32,
    pub log_file: Option<PathBuf>,
    pub log_level: LogLevel,
}

impl Settings {
    /// Merge command-line values over the config file and defaults.
    pub fn resolve(cli: &Cli, file: FileConfig) -> Result<Self> {
        let start_wpm = cli
            .start_wpm
            .or(file.start_wpm)
            .map_or(DEFAULT_WPM, clamp_wpm);

        let lazy = cli.lazy || file.lazy.unwrap_or(false);
        let mode = if lazy {
            StreamMode::Lazy
        } else {
            StreamMode::Eager
        };

        let log_level = match (cli.log_level, file.log_level.as_deref()) {
            (Some(level), _) => level,
            (None, Some(name)) => LogLevel::from_str_loose(name)
                .ok_or_else(|| anyhow!("invalid log_level in config: {name:?}"))?,
            (None, None) => LogLevel::default(),
        };

        Ok(Self {
            input: InputLocation::from_path(cli.file.clone()),
            mode,
            start_wpm,
            log_file: cli.log_file.clone().or(file.log_file),
            log_level,
        })
    }
}
