//! zippy CLI library module.
//!
//! - `cli/` - argument parsing and startup
//! - `config` - TOML config file and settings layering
//! - `logging` - file logging setup

pub mod cli;
pub mod config;
pub mod logging;
