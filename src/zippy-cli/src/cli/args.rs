//! CLI argument structures and parsing.

use clap::Parser;
use std::path::PathBuf;

use super::styles::{AFTER_HELP, get_styles};

/// Log verbosity level for the log file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum LogLevel {
    /// Only log errors
    Error,
    /// Log warnings and errors
    Warn,
    /// Log informational messages, warnings, and errors (default)
    #[default]
    Info,
    /// Log debug messages and above
    Debug,
    /// Log everything including trace-level details
    Trace,
}

impl LogLevel {
    /// Convert to tracing filter string.
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }

    /// Parse from string (case-insensitive).
    pub fn from_str_loose(s: &str) -> Option<LogLevel> {
        match s.to_lowercase().as_str() {
            "error" => Some(LogLevel::Error),
            "warn" | "warning" => Some(LogLevel::Warn),
            "info" => Some(LogLevel::Info),
            "debug" => Some(LogLevel::Debug),
            "trace" => Some(LogLevel::Trace),
            _ => None,
        }
    }
}

/// zippy - read text one word at a time
///
/// Reads from --file or from piped stdin.
#[derive(Debug, Parser)]
#[command(name = "zippy")]
#[command(author, version)]
#[command(about = "Read text one word at a time in the terminal", long_about = None)]
#[command(styles = get_styles(), after_help = AFTER_HELP)]
pub struct Cli {
    /// Path to the input text (stdin when omitted)
    #[arg(short = 'f', long = "file", env = "ZIPPY_FILE", value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Starting words per minute (50-1200)
    #[arg(
        long = "start-wpm",
        visible_alias = "wpm",
        env = "ZIPPY_WPM",
        value_name = "WPM"
    )]
    pub start_wpm: Option<u32>,

    /// Stream tokens lazily without buffering; disables back/forward
    #[arg(long = "lazy", env = "ZIPPY_LAZY")]
    pub lazy: bool,

    /// Write logs to this file (logging is off otherwise)
    #[arg(
        long = "log-file",
        env = "ZIPPY_LOG_FILE",
        value_name = "PATH",
        help_heading = "Debugging"
    )]
    pub log_file: Option<PathBuf>,

    /// Log verbosity (error, warn, info, debug, trace)
    #[arg(
        long = "log-level",
        env = "ZIPPY_LOG_LEVEL",
        value_enum,
        help_heading = "Debugging"
    )]
    pub log_level: Option<LogLevel>,

    /// Config file (default: <config dir>/zippy/config.toml)
    #[arg(long = "config", env = "ZIPPY_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_flags() {
        let cli = Cli::try_parse_from([
            "zippy",
            "-f",
            "book.txt",
            "--start-wpm",
            "300",
            "--lazy",
            "--log-level",
            "debug",
        ])
        .unwrap();

        assert_eq!(cli.file, Some(PathBuf::from("book.txt")));
        assert_eq!(cli.start_wpm, Some(300));
        assert!(cli.lazy);
        assert_eq!(cli.log_level, Some(LogLevel::Debug));
    }

    #[test]
    fn test_wpm_alias() {
        let cli = Cli::try_parse_from(["zippy", "--wpm", "750"]).unwrap();
        assert_eq!(cli.start_wpm, Some(750));
    }

    #[test]
    fn test_rejects_bad_wpm() {
        assert!(Cli::try_parse_from(["zippy", "--wpm", "fast"]).is_err());
        assert!(Cli::try_parse_from(["zippy", "--wpm", "-5"]).is_err());
    }

    #[test]
    fn test_log_level_from_str_loose() {
        assert_eq!(LogLevel::from_str_loose("WARNING"), Some(LogLevel::Warn));
        assert_eq!(LogLevel::from_str_loose("Trace"), Some(LogLevel::Trace));
        assert_eq!(LogLevel::from_str_loose("loud"), None);
        assert_eq!(LogLevel::default().as_filter_str(), "info");
    }
}
