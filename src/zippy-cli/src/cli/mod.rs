//! CLI argument parsing and startup.
//!
//! - `args` - Command-line argument structures
//! - `styles` - ANSI styling for help output
//! - `handlers` - Settings resolution, stream construction and run

pub mod args;
pub mod handlers;
pub mod styles;

pub use args::{Cli, LogLevel};
pub use handlers::{run, startup_error_message};
pub use styles::{AFTER_HELP, get_styles};
