//! Startup and execution of the reader.

use std::process::ExitCode;
use std::time::Duration;

use anyhow::Result;
use clap::CommandFactory;
use zippy_engine::{StreamError, build_stream};
use zippy_tui::Player;

use super::args::Cli;
use crate::config::{self, Settings};
use crate::logging;

/// How long to wait for an in-flight read after the reader exits.
const SHUTDOWN_GRACE: Duration = Duration::from_millis(250);

/// Resolve settings, build the stream and run the reader.
///
/// Construction failures are reported on stderr and turned into a failing
/// exit code; errors after the terminal is taken over are returned.
pub fn run(cli: Cli) -> Result<ExitCode> {
    let file_config = config::load(cli.config.as_deref())?;
    let settings = Settings::resolve(&cli, file_config)?;

    let _log_guard = settings
        .log_file
        .as_deref()
        .map(|path| logging::init_file_logging(path, settings.log_level))
        .transpose()?;

    tracing::debug!("Resolved settings: {:?}", settings);

    let stream = match build_stream(settings.mode, settings.input.clone()) {
        Ok(stream) => stream,
        Err(err) => {
            tracing::warn!("Failed to build stream: {}", err);
            eprintln!("{}", startup_error_message(&err));
            if err.is_input_missing() {
                eprintln!("{}", Cli::command().render_usage());
            }
            return Ok(ExitCode::FAILURE);
        }
    };

    let player = Player::new(stream, settings.start_wpm);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    let result = runtime.block_on(zippy_tui::run(player));
    // A read blocked on a stalled pipe must not keep the process alive.
    runtime.shutdown_timeout(SHUTDOWN_GRACE);

    result.map(|()| ExitCode::SUCCESS)
}

/// One-line diagnostic for a stream that could not be built.
pub fn startup_error_message(err: &StreamError) -> String {
    match err {
        StreamError::Source(_) => "Provide input via --file or stdin.".to_string(),
        StreamError::NoWords => "No words found in input.".to_string(),
        StreamError::Read(e) => format!("Error: {e}"),
    }
}
