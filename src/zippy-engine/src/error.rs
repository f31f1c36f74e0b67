//! Error types for zippy-engine.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failure to open or read an input source.
#[derive(Debug, Error)]
pub enum SourceError {
    /// No file was given and stdin is an interactive terminal.
    #[error("no input provided")]
    NoInput,

    /// The input file could not be opened.
    #[error("failed to open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The source was opened but reading it to the end failed.
    #[error("failed to read input: {0}")]
    Read(#[source] io::Error),
}

/// Stream-level error, stored on the stream and exposed through `error()`.
#[derive(Debug, Error)]
pub enum StreamError {
    /// Opening (or reopening on restart) the input source failed.
    #[error(transparent)]
    Source(#[from] SourceError),

    /// A read failed in the middle of playback.
    #[error("read error: {0}")]
    Read(#[from] io::Error),

    /// The source was opened successfully but produced zero tokens.
    #[error("no words found in input")]
    NoWords,
}

impl StreamError {
    /// Whether the failure is about missing or unreadable input, in which
    /// case the caller should remind the user how to provide it.
    pub fn is_input_missing(&self) -> bool {
        matches!(self, StreamError::Source(_))
    }
}

/// Result type for stream construction.
pub type Result<T> = std::result::Result<T, StreamError>;
