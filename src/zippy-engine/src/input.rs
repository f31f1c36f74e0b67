//! Input source opening.
//!
//! A source is either a file given on the command line or stdin. Stdin is
//! only accepted when it is a pipe or a redirected file; an interactive
//! terminal on stdin means the user forgot to provide input.

use std::fmt;
use std::fs::File;
use std::io::{self, IsTerminal, Read};
use std::path::{Path, PathBuf};

use crate::error::SourceError;

/// A closable byte source. Dropping it closes the underlying handle.
pub type ByteSource = Box<dyn Read + Send>;

/// Something that can (re)open a byte source.
pub trait SourceOpener: Send + fmt::Debug {
    /// Open a fresh handle positioned at the start of the input.
    fn open(&self) -> Result<ByteSource, SourceError>;
}

/// Where the input text comes from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputLocation {
    path: Option<PathBuf>,
}

impl InputLocation {
    /// Read from the given file.
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    /// Read from stdin.
    pub fn stdin() -> Self {
        Self { path: None }
    }

    /// File when a path is given, stdin otherwise.
    pub fn from_path(path: Option<PathBuf>) -> Self {
        Self { path }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Only files can be opened a second time; stdin is consumed once.
    pub fn is_reopenable(&self) -> bool {
        self.path.is_some()
    }
}

impl fmt::Display for InputLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.path {
            Some(path) => write!(f, "{}", path.display()),
            None => f.write_str("<stdin>"),
        }
    }
}

impl SourceOpener for InputLocation {
    fn open(&self) -> Result<ByteSource, SourceError> {
        match &self.path {
            Some(path) => {
                let file = File::open(path).map_err(|source| SourceError::Open {
                    path: path.clone(),
                    source,
                })?;
                tracing::debug!("Opened input file {}", path.display());
                Ok(Box::new(file))
            }
            None => {
                let stdin = io::stdin();
                if stdin.is_terminal() {
                    return Err(SourceError::NoInput);
                }
                tracing::debug!("Reading input from stdin");
                Ok(Box::new(stdin))
            }
        }
    }
}

/// Read an entire source into memory.
///
/// Invalid UTF-8 is replaced with U+FFFD rather than rejected.
pub fn read_all(opener: &dyn SourceOpener) -> Result<String, SourceError> {
    let mut source = opener.open()?;
    let mut data = Vec::new();
    source.read_to_end(&mut data).map_err(SourceError::Read)?;
    Ok(String::from_utf8_lossy(&data).into_owned())
}
