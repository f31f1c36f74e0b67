//! Asynchronous token fetch request/result pair.
//!
//! A [`FetchRequest`] takes ownership of the lazy stream's tokenizer for the
//! duration of the read and hands it back inside the [`FetchResult`]. While
//! a request is outstanding the stream has no tokenizer to issue a second
//! one with.

use std::fmt;
use std::io;

use crate::tokenizer::{NextToken, Tokenizer};

/// Restart generation a request was issued under.
pub type Generation = u64;

/// A pending request for the next token.
pub struct FetchRequest {
    generation: Generation,
    tokenizer: Tokenizer,
}

impl FetchRequest {
    pub(crate) fn new(generation: Generation, tokenizer: Tokenizer) -> Self {
        Self {
            generation,
            tokenizer,
        }
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Read the next token on the current thread.
    pub fn execute(mut self) -> FetchResult {
        match self.tokenizer.next_token() {
            Ok(NextToken { word, exhausted }) => FetchResult {
                generation: self.generation,
                word,
                exhausted,
                error: None,
                tokenizer: Some(self.tokenizer),
            },
            Err(err) => FetchResult {
                generation: self.generation,
                word: String::new(),
                exhausted: true,
                error: Some(err),
                tokenizer: Some(self.tokenizer),
            },
        }
    }

    /// Read the next token on tokio's blocking pool.
    pub async fn run(self) -> FetchResult {
        let generation = self.generation;
        match tokio::task::spawn_blocking(move || self.execute()).await {
            Ok(result) => result,
            Err(join_err) => {
                tracing::warn!("Token fetch task failed: {}", join_err);
                FetchResult {
                    generation,
                    word: String::new(),
                    exhausted: true,
                    error: Some(io::Error::other(join_err)),
                    tokenizer: None,
                }
            }
        }
    }
}

impl fmt::Debug for FetchRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FetchRequest")
            .field("generation", &self.generation)
            .finish_non_exhaustive()
    }
}

/// Outcome of a [`FetchRequest`].
pub struct FetchResult {
    generation: Generation,
    /// The token read, possibly empty.
    pub word: String,
    /// Whether the source has no more tokens.
    pub exhausted: bool,
    /// Read failure, terminal for the stream.
    pub error: Option<io::Error>,
    tokenizer: Option<Tokenizer>,
}

impl FetchResult {
    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub(crate) fn take_tokenizer(&mut self) -> Option<Tokenizer> {
        self.tokenizer.take()
    }
}

impl fmt::Debug for FetchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FetchResult")
            .field("generation", &self.generation)
            .field("word", &self.word)
            .field("exhausted", &self.exhausted)
            .field("error", &self.error)
            .finish_non_exhaustive()
    }
}
