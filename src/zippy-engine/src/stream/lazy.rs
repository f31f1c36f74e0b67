//! Token-at-a-time stream.

use std::fmt;

use super::{FetchRequest, FetchResult, Generation, StreamMode, WordStream};
use crate::error::StreamError;
use crate::input::{ByteSource, SourceOpener};
use crate::tokenizer::Tokenizer;

/// Stream that reads one token per fetch.
///
/// The tokenizer (and with it the source handle) lives in one of three
/// places: here while idle, inside a [`FetchRequest`]/[`FetchResult`]
/// while a read is in flight, or nowhere once the source has been closed.
pub struct LazyStream {
    opener: Option<Box<dyn SourceOpener>>,
    tokenizer: Option<Tokenizer>,
    generation: Generation,
    in_flight: bool,
    exhausted: bool,
    error: Option<StreamError>,
    current: Option<String>,
    delivered: usize,
    total: Option<usize>,
}

impl LazyStream {
    /// Stream over a source that can only be read once (stdin).
    pub fn one_shot(source: ByteSource) -> Self {
        Self::with_opener(source, None)
    }

    /// Stream over a source that `opener` can reopen on restart.
    pub fn reopenable(source: ByteSource, opener: Box<dyn SourceOpener>) -> Self {
        Self::with_opener(source, Some(opener))
    }

    fn with_opener(source: ByteSource, opener: Option<Box<dyn SourceOpener>>) -> Self {
        Self {
            opener,
            tokenizer: Some(Tokenizer::new(source)),
            generation: 0,
            in_flight: false,
            exhausted: false,
            error: None,
            current: None,
            delivered: 0,
            total: None,
        }
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Whether this stream still holds an open source handle.
    pub fn has_open_source(&self) -> bool {
        self.tokenizer.is_some()
    }

    fn request_token(&mut self) -> Option<FetchRequest> {
        if self.in_flight || self.exhausted {
            return None;
        }
        let tokenizer = self.tokenizer.take()?;
        self.in_flight = true;
        Some(FetchRequest::new(self.generation, tokenizer))
    }

    fn close_source(&mut self) {
        if self.tokenizer.take().is_some() {
            tracing::debug!("Closed lazy input (generation {})", self.generation);
        }
    }

    fn finish(&mut self) {
        self.exhausted = true;
        self.total = Some(self.delivered);
        self.close_source();
    }

    fn reset_progress(&mut self) {
        self.in_flight = false;
        self.exhausted = false;
        self.error = None;
        self.current = None;
        self.delivered = 0;
        self.total = None;
    }
}

impl WordStream for LazyStream {
    fn start(&mut self) -> Option<FetchRequest> {
        self.request_token()
    }

    fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    fn advance(&mut self) -> Option<FetchRequest> {
        self.request_token()
    }

    fn retreat(&mut self) {
        tracing::warn!("retreat() called on a lazy stream, which cannot seek");
        debug_assert!(false, "lazy streams do not support retreat");
    }

    fn restart(&mut self) -> Option<FetchRequest> {
        if self.opener.is_none() {
            return None;
        }

        self.close_source();
        self.generation += 1;
        self.reset_progress();

        let reopened = match self.opener.as_ref() {
            Some(opener) => opener.open(),
            None => return None,
        };
        match reopened {
            Ok(source) => {
                tracing::debug!("Reopened lazy input (generation {})", self.generation);
                self.tokenizer = Some(Tokenizer::new(source));
                self.request_token()
            }
            Err(err) => {
                tracing::warn!("Failed to reopen input on restart: {}", err);
                self.error = Some(err.into());
                self.finish();
                None
            }
        }
    }

    fn handle_fetch(&mut self, mut result: FetchResult) {
        if result.generation() != self.generation {
            tracing::debug!(
                "Discarding stale fetch result (generation {}, current {})",
                result.generation(),
                self.generation
            );
            return;
        }

        self.in_flight = false;
        let tokenizer = result.take_tokenizer();

        if let Some(err) = result.error {
            tracing::warn!("Read error after {} words: {}", self.delivered, err);
            self.error = Some(StreamError::Read(err));
            self.finish();
            return;
        }

        if !result.word.is_empty() {
            self.delivered += 1;
            self.current = Some(result.word);
        }

        if result.exhausted {
            self.finish();
            return;
        }

        self.tokenizer = tokenizer;
    }

    fn seekable(&self) -> bool {
        false
    }

    fn restartable(&self) -> bool {
        self.opener.is_some()
    }

    fn can_advance(&self) -> bool {
        !self.exhausted
    }

    fn awaiting_fetch(&self) -> bool {
        self.in_flight
    }

    fn error(&self) -> Option<&StreamError> {
        self.error.as_ref()
    }

    fn position(&self) -> Option<usize> {
        if self.current.is_some() {
            self.delivered.checked_sub(1)
        } else {
            None
        }
    }

    fn total(&self) -> Option<usize> {
        self.total
    }

    fn mode(&self) -> StreamMode {
        StreamMode::Lazy
    }
}

impl fmt::Debug for LazyStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LazyStream")
            .field("generation", &self.generation)
            .field("in_flight", &self.in_flight)
            .field("exhausted", &self.exhausted)
            .field("error", &self.error)
            .field("current", &self.current)
            .field("delivered", &self.delivered)
            .field("total", &self.total)
            .finish_non_exhaustive()
    }
}
