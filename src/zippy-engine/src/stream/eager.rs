//! Fully buffered stream.

use super::{FetchRequest, FetchResult, StreamMode, WordStream};
use crate::error::StreamError;

/// Stream over a token list that is fixed at construction.
#[derive(Debug, Clone)]
pub struct EagerStream {
    words: Vec<String>,
    index: usize,
    restartable: bool,
}

impl EagerStream {
    pub fn new(words: Vec<String>, restartable: bool) -> Self {
        Self {
            words,
            index: 0,
            restartable,
        }
    }
}

impl WordStream for EagerStream {
    fn start(&mut self) -> Option<FetchRequest> {
        None
    }

    fn current(&self) -> Option<&str> {
        self.words.get(self.index).map(String::as_str)
    }

    fn advance(&mut self) -> Option<FetchRequest> {
        if self.index + 1 < self.words.len() {
            self.index += 1;
        }
        None
    }

    fn retreat(&mut self) {
        self.index = self.index.saturating_sub(1);
    }

    fn restart(&mut self) -> Option<FetchRequest> {
        if self.restartable {
            self.index = 0;
        }
        None
    }

    fn handle_fetch(&mut self, result: FetchResult) {
        tracing::debug!(
            "Eager stream ignoring fetch result from generation {}",
            result.generation()
        );
    }

    fn seekable(&self) -> bool {
        true
    }

    fn restartable(&self) -> bool {
        self.restartable
    }

    fn can_advance(&self) -> bool {
        self.index + 1 < self.words.len()
    }

    fn awaiting_fetch(&self) -> bool {
        false
    }

    fn error(&self) -> Option<&StreamError> {
        None
    }

    fn position(&self) -> Option<usize> {
        if self.words.is_empty() {
            None
        } else {
            Some(self.index)
        }
    }

    fn total(&self) -> Option<usize> {
        Some(self.words.len())
    }

    fn mode(&self) -> StreamMode {
        StreamMode::Eager
    }
}
