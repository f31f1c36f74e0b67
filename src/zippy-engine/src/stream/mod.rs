//! Word streams.
//!
//! Two delivery modes share one contract, [`WordStream`]:
//!
//! - [`EagerStream`] holds every token up front. Advancing is synchronous,
//!   seeking works in both directions and the total is always known.
//! - [`LazyStream`] reads one token per [`FetchRequest`]. It cannot seek
//!   and only learns its total once the source is exhausted.
//!
//! # Example
//!
//! ```rust,ignore
//! use zippy_engine::stream::{build_stream, StreamMode};
//! use zippy_engine::input::InputLocation;
//!
//! let mut stream = build_stream(StreamMode::Lazy, InputLocation::file("book.txt"))?;
//! if let Some(request) = stream.start() {
//!     let result = request.run().await;
//!     stream.handle_fetch(result);
//! }
//! assert!(stream.current().is_some());
//! ```

mod eager;
mod fetch;
mod lazy;


pub use eager::EagerStream;
pub use fetch::{FetchRequest, FetchResult, Generation};
pub use lazy::LazyStream;

use crate::error::{Result, StreamError};
use crate::input::{self, InputLocation, SourceOpener};
use crate::tokenizer::tokenize;

/// How words are delivered to the player.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StreamMode {
    /// Read and tokenize the whole input before playback.
    #[default]
    Eager,
    /// Read one token at a time while playing.
    Lazy,
}

/// What the active stream supports, used to pick control hints.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Capabilities {
    pub seekable: bool,
    pub restartable: bool,
    pub total_known: bool,
}

/// Contract shared by eager and lazy streams.
///
/// The stream never schedules anything itself. Operations that need a read
/// return a [`FetchRequest`]; the caller executes it and feeds the
/// [`FetchResult`] back through [`WordStream::handle_fetch`].
pub trait WordStream: Send {
    /// Request needed before the first word can be shown, if any.
    fn start(&mut self) -> Option<FetchRequest>;

    /// Word at the current position, `None` before the first delivery.
    fn current(&self) -> Option<&str>;

    /// Move one word forward.
    fn advance(&mut self) -> Option<FetchRequest>;

    /// Move one word back. Only valid when [`WordStream::seekable`] is true.
    fn retreat(&mut self);

    /// Return to the initial unplayed state. No-op unless restartable.
    fn restart(&mut self) -> Option<FetchRequest>;

    /// Apply a completed fetch.
    fn handle_fetch(&mut self, result: FetchResult);

    fn seekable(&self) -> bool;

    fn restartable(&self) -> bool;

    /// Whether another word may still follow the current one.
    fn can_advance(&self) -> bool;

    /// Whether a fetch has been issued and not yet handled.
    fn awaiting_fetch(&self) -> bool;

    fn error(&self) -> Option<&StreamError>;

    /// Zero-based index of the current word.
    fn position(&self) -> Option<usize>;

    /// Total word count, once known.
    fn total(&self) -> Option<usize>;

    fn mode(&self) -> StreamMode;

    fn capabilities(&self) -> Capabilities {
        Capabilities {
            seekable: self.seekable(),
            restartable: self.restartable(),
            total_known: self.total().is_some(),
        }
    }
}

/// Build the stream for a playback session.
///
/// Eager streams read the whole input now and fail with
/// [`StreamError::NoWords`] when it holds no tokens. Lazy streams only open
/// the source; an empty input shows up later as an exhausted stream.
pub fn build_stream(mode: StreamMode, location: InputLocation) -> Result<Box<dyn WordStream>> {
    match mode {
        StreamMode::Lazy => {
            let source = location.open()?;
            tracing::debug!("Built lazy stream over {}", location);
            let stream = if location.is_reopenable() {
                LazyStream::reopenable(source, Box::new(location))
            } else {
                LazyStream::one_shot(source)
            };
            Ok(Box::new(stream))
        }
        StreamMode::Eager => {
            let text = input::read_all(&location)?;
            let words = tokenize(&text);
            if words.is_empty() {
                return Err(StreamError::NoWords);
            }
            tracing::debug!("Built eager stream over {} ({} words)", location, words.len());
            Ok(Box::new(EagerStream::new(words, location.is_reopenable())))
        }
    }
}
