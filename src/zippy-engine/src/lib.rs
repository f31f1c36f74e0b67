//! # Zippy Engine
//!
//! Word delivery for the zippy reader.
//!
//! - **Input**: opening a file or piped stdin as a byte source.
//! - **Tokenizer**: pulling whitespace-delimited words from a byte source.
//! - **Streams**: the [`WordStream`] contract with an eager (fully buffered)
//!   and a lazy (one fetch per word) implementation.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   open()   ┌──────────────┐  next_token()  ┌───────────┐
//! │ InputLocation│ ─────────▶ │  ByteSource  │ ─────────────▶ │ Tokenizer │
//! └──────────────┘            └──────────────┘                └─────┬─────┘
//!                                                                   │
//!                         ┌─────────────────────────────────────────┘
//!                         ▼
//!   ┌─────────────┐   FetchRequest / FetchResult   ┌────────────┐
//!   │ LazyStream  │ ◀────────────────────────────▶ │  caller    │
//!   └─────────────┘                                │ (player)   │
//!   ┌─────────────┐   advance() / retreat()        │            │
//!   │ EagerStream │ ◀────────────────────────────▶ │            │
//!   └─────────────┘                                └────────────┘
//! ```

pub mod error;
pub mod input;
pub mod stream;
pub mod tokenizer;

pub use error::{SourceError, StreamError};
pub use input::{ByteSource, InputLocation, SourceOpener};
pub use stream::{
    Capabilities, EagerStream, FetchRequest, FetchResult, Generation, LazyStream, StreamMode,
    WordStream, build_stream,
};
pub use tokenizer::{NextToken, Tokenizer, tokenize};
