//! Whitespace tokenizer.
//!
//! [`Tokenizer`] pulls one token at a time from a byte source, decoding
//! UTF-8 as it goes. [`tokenize`] splits text that is already in memory.
//! Both agree on what a token is: a maximal run of non-whitespace
//! characters, punctuation included. Invalid UTF-8 is replaced the same way
//! on both paths, so a file yields the same words whether it is streamed or
//! read up front.

use std::fmt;
use std::io::{self, BufRead, BufReader, ErrorKind};

use encoding_rs::{CoderResult, Decoder, UTF_8};

use crate::input::ByteSource;

/// One step of the tokenizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NextToken {
    /// The token, empty when the source ended without a pending word.
    pub word: String,
    /// True when the source is exhausted. May accompany a non-empty word.
    pub exhausted: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum TokenizerState {
    Reading,
    Exhausted,
    Failed { kind: ErrorKind, message: String },
}

/// Pulls whitespace-delimited tokens from a byte source on demand.
pub struct Tokenizer {
    reader: BufReader<ByteSource>,
    decoder: Decoder,
    /// Text decoded from the last chunk, consumed from `cursor` on.
    decoded: String,
    cursor: usize,
    /// The decoder has seen the end of the input.
    flushed: bool,
    buf: String,
    state: TokenizerState,
}

impl Tokenizer {
    pub fn new(source: ByteSource) -> Self {
        Self {
            reader: BufReader::new(source),
            // A leading BOM stays in the text, as it does for in-memory input.
            decoder: UTF_8.new_decoder_without_bom_handling(),
            decoded: String::new(),
            cursor: 0,
            flushed: false,
            buf: String::new(),
            state: TokenizerState::Reading,
        }
    }

    pub fn is_exhausted(&self) -> bool {
        self.state == TokenizerState::Exhausted
    }

    /// Read until the next token boundary.
    ///
    /// A trailing token without following whitespace is returned together
    /// with `exhausted = true`. Once exhausted every call returns an empty
    /// exhausted token; once failed every call returns an error of the same
    /// kind.
    pub fn next_token(&mut self) -> io::Result<NextToken> {
        match &self.state {
            TokenizerState::Reading => {}
            TokenizerState::Exhausted => {
                return Ok(NextToken {
                    word: String::new(),
                    exhausted: true,
                });
            }
            TokenizerState::Failed { kind, message } => {
                return Err(io::Error::new(*kind, message.clone()));
            }
        }

        loop {
            let ch = match self.read_char() {
                Ok(Some(ch)) => ch,
                Ok(None) => {
                    self.state = TokenizerState::Exhausted;
                    return Ok(NextToken {
                        word: std::mem::take(&mut self.buf),
                        exhausted: true,
                    });
                }
                Err(err) => {
                    self.buf.clear();
                    self.state = TokenizerState::Failed {
                        kind: err.kind(),
                        message: err.to_string(),
                    };
                    return Err(err);
                }
            };

            if ch.is_whitespace() {
                if !self.buf.is_empty() {
                    return Ok(NextToken {
                        word: std::mem::take(&mut self.buf),
                        exhausted: false,
                    });
                }
                continue;
            }
            self.buf.push(ch);
        }
    }

    /// Next decoded character, `None` at the end of the input.
    ///
    /// Malformed UTF-8 decodes to U+FFFD, one per maximal invalid
    /// subsequence, the same as [`String::from_utf8_lossy`]. Sequences split
    /// across reads are reassembled by the decoder.
    fn read_char(&mut self) -> io::Result<Option<char>> {
        loop {
            if let Some(ch) = self.decoded[self.cursor..].chars().next() {
                self.cursor += ch.len_utf8();
                return Ok(Some(ch));
            }
            if self.flushed {
                return Ok(None);
            }

            self.decoded.clear();
            self.cursor = 0;
            let available = loop {
                match self.reader.fill_buf() {
                    Ok(buf) => break buf.len(),
                    Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                    Err(err) => return Err(err),
                }
            };
            let last = available == 0;
            decode_into(
                &mut self.decoder,
                &mut self.decoded,
                self.reader.buffer(),
                last,
            );
            self.reader.consume(available);
            self.flushed = last;
        }
    }
}

impl fmt::Debug for Tokenizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tokenizer")
            .field("pending", &self.buf)
            .field("state", &self.state)
            .finish()
    }
}

/// Decode all of `src` onto the end of `dst`, growing it as needed.
fn decode_into(decoder: &mut Decoder, dst: &mut String, mut src: &[u8], last: bool) {
    loop {
        let needed = decoder
            .max_utf8_buffer_length(src.len())
            .unwrap_or_else(|| src.len().saturating_mul(3).saturating_add(4));
        dst.reserve(needed);
        let (result, read, _) = decoder.decode_to_string(src, dst, last);
        src = &src[read..];
        match result {
            CoderResult::InputEmpty => return,
            CoderResult::OutputFull => continue,
        }
    }
}

/// Split in-memory text into tokens.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_owned).collect()
}
