//! Greedy whitespace-token chunking.
//!
//! Text is scanned once as a sequence of whitespace-delimited tokens. Tokens
//! are joined with single spaces into the current chunk until the next token
//! would push the chunk past `max_length` characters; that token then starts a
//! new chunk. A token longer than `max_length` becomes a chunk of its own and
//! is never split, so every source word survives intact and in order.

use crate::error::{Error, Result};
use crate::model::TextChunk;

/// Splits text into bounded-length chunks without breaking words.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chunker {
    max_length: usize,
}

impl Chunker {
    /// Create a chunker producing chunks of at most `max_length` characters.
    pub fn new(max_length: usize) -> Result<Self> {
        if max_length == 0 {
            return Err(Error::Config(
                "chunk max_length must be at least 1".to_string(),
            ));
        }
        Ok(Self { max_length })
    }

    /// Maximum chunk length in characters.
    pub fn max_length(&self) -> usize {
        self.max_length
    }

    /// Split `text` into chunk strings.
    ///
    /// Empty or whitespace-only text yields no chunks.
    pub fn chunk(&self, text: &str) -> Vec<String> {
        self.chunk_with_offsets(text)
            .into_iter()
            .map(|c| c.text)
            .collect()
    }

    /// Split `text` into chunks carrying their index and source range.
    pub fn chunk_with_offsets(&self, text: &str) -> Vec<TextChunk> {
        let mut acc = ChunkAccumulator::new(self.max_length);
        acc.feed(text, 0);
        acc.finish()
    }
}

/// Incremental chunk builder.
///
/// Text may be fed in several whitespace-aligned pieces; the result is the
/// same as feeding the concatenation in one go.
#[derive(Debug)]
pub(crate) struct ChunkAccumulator {
    max_length: usize,
    current: String,
    current_chars: usize,
    range: (usize, usize),
    chunks: Vec<TextChunk>,
}

impl ChunkAccumulator {
    pub(crate) fn new(max_length: usize) -> Self {
        Self {
            max_length,
            current: String::new(),
            current_chars: 0,
            range: (0, 0),
            chunks: Vec::new(),
        }
    }

    /// Feed a piece of text whose first character sits at `char_base` in the
    /// full document. Pieces must not split a token.
    pub(crate) fn feed(&mut self, text: &str, char_base: usize) {
        for token in Tokens::new(text) {
            self.push_token(token.text, char_base + token.start_char, token.char_len);
        }
    }

    pub(crate) fn finish(mut self) -> Vec<TextChunk> {
        self.flush();
        self.chunks
    }

    fn push_token(&mut self, token: &str, start: usize, len: usize) {
        let end = start + len;

        if !self.current.is_empty() && self.current_chars + 1 + len > self.max_length {
            self.flush();
        }

        if self.current.is_empty() {
            self.current.push_str(token);
            self.current_chars = len;
            self.range = (start, end);
        } else {
            self.current.push(' ');
            self.current.push_str(token);
            self.current_chars += 1 + len;
            self.range.1 = end;
        }
    }

    fn flush(&mut self) {
        if self.current.is_empty() {
            return;
        }
        let index = self.chunks.len();
        self.chunks.push(TextChunk {
            text: std::mem::take(&mut self.current),
            index,
            source_char_range: self.range,
        });
        self.current_chars = 0;
    }
}

/// A whitespace-delimited token with its character position.
struct Token<'a> {
    text: &'a str,
    start_char: usize,
    char_len: usize,
}

/// Iterator over whitespace-delimited tokens, tracking character offsets.
struct Tokens<'a> {
    text: &'a str,
    chars: std::str::CharIndices<'a>,
    char_pos: usize,
}

impl<'a> Tokens<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            text,
            chars: text.char_indices(),
            char_pos: 0,
        }
    }
}

impl<'a> Iterator for Tokens<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        let (start_byte, start_char) = loop {
            let (byte, ch) = self.chars.next()?;
            self.char_pos += 1;
            if !ch.is_whitespace() {
                break (byte, self.char_pos - 1);
            }
        };

        let mut end_byte = self.text.len();
        let mut char_len = 1;
        for (byte, ch) in self.chars.by_ref() {
            self.char_pos += 1;
            if ch.is_whitespace() {
                end_byte = byte;
                break;
            }
            char_len += 1;
        }

        Some(Token {
            text: &self.text[start_byte..end_byte],
            start_char,
            char_len,
        })
    }
}
