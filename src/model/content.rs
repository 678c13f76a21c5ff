//! Aggregate extraction result.

use serde::{Deserialize, Serialize};

use super::{Citation, Equation, Figure, Table};

/// A bounded-length chunk of whitespace-joined tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextChunk {
    /// Tokens joined by single spaces
    pub text: String,

    /// Position of this chunk in the document (0-indexed)
    pub index: usize,

    /// Half-open character range of the source span, first token to last
    pub source_char_range: (usize, usize),
}

impl TextChunk {
    /// Length of the chunk text in characters.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    /// Number of whitespace-separated words in the chunk.
    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }
}

/// Structured decomposition of one document.
///
/// Every sequence is present (possibly empty), including those whose
/// extractor was disabled.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedContent {
    /// Text chunks in source order
    pub text_chunks: Vec<TextChunk>,

    /// Figure captions in source order
    pub figures: Vec<Figure>,

    /// Tables in source order
    pub tables: Vec<Table>,

    /// Equations in source order
    pub equations: Vec<Equation>,

    /// Citation markers in source order
    pub citations: Vec<Citation>,
}

impl ExtractedContent {
    /// Create an empty result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of text chunks.
    pub fn chunk_count(&self) -> usize {
        self.text_chunks.len()
    }

    /// Number of extracted figures, tables, equations and citations.
    pub fn element_count(&self) -> usize {
        self.figures.len() + self.tables.len() + self.equations.len() + self.citations.len()
    }

    /// Check if nothing at all was produced.
    pub fn is_empty(&self) -> bool {
        self.text_chunks.is_empty() && self.element_count() == 0
    }

    /// Iterate over chunk texts.
    pub fn chunk_texts(&self) -> impl Iterator<Item = &str> {
        self.text_chunks.iter().map(|c| c.text.as_str())
    }
}
