//! Memory budget estimation and windowing.
//!
//! The working set of one document is estimated from its length and the
//! number of enabled extractors. Documents whose estimate exceeds the budget
//! are processed as a sequence of windows, each small enough to fit. Windows
//! are cut at whitespace so no token is ever split between two windows.

/// Bytes of working set per source byte for chunking.
pub const CHUNK_FACTOR: usize = 3;

/// Additional bytes of working set per source byte for each enabled extractor.
pub const EXTRACTOR_FACTOR: usize = 2;

const BYTES_PER_MB: usize = 1024 * 1024;

/// Upper bound on the working set of one processing call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryBudget {
    bytes: usize,
}

impl MemoryBudget {
    /// Create a budget from a megabyte figure.
    pub fn from_megabytes(mb: u32) -> Self {
        Self::from_bytes((mb as usize).saturating_mul(BYTES_PER_MB))
    }

    /// Create a budget from a byte figure.
    pub fn from_bytes(bytes: usize) -> Self {
        Self {
            bytes: bytes.max(1),
        }
    }

    /// Budget in bytes.
    pub fn bytes(&self) -> usize {
        self.bytes
    }

    /// Working-set multiplier for the given number of enabled extractors.
    pub fn factor(enabled_extractors: usize) -> usize {
        CHUNK_FACTOR + EXTRACTOR_FACTOR * enabled_extractors
    }

    /// Estimated working set for a document of `text_len` bytes.
    pub fn estimate(text_len: usize, enabled_extractors: usize) -> usize {
        text_len.saturating_mul(Self::factor(enabled_extractors))
    }

    /// Check if a document can be processed in a single pass.
    pub fn fits(&self, text_len: usize, enabled_extractors: usize) -> bool {
        Self::estimate(text_len, enabled_extractors) <= self.bytes
    }

    /// Largest window, in bytes, that fits the budget.
    pub fn window_len(&self, enabled_extractors: usize) -> usize {
        (self.bytes / Self::factor(enabled_extractors)).max(1)
    }

    /// Split `text` into windows that each fit the budget.
    ///
    /// A window may exceed [`window_len`](Self::window_len) only when a single
    /// token is longer than the window.
    pub fn plan<'a>(&self, text: &'a str, enabled_extractors: usize) -> Vec<Window<'a>> {
        if self.fits(text.len(), enabled_extractors) {
            return vec![Window {
                text,
                byte_start: 0,
                char_start: 0,
            }];
        }

        let max_len = self.window_len(enabled_extractors);
        let mut windows = Vec::new();
        let mut start = 0;
        let mut char_start = 0;

        while start < text.len() {
            let end = if text.len() - start <= max_len {
                text.len()
            } else {
                cut_point(text, start, start + max_len)
            };

            let slice = &text[start..end];
            windows.push(Window {
                text: slice,
                byte_start: start,
                char_start,
            });
            char_start += slice.chars().count();
            start = end;
        }

        log::debug!(
            "Document of {} bytes exceeds budget of {} bytes (estimate {}), split into {} windows",
            text.len(),
            self.bytes,
            Self::estimate(text.len(), enabled_extractors),
            windows.len()
        );

        windows
    }
}

/// A whitespace-aligned slice of the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window<'a> {
    /// The slice itself
    pub text: &'a str,
    /// Byte offset of the slice in the document
    pub byte_start: usize,
    /// Character offset of the slice in the document
    pub char_start: usize,
}

impl<'a> Window<'a> {
    /// A window covering a whole document.
    pub fn whole(text: &'a str) -> Self {
        Self {
            text,
            byte_start: 0,
            char_start: 0,
        }
    }
}

/// Choose where the window starting at `start` should end, given a soft
/// `limit`. Prefers the last paragraph break, then a line break in the back
/// half of the window, then the last whitespace; falls forward to the next
/// whitespace when the window holds a single oversized token.
fn cut_point(text: &str, start: usize, limit: usize) -> usize {
    let mut limit = limit.min(text.len());
    while limit > start && !text.is_char_boundary(limit) {
        limit -= 1;
    }
    if limit == start {
        // A single character wider than the window.
        limit = start + text[start..].chars().next().map_or(1, char::len_utf8);
    }

    let region = &text[start..limit];
    let half = region.len() / 2;

    if let Some(pos) = region.rfind("\n\n") {
        return start + pos + 2;
    }
    if let Some(pos) = region.rfind('\n').filter(|p| *p >= half) {
        return start + pos + 1;
    }
    if let Some((pos, ch)) = region
        .char_indices()
        .rev()
        .find(|(_, ch)| ch.is_whitespace())
    {
        return start + pos + ch.len_utf8();
    }

    text[limit..]
        .find(char::is_whitespace)
        .map_or(text.len(), |pos| limit + pos)
}
