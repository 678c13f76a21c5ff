//! Output model for processed documents.
//!
//! [`ExtractedContent`] is the aggregate handed to downstream consumers: text
//! chunks sized for a language model plus the figure, table, equation and
//! citation records found in the source text. All offsets are character
//! offsets into the original document text.

mod content;
mod element;

pub use content::{ExtractedContent, TextChunk};
pub use element::{Citation, CitationStyle, Equation, EquationStyle, Figure, Table};
