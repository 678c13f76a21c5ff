//! # docsplit
//!
//! Document decomposition for research-paper text.
//!
//! This library takes the decoded text of a document and splits it into
//! bounded-length text chunks plus the structured elements found in it:
//! figures, tables, equations and citation markers.
//!
//! ## Quick Start
//!
//! ```
//! use docsplit::{DocumentProcessor, ProcessingConfig};
//!
//! fn main() -> docsplit::Result<()> {
//!     let config = ProcessingConfig::builder()
//!         .with_chunk_max_length(200)
//!         .build()?;
//!     let processor = DocumentProcessor::new(config);
//!
//!     let content = processor.process_document(
//!         "Figure 1: Model overview.\n\nAs shown in [2], E = mc^2 holds.",
//!     )?;
//!     assert_eq!(content.figures[0].id, "Figure 1");
//!     assert_eq!(content.citations.len(), 1);
//!     assert_eq!(processor.statistics().documents_processed, 1);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Chunking**: greedy whitespace-token packing with source char ranges
//! - **Element extraction**: figures, tables, equations, citations
//! - **Memory budget**: large documents are processed in windows
//! - **Statistics**: cumulative counters, updated atomically per document
//! - **Parallel processing**: one processor shared across threads, or Rayon
//!   batches

pub mod budget;
pub mod chunker;
pub mod config;
pub mod error;
pub mod extract;
pub mod input;
pub mod model;
pub mod processor;
pub mod render;
pub mod stats;

// Re-export commonly used types
pub use budget::MemoryBudget;
pub use chunker::Chunker;
pub use config::{ProcessingConfig, ProcessingConfigBuilder};
pub use error::{Error, Result};
pub use extract::{Extractor, ExtractorKind, ExtractorSet};
pub use model::{
    Citation, CitationStyle, Equation, EquationStyle, ExtractedContent, Figure, Table, TextChunk,
};
pub use processor::{CancelFlag, DocumentProcessor};
pub use render::JsonFormat;
pub use stats::{Counter, ProcessingStatistics};

use std::path::Path;

/// Split text into chunks of at most `max_length` characters.
///
/// Tokens longer than `max_length` are emitted as their own chunk.
///
/// # Example
///
/// ```
/// use docsplit::chunk_text;
///
/// let chunks = chunk_text("one two three four", 9).unwrap();
/// assert_eq!(chunks, vec!["one two", "three", "four"]);
/// ```
pub fn chunk_text(text: &str, max_length: usize) -> Result<Vec<String>> {
    Ok(Chunker::new(max_length)?.chunk(text))
}

/// Process text with the default configuration.
///
/// A fresh processor is created for each call, so statistics are not kept.
///
/// # Example
///
/// ```
/// use docsplit::process_text;
///
/// let content = process_text("Table 1: Results.\na | b\n1 | 2").unwrap();
/// assert_eq!(content.tables.len(), 1);
/// ```
pub fn process_text(text: &str) -> Result<ExtractedContent> {
    DocumentProcessor::new(ProcessingConfig::default()).process_document(text)
}

/// Read a UTF-8 text file and process it with the default configuration.
///
/// # Example
///
/// ```no_run
/// use docsplit::process_file;
///
/// let content = process_file("paper.txt").unwrap();
/// println!("Chunks: {}", content.chunk_count());
/// ```
pub fn process_file<P: AsRef<Path>>(path: P) -> Result<ExtractedContent> {
    let data = std::fs::read(path)?;
    DocumentProcessor::new(ProcessingConfig::default()).process_bytes(&data)
}

/// Render extracted content as JSON.
///
/// # Example
///
/// ```
/// use docsplit::{process_text, to_json, JsonFormat};
///
/// let content = process_text("See [1].").unwrap();
/// let json = to_json(&content, JsonFormat::Compact).unwrap();
/// assert!(json.contains("\"citations\""));
/// ```
pub fn to_json(content: &ExtractedContent, format: JsonFormat) -> Result<String> {
    render::to_json(content, format)
}
