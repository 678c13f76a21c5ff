//! Processing configuration.
//!
//! A [`ProcessingConfig`] is validated when it is built, so every value of the
//! type is usable as-is. Build one with [`ProcessingConfig::builder`]:
//!
//! ```
//! use docsplit::ProcessingConfig;
//!
//! let config = ProcessingConfig::builder()
//!     .with_figures(false)
//!     .with_max_memory_mb(2048)
//!     .build()?;
//! assert!(!config.extract_figures());
//! # Ok::<(), docsplit::Error>(())
//! ```

use serde::Serialize;

use crate::error::{Error, Result};

/// Smallest accepted memory budget in MB.
pub const MIN_MEMORY_MB: u32 = 512;

/// Largest accepted memory budget in MB.
pub const MAX_MEMORY_MB: u32 = 8192;

/// Memory budget used by [`ProcessingConfig::default`].
pub const DEFAULT_MEMORY_MB: u32 = 1024;

/// Chunk length (in characters) used by [`ProcessingConfig::default`].
pub const DEFAULT_CHUNK_LENGTH: usize = 1000;

/// Worst-case UTF-8 width of one character.
const MAX_BYTES_PER_CHAR: u64 = 4;

/// Immutable processing policy for a [`DocumentProcessor`](crate::DocumentProcessor).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcessingConfig {
    extract_figures: bool,
    extract_tables: bool,
    extract_equations: bool,
    extract_citations: bool,
    max_memory_mb: u32,
    chunk_max_length: usize,
}

impl ProcessingConfig {
    /// Create a configuration that extracts everything under the given budget.
    pub fn new(max_memory_mb: u32) -> Result<Self> {
        Self::builder().with_max_memory_mb(max_memory_mb).build()
    }

    /// Start building a configuration from the defaults.
    pub fn builder() -> ProcessingConfigBuilder {
        ProcessingConfigBuilder::default()
    }

    /// Whether figure captions are extracted.
    pub fn extract_figures(&self) -> bool {
        self.extract_figures
    }

    /// Whether tables are extracted.
    pub fn extract_tables(&self) -> bool {
        self.extract_tables
    }

    /// Whether equations are extracted.
    pub fn extract_equations(&self) -> bool {
        self.extract_equations
    }

    /// Whether citations are extracted.
    pub fn extract_citations(&self) -> bool {
        self.extract_citations
    }

    /// Memory budget in MB.
    pub fn max_memory_mb(&self) -> u32 {
        self.max_memory_mb
    }

    /// Maximum chunk length in characters.
    pub fn chunk_max_length(&self) -> usize {
        self.chunk_max_length
    }

    /// Number of enabled extractors.
    pub fn enabled_extractor_count(&self) -> usize {
        [
            self.extract_figures,
            self.extract_tables,
            self.extract_equations,
            self.extract_citations,
        ]
        .iter()
        .filter(|enabled| **enabled)
        .count()
    }
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            extract_figures: true,
            extract_tables: true,
            extract_equations: true,
            extract_citations: true,
            max_memory_mb: DEFAULT_MEMORY_MB,
            chunk_max_length: DEFAULT_CHUNK_LENGTH,
        }
    }
}

/// Builder for [`ProcessingConfig`]. Validation happens in [`build`](Self::build).
#[derive(Debug, Clone)]
pub struct ProcessingConfigBuilder {
    config: ProcessingConfig,
}

impl ProcessingConfigBuilder {
    /// Enable or disable figure extraction.
    pub fn with_figures(mut self, extract: bool) -> Self {
        self.config.extract_figures = extract;
        self
    }

    /// Enable or disable table extraction.
    pub fn with_tables(mut self, extract: bool) -> Self {
        self.config.extract_tables = extract;
        self
    }

    /// Enable or disable equation extraction.
    pub fn with_equations(mut self, extract: bool) -> Self {
        self.config.extract_equations = extract;
        self
    }

    /// Enable or disable citation extraction.
    pub fn with_citations(mut self, extract: bool) -> Self {
        self.config.extract_citations = extract;
        self
    }

    /// Disable every extractor; only chunking runs.
    pub fn chunks_only(self) -> Self {
        self.with_figures(false)
            .with_tables(false)
            .with_equations(false)
            .with_citations(false)
    }

    /// Set the memory budget in MB.
    pub fn with_max_memory_mb(mut self, mb: u32) -> Self {
        self.config.max_memory_mb = mb;
        self
    }

    /// Set the maximum chunk length in characters.
    pub fn with_chunk_max_length(mut self, length: usize) -> Self {
        self.config.chunk_max_length = length;
        self
    }

    /// Validate and produce the configuration.
    pub fn build(self) -> Result<ProcessingConfig> {
        let config = self.config;

        if !(MIN_MEMORY_MB..=MAX_MEMORY_MB).contains(&config.max_memory_mb) {
            return Err(Error::Config(format!(
                "max_memory_mb must be between {} and {}, got {}",
                MIN_MEMORY_MB, MAX_MEMORY_MB, config.max_memory_mb
            )));
        }

        if config.chunk_max_length == 0 {
            return Err(Error::Config(
                "chunk_max_length must be at least 1".to_string(),
            ));
        }

        // A single chunk must be representable within the budget.
        let budget_bytes = u64::from(config.max_memory_mb) * 1024 * 1024;
        let chunk_bytes = (config.chunk_max_length as u64).saturating_mul(MAX_BYTES_PER_CHAR);
        if chunk_bytes > budget_bytes {
            return Err(Error::Config(format!(
                "chunk_max_length {} does not fit in a {} MB budget",
                config.chunk_max_length, config.max_memory_mb
            )));
        }

        Ok(config)
    }
}

impl Default for ProcessingConfigBuilder {
    fn default() -> Self {
        Self {
            config: ProcessingConfig::default(),
        }
    }
}
