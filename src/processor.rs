//! Document processing pipeline.
//!
//! A [`DocumentProcessor`] is bound to one [`ProcessingConfig`] and can be
//! shared across threads. Each call to
//! [`process_document`](DocumentProcessor::process_document) runs these steps
//! in order:
//!
//! 1. plan windows against the memory budget,
//! 2. run the enabled extractors over each window,
//! 3. chunk the text (the chunker carries state across windows),
//! 4. assemble the [`ExtractedContent`],
//! 5. advance the statistics counters in one atomic update.
//!
//! Extraction itself takes no locks; only step 5 synchronizes. A call that
//! fails or is cancelled never touches the counters.

use std::io::Read;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rayon::prelude::*;

use crate::budget::MemoryBudget;
use crate::chunker::ChunkAccumulator;
use crate::config::ProcessingConfig;
use crate::error::{Error, Result};
use crate::extract::{number_unlabeled_tables, ExtractorKind, ExtractorSet};
use crate::input;
use crate::model::ExtractedContent;
use crate::stats::{Counter, ProcessingStatistics, StatisticsLedger};

/// Cooperative cancellation signal for a processing call.
///
/// Clones share the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag {
    cancelled: Arc<AtomicBool>,
}

impl CancelFlag {
    /// Create a new, unraised flag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    /// Check if cancellation was requested.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }

    /// Fail with [`Error::Cancelled`] if cancellation was requested.
    pub fn check(&self) -> Result<()> {
        if self.is_cancelled() {
            Err(Error::Cancelled)
        } else {
            Ok(())
        }
    }
}

/// Turns document text into [`ExtractedContent`] and keeps cumulative
/// statistics.
///
/// # Example
///
/// ```
/// use docsplit::{DocumentProcessor, ProcessingConfig};
///
/// let processor = DocumentProcessor::new(ProcessingConfig::default());
/// let content = processor.process_document("Results agree with [3].")?;
/// assert_eq!(content.citations.len(), 1);
/// assert_eq!(processor.statistics().documents_processed, 1);
/// # Ok::<(), docsplit::Error>(())
/// ```
#[derive(Debug)]
pub struct DocumentProcessor {
    config: Arc<ProcessingConfig>,
    extractors: ExtractorSet,
    budget: MemoryBudget,
    ledger: StatisticsLedger,
}

impl DocumentProcessor {
    /// Create a processor bound to `config`.
    pub fn new(config: ProcessingConfig) -> Self {
        Self::with_shared_config(Arc::new(config))
    }

    /// Create a processor that shares an existing configuration.
    pub fn with_shared_config(config: Arc<ProcessingConfig>) -> Self {
        let budget = MemoryBudget::from_megabytes(config.max_memory_mb());
        Self::build(config, budget)
    }

    /// Validate the given options and create a processor from them.
    pub fn from_parts(
        extract_figures: bool,
        extract_tables: bool,
        extract_equations: bool,
        extract_citations: bool,
        max_memory_mb: u32,
    ) -> Result<Self> {
        let config = ProcessingConfig::builder()
            .with_figures(extract_figures)
            .with_tables(extract_tables)
            .with_equations(extract_equations)
            .with_citations(extract_citations)
            .with_max_memory_mb(max_memory_mb)
            .build()?;
        Ok(Self::new(config))
    }

    fn build(config: Arc<ProcessingConfig>, budget: MemoryBudget) -> Self {
        Self {
            extractors: ExtractorSet::from_config(&config),
            config,
            budget,
            ledger: StatisticsLedger::new(),
        }
    }

    /// Create a processor with an explicit byte budget instead of the
    /// configured megabyte figure.
    #[cfg(test)]
    pub(crate) fn with_budget(config: ProcessingConfig, budget: MemoryBudget) -> Self {
        Self::build(Arc::new(config), budget)
    }

    /// The configuration this processor was built with.
    pub fn config(&self) -> &ProcessingConfig {
        &self.config
    }

    /// The memory budget derived from the configuration.
    pub fn budget(&self) -> MemoryBudget {
        self.budget
    }

    /// Snapshot of the cumulative statistics.
    pub fn statistics(&self) -> ProcessingStatistics {
        self.ledger.snapshot()
    }

    /// Process one document.
    pub fn process_document(&self, text: &str) -> Result<ExtractedContent> {
        self.process_document_cancellable(text, &CancelFlag::new())
    }

    /// Process one document, stopping early if `cancel` is raised.
    ///
    /// Cancellation is observed between windows and between extractors.
    pub fn process_document_cancellable(
        &self,
        text: &str,
        cancel: &CancelFlag,
    ) -> Result<ExtractedContent> {
        let content = self.extract(text, cancel).map_err(|err| {
            if matches!(err, Error::Cancelled) {
                log::warn!("Processing cancelled; statistics left unchanged");
            }
            err
        })?;
        self.record(&content)?;
        Ok(content)
    }

    /// Decode and process a document given as bytes.
    pub fn process_bytes(&self, data: &[u8]) -> Result<ExtractedContent> {
        let text = input::decode_text(data)?;
        self.process_document(text)
    }

    /// Read a document to the end and process it.
    pub fn process_reader<R: Read>(&self, mut reader: R) -> Result<ExtractedContent> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        self.process_bytes(&data)
    }

    /// Process several documents in parallel.
    ///
    /// Results are returned in input order; each document succeeds or fails
    /// on its own.
    pub fn process_batch<S>(&self, texts: &[S]) -> Vec<Result<ExtractedContent>>
    where
        S: AsRef<str> + Sync,
    {
        texts
            .par_iter()
            .map(|text| self.process_document(text.as_ref()))
            .collect()
    }

    /// Process a document on the blocking thread pool of the current tokio
    /// runtime.
    #[cfg(feature = "async")]
    pub async fn process_document_async(
        self: Arc<Self>,
        text: String,
    ) -> Result<ExtractedContent> {
        tokio::task::spawn_blocking(move || self.process_document(&text))
            .await
            .map_err(|e| Error::InvariantViolation(format!("processing task failed: {}", e)))?
    }

    /// Steps 1 to 4: pure with respect to the ledger.
    fn extract(&self, text: &str, cancel: &CancelFlag) -> Result<ExtractedContent> {
        let windows = self.budget.plan(text, self.extractors.len());
        let mut content = ExtractedContent::new();
        let mut chunks = ChunkAccumulator::new(self.config.chunk_max_length());

        for window in &windows {
            cancel.check()?;
            self.extractors.scan_into(window, &mut content, cancel)?;
            chunks.feed(window.text, window.char_start);
        }
        cancel.check()?;

        number_unlabeled_tables(&mut content.tables);
        content.text_chunks = chunks.finish();

        log::debug!(
            "Processed document: {} chars, {} windows, {} chunks, {} elements",
            windows.last().map_or(0, |w| w.char_start + w.text.chars().count()),
            windows.len(),
            content.text_chunks.len(),
            content.element_count()
        );

        Ok(content)
    }

    /// Step 5.
    fn record(&self, content: &ExtractedContent) -> Result<()> {
        let mut increments = vec![
            (Counter::DocumentsProcessed, 1),
            (Counter::ChunksCreated, to_amount(content.text_chunks.len())?),
        ];
        for kind in self.extractors.kinds() {
            increments.push((kind.counter(), to_amount(kind.count_in(content))?));
        }
        self.ledger.apply(&increments)
    }

    /// Check whether `kind` runs under this processor's configuration.
    pub fn is_enabled(&self, kind: ExtractorKind) -> bool {
        kind.is_enabled(&self.config)
    }
}

fn to_amount(count: usize) -> Result<i64> {
    i64::try_from(count)
        .map_err(|_| Error::InvariantViolation(format!("record count {} out of range", count)))
}
