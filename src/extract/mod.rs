//! Element extractors.
//!
//! Each extractor is an independent, pure scan over a [`Window`] of document
//! text that yields records of one category. The set of categories is closed
//! ([`ExtractorKind`]); [`ExtractorSet`] holds the enabled subset for a given
//! configuration so disabled categories are never scanned.

mod citation;
mod equation;
mod figure;
mod table;

pub use citation::CitationExtractor;
pub use equation::EquationExtractor;
pub use figure::FigureExtractor;
pub use table::TableExtractor;

pub(crate) use table::number_unlabeled_tables;

use unicode_normalization::UnicodeNormalization;

use crate::budget::Window;
use crate::config::ProcessingConfig;
use crate::error::Result;
use crate::model::ExtractedContent;
use crate::processor::CancelFlag;
use crate::stats::Counter;

/// Extraction categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExtractorKind {
    /// Figure captions
    Figure,
    /// Tables
    Table,
    /// Equations
    Equation,
    /// Citation markers
    Citation,
}

impl ExtractorKind {
    /// All categories.
    pub const ALL: [ExtractorKind; 4] = [
        ExtractorKind::Figure,
        ExtractorKind::Table,
        ExtractorKind::Equation,
        ExtractorKind::Citation,
    ];

    /// Category name.
    pub fn name(&self) -> &'static str {
        match self {
            ExtractorKind::Figure => "figures",
            ExtractorKind::Table => "tables",
            ExtractorKind::Equation => "equations",
            ExtractorKind::Citation => "citations",
        }
    }

    /// Statistics counter advanced by this category.
    pub fn counter(&self) -> Counter {
        match self {
            ExtractorKind::Figure => Counter::FiguresExtracted,
            ExtractorKind::Table => Counter::TablesExtracted,
            ExtractorKind::Equation => Counter::EquationsExtracted,
            ExtractorKind::Citation => Counter::CitationsExtracted,
        }
    }

    /// Check if the configuration enables this category.
    pub fn is_enabled(&self, config: &ProcessingConfig) -> bool {
        match self {
            ExtractorKind::Figure => config.extract_figures(),
            ExtractorKind::Table => config.extract_tables(),
            ExtractorKind::Equation => config.extract_equations(),
            ExtractorKind::Citation => config.extract_citations(),
        }
    }

    /// Number of records of this category in `content`.
    pub fn count_in(&self, content: &ExtractedContent) -> usize {
        match self {
            ExtractorKind::Figure => content.figures.len(),
            ExtractorKind::Table => content.tables.len(),
            ExtractorKind::Equation => content.equations.len(),
            ExtractorKind::Citation => content.citations.len(),
        }
    }
}

/// Common capability of all extractors: scan text, produce records.
pub trait Extractor: Send + Sync {
    /// Record type produced.
    type Record;

    /// Category of this extractor.
    fn kind(&self) -> ExtractorKind;

    /// Scan one window. Record offsets are relative to the whole document.
    fn scan(&self, window: &Window<'_>) -> Vec<Self::Record>;
}

/// The enabled extractors for one configuration.
#[derive(Debug)]
pub struct ExtractorSet {
    figures: Option<FigureExtractor>,
    tables: Option<TableExtractor>,
    equations: Option<EquationExtractor>,
    citations: Option<CitationExtractor>,
}

impl ExtractorSet {
    /// Build the extractors enabled by `config`.
    pub fn from_config(config: &ProcessingConfig) -> Self {
        Self {
            figures: config.extract_figures().then(FigureExtractor::new),
            tables: config.extract_tables().then(TableExtractor::new),
            equations: config.extract_equations().then(EquationExtractor::new),
            citations: config.extract_citations().then(CitationExtractor::new),
        }
    }

    /// Enabled categories.
    pub fn kinds(&self) -> Vec<ExtractorKind> {
        let mut kinds = Vec::with_capacity(4);
        if self.figures.is_some() {
            kinds.push(ExtractorKind::Figure);
        }
        if self.tables.is_some() {
            kinds.push(ExtractorKind::Table);
        }
        if self.equations.is_some() {
            kinds.push(ExtractorKind::Equation);
        }
        if self.citations.is_some() {
            kinds.push(ExtractorKind::Citation);
        }
        kinds
    }

    /// Number of enabled extractors.
    pub fn len(&self) -> usize {
        self.kinds().len()
    }

    /// Check if no extractor is enabled.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Run every enabled extractor over `window`, appending to `out`.
    ///
    /// `cancel` is checked before each extractor.
    pub(crate) fn scan_into(
        &self,
        window: &Window<'_>,
        out: &mut ExtractedContent,
        cancel: &CancelFlag,
    ) -> Result<()> {
        if let Some(extractor) = &self.figures {
            cancel.check()?;
            extend_from(extractor, window, &mut out.figures);
        }
        if let Some(extractor) = &self.tables {
            cancel.check()?;
            extend_from(extractor, window, &mut out.tables);
        }
        if let Some(extractor) = &self.equations {
            cancel.check()?;
            extend_from(extractor, window, &mut out.equations);
        }
        if let Some(extractor) = &self.citations {
            cancel.check()?;
            extend_from(extractor, window, &mut out.citations);
        }
        Ok(())
    }
}

fn extend_from<E: Extractor>(extractor: &E, window: &Window<'_>, out: &mut Vec<E::Record>) {
    let records = extractor.scan(window);
    log::trace!(
        "{} extractor found {} records in window at char {}",
        extractor.kind().name(),
        records.len(),
        window.char_start
    );
    out.extend(records);
}

/// Converts ascending byte offsets within a window into document character
/// offsets without rescanning from the start each time.
pub(crate) struct OffsetMapper<'a> {
    text: &'a str,
    base: usize,
    byte: usize,
    chars: usize,
}

impl<'a> OffsetMapper<'a> {
    pub(crate) fn new(window: &Window<'a>) -> Self {
        Self {
            text: window.text,
            base: window.char_start,
            byte: 0,
            chars: 0,
        }
    }

    /// Document character offset of `byte` (a char boundary in the window).
    pub(crate) fn char_offset(&mut self, byte: usize) -> usize {
        if byte < self.byte {
            self.byte = 0;
            self.chars = 0;
        }
        self.chars += self.text[self.byte..byte].chars().count();
        self.byte = byte;
        self.base + self.chars
    }
}

/// NFC-normalize and collapse internal whitespace runs.
pub(crate) fn normalize_text(text: &str) -> String {
    let normalized: String = text.nfc().collect();
    normalized.split_whitespace().collect::<Vec<_>>().join(" ")
}
