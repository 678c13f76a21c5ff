//! Cumulative processing statistics.

use std::collections::BTreeMap;
use std::sync::{Mutex, PoisonError};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Named counters tracked by the statistics ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Counter {
    /// Documents that completed processing
    DocumentsProcessed,
    /// Text chunks produced
    ChunksCreated,
    /// Figure records produced
    FiguresExtracted,
    /// Table records produced
    TablesExtracted,
    /// Equation records produced
    EquationsExtracted,
    /// Citation records produced
    CitationsExtracted,
}

impl Counter {
    /// All counters, in reporting order.
    pub const ALL: [Counter; 6] = [
        Counter::DocumentsProcessed,
        Counter::ChunksCreated,
        Counter::FiguresExtracted,
        Counter::TablesExtracted,
        Counter::EquationsExtracted,
        Counter::CitationsExtracted,
    ];

    /// Counter name as exposed to monitoring.
    pub fn as_str(&self) -> &'static str {
        match self {
            Counter::DocumentsProcessed => "documents_processed",
            Counter::ChunksCreated => "chunks_created",
            Counter::FiguresExtracted => "figures_extracted",
            Counter::TablesExtracted => "tables_extracted",
            Counter::EquationsExtracted => "equations_extracted",
            Counter::CitationsExtracted => "citations_extracted",
        }
    }

    /// Look up a counter by name.
    pub fn from_name(name: &str) -> Option<Counter> {
        Self::ALL.into_iter().find(|c| c.as_str() == name)
    }
}

/// Snapshot of the cumulative counters of a processor.
///
/// Values only ever grow over the lifetime of a processor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessingStatistics {
    /// Documents that completed processing
    pub documents_processed: u64,

    /// Text chunks produced
    pub chunks_created: u64,

    /// Figure records produced
    pub figures_extracted: u64,

    /// Table records produced
    pub tables_extracted: u64,

    /// Equation records produced
    pub equations_extracted: u64,

    /// Citation records produced
    pub citations_extracted: u64,
}

impl ProcessingStatistics {
    /// Create new zeroed statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a counter value.
    pub fn counter(&self, counter: Counter) -> u64 {
        match counter {
            Counter::DocumentsProcessed => self.documents_processed,
            Counter::ChunksCreated => self.chunks_created,
            Counter::FiguresExtracted => self.figures_extracted,
            Counter::TablesExtracted => self.tables_extracted,
            Counter::EquationsExtracted => self.equations_extracted,
            Counter::CitationsExtracted => self.citations_extracted,
        }
    }

    /// Get a counter value by name.
    pub fn get(&self, name: &str) -> Option<u64> {
        Counter::from_name(name).map(|c| self.counter(c))
    }

    /// Iterate over `(name, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, u64)> + '_ {
        Counter::ALL.into_iter().map(|c| (c.as_str(), self.counter(c)))
    }

    /// Counters as a name-to-value map.
    pub fn to_map(&self) -> BTreeMap<&'static str, u64> {
        self.iter().collect()
    }

    /// Check that no counter is lower than in `earlier`.
    pub fn dominates(&self, earlier: &ProcessingStatistics) -> bool {
        Counter::ALL
            .iter()
            .all(|c| self.counter(*c) >= earlier.counter(*c))
    }

    fn counter_mut(&mut self, counter: Counter) -> &mut u64 {
        match counter {
            Counter::DocumentsProcessed => &mut self.documents_processed,
            Counter::ChunksCreated => &mut self.chunks_created,
            Counter::FiguresExtracted => &mut self.figures_extracted,
            Counter::TablesExtracted => &mut self.tables_extracted,
            Counter::EquationsExtracted => &mut self.equations_extracted,
            Counter::CitationsExtracted => &mut self.citations_extracted,
        }
    }
}

/// Mutable, monotonic counter set owned by a processor.
///
/// Callers only ever see copies via [`snapshot`](Self::snapshot).
#[derive(Debug, Default)]
pub(crate) struct StatisticsLedger {
    inner: Mutex<ProcessingStatistics>,
}

impl StatisticsLedger {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Copy of the current counters.
    pub(crate) fn snapshot(&self) -> ProcessingStatistics {
        // The guarded value is only written after validation, so a poisoned
        // lock still holds consistent counters.
        *self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Add each `(counter, amount)` pair as one all-or-nothing update.
    ///
    /// Negative amounts and overflow are invariant violations; on error no
    /// counter changes.
    pub(crate) fn apply(&self, increments: &[(Counter, i64)]) -> Result<()> {
        let mut stats = self.inner.lock().unwrap_or_else(PoisonError::into_inner);

        let mut updated = *stats;
        for &(counter, amount) in increments {
            let amount = u64::try_from(amount).map_err(|_| {
                log::warn!("Rejected negative increment {} for {}", amount, counter.as_str());
                Error::InvariantViolation(format!(
                    "negative increment {} for counter {}",
                    amount,
                    counter.as_str()
                ))
            })?;
            let slot = updated.counter_mut(counter);
            *slot = slot.checked_add(amount).ok_or_else(|| {
                log::warn!("Counter {} would overflow", counter.as_str());
                Error::InvariantViolation(format!("counter {} overflowed", counter.as_str()))
            })?;
        }

        *stats = updated;
        Ok(())
    }
}
