//! Import statistics and result structures
//!
//! Tracks how the physical rows of a source were split between skipped
//! rows, the header, mapped rows and rows beyond the stop bound.

use crate::app::models::Record;

/// Records produced by an import together with its statistics
#[derive(Debug, Clone)]
pub struct ImportResult {
    /// Mapped records in source order
    pub records: Vec<Record>,

    /// Row accounting for the import
    pub stats: ImportStats,
}

/// Row accounting for one import
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ImportStats {
    /// Physical rows delivered by the source
    pub rows_read: usize,

    /// Rows before `start_at_row`
    pub rows_before_start: usize,

    /// Physical row consumed as the header, if any
    pub header_row: Option<usize>,

    /// Rows after `stop_at_row`
    pub rows_after_stop: usize,

    /// Records returned to the caller
    pub records_produced: usize,
}

impl ImportStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rows that were neither skipped, the header, nor mapped
    pub fn rows_ignored(&self) -> usize {
        self.rows_before_start + self.rows_after_stop + usize::from(self.header_row.is_some())
    }

    /// Check the counts add up to the rows read
    pub fn is_consistent(&self) -> bool {
        self.rows_ignored() + self.records_produced == self.rows_read
    }
}
