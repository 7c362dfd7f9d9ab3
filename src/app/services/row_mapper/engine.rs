//! Import orchestration
//!
//! Runs a mapping closure, reads the source with the configured delimiter,
//! consumes the header row when named columns are enabled, bounds the rows
//! to the configured window and maps each remaining row to a [`Record`].
//! Everything that can be checked up front (bounds, names, aliases, named
//! transforms, row widths) is checked before the first record is built.

use csv::StringRecord;
use tracing::{debug, info, warn};

use super::builder::MappingBuilder;
use super::column_mapping::NamedColumnIndex;
use super::record_factory::RecordFactory;
use super::row_map::RowMap;
use super::stats::{ImportResult, ImportStats};
use super::transform::FunctionTable;
use crate::app::models::Record;
use crate::app::services::delimited_source::DelimitedSource;
use crate::config::ImportOptions;
use crate::error::Result;

/// Entry point for mapping delimited text into records
///
/// The engine carries the caller's [`FunctionTable`] so that
/// `map_named` transforms can be resolved. An engine built with
/// [`ImportEngine::new`] has no functions, and any by-name transform fails.
#[derive(Debug, Clone, Default)]
pub struct ImportEngine {
    functions: FunctionTable,
}

impl ImportEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine that resolves named transforms against `functions`
    pub fn with_functions(functions: FunctionTable) -> Self {
        Self { functions }
    }

    pub fn functions(&self) -> &FunctionTable {
        &self.functions
    }

    /// Evaluate a mapping closure without importing anything
    pub fn map_csv<F>(&self, configure: F) -> Result<RowMap>
    where
        F: FnOnce(&mut MappingBuilder),
    {
        MappingBuilder::build(configure)
    }

    /// Import a file path or literal text, depending on `options`
    pub fn import<F>(&self, input: &str, options: &ImportOptions, configure: F) -> Result<Vec<Record>>
    where
        F: FnOnce(&mut MappingBuilder),
    {
        self.import_source(DelimitedSource::from_input(input, options), configure)
    }

    /// Import from any source
    pub fn import_source<F>(&self, source: DelimitedSource, configure: F) -> Result<Vec<Record>>
    where
        F: FnOnce(&mut MappingBuilder),
    {
        Ok(self.import_with_stats(source, configure)?.records)
    }

    /// Import from any source and report row accounting
    pub fn import_with_stats<F>(&self, source: DelimitedSource, configure: F) -> Result<ImportResult>
    where
        F: FnOnce(&mut MappingBuilder),
    {
        let row_map = MappingBuilder::build(configure)?;
        self.import_with_row_map(source, &row_map)
    }

    /// Import from any source with a row map built earlier
    pub fn import_with_row_map(&self, source: DelimitedSource, row_map: &RowMap) -> Result<ImportResult> {
        row_map.validate()?;
        info!("Importing {}", source.describe());

        let rows = source.read_rows(row_map.delimiter())?;
        let result = self.map_rows(&rows, row_map)?;

        info!(
            "Imported {} records from {} rows",
            result.stats.records_produced, result.stats.rows_read
        );
        Ok(result)
    }

    /// Map already-read rows with a row map
    pub fn map_rows(&self, rows: &[StringRecord], row_map: &RowMap) -> Result<ImportResult> {
        let mut stats = ImportStats::new();
        stats.rows_read = rows.len();

        let start = row_map.start_row();
        stats.rows_before_start = start.min(rows.len());

        // The header, when enabled, is the first row of the window.
        let mut data_start = start;
        let header = if row_map.named_columns_enabled() {
            match rows.get(start) {
                Some(header_row) => {
                    debug!("Header at row {}: {:?}", start, header_row);
                    stats.header_row = Some(start);
                    data_start = start + 1;
                    Some(NamedColumnIndex::build(header_row))
                }
                None => {
                    warn!(
                        "Named columns enabled but the source has no row {} to use as header",
                        start
                    );
                    None
                }
            }
        } else {
            None
        };

        let data_end = match row_map.stop_row() {
            Some(stop) => (stop + 1).min(rows.len()),
            None => rows.len(),
        };
        let window = if data_start < data_end {
            data_start..data_end
        } else {
            data_end..data_end
        };
        stats.rows_after_stop = rows.len() - data_end.max(data_start.min(rows.len()));
        debug!("Data rows {:?} of {}", window, rows.len());

        if start >= rows.len() && !rows.is_empty() {
            warn!(
                "start_at_row {} is beyond the last row ({}); nothing to import",
                start,
                rows.len() - 1
            );
        }

        let factory = RecordFactory::new(row_map.resolve(header.as_ref(), &self.functions)?);
        for row_number in window.clone() {
            factory.check_width(&rows[row_number], row_number)?;
        }

        let records = window
            .map(|row_number| factory.produce(&rows[row_number], row_number))
            .collect::<Result<Vec<_>>>()?;

        stats.records_produced = records.len();
        debug!(
            "Row accounting: before={} header={:?} after={} records={}",
            stats.rows_before_start, stats.header_row, stats.rows_after_stop, stats.records_produced
        );
        Ok(ImportResult { records, stats })
    }
}
