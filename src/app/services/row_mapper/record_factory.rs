//! Per-row record materialization

use csv::StringRecord;
use std::sync::Arc;

use super::row_map::ResolvedBinding;
use crate::app::models::{FieldNames, Record, Value};
use crate::error::{MapperError, Result};

/// Builds one [`Record`] per row from a resolved binding plan
#[derive(Debug, Clone)]
pub struct RecordFactory {
    fields: Arc<FieldNames>,
    bindings: Vec<ResolvedBinding>,
    required_width: usize,
}

impl RecordFactory {
    pub fn new(bindings: Vec<ResolvedBinding>) -> Self {
        let fields = Arc::new(FieldNames::new(
            bindings.iter().map(|binding| binding.name.clone()).collect(),
        ));
        let required_width = bindings
            .iter()
            .map(|binding| binding.index + 1)
            .max()
            .unwrap_or(0);

        Self {
            fields,
            bindings,
            required_width,
        }
    }

    /// Attribute names every produced record exposes
    pub fn fields(&self) -> &FieldNames {
        &self.fields
    }

    /// Smallest row width that satisfies every binding
    pub fn required_width(&self) -> usize {
        self.required_width
    }

    /// Fail if `row` is too narrow for any binding
    pub fn check_width(&self, row: &StringRecord, row_number: usize) -> Result<()> {
        if row.len() >= self.required_width {
            return Ok(());
        }

        let binding = self
            .bindings
            .iter()
            .find(|binding| binding.index >= row.len());
        match binding {
            Some(binding) => Err(MapperError::resolution(
                &binding.name,
                format!(
                    "column {} is out of range for row {} ({} columns)",
                    binding.index,
                    row_number,
                    row.len()
                ),
            )),
            None => Ok(()),
        }
    }

    /// Map one row; the row must already have passed [`check_width`](Self::check_width)
    pub fn produce(&self, row: &StringRecord, row_number: usize) -> Result<Record> {
        let mut values = Vec::with_capacity(self.bindings.len());

        for binding in &self.bindings {
            let value = match &binding.transform {
                Some(transform) => transform(row, binding.index)
                    .map_err(|e| MapperError::transform(&binding.name, row_number, e))?,
                None => row
                    .get(binding.index)
                    .map(Value::from)
                    .ok_or_else(|| {
                        MapperError::resolution(
                            &binding.name,
                            format!("column {} is out of range for row {}", binding.index, row_number),
                        )
                    })?,
            };
            values.push(value);
        }

        Ok(Record::new(Arc::clone(&self.fields), values, row_number))
    }
}
