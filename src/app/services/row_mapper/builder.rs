//! Mapping builder evaluated by the caller's configuration closure
//!
//! ```rust
//! use csv_mapper::MappingBuilder;
//!
//! let row_map = MappingBuilder::build(|m| {
//!     m.start_at_row(1);
//!     m.fields(["first_name", "last_name"]);
//!     m.field("age").map(|row, index| Ok(row[index].parse::<i64>()?.into()));
//! })
//! .unwrap();
//!
//! assert_eq!(row_map.start_row(), 1);
//! assert_eq!(row_map.bindings().len(), 3);
//! ```

use std::collections::BTreeMap;
use tracing::debug;

use super::field_binding::FieldBinding;
use super::row_map::RowMap;
use crate::error::Result;

/// Collects mapping declarations into a fresh [`RowMap`]
#[derive(Debug, Default)]
pub struct MappingBuilder {
    row_map: RowMap,
}

impl MappingBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Evaluate `configure` against a new builder and return the validated map
    pub fn build<F>(configure: F) -> Result<RowMap>
    where
        F: FnOnce(&mut MappingBuilder),
    {
        let mut builder = Self::new();
        configure(&mut builder);
        builder.finish()
    }

    /// Validate and hand over the row map
    pub fn finish(self) -> Result<RowMap> {
        self.row_map.validate()?;
        debug!(
            "Row map: start={} stop={:?} delimiter={:?} named_columns={} bindings={}",
            self.row_map.start_row(),
            self.row_map.stop_row(),
            self.row_map.delimiter(),
            self.row_map.named_columns_enabled(),
            self.row_map.bindings().len()
        );
        Ok(self.row_map)
    }

    /// Ignore physical rows before `row` (0-based, header included)
    pub fn start_at_row(&mut self, row: usize) -> &mut Self {
        self.row_map.set_start_row(row);
        self
    }

    /// Stop after physical row `row` (inclusive)
    pub fn stop_at_row(&mut self, row: usize) -> &mut Self {
        self.row_map.set_stop_row(row);
        self
    }

    /// Split cells on `delimiter` instead of a comma
    pub fn delimited_by(&mut self, delimiter: char) -> &mut Self {
        self.row_map.set_delimiter(delimiter);
        self
    }

    /// Treat the row at `start_at_row` as a header and locate fields by name
    pub fn named_columns(&mut self) -> &mut Self {
        self.row_map.enable_named_columns();
        self
    }

    /// Bind every header column under its normalized name
    pub fn read_attributes_from_file(&mut self) -> &mut Self {
        self.read_attributes_from_file_with_aliases(std::iter::empty::<(String, String)>())
    }

    /// Bind every header column, renaming the ones keyed in `aliases`
    ///
    /// Alias keys are original header texts; values are attribute names.
    pub fn read_attributes_from_file_with_aliases<I, K, V>(&mut self, aliases: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let aliases: BTreeMap<String, String> = aliases
            .into_iter()
            .map(|(original, alias)| (original.into().trim().to_string(), alias.into()))
            .collect();
        self.row_map.enable_named_columns();
        self.row_map.declare_header_columns(aliases);
        self
    }

    /// Bind the header columns whose original text matches each name exactly
    pub fn add_attributes_by_name<I, S>(&mut self, names: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names = names.into_iter().map(Into::into).collect();
        self.row_map.enable_named_columns();
        self.row_map.declare_header_names(names);
        self
    }

    /// Declare a field, or get the binding already declared under `name`
    pub fn field(&mut self, name: &str) -> &mut FieldBinding {
        self.row_map.declare(name, None)
    }

    /// Declare a field located by the header text `header`
    pub fn field_as(&mut self, name: &str, header: &str) -> &mut FieldBinding {
        self.row_map.declare(name, Some(header))
    }

    /// Declare several fields left to right
    pub fn fields<I, S>(&mut self, names: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for name in names {
            self.row_map.declare(name.as_ref(), None);
        }
        self
    }

    /// Read-only view of the map built so far
    pub fn row_map(&self) -> &RowMap {
        &self.row_map
    }
}
