//! Row map: the configuration produced by evaluating a mapping closure
//!
//! A [`RowMap`] records row bounds, the delimiter, header mode and the
//! ordered field declarations. Declarations that depend on the header row
//! stay symbolic until [`RowMap::resolve`] is given the analyzed header.

use csv::StringRecord;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use tracing::debug;

use super::column_mapping::NamedColumnIndex;
use super::field_binding::{FieldBinding, Locator};
use super::record_factory::RecordFactory;
use super::transform::{FunctionTable, Transform, TransformFn};
use crate::app::models::Record;
use crate::app::services::delimited_source::delimiter_byte;
use crate::constants::{DEFAULT_DELIMITER, DEFAULT_START_ROW};
use crate::error::{MapperError, Result};

/// One entry in declaration order
#[derive(Debug, Clone)]
pub(crate) enum Declaration {
    /// Index into the field list
    Field(usize),
    /// One binding per header column, names optionally aliased by header text
    HeaderColumns { aliases: BTreeMap<String, String> },
    /// Bindings for the listed header texts
    HeaderNames(Vec<String>),
}

/// Mapping configuration for one import
#[derive(Debug, Clone)]
pub struct RowMap {
    start_row: usize,
    stop_row: Option<usize>,
    delimiter: char,
    named_columns: bool,
    fields: Vec<FieldBinding>,
    declarations: Vec<Declaration>,
    registry: HashMap<String, usize>,
    next_position: usize,
}

impl Default for RowMap {
    fn default() -> Self {
        Self::new()
    }
}

impl RowMap {
    pub fn new() -> Self {
        Self {
            start_row: DEFAULT_START_ROW,
            stop_row: None,
            delimiter: DEFAULT_DELIMITER,
            named_columns: false,
            fields: Vec::new(),
            declarations: Vec::new(),
            registry: HashMap::new(),
            next_position: 0,
        }
    }

    /// First physical row considered (0-based, header included)
    pub fn start_row(&self) -> usize {
        self.start_row
    }

    /// Last physical row considered, inclusive
    pub fn stop_row(&self) -> Option<usize> {
        self.stop_row
    }

    pub fn delimiter(&self) -> char {
        self.delimiter
    }

    /// True when the row at `start_row` is consumed as the header
    pub fn named_columns_enabled(&self) -> bool {
        self.named_columns
    }

    /// Explicitly declared bindings in declaration order
    pub fn bindings(&self) -> &[FieldBinding] {
        &self.fields
    }

    pub fn binding(&self, name: &str) -> Option<&FieldBinding> {
        self.registry.get(name).map(|&slot| &self.fields[slot])
    }

    /// True when any declaration needs the header row to resolve
    pub fn requires_header(&self) -> bool {
        self.declarations.iter().any(|declaration| match declaration {
            Declaration::Field(slot) => {
                matches!(self.fields[*slot].locator(), Locator::Header(_))
            }
            Declaration::HeaderColumns { .. } | Declaration::HeaderNames(_) => true,
        })
    }

    pub(crate) fn set_start_row(&mut self, row: usize) {
        self.start_row = row;
    }

    pub(crate) fn set_stop_row(&mut self, row: usize) {
        self.stop_row = Some(row);
    }

    pub(crate) fn set_delimiter(&mut self, delimiter: char) {
        self.delimiter = delimiter;
    }

    pub(crate) fn enable_named_columns(&mut self) {
        self.named_columns = true;
    }

    /// Declare a field, or return the existing binding with that name
    ///
    /// New bindings take the next sequential column in positional mode, or
    /// the header matching `header` (default: the field name) in named mode.
    /// An explicit `header` always produces a header locator.
    pub(crate) fn declare(&mut self, name: &str, header: Option<&str>) -> &mut FieldBinding {
        if let Some(&slot) = self.registry.get(name) {
            return &mut self.fields[slot];
        }

        let locator = match header {
            Some(text) => Locator::Header(text.to_string()),
            None if self.named_columns => Locator::Header(name.to_string()),
            None => {
                let position = self.next_position;
                self.next_position += 1;
                Locator::Position(position)
            }
        };

        let slot = self.fields.len();
        self.fields.push(FieldBinding::new(name, locator));
        self.registry.insert(name.to_string(), slot);
        self.declarations.push(Declaration::Field(slot));
        &mut self.fields[slot]
    }

    pub(crate) fn declare_header_columns(&mut self, aliases: BTreeMap<String, String>) {
        self.declarations
            .push(Declaration::HeaderColumns { aliases });
    }

    pub(crate) fn declare_header_names(&mut self, names: Vec<String>) {
        self.declarations.push(Declaration::HeaderNames(names));
    }

    /// Check bounds and delimiter
    pub fn validate(&self) -> Result<()> {
        if let Some(stop_row) = self.stop_row {
            if stop_row < self.start_row {
                return Err(MapperError::configuration(format!(
                    "stop_at_row ({}) must not be before start_at_row ({})",
                    stop_row, self.start_row
                )));
            }
        }
        delimiter_byte(self.delimiter)?;
        Ok(())
    }

    /// Fix every declaration to a column index and callable transform
    ///
    /// Fails on the first name, alias or transform that cannot be resolved.
    /// A later declaration that reuses a name produced by a header expansion
    /// only contributes its transform.
    pub fn resolve(
        &self,
        header: Option<&NamedColumnIndex>,
        functions: &FunctionTable,
    ) -> Result<Vec<ResolvedBinding>> {
        let mut resolved: Vec<ResolvedBinding> = Vec::new();
        let mut seen: HashMap<String, usize> = HashMap::new();

        for declaration in &self.declarations {
            match declaration {
                Declaration::Field(slot) => {
                    let binding = &self.fields[*slot];
                    let transform = resolve_transform(binding, functions)?;

                    if let Some(&existing) = seen.get(binding.name()) {
                        if transform.is_some() {
                            resolved[existing].transform = transform;
                        }
                        continue;
                    }

                    let index = locate(binding, header)?;
                    seen.insert(binding.name().to_string(), resolved.len());
                    resolved.push(ResolvedBinding {
                        name: binding.name().to_string(),
                        index,
                        transform,
                    });
                }
                Declaration::HeaderColumns { aliases } => {
                    let header = require_header(header, "read_attributes_from_file")?;

                    for original in aliases.keys() {
                        if header.index_of_header(original).is_none() {
                            return Err(MapperError::resolution(
                                original,
                                format!(
                                    "alias refers to a header that does not exist (headers: {})",
                                    header.header_texts().join(", ")
                                ),
                            ));
                        }
                    }

                    // Names produced by this expansion, and whether each came from an alias
                    let mut expanded: HashMap<String, bool> = HashMap::new();
                    for column in header.columns() {
                        let alias = aliases.get(&column.original);
                        let name = alias.cloned().unwrap_or_else(|| column.identifier.clone());

                        if let Some(&earlier_alias) = expanded.get(&name) {
                            if alias.is_some() || earlier_alias {
                                return Err(MapperError::resolution(
                                    &name,
                                    format!(
                                        "alias collides with another column named '{}'; column '{}' would be dropped",
                                        name, column.original
                                    ),
                                ));
                            }
                            debug!(
                                "Duplicate header identifier '{}'; skipping column {}",
                                name, column.index
                            );
                            continue;
                        }
                        expanded.insert(name.clone(), alias.is_some());

                        if seen.contains_key(&name) {
                            debug!(
                                "Attribute '{}' already bound; skipping column {}",
                                name, column.index
                            );
                            continue;
                        }
                        seen.insert(name.clone(), resolved.len());
                        resolved.push(ResolvedBinding {
                            name,
                            index: column.index,
                            transform: None,
                        });
                    }
                }
                Declaration::HeaderNames(names) => {
                    let header = require_header(header, "add_attributes_by_name")?;

                    for text in names {
                        let index = header.index_of_header(text).ok_or_else(|| {
                            MapperError::resolution(
                                text,
                                format!(
                                    "no header with this exact text (headers: {})",
                                    header.header_texts().join(", ")
                                ),
                            )
                        })?;
                        let name = header
                            .column(index)
                            .map(|column| column.identifier.clone())
                            .unwrap_or_else(|| text.clone());
                        if seen.contains_key(&name) {
                            continue;
                        }
                        seen.insert(name.clone(), resolved.len());
                        resolved.push(ResolvedBinding {
                            name,
                            index,
                            transform: None,
                        });
                    }
                }
            }
        }

        debug!(
            "Resolved {} bindings: {}",
            resolved.len(),
            resolved
                .iter()
                .map(|b| format!("{}=>{}", b.name, b.index))
                .collect::<Vec<_>>()
                .join(", ")
        );
        Ok(resolved)
    }

    /// Map a single raw row without running an import
    ///
    /// Only positional bindings can be resolved here, since there is no
    /// header row.
    pub fn parse_row(&self, row: &StringRecord, functions: &FunctionTable) -> Result<Record> {
        let factory = RecordFactory::new(self.resolve(None, functions)?);
        factory.check_width(row, 0)?;
        factory.produce(row, 0)
    }
}

/// A binding fixed to a column for one import
#[derive(Clone)]
pub struct ResolvedBinding {
    pub name: String,
    pub index: usize,
    pub transform: Option<TransformFn>,
}

impl fmt::Debug for ResolvedBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedBinding")
            .field("name", &self.name)
            .field("index", &self.index)
            .field("transform", &self.transform.is_some())
            .finish()
    }
}

fn resolve_transform(
    binding: &FieldBinding,
    functions: &FunctionTable,
) -> Result<Option<TransformFn>> {
    match binding.transform() {
        None => Ok(None),
        Some(transform) => transform.lookup(functions).map(Some).ok_or_else(|| {
            let transform_name = match transform {
                Transform::Named(name) => name.clone(),
                Transform::Inline(_) => "<inline>".to_string(),
            };
            MapperError::transform_invocation(binding.name(), transform_name)
        }),
    }
}

fn locate(binding: &FieldBinding, header: Option<&NamedColumnIndex>) -> Result<usize> {
    match binding.locator() {
        Locator::Position(index) => Ok(*index),
        Locator::Header(text) => {
            let header = header.ok_or_else(|| {
                MapperError::resolution(
                    binding.name(),
                    format!(
                        "{} needs a header row; enable named_columns() and make sure the source has a row at start_at_row",
                        binding.locator()
                    ),
                )
            })?;
            header.locate(text).ok_or_else(|| {
                MapperError::resolution(
                    binding.name(),
                    format!(
                        "no column matches header '{}' (headers: {})",
                        text,
                        header.header_texts().join(", ")
                    ),
                )
            })
        }
    }
}

fn require_header<'a>(
    header: Option<&'a NamedColumnIndex>,
    operation: &str,
) -> Result<&'a NamedColumnIndex> {
    header.ok_or_else(|| {
        MapperError::resolution(
            operation,
            "no header row available at start_at_row".to_string(),
        )
    })
}
