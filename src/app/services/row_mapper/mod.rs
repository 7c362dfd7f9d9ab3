//! Row mapper: declarative mapping of delimited rows into records
//!
//! ## Architecture
//!
//! - [`builder`] - Mapping closure surface that fills a row map
//! - [`row_map`] - Row bounds, delimiter, header mode and field declarations
//! - [`field_binding`] - Name/locator/transform triples
//! - [`column_mapping`] - Header normalization and column lookup
//! - [`transform`] - Inline and named transforms, the caller's function table
//! - [`record_factory`] - Per-row record construction
//! - [`engine`] - Import orchestration
//! - [`stats`] - Row accounting and result structures
//!
//! ## Usage
//!
//! ```rust
//! use csv_mapper::{DelimitedSource, ImportEngine};
//!
//! let engine = ImportEngine::new();
//! let records = engine
//!     .import_source(DelimitedSource::from_text("foo|bar|00|01"), |m| {
//!         m.delimited_by('|');
//!         m.fields(["first", "second"]);
//!     })
//!     .unwrap();
//!
//! assert_eq!(records.len(), 1);
//! assert_eq!(*records[0].get("second").unwrap(), "bar");
//! ```

pub mod builder;
pub mod column_mapping;
pub mod engine;
pub mod field_binding;
pub mod record_factory;
pub mod row_map;
pub mod stats;
pub mod transform;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use builder::MappingBuilder;
pub use column_mapping::{HeaderColumn, NamedColumnIndex};
pub use engine::ImportEngine;
pub use field_binding::{FieldBinding, Locator};
pub use record_factory::RecordFactory;
pub use row_map::{ResolvedBinding, RowMap};
pub use stats::{ImportResult, ImportStats};
pub use transform::{FunctionTable, Transform, TransformFn, TransformResult};
