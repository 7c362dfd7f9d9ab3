//! CSV Mapper Library
//!
//! Maps rows of delimited text into named, immutable records. A mapping is
//! declared in a closure instead of hand-written column-index parsing:
//!
//! ```rust
//! use csv_mapper::{ImportOptions, transform};
//!
//! let records = csv_mapper::import("John,Doe,27\nJane,Doe,26", &ImportOptions::io(), |m| {
//!     m.fields(["first_name", "last_name"]);
//!     m.field("age").map_with(transform::integer());
//! })
//! .unwrap();
//!
//! assert_eq!(*records[1].get("first_name").unwrap(), "Jane");
//! assert_eq!(*records[1].get("age").unwrap(), 26i64);
//! ```
//!
//! This library provides:
//! - Positional and header-based field bindings with aliases
//! - Default attribute names derived from header text, with placeholders for blank headers
//! - Row windows (`start_at_row` / `stop_at_row`) and custom delimiters
//! - Inline transforms and transforms looked up by name in a caller-supplied table
//! - Fail-fast resolution: no records are returned when any binding cannot be resolved

pub mod config;
pub mod constants;
pub mod error;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod delimited_source;
        pub mod row_mapper;
    }
}

// Re-export commonly used types
pub use app::models::{FieldNames, Record, Value};
pub use app::services::delimited_source::DelimitedSource;
pub use app::services::row_mapper::transform;
pub use app::services::row_mapper::{
    FieldBinding, FunctionTable, ImportEngine, ImportResult, ImportStats, Locator,
    MappingBuilder, NamedColumnIndex, RowMap, Transform,
};
pub use config::{ImportOptions, InputType};
pub use error::{MapperError, Result};

/// Import with an engine that has no named functions
///
/// `input` is a file path or literal text according to `options`. Fields
/// using `map_named` fail with a transform invocation error; use
/// [`ImportEngine::with_functions`] to make functions available.
pub fn import<F>(input: &str, options: &ImportOptions, configure: F) -> Result<Vec<Record>>
where
    F: FnOnce(&mut MappingBuilder),
{
    ImportEngine::new().import(input, options, configure)
}

/// Evaluate a mapping closure into a [`RowMap`] without importing
pub fn map_csv<F>(configure: F) -> Result<RowMap>
where
    F: FnOnce(&mut MappingBuilder),
{
    MappingBuilder::build(configure)
}
