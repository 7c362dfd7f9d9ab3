//! Test utilities and fixtures for row mapper testing
//!
//! This module provides sample sources and helper functions shared by the
//! row mapper test modules.

use csv::StringRecord;
use std::io::Write;
use tempfile::NamedTempFile;

// Test modules
mod builder_tests;

/// Header plus three people
pub fn people_csv() -> String {
    r#"First Name,Last Name,Age
John,Doe,27
Jane,Doe,26
Bob,Smith,45"#
        .to_string()
}

/// Same people with a blank first header cell
pub fn empty_column_names_csv() -> String {
    r#",First Name,Last Name,Age
unnamed_value,John,Doe,27
unnamed_value,Jane,Doe,26
unnamed_value,Bob,Smith,45"#
        .to_string()
}

/// Five preamble rows before the header
pub fn pushed_down_header_csv() -> String {
    r#"Staff export
generated,2009-01-01
source,hr
,
notes,none
First Name,Last Name,Age
John,Doe,27
Jane,Doe,26
Bob,Smith,45"#
        .to_string()
}

/// Helper to create a temporary file with given content
pub fn create_temp_file(content: &str) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().unwrap();
    writeln!(temp_file, "{}", content).unwrap();
    temp_file
}

/// Install a test-friendly subscriber; `RUST_LOG` overrides the level
pub fn init_test_logging() {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("csv_mapper=debug"));
    let _ = fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}

/// Helper to build a raw row
pub fn row(cells: &[&str]) -> StringRecord {
    StringRecord::from(cells.to_vec())
}

/// Helper to split fixture text into rows the way the source does
pub fn rows(content: &str) -> Vec<StringRecord> {
    crate::DelimitedSource::from_text(content)
        .read_rows(',')
        .unwrap()
}
