//! Header analysis and column lookup
//!
//! A header row is indexed twice: once by its original (trimmed) text, which
//! explicit names and alias maps refer to, and once by a normalized
//! identifier used as the default attribute name.

use csv::StringRecord;
use regex::Regex;
use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;
use tracing::debug;

use crate::constants::{IDENTIFIER_SEPARATOR, PLACEHOLDER_PREFIX};

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace pattern"));
static NON_IDENTIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9_]+").expect("valid identifier pattern"));

/// Header cell text without a leading byte-order mark or surrounding whitespace
pub fn clean_header(raw: &str) -> &str {
    raw.trim_start_matches('\u{feff}').trim()
}

/// Normalize header text into an attribute identifier
///
/// Strips a byte-order mark, trims, lower-cases, turns whitespace runs into `_` and drops every other
/// character outside `[a-z0-9_]`. May return an empty string.
pub fn normalize_header(raw: &str) -> String {
    let lowered = clean_header(raw).to_lowercase();
    let joined = WHITESPACE_RUN.replace_all(&lowered, IDENTIFIER_SEPARATOR);
    NON_IDENTIFIER.replace_all(&joined, "").into_owned()
}

/// Placeholder attribute name for a blank header at a 0-based column index
pub fn placeholder_name(index: usize) -> String {
    format!("{}{}", PLACEHOLDER_PREFIX, index + 1)
}

/// One analyzed header cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderColumn {
    pub index: usize,
    /// Header text with byte-order mark and surrounding whitespace removed
    pub original: String,
    /// Attribute name derived from the header text
    pub identifier: String,
    /// True when the identifier is a synthesized placeholder
    pub placeholder: bool,
}

/// Column lookup built from a header row
#[derive(Debug, Clone, Default)]
pub struct NamedColumnIndex {
    columns: Vec<HeaderColumn>,
    by_original: HashMap<String, usize>,
    by_identifier: HashMap<String, usize>,
}

impl NamedColumnIndex {
    /// Analyze a header row
    pub fn build(header: &StringRecord) -> Self {
        let mut columns: Vec<HeaderColumn> = header
            .iter()
            .enumerate()
            .map(|(index, raw)| HeaderColumn {
                index,
                original: clean_header(raw).to_string(),
                identifier: normalize_header(raw),
                placeholder: false,
            })
            .collect();

        // Placeholders must not shadow any identifier a real header produced.
        let taken: HashSet<String> = columns
            .iter()
            .filter(|column| !column.identifier.is_empty())
            .map(|column| column.identifier.clone())
            .collect();
        for column in columns.iter_mut().filter(|c| c.identifier.is_empty()) {
            let mut name = placeholder_name(column.index);
            while taken.contains(&name) {
                name.push_str(IDENTIFIER_SEPARATOR);
            }
            column.identifier = name;
            column.placeholder = true;
        }

        let mut by_original = HashMap::new();
        let mut by_identifier = HashMap::new();
        for column in &columns {
            if !column.original.is_empty() {
                by_original
                    .entry(column.original.clone())
                    .or_insert(column.index);
            }
            by_identifier
                .entry(column.identifier.clone())
                .or_insert(column.index);
        }

        debug!(
            "Column index: {} columns, {} placeholders, {} distinct identifiers",
            columns.len(),
            columns.iter().filter(|c| c.placeholder).count(),
            by_identifier.len()
        );

        Self {
            columns,
            by_original,
            by_identifier,
        }
    }

    /// Index of the column whose original header text is exactly `text`
    pub fn index_of_header(&self, text: &str) -> Option<usize> {
        self.by_original.get(text.trim()).copied()
    }

    /// Index of the column whose normalized identifier is `identifier`
    pub fn index_of_identifier(&self, identifier: &str) -> Option<usize> {
        self.by_identifier.get(identifier).copied()
    }

    /// Locate a column by original text, falling back to the identifier
    pub fn locate(&self, name: &str) -> Option<usize> {
        self.index_of_header(name)
            .or_else(|| self.index_of_identifier(name))
    }

    pub fn column(&self, index: usize) -> Option<&HeaderColumn> {
        self.columns.get(index)
    }

    pub fn columns(&self) -> &[HeaderColumn] {
        &self.columns
    }

    /// Number of header cells
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// Original header texts, for error messages
    pub fn header_texts(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.original.as_str()).collect()
    }
}
