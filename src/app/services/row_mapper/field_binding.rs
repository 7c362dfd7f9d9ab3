//! Field bindings: the association between a record attribute and a column

use csv::StringRecord;
use std::fmt;

use super::transform::{Transform, TransformResult};

/// How a binding finds its column
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Locator {
    /// Fixed 0-based column index
    Position(usize),
    /// Header text (or normalized identifier) resolved once the header is read
    Header(String),
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locator::Position(index) => write!(f, "column {}", index),
            Locator::Header(name) => write!(f, "header '{}'", name),
        }
    }
}

/// A named attribute bound to a column, with an optional transform
#[derive(Debug, Clone)]
pub struct FieldBinding {
    name: String,
    locator: Locator,
    transform: Option<Transform>,
}

impl FieldBinding {
    pub fn new(name: impl Into<String>, locator: Locator) -> Self {
        Self {
            name: name.into(),
            locator,
            transform: None,
        }
    }

    /// Attach an inline transform `(row, index) -> value`
    ///
    /// Replaces any transform attached earlier.
    pub fn map<F>(&mut self, function: F) -> &mut Self
    where
        F: Fn(&StringRecord, usize) -> TransformResult + Send + Sync + 'static,
    {
        self.transform = Some(Transform::inline(function));
        self
    }

    /// Attach a function from the caller's function table by name
    pub fn map_named(&mut self, function_name: impl Into<String>) -> &mut Self {
        self.transform = Some(Transform::named(function_name));
        self
    }

    /// Attach a prepared transform, e.g. one from [`super::transform::integer`]
    pub fn map_with(&mut self, transform: Transform) -> &mut Self {
        self.transform = Some(transform);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn locator(&self) -> &Locator {
        &self.locator
    }

    pub fn transform(&self) -> Option<&Transform> {
        self.transform.as_ref()
    }

    pub fn has_transform(&self) -> bool {
        self.transform.is_some()
    }
}
