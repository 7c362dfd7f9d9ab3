//! Record and value types produced by an import.
//!
//! A [`Record`] is the immutable result of mapping one source row. All
//! records from the same import share one [`FieldNames`] table, so looking a
//! name up costs a hash probe and a vector index.

use crate::error::{MapperError, Result};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// A single mapped value
///
/// Untransformed cells are always [`Value::Text`]; other variants only
/// appear when a transform produces them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Boolean(bool),
    Integer(i64),
    Float(f64),
    Text(String),
}

impl Value {
    /// Borrow the text content, if this is a text value
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(value) => Some(*value),
            _ => None,
        }
    }

    /// Numeric view of the value; integers widen to f64
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(value) => Some(*value),
            Value::Integer(value) => Some(*value as f64),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(value) => Some(*value),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Boolean(value) => write!(f, "{}", value),
            Value::Integer(value) => write!(f, "{}", value),
            Value::Float(value) => write!(f, "{}", value),
            Value::Text(value) => write!(f, "{}", value),
        }
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Integer(i64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

impl PartialEq<&str> for Value {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == Some(*other)
    }
}

impl PartialEq<i64> for Value {
    fn eq(&self, other: &i64) -> bool {
        self.as_integer() == Some(*other)
    }
}

/// Ordered attribute names shared by every record of one import
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldNames {
    names: Vec<String>,
    positions: HashMap<String, usize>,
}

impl FieldNames {
    /// Build the table; names are expected to be unique
    pub fn new(names: Vec<String>) -> Self {
        let positions = names
            .iter()
            .enumerate()
            .map(|(position, name)| (name.clone(), position))
            .collect();

        Self { names, positions }
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.positions.get(name).copied()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// One mapped row
///
/// Records are never mutated after the factory hands them out. Asking for a
/// name that was not bound is an error rather than an empty value.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    fields: Arc<FieldNames>,
    values: Vec<Value>,
    row_number: usize,
}

impl Record {
    pub(crate) fn new(fields: Arc<FieldNames>, values: Vec<Value>, row_number: usize) -> Self {
        debug_assert_eq!(fields.len(), values.len());
        Self {
            fields,
            values,
            row_number,
        }
    }

    /// Get the value bound to `name`
    pub fn get(&self, name: &str) -> Result<&Value> {
        self.fields
            .position(name)
            .and_then(|position| self.values.get(position))
            .ok_or_else(|| MapperError::attribute_access(name))
    }

    /// Get the value bound to `name` as text
    ///
    /// Fails with an attribute access error when the name is unbound, and
    /// returns `None` when the bound value is not text.
    pub fn get_str(&self, name: &str) -> Result<Option<&str>> {
        Ok(self.get(name)?.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.position(name).is_some()
    }

    /// Attribute names in declaration order
    pub fn names(&self) -> &[String] {
        self.fields.names()
    }

    /// Iterate over `(name, value)` pairs in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields
            .names()
            .iter()
            .map(String::as_str)
            .zip(self.values.iter())
    }

    /// Physical row of the source this record was mapped from (0-based)
    pub fn row_number(&self) -> usize {
        self.row_number
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (name, value) in self.iter() {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}
