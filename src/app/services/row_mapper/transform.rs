//! Field transforms and the caller's function table
//!
//! A transform receives the whole raw row and the column index its binding
//! resolved to, and returns the value stored in the record. Transforms are
//! either attached inline or referenced by name; named ones are looked up in
//! a [`FunctionTable`] handed to the import engine by the caller.

use csv::StringRecord;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::app::models::Value;
use crate::error::BoxError;

/// Outcome of a single transform call
pub type TransformResult = std::result::Result<Value, BoxError>;

/// Shared transform function `(row, index) -> value`
pub type TransformFn = Arc<dyn Fn(&StringRecord, usize) -> TransformResult + Send + Sync>;

/// Transform attached to a field binding
#[derive(Clone)]
pub enum Transform {
    /// Function supplied directly in the mapping
    Inline(TransformFn),
    /// Name of a function in the caller's function table
    Named(String),
}

impl Transform {
    pub fn inline<F>(function: F) -> Self
    where
        F: Fn(&StringRecord, usize) -> TransformResult + Send + Sync + 'static,
    {
        Transform::Inline(Arc::new(function))
    }

    pub fn named(name: impl Into<String>) -> Self {
        Transform::Named(name.into())
    }

    /// Find the callable for this transform, if it is available
    pub fn lookup(&self, functions: &FunctionTable) -> Option<TransformFn> {
        match self {
            Transform::Inline(function) => Some(Arc::clone(function)),
            Transform::Named(name) => functions.get(name),
        }
    }
}

impl fmt::Debug for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transform::Inline(_) => write!(f, "Inline(<fn>)"),
            Transform::Named(name) => write!(f, "Named({:?})", name),
        }
    }
}

/// Named functions the caller makes available to `map_named`
#[derive(Clone, Default)]
pub struct FunctionTable {
    functions: HashMap<String, TransformFn>,
}

impl FunctionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a function, replacing any previous one with the same name
    pub fn register<F>(&mut self, name: impl Into<String>, function: F) -> &mut Self
    where
        F: Fn(&StringRecord, usize) -> TransformResult + Send + Sync + 'static,
    {
        self.functions.insert(name.into(), Arc::new(function));
        self
    }

    /// Builder-style variant of [`FunctionTable::register`]
    pub fn with<F>(mut self, name: impl Into<String>, function: F) -> Self
    where
        F: Fn(&StringRecord, usize) -> TransformResult + Send + Sync + 'static,
    {
        self.register(name, function);
        self
    }

    pub fn get(&self, name: &str) -> Option<TransformFn> {
        self.functions.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}

impl fmt::Debug for FunctionTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&String> = self.functions.keys().collect();
        names.sort();
        f.debug_struct("FunctionTable")
            .field("functions", &names)
            .finish()
    }
}

fn cell(row: &StringRecord, index: usize) -> std::result::Result<&str, BoxError> {
    row.get(index)
        .ok_or_else(|| format!("row has no column {}", index).into())
}

/// Parse the cell as a signed integer
pub fn integer() -> Transform {
    Transform::inline(|row, index| {
        let value = cell(row, index)?.trim().parse::<i64>()?;
        Ok(Value::Integer(value))
    })
}

/// Parse the cell as a floating point number
pub fn float() -> Transform {
    Transform::inline(|row, index| {
        let value = cell(row, index)?.trim().parse::<f64>()?;
        Ok(Value::Float(value))
    })
}

/// Upper-case the cell text
pub fn upcase() -> Transform {
    Transform::inline(|row, index| Ok(Value::Text(cell(row, index)?.to_uppercase())))
}

/// Strip surrounding whitespace from the cell text
pub fn trimmed() -> Transform {
    Transform::inline(|row, index| Ok(Value::Text(cell(row, index)?.trim().to_string())))
}
