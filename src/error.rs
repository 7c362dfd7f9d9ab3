//! Error handling for mapping and import operations.
//!
//! Every failure an import can hit is a variant of [`MapperError`]. Mapping
//! configuration and binding resolution errors are raised before the first
//! record is produced, so an import either returns every record or none.

use thiserror::Error;

/// Boxed error returned by field transforms
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Result type alias for mapping operations
pub type Result<T> = std::result::Result<T, MapperError>;

#[derive(Error, Debug)]
pub enum MapperError {
    /// Invalid row bounds, delimiter or input option
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// A field could not be located in the source
    #[error("Cannot resolve field '{field}': {message}")]
    Resolution { field: String, message: String },

    /// A by-name transform is not available to the caller
    #[error("Transform '{transform}' for field '{field}' is not defined in the calling context")]
    TransformInvocation { field: String, transform: String },

    /// A record was queried for a name it was not bound with
    #[error("Record has no attribute '{name}'")]
    AttributeAccess { name: String },

    /// A transform failed while mapping a row
    #[error("Transform for field '{field}' failed at row {row}: {source}")]
    Transform {
        field: String,
        row: usize,
        #[source]
        source: BoxError,
    },

    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Input file does not exist
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    /// Delimited text could not be tokenized
    #[error("CSV parsing error in '{input}': {message}")]
    CsvParsing {
        input: String,
        message: String,
        #[source]
        source: Option<csv::Error>,
    },
}

impl MapperError {
    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a resolution error for a field
    pub fn resolution(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Resolution {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a transform invocation error
    pub fn transform_invocation(field: impl Into<String>, transform: impl Into<String>) -> Self {
        Self::TransformInvocation {
            field: field.into(),
            transform: transform.into(),
        }
    }

    /// Create an attribute access error
    pub fn attribute_access(name: impl Into<String>) -> Self {
        Self::AttributeAccess { name: name.into() }
    }

    /// Wrap a failure raised by a field transform
    pub fn transform(field: impl Into<String>, row: usize, source: BoxError) -> Self {
        Self::Transform {
            field: field.into(),
            row,
            source,
        }
    }

    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a file not found error
    pub fn file_not_found(path: impl Into<String>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    /// Create a CSV parsing error with context
    pub fn csv_parsing(
        input: impl Into<String>,
        message: impl Into<String>,
        source: Option<csv::Error>,
    ) -> Self {
        Self::CsvParsing {
            input: input.into(),
            message: message.into(),
            source,
        }
    }

    /// True for errors raised while evaluating or resolving the mapping
    pub fn is_mapping_error(&self) -> bool {
        matches!(
            self,
            Self::Configuration { .. } | Self::Resolution { .. } | Self::TransformInvocation { .. }
        )
    }
}

impl From<std::io::Error> for MapperError {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<csv::Error> for MapperError {
    fn from(error: csv::Error) -> Self {
        Self::CsvParsing {
            input: "unknown".to_string(),
            message: "CSV parsing failed".to_string(),
            source: Some(error),
        }
    }
}
