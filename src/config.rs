//! Import option handling and validation.
//!
//! Options select how the raw input handed to an import is interpreted. Row
//! bounds, delimiter and header mode belong to the mapping itself and are set
//! inside the configuration closure instead.

use crate::constants::{INPUT_TYPE_OPTION, INPUT_TYPES};
use crate::error::{MapperError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// How the input argument of an import is interpreted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputType {
    /// The input is a path to a file on disk
    #[default]
    File,
    /// The input is the delimited text itself
    Io,
}

impl FromStr for InputType {
    type Err = MapperError;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "file" => Ok(InputType::File),
            "io" => Ok(InputType::Io),
            other => Err(MapperError::configuration(format!(
                "Unrecognized input type '{}' (expected one of: {})",
                other,
                INPUT_TYPES.join(", ")
            ))),
        }
    }
}

impl fmt::Display for InputType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputType::File => write!(f, "file"),
            InputType::Io => write!(f, "io"),
        }
    }
}

/// Options accepted by an import call
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportOptions {
    /// Input interpretation, `file` unless stated otherwise
    #[serde(rename = "type", default)]
    pub input_type: InputType,
}

impl ImportOptions {
    /// Options for reading a file path
    pub fn file() -> Self {
        Self {
            input_type: InputType::File,
        }
    }

    /// Options for reading literal delimited text
    pub fn io() -> Self {
        Self {
            input_type: InputType::Io,
        }
    }

    /// Build options from loosely typed key/value pairs such as `("type", "io")`
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut options = Self::default();

        for (key, value) in pairs {
            match key.as_ref().trim() {
                INPUT_TYPE_OPTION => options.input_type = value.as_ref().parse()?,
                other => {
                    return Err(MapperError::configuration(format!(
                        "Unrecognized import option '{}'",
                        other
                    )));
                }
            }
        }

        debug!("Import options: type={}", options.input_type);
        Ok(options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_file() {
        let options = ImportOptions::default();
        assert_eq!(options.input_type, InputType::File);
        assert_eq!(options, ImportOptions::file());
    }

    #[test]
    fn test_input_type_parsing() {
        assert_eq!("file".parse::<InputType>().unwrap(), InputType::File);
        assert_eq!(" IO ".parse::<InputType>().unwrap(), InputType::Io);

        let err = "socket".parse::<InputType>().unwrap_err();
        assert!(matches!(err, MapperError::Configuration { .. }));
        assert!(err.to_string().contains("socket"));
    }

    #[test]
    fn test_from_pairs() {
        let options = ImportOptions::from_pairs([("type", "io")]).unwrap();
        assert_eq!(options.input_type, InputType::Io);

        let options = ImportOptions::from_pairs(Vec::<(String, String)>::new()).unwrap();
        assert_eq!(options.input_type, InputType::File);
    }

    #[test]
    fn test_from_pairs_rejects_unknown_keys_and_values() {
        let err = ImportOptions::from_pairs([("encoding", "utf-8")]).unwrap_err();
        assert!(matches!(err, MapperError::Configuration { .. }));

        let err = ImportOptions::from_pairs([("type", "url")]).unwrap_err();
        assert!(matches!(err, MapperError::Configuration { .. }));
    }

    #[test]
    fn test_input_type_display() {
        assert_eq!(InputType::File.to_string(), "file");
        assert_eq!(InputType::Io.to_string(), "io");
    }
}
