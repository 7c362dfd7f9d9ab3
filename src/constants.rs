//! Default values and naming constants used across the mapper.

// =============================================================================
// Row Map Defaults
// =============================================================================

/// Delimiter used when a mapping does not call `delimited_by`
pub const DEFAULT_DELIMITER: char = ',';

/// First physical row considered when a mapping does not call `start_at_row`
pub const DEFAULT_START_ROW: usize = 0;

/// Characters the tokenizer cannot accept as a field delimiter
pub const FORBIDDEN_DELIMITERS: &[char] = &['"', '\n', '\r'];

// =============================================================================
// Header Naming
// =============================================================================

/// Prefix for attribute names synthesized for blank header cells.
///
/// The full name is the prefix followed by the 1-based column position,
/// e.g. `_field_1` for a blank first column.
pub const PLACEHOLDER_PREFIX: &str = "_field_";

/// Separator that replaces whitespace runs in normalized header names
pub const IDENTIFIER_SEPARATOR: &str = "_";

// =============================================================================
// Input Options
// =============================================================================

/// Option key selecting how the input argument is interpreted
pub const INPUT_TYPE_OPTION: &str = "type";

/// Recognized values for the input type option
pub const INPUT_TYPES: &[&str] = &["file", "io"];
