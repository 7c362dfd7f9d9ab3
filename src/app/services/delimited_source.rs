//! Row source for delimited text
//!
//! Tokenization is delegated to the `csv` crate. This module only decides
//! where the bytes come from and hands back every physical row as a
//! [`StringRecord`], blank lines included as empty rows. Readers and file handles are owned by the read call and
//! dropped on every return path.

use csv::{ReaderBuilder, StringRecord};
use std::fmt;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::config::{ImportOptions, InputType};
use crate::constants::FORBIDDEN_DELIMITERS;
use crate::error::{MapperError, Result};

/// Where a source gets its rows from
enum SourceInput {
    Path(PathBuf),
    Text(String),
    Reader(Box<dyn Read>),
    Rows(Vec<StringRecord>),
}

/// Raw input plus the knowledge of how to split it into rows
pub struct DelimitedSource {
    input: SourceInput,
}

impl fmt::Debug for DelimitedSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let description = match &self.input {
            SourceInput::Path(path) => format!("Path({})", path.display()),
            SourceInput::Text(text) => format!("Text({} bytes)", text.len()),
            SourceInput::Reader(_) => "Reader".to_string(),
            SourceInput::Rows(rows) => format!("Rows({})", rows.len()),
        };
        f.debug_struct("DelimitedSource")
            .field("input", &description)
            .finish()
    }
}

impl DelimitedSource {
    /// Read rows from a file on disk
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        Self {
            input: SourceInput::Path(path.as_ref().to_path_buf()),
        }
    }

    /// Read rows from literal delimited text
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            input: SourceInput::Text(text.into()),
        }
    }

    /// Read rows from any byte stream
    pub fn from_reader<R: Read + 'static>(reader: R) -> Self {
        Self {
            input: SourceInput::Reader(Box::new(reader)),
        }
    }

    /// Use rows that are already split into cells; the delimiter is ignored
    pub fn from_rows<I, R, S>(rows: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let rows = rows
            .into_iter()
            .map(|row| row.into_iter().collect::<StringRecord>())
            .collect();
        Self {
            input: SourceInput::Rows(rows),
        }
    }

    /// Interpret `input` according to the import options
    pub fn from_input(input: &str, options: &ImportOptions) -> Self {
        match options.input_type {
            InputType::File => Self::from_path(input),
            InputType::Io => Self::from_text(input),
        }
    }

    /// Short description used in logs and error messages
    pub fn describe(&self) -> String {
        match &self.input {
            SourceInput::Path(path) => path.display().to_string(),
            SourceInput::Text(_) => "<text>".to_string(),
            SourceInput::Reader(_) => "<stream>".to_string(),
            SourceInput::Rows(_) => "<rows>".to_string(),
        }
    }

    /// Consume the source and return every physical row in order
    pub fn read_rows(self, delimiter: char) -> Result<Vec<StringRecord>> {
        let name = self.describe();

        match self.input {
            SourceInput::Rows(rows) => {
                debug!("Using {} pre-split rows; delimiter ignored", rows.len());
                Ok(rows)
            }
            SourceInput::Text(text) => read_delimited(text.as_bytes(), delimiter, &name),
            SourceInput::Reader(mut reader) => {
                let mut bytes = Vec::new();
                reader
                    .read_to_end(&mut bytes)
                    .map_err(|e| MapperError::io(format!("Failed to read {}", name), e))?;
                read_delimited(&bytes, delimiter, &name)
            }
            SourceInput::Path(path) => {
                let bytes = std::fs::read(&path).map_err(|e| {
                    if e.kind() == std::io::ErrorKind::NotFound {
                        MapperError::file_not_found(path.display().to_string())
                    } else {
                        MapperError::io(format!("Failed to read file {}", path.display()), e)
                    }
                })?;
                read_delimited(&bytes, delimiter, &name)
            }
        }
    }
}

/// Convert a delimiter character to the single byte the tokenizer expects
pub fn delimiter_byte(delimiter: char) -> Result<u8> {
    if !delimiter.is_ascii() || FORBIDDEN_DELIMITERS.contains(&delimiter) {
        return Err(MapperError::configuration(format!(
            "Unsupported delimiter {:?}: must be a single ASCII character other than a quote or line break",
            delimiter
        )));
    }
    Ok(delimiter as u8)
}

/// Tokenize delimited bytes, keeping blank lines as empty rows
///
/// The tokenizer drops empty lines, which would shift every physical row
/// number after them. Each record's byte span starts with the terminators of
/// any lines it skipped, so those are counted and reinserted.
fn read_delimited(bytes: &[u8], delimiter: char, name: &str) -> Result<Vec<StringRecord>> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter_byte(delimiter)?)
        .from_reader(bytes);

    let mut rows = Vec::new();
    let mut consumed = 0usize;
    let mut pending_lf = false;
    let mut record = StringRecord::new();
    loop {
        let more = csv_reader.read_record(&mut record).map_err(|e| {
            MapperError::csv_parsing(name, format!("Failed to read row {}", rows.len()), Some(e))
        })?;
        if !more {
            break;
        }

        let end = usize::try_from(csv_reader.position().byte())
            .unwrap_or(bytes.len())
            .min(bytes.len());
        let span = &bytes[consumed..end];
        for _ in 0..blank_lines(span, pending_lf) {
            rows.push(StringRecord::new());
        }
        rows.push(record.clone());

        pending_lf = span.last() == Some(&b'\r');
        consumed = end;
    }

    let trailing = blank_lines(&bytes[consumed..], pending_lf);
    for _ in 0..trailing {
        rows.push(StringRecord::new());
    }

    debug!("Read {} rows from {}", rows.len(), name);
    Ok(rows)
}

/// Count empty lines at the start of a byte span
///
/// `pending_lf` means the previous row ended on a bare `\r`, so a leading
/// `\n` completes that terminator rather than ending a blank line.
fn blank_lines(span: &[u8], pending_lf: bool) -> usize {
    let mut position = usize::from(pending_lf && span.first() == Some(&b'\n'));
    let mut count = 0;
    while let Some(&byte) = span.get(position) {
        match byte {
            b'\n' => position += 1,
            b'\r' => {
                position += 1;
                if span.get(position) == Some(&b'\n') {
                    position += 1;
                }
            }
            _ => break,
        }
        count += 1;
    }
    count
}
