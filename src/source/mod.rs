//! Item input sources.
//!
//! Items are read once, up front, from either a file or piped stdin:
//! - one item per line, blank lines skipped
//! - with a delimiter, a line splits at its first delimiter into label and value
//! - without one, the value is the label

use crate::model::error::InputError;
use crate::model::{Item, ItemList};
use std::io::BufRead;
use std::path::PathBuf;
use tracing::debug;

pub mod file;
pub mod stdin;

pub use file::FileSource;
pub use stdin::StdinSource;

/// Where items come from. Sum type enforces exactly one variant.
#[derive(Debug)]
pub enum InputSource {
    /// A file given on the command line.
    File(FileSource),
    /// Piped stdin.
    Stdin(StdinSource),
}

impl InputSource {
    /// Read every item from the source.
    ///
    /// # Errors
    ///
    /// Returns `InputError::Io` for read failures, including invalid UTF-8.
    pub fn read_items(self, delimiter: Option<&str>) -> Result<ItemList<String>, InputError> {
        let items = match self {
            InputSource::File(file) => parse_items(file.into_reader(), delimiter)?,
            InputSource::Stdin(stdin) => parse_items(stdin.into_reader(), delimiter)?,
        };
        debug!(count = items.len(), "items loaded");
        Ok(items)
    }
}

/// Detect and open the input source.
///
/// # Logic:
/// 1. If a file path is provided: open it
/// 2. If stdin is piped: read stdin
/// 3. Else: `InputError::NoInput`
///
/// # Errors
///
/// Returns `InputError::FileNotFound` if the file does not exist,
/// `InputError::NoInput` if there is no file and stdin is a terminal.
pub fn detect_input_source(file: Option<PathBuf>) -> Result<InputSource, InputError> {
    match file {
        Some(path) => Ok(InputSource::File(FileSource::open(path)?)),
        None => Ok(InputSource::Stdin(StdinSource::new()?)),
    }
}

/// Open the source and read its items in one step.
pub fn read_items(
    file: Option<PathBuf>,
    delimiter: Option<&str>,
) -> Result<ItemList<String>, InputError> {
    detect_input_source(file)?.read_items(delimiter)
}

/// Parse items line by line from any buffered reader.
///
/// Trailing `\r` is stripped so CRLF input behaves like LF input.
pub fn parse_items<R: BufRead>(
    reader: R,
    delimiter: Option<&str>,
) -> Result<ItemList<String>, InputError> {
    let mut items = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let line = line.strip_suffix('\r').unwrap_or(&line);
        if line.trim().is_empty() {
            continue;
        }
        items.push(parse_line(line, delimiter));
    }
    Ok(ItemList::new(items))
}

fn parse_line(line: &str, delimiter: Option<&str>) -> Item<String> {
    match delimiter.filter(|d| !d.is_empty()).and_then(|d| line.split_once(d)) {
        Some((label, value)) => Item::new(label, value.to_string()),
        None => Item::new(line, line.to_string()),
    }
}
