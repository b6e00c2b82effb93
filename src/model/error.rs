//! Error types for typeahead.
//!
//! This module defines the error taxonomy using `thiserror` for structured error
//! handling. Errors compose via `?` and `From` conversions.
//!
//! - [`InputError`] - Item file/stdin reading failures (file not found, no input, IO)
//! - [`LookupError`] - Selecting an item by a label or value that is not in the list
//!
//! # Recovery Strategy
//!
//! Conditions inside the filtering core (no match, out-of-range positions, empty
//! lists) are not errors at all: the controller absorbs them, logs through
//! `tracing`, and leaves the UI unchanged. Only input and terminal failures are
//! fatal, and only in the binary.

use std::path::PathBuf;
use thiserror::Error;

/// Errors encountered when reading items from files or stdin.
#[derive(Debug, Error)]
pub enum InputError {
    /// The specified item file does not exist at the given path.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::path::PathBuf;
    /// use typeahead::model::error::InputError;
    ///
    /// let err = InputError::FileNotFound {
    ///     path: PathBuf::from("/tmp/missing.txt")
    /// };
    /// assert!(err.to_string().contains("/tmp/missing.txt"));
    /// ```
    #[error("File not found: {path}")]
    FileNotFound {
        /// The filesystem path that was not found.
        path: PathBuf,
    },

    /// No input source was provided - user must supply a file path or pipe stdin.
    ///
    /// Occurs when stdin is an interactive terminal rather than a pipe.
    ///
    /// ```
    /// use typeahead::model::error::InputError;
    ///
    /// let msg = InputError::NoInput.to_string();
    /// assert!(msg.contains("file path or pipe data to stdin"));
    /// ```
    #[error("No input source: provide a file path or pipe data to stdin")]
    NoInput,

    /// Generic I/O error reading from input source.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Selecting by label or value found nothing.
///
/// The dropdown's selection is left untouched when this is returned.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LookupError {
    /// No item carries this label.
    #[error("No item labeled {0:?}")]
    LabelNotFound(String),

    /// No item carries the requested value.
    #[error("No item with the requested value")]
    ValueNotFound,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_error_converts_into_input_error() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: InputError = io.into();
        assert!(err.to_string().contains("denied"));
    }

    #[test]
    fn label_not_found_names_the_label() {
        let err = LookupError::LabelNotFound("Durian".to_string());
        assert_eq!(err.to_string(), "No item labeled \"Durian\"");
    }
}
