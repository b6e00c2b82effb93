//! Piped stdin item source.

use crate::model::error::InputError;
use std::io::{IsTerminal, Stdin, StdinLock};

/// Stdin, verified to be a pipe rather than an interactive terminal.
#[derive(Debug)]
pub struct StdinSource {
    stdin: Stdin,
}

impl StdinSource {
    /// Wrap stdin.
    ///
    /// # Errors
    ///
    /// Returns `InputError::NoInput` if stdin is a TTY. Reading it would
    /// block on the keyboard the picker needs.
    pub fn new() -> Result<Self, InputError> {
        let stdin = std::io::stdin();
        if stdin.is_terminal() {
            return Err(InputError::NoInput);
        }
        Ok(Self { stdin })
    }

    /// Locked, buffered reader over stdin.
    pub fn into_reader(self) -> StdinLock<'static> {
        self.stdin.lock()
    }
}
