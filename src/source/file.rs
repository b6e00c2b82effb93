//! File-backed item source.

use crate::model::error::InputError;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// An opened item file.
#[derive(Debug)]
pub struct FileSource {
    path: PathBuf,
    file: File,
}

impl FileSource {
    /// Open the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns `InputError::FileNotFound` if the file does not exist.
    /// Returns `InputError::Io` for other I/O errors.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, InputError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(InputError::FileNotFound {
                path: path.to_path_buf(),
            });
        }

        let file = File::open(path)?;
        Ok(Self {
            path: path.to_path_buf(),
            file,
        })
    }

    /// Path the source was opened from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Buffered reader over the file contents.
    pub fn into_reader(self) -> BufReader<File> {
        BufReader::new(self.file)
    }
}
