//! File-based listing source.
//!
//! Read-once: the whole file is decoded when loaded.

use super::{decode_listings, LoadReport};
use crate::model::error::InputError;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// JSONL listing file on disk.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    /// Create a source for `path`.
    ///
    /// # Errors
    ///
    /// Returns `InputError::FileNotFound` if the file does not exist.
    pub fn new(path: impl AsRef<Path>) -> Result<Self, InputError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(InputError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        Ok(Self {
            path: path.to_path_buf(),
        })
    }

    /// Path being read.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and decode every line.
    ///
    /// # Errors
    ///
    /// Returns `InputError::Io` for I/O errors. Malformed lines are not
    /// errors; they are collected in the report.
    pub fn load(&self) -> Result<LoadReport, InputError> {
        let file = File::open(&self.path)?;
        decode_listings(BufReader::new(file))
    }
}
