//! Stdin-based listing source for piped input.

use super::{decode_listings, LoadReport};
use crate::model::error::InputError;
use std::io::{BufReader, IsTerminal, Read};

/// Stdin source for piped JSONL input (`cat listings.jsonl | cdir`).
///
/// Reads until EOF on load.
pub struct StdinSource<R: Read> {
    reader: R,
}

impl StdinSource<std::io::Stdin> {
    /// Create a new StdinSource from stdin.
    ///
    /// # Errors
    ///
    /// Returns `InputError::NoInput` if stdin is an interactive terminal,
    /// so the TUI never blocks waiting for keyboard input it cannot show.
    pub fn new() -> Result<Self, InputError> {
        let stdin = std::io::stdin();
        if stdin.is_terminal() {
            return Err(InputError::NoInput);
        }
        Ok(Self { reader: stdin })
    }
}

impl<R: Read> StdinSource<R> {
    /// Create a source over any reader (for testing).
    pub fn from_reader(reader: R) -> Self {
        Self { reader }
    }

    /// Read to EOF and decode every line.
    ///
    /// # Errors
    ///
    /// Returns `InputError::Io` for I/O errors.
    pub fn load(self) -> Result<LoadReport, InputError> {
        decode_listings(BufReader::new(self.reader))
    }
}

impl<R: Read> std::fmt::Debug for StdinSource<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StdinSource").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_reads_until_eof() {
        let data = b"{\"id\":\"1\",\"category\":\"dining\",\"title\":\"Pho 99\"}\n";
        let report = StdinSource::from_reader(&data[..]).load().unwrap();
        assert_eq!(report.listings.len(), 1);
        assert_eq!(report.listings[0].id.as_str(), "1");
    }

    #[test]
    fn load_of_empty_input_is_empty() {
        let report = StdinSource::from_reader(&b""[..]).load().unwrap();
        assert!(report.listings.is_empty());
        assert!(report.errors.is_empty());
    }
}
