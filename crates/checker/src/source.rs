//! Source ingestion for PAL programs.
//!
//! Lines keep their 1-indexed position in the original file so listing
//! entries and log events can point back at the input.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::errors::CheckError;

/// Extension given to the report written next to the input file.
pub const REPORT_EXTENSION: &str = "log";

/// A line of source with its original location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLine {
    /// The source text (without trailing newline).
    pub text: String,
    /// 1-indexed line number in the original file.
    pub number: usize,
}

impl SourceLine {
    /// Creates a source line.
    #[must_use]
    pub fn new(text: impl Into<String>, number: usize) -> Self {
        Self {
            text: text.into(),
            number,
        }
    }
}

/// Splits file content into numbered source lines.
///
/// `\n`, `\r\n` and a lone `\r` each terminate a line.
#[must_use]
pub fn split_lines(content: &str) -> Vec<SourceLine> {
    content
        .replace("\r\n", "\n")
        .replace('\r', "\n")
        .lines()
        .enumerate()
        .map(|(idx, line)| SourceLine::new(line, idx + 1))
        .collect()
}

/// Reads a source file from disk.
///
/// # Errors
///
/// Returns [`CheckError::InputNotFound`] if the file does not exist and
/// [`CheckError::ReadInput`] for any other read failure (including content
/// that is not valid UTF-8).
pub fn load_source(path: &Path) -> Result<Vec<SourceLine>, CheckError> {
    let content = fs::read_to_string(path).map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            CheckError::InputNotFound {
                path: path.to_path_buf(),
            }
        } else {
            CheckError::ReadInput {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    let lines = split_lines(&content);
    debug!(path = %path.display(), lines = lines.len(), "loaded source");
    Ok(lines)
}

/// Derives the default report path: same directory and stem, `.log` extension.
#[must_use]
pub fn default_report_path(input: &Path) -> PathBuf {
    input.with_extension(REPORT_EXTENSION)
}
