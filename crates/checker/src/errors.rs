//! Fatal errors raised while setting up a check run.
//!
//! Nothing here describes a problem in the checked program: source problems
//! are [`Diagnostic`](crate::diagnostics::Diagnostic)s and are always
//! recovered. A [`CheckError`] means no report can be produced at all.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// An I/O failure that stops a check run before a report is written.
#[derive(Debug, Error)]
pub enum CheckError {
    /// The input file does not exist.
    #[error("the input file name {} was not found", .path.display())]
    InputNotFound {
        /// Path as given by the user.
        path: PathBuf,
    },
    /// The input file exists but could not be read as text.
    #[error("failed to read {}: {source}", .path.display())]
    ReadInput {
        /// Path as given by the user.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// The report file could not be created or written.
    #[error("failed to write report {}: {source}", .path.display())]
    WriteReport {
        /// Report path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// Reading the input file name from the interactive prompt failed.
    #[error("failed to read input file name: {0}")]
    Prompt(#[source] io::Error),
}

impl CheckError {
    /// Returns true when the run failed because the input file is missing.
    #[must_use]
    pub const fn is_missing_input(&self) -> bool {
        matches!(self, Self::InputNotFound { .. })
    }
}
