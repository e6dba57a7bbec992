//! Text report rendering.

use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use tracing::debug;

use crate::checker::CheckResult;
use crate::errors::CheckError;

/// Tool name printed on the first header line.
pub const DEFAULT_TOOL_NAME: &str = "PAL Compiler";
/// Author printed on the second header line.
pub const DEFAULT_AUTHOR: &str = "Matt Kline";
/// Course label printed on the fourth header line.
pub const DEFAULT_COURSE: &str = "CS 3210";

const DATE_FORMAT: &str = "%m-%d-%Y";
const RULE_WIDTH: usize = 50;

/// Fixed lines at the top of every report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportHeader {
    /// Tool name.
    pub tool: String,
    /// Author name.
    pub author: String,
    /// Course label.
    pub course: String,
    /// Run date, printed as `MM-DD-YYYY`.
    pub date: NaiveDate,
}

impl ReportHeader {
    /// Creates a header with the default labels and the given date.
    #[must_use]
    pub fn new(date: NaiveDate) -> Self {
        Self {
            tool: DEFAULT_TOOL_NAME.to_string(),
            author: DEFAULT_AUTHOR.to_string(),
            course: DEFAULT_COURSE.to_string(),
            date,
        }
    }

    /// Creates a header with the default labels dated today (local time).
    #[must_use]
    pub fn today() -> Self {
        Self::new(chrono::Local::now().date_naive())
    }

    /// Replaces the author line.
    #[must_use]
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }

    /// Replaces the course line.
    #[must_use]
    pub fn with_course(mut self, course: impl Into<String>) -> Self {
        self.course = course.into();
        self
    }
}

/// Renders the full report for one check run.
///
/// The result is newline-terminated.
#[must_use]
pub fn render_report(header: &ReportHeader, input: &Path, result: &CheckResult) -> String {
    let mut lines = vec![
        header.tool.clone(),
        header.author.clone(),
        header.date.format(DATE_FORMAT).to_string(),
        header.course.clone(),
        String::new(),
        format!("Program was read from {}", input.display()),
    ];

    lines.extend(
        result
            .listing
            .iter()
            .enumerate()
            .map(|(idx, entry)| format!("{}. {entry}", idx + 1)),
    );

    lines.push(String::new());
    lines.push("Summary".to_string());
    lines.push("-".repeat(RULE_WIDTH));
    lines.push(format!("Total Errors: {}.", result.total_errors()));
    lines.extend(
        result
            .counts
            .non_zero()
            .map(|(category, count)| format!("    {count} {} Errors.", category.summary_label())),
    );

    lines.push(String::new());
    lines.push(format!("Total warnings: {}.", result.warnings.len()));
    lines.extend(result.warnings.iter().map(|warning| format!("    {warning}")));

    lines.push(String::new());
    lines.push(
        if result.has_errors() {
            "PAL Compile completed with errors."
        } else {
            "PAL Compile completed successfully."
        }
        .to_string(),
    );

    let mut report = lines.join("\n");
    report.push('\n');
    report
}

/// Writes a rendered report, replacing any existing file.
///
/// # Errors
///
/// Returns [`CheckError::WriteReport`] if the file cannot be written.
pub fn write_report(path: &Path, report: &str) -> Result<(), CheckError> {
    fs::write(path, report).map_err(|source| CheckError::WriteReport {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), bytes = report.len(), "wrote report");
    Ok(())
}
