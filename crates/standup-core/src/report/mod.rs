//! Daily work report parsing and announcement rendering.
//!
//! A report is free text with an optional header date and numbered task
//! lines (`1. ABC-123: description`). It is parsed into a [`ReportRecord`]
//! and rendered back as MarkdownV2 text with tracker links.

mod escape;
mod format;
mod parse;

#[cfg(test)]
mod tests;

pub use escape::escape_markdown;
pub use format::{format_report, ReportFormatter, DEFAULT_TRACKER_URL, UNRECOGNIZED_REPORT};
pub use parse::parse_report;

/// A parsed report. Built per message and discarded after rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportRecord {
    /// Report date as written (`DD.MM.YYYY`), not validated.
    pub date: Option<String>,
    /// Tasks in order of appearance. Duplicates are kept.
    pub tasks: Vec<TaskEntry>,
}

/// One task line of a report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskEntry {
    /// Tracker key such as `ABC-123`.
    pub code: String,
    pub description: String,
}

/// Rendered announcement text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub text: String,
    /// `false` when the text is the "no tasks recognized" apology.
    pub succeeded: bool,
}

/// Parse `text` and render it with the default tracker URL.
pub fn render(text: &str) -> Rendered {
    format_report(&parse_report(text))
}
