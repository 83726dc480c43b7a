//! Line scanner that extracts the date and task entries from a report.

use super::{ReportRecord, TaskEntry};
use regex::Regex;
use std::sync::OnceLock;

/// Line prefix that marks time-spent metadata and ends a task description.
const CLOCK_MARKER: char = '\u{23F1}';

static DATE_REGEX: OnceLock<Regex> = OnceLock::new();
static TASK_REGEX: OnceLock<Regex> = OnceLock::new();
static NUMBERED_REGEX: OnceLock<Regex> = OnceLock::new();

fn date_regex() -> &'static Regex {
    DATE_REGEX.get_or_init(|| {
        Regex::new(r"Отчет о трудозатратах за (\d{2}\.\d{2}\.\d{4})").expect("DATE_REGEX is valid")
    })
}

/// `1. ABC-123: description`, matched against a trimmed line.
fn task_regex() -> &'static Regex {
    TASK_REGEX.get_or_init(|| {
        Regex::new(r"^\d+\.\s+([A-Z]+-\d+):\s+(.+)").expect("TASK_REGEX is valid")
    })
}

/// Any numbered item, well-formed task or not.
fn numbered_regex() -> &'static Regex {
    NUMBERED_REGEX.get_or_init(|| Regex::new(r"^\d+\.").expect("NUMBERED_REGEX is valid"))
}

enum ScanState {
    Idle,
    Accumulating(TaskEntry),
}

/// Parse a free-text report.
///
/// Never fails: a report without a date yields `date: None`, a report
/// without task lines yields an empty `tasks` list.
pub fn parse_report(message: &str) -> ReportRecord {
    let date = date_regex()
        .captures(message)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string());

    let mut tasks = Vec::new();
    let mut state = ScanState::Idle;

    for raw in message.split('\n') {
        let line = raw.trim();

        let ends_task = line.starts_with(CLOCK_MARKER) || numbered_regex().is_match(line);

        if let ScanState::Accumulating(task) = &mut state {
            if !ends_task {
                // Blank lines neither end the description nor extend it.
                if !line.is_empty() {
                    task.description.push(' ');
                    task.description.push_str(line);
                }
                continue;
            }
        }

        if let ScanState::Accumulating(task) = std::mem::replace(&mut state, ScanState::Idle) {
            tasks.push(task);
        }

        if let Some(caps) = task_regex().captures(line) {
            state = ScanState::Accumulating(TaskEntry {
                code: caps[1].to_string(),
                description: caps[2].trim().to_string(),
            });
        }
    }

    if let ScanState::Accumulating(task) = state {
        tasks.push(task);
    }

    ReportRecord { date, tasks }
}
