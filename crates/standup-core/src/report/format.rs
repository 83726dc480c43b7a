//! MarkdownV2 announcement template.

use super::{escape_markdown, parse_report, Rendered, ReportRecord};

/// Tracker that task codes link to by default.
pub const DEFAULT_TRACKER_URL: &str = "https://tracker.yandex.ru";

/// Reply sent when a report has no recognizable task lines.
pub const UNRECOGNIZED_REPORT: &str =
    "❌ Не удалось распознать задачи в отчете\\. Проверьте формат сообщения\\.";

const GREETING: &str = "Всем привет\\!";
const MISSING_DATE: &str = "указанную дату";
const TODAY_BLOCK: &str = "📅 Сегодня \\(в планах\\):\n\n• T\n• T\n• T\n• T\n• T";
const CLOSING: &str = "Всем продуктивного дня\\!";

/// Renders parsed reports into the team announcement.
#[derive(Debug, Clone)]
pub struct ReportFormatter {
    tracker_url: String,
}

impl Default for ReportFormatter {
    fn default() -> Self {
        Self::new(DEFAULT_TRACKER_URL)
    }
}

impl ReportFormatter {
    /// Create a formatter linking tasks to `tracker_url` (trailing `/` ignored).
    pub fn new(tracker_url: &str) -> Self {
        Self {
            tracker_url: tracker_url.trim_end_matches('/').to_string(),
        }
    }

    /// Link target for a task code. The code is used verbatim.
    pub fn task_url(&self, code: &str) -> String {
        format!("{}/{code}", self.tracker_url)
    }

    /// Parse and render a raw report.
    pub fn render(&self, text: &str) -> Rendered {
        self.format(&parse_report(text))
    }

    /// Render a parsed report.
    pub fn format(&self, record: &ReportRecord) -> Rendered {
        if record.tasks.is_empty() {
            return Rendered {
                text: UNRECOGNIZED_REPORT.to_string(),
                succeeded: false,
            };
        }

        let date = record.date.as_deref().unwrap_or(MISSING_DATE);
        let mut lines = Vec::with_capacity(record.tasks.len() + 4);
        lines.push(format!("{GREETING}\n"));
        lines.push(format!("📅 Вчера \\({}\\):\n", escape_markdown(date)));

        for task in &record.tasks {
            lines.push(format!(
                "• T [{}: {}]({})",
                escape_markdown(&task.code),
                escape_markdown(&task.description),
                self.task_url(&task.code)
            ));
        }

        lines.push(format!("\n{TODAY_BLOCK}"));
        lines.push(format!("\n{CLOSING}"));

        Rendered {
            text: lines.join("\n"),
            succeeded: true,
        }
    }
}

/// Render a parsed report with the default tracker URL.
pub fn format_report(record: &ReportRecord) -> Rendered {
    ReportFormatter::default().format(record)
}
