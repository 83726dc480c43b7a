use super::*;

const FULL_REPORT: &str = "\
Отчет о трудозатратах за 05.01.2024

1. ABC-123: Fix login
bug in handler
⏱ 2h

2. DEV-7: Review pull requests
⏱ 1h 30m

Итого: 3h 30m";

fn task(code: &str, description: &str) -> TaskEntry {
    TaskEntry {
        code: code.to_string(),
        description: description.to_string(),
    }
}

// --- parse_report ---

#[test]
fn test_date_extracted_anywhere() {
    let record = parse_report("Привет!\nОтчет о трудозатратах за 05.01.2024\n1. A-1: x");
    assert_eq!(record.date.as_deref(), Some("05.01.2024"));
}

#[test]
fn test_date_first_match_wins() {
    let record = parse_report(
        "Отчет о трудозатратах за 05.01.2024\nОтчет о трудозатратах за 06.01.2024",
    );
    assert_eq!(record.date.as_deref(), Some("05.01.2024"));
}

#[test]
fn test_date_not_validated() {
    let record = parse_report("Отчет о трудозатратах за 99.99.0000");
    assert_eq!(record.date.as_deref(), Some("99.99.0000"));
}

#[test]
fn test_missing_date() {
    let record = parse_report("1. ABC-1: Something");
    assert!(record.date.is_none());
    assert_eq!(record.tasks.len(), 1);
}

#[test]
fn test_wrong_date_shape_is_missing() {
    let record = parse_report("Отчет о трудозатратах за 5.1.2024");
    assert!(record.date.is_none());
}

#[test]
fn test_single_task_single_line() {
    let record = parse_report("1. ABC-123: Fix login bug");
    assert_eq!(record.tasks, vec![task("ABC-123", "Fix login bug")]);
}

#[test]
fn test_empty_input() {
    let record = parse_report("");
    assert_eq!(record, ReportRecord::default());
}

#[test]
fn test_continuation_stops_at_clock_marker() {
    let record = parse_report("1. ABC-123: Fix login\nbug in handler\n⏱ 2h");
    assert_eq!(record.tasks, vec![task("ABC-123", "Fix login bug in handler")]);
}

#[test]
fn test_clock_marker_with_variation_selector() {
    let record = parse_report("1. ABC-1: Work\n\u{23F1}\u{FE0F} 1h\ntrailing note");
    assert_eq!(record.tasks, vec![task("ABC-1", "Work")]);
}

#[test]
fn test_lines_after_clock_marker_are_ignored() {
    // The scan stops for good at the marker; later free text is not attached.
    let record = parse_report("1. ABC-1: Work\n⏱ 1h\nlate comment");
    assert_eq!(record.tasks, vec![task("ABC-1", "Work")]);
}

#[test]
fn test_stop_on_next_task() {
    let record = parse_report("1. ABC-1: First\n2. ABC-2: Second");
    assert_eq!(
        record.tasks,
        vec![task("ABC-1", "First"), task("ABC-2", "Second")]
    );
}

#[test]
fn test_malformed_numbered_line_stops_continuation() {
    let record = parse_report("1. ABC-1: First\n2. not a task\nmore text");
    assert_eq!(record.tasks, vec![task("ABC-1", "First")]);
}

#[test]
fn test_blank_lines_skipped_inside_description() {
    // Blank lines do not end a description; the text after them still joins.
    let record = parse_report("1. ABC-1: First\n\n   \nsecond part\n⏱ 1h");
    assert_eq!(record.tasks, vec![task("ABC-1", "First second part")]);
}

#[test]
fn test_task_on_last_line() {
    let record = parse_report("header\n1. ABC-1: Last");
    assert_eq!(record.tasks, vec![task("ABC-1", "Last")]);
}

#[test]
fn test_continuation_runs_to_end_of_input() {
    let record = parse_report("1. ABC-1: One\ntwo\nthree");
    assert_eq!(record.tasks, vec![task("ABC-1", "One two three")]);
}

#[test]
fn test_lines_are_trimmed() {
    let record = parse_report("   1. ABC-1:   Padded   \n\t  tail  \r\n⏱ 1h");
    assert_eq!(record.tasks, vec![task("ABC-1", "Padded tail")]);
}

#[test]
fn test_duplicates_preserved_in_order() {
    let record = parse_report("1. B-2: b\n2. A-1: a\n3. B-2: b");
    let codes: Vec<&str> = record.tasks.iter().map(|t| t.code.as_str()).collect();
    assert_eq!(codes, vec!["B-2", "A-1", "B-2"]);
}

#[test]
fn test_malformed_codes_skipped() {
    let record = parse_report(
        "1. abc-1: lowercase\n2. ABC1: no hyphen\n3. ABC-X: letters\n4. ABC-1 no colon\n5.ABC-1: no space",
    );
    assert!(record.tasks.is_empty());
}

#[test]
fn test_full_report() {
    let record = parse_report(FULL_REPORT);
    assert_eq!(record.date.as_deref(), Some("05.01.2024"));
    assert_eq!(
        record.tasks,
        vec![
            task("ABC-123", "Fix login bug in handler"),
            task("DEV-7", "Review pull requests"),
        ]
    );
}

// --- escape_markdown ---

#[test]
fn test_escape_every_reserved_char() {
    assert_eq!(
        escape_markdown("_*[]()~`>#+-=|{}.!"),
        "\\_\\*\\[\\]\\(\\)\\~\\`\\>\\#\\+\\-\\=\\|\\{\\}\\.\\!"
    );
}

#[test]
fn test_escape_plain_text_untouched() {
    assert_eq!(escape_markdown("Привет мир 42"), "Привет мир 42");
}

#[test]
fn test_escape_leaves_backslash() {
    assert_eq!(escape_markdown("a\\b"), "a\\b");
}

#[test]
fn test_escape_is_not_idempotent() {
    let once = escape_markdown("a.b");
    assert_eq!(once, "a\\.b");
    let twice = escape_markdown(&once);
    assert_eq!(twice, "a\\\\.b");
    assert_ne!(once, twice);
}

// --- format_report ---

#[test]
fn test_format_empty_tasks_is_failure() {
    let rendered = format_report(&ReportRecord {
        date: Some("05.01.2024".to_string()),
        tasks: Vec::new(),
    });
    assert!(!rendered.succeeded);
    assert_eq!(rendered.text, UNRECOGNIZED_REPORT);
}

#[test]
fn test_render_without_tasks_is_failure() {
    let rendered = render("Просто сообщение без задач.");
    assert!(!rendered.succeeded);
    assert_eq!(rendered.text, UNRECOGNIZED_REPORT);
}

#[test]
fn test_format_full_template() {
    let rendered = render(FULL_REPORT);
    assert!(rendered.succeeded);
    let expected = "Всем привет\\!\n\
                    \n\
                    📅 Вчера \\(05\\.01\\.2024\\):\n\
                    \n\
                    • T [ABC\\-123: Fix login bug in handler](https://tracker.yandex.ru/ABC-123)\n\
                    • T [DEV\\-7: Review pull requests](https://tracker.yandex.ru/DEV-7)\n\
                    \n\
                    📅 Сегодня \\(в планах\\):\n\
                    \n\
                    • T\n\
                    • T\n\
                    • T\n\
                    • T\n\
                    • T\n\
                    \n\
                    Всем продуктивного дня\\!";
    assert_eq!(rendered.text, expected);
}

#[test]
fn test_format_missing_date_uses_placeholder() {
    let rendered = render("1. ABC-1: Work");
    assert!(rendered.succeeded);
    assert!(rendered.text.contains("📅 Вчера \\(указанную дату\\):"));
}

#[test]
fn test_url_raw_label_escaped() {
    let rendered = render("1. AB-1: Update v1.2 (hotfix)");
    assert!(rendered
        .text
        .contains("• T [AB\\-1: Update v1\\.2 \\(hotfix\\)](https://tracker.yandex.ru/AB-1)"));
}

#[test]
fn test_custom_tracker_url() {
    let formatter = ReportFormatter::new("https://jira.example.com/browse/");
    assert_eq!(
        formatter.task_url("OPS-9"),
        "https://jira.example.com/browse/OPS-9"
    );
    let rendered = formatter.render("1. OPS-9: Deploy");
    assert!(rendered
        .text
        .contains("(https://jira.example.com/browse/OPS-9)"));
}
