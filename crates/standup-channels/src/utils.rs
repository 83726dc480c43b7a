//! Shared utilities for channel implementations.

/// Split a long message into chunks that respect a platform's byte limit.
///
/// All slice boundaries are aligned to UTF-8 char boundaries to avoid panics
/// on multi-byte content (Cyrillic, emoji, etc.). Prefers splitting at
/// newline boundaries when possible.
pub fn split_message(text: &str, max_len: usize) -> Vec<&str> {
    if text.len() <= max_len {
        return vec![text];
    }

    let mut chunks = Vec::new();
    let mut start = 0;

    while start < text.len() {
        let end = floor_char_boundary(text, (start + max_len).min(text.len()));
        let break_at = if end < text.len() {
            text[start..end]
                .rfind('\n')
                .map(|i| start + i + 1)
                .unwrap_or(end)
        } else {
            end
        };
        // A limit smaller than one char would never advance.
        let break_at = if break_at == start {
            text[start..]
                .chars()
                .next()
                .map(|c| start + c.len_utf8())
                .unwrap_or(text.len())
        } else {
            break_at
        };
        chunks.push(&text[start..break_at]);
        start = break_at;
    }

    chunks
}

fn floor_char_boundary(text: &str, mut index: usize) -> usize {
    while index > 0 && !text.is_char_boundary(index) {
        index -= 1;
    }
    index
}
