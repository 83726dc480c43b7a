/// Characters that carry meaning in Telegram MarkdownV2.
const RESERVED: [char; 18] = [
    '_', '*', '[', ']', '(', ')', '~', '`', '>', '#', '+', '-', '=', '|', '{', '}', '.', '!',
];

/// Prefix every reserved MarkdownV2 character with a backslash.
///
/// Backslashes are not reserved and pass through unchanged. Escaping is not
/// idempotent: `a.b` becomes `a\.b`, and escaping that again gives `a\\.b`.
pub fn escape_markdown(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + text.len() / 4);
    for c in text.chars() {
        if RESERVED.contains(&c) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
