//! Input sanitization applied before user text reaches the agent

/// Escape markup-significant characters
///
/// `&`, `<`, `>`, `"` and `'` are replaced with HTML entities so the text can
/// be rendered without being interpreted as markup. Everything else passes
/// through unchanged; empty input yields an empty string.
pub fn sanitize_input(user_input: &str) -> String {
    let mut sanitized = String::with_capacity(user_input.len());
    for c in user_input.chars() {
        match c {
            '&' => sanitized.push_str("&amp;"),
            '<' => sanitized.push_str("&lt;"),
            '>' => sanitized.push_str("&gt;"),
            '"' => sanitized.push_str("&quot;"),
            '\'' => sanitized.push_str("&#x27;"),
            _ => sanitized.push(c),
        }
    }
    sanitized
}
