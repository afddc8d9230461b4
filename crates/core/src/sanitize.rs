//! Free-text and identifier sanitization applied at the API boundary
//! before values reach persistence.

/// Trim surrounding whitespace and escape HTML-significant characters.
///
/// Mirrors what a reverse proxy cannot do for us: stored text is later
/// rendered in registry UIs, so `<`, `>`, `&`, quotes and `/` are
/// entity-escaped rather than rejected.
pub fn sanitize_text(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.trim().chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            '/' => out.push_str("&#x2F;"),
            other => out.push(other),
        }
    }
    out
}

/// Keep only digits from a phone number.
pub fn sanitize_phone(input: &str) -> String {
    input.chars().filter(|c| c.is_ascii_digit()).collect()
}
