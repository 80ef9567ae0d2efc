//! HTML escaping for payload-sourced text.

/// Escape text for interpolation into markup. Neutralizes the characters
/// that can open or close tags, attributes, or template literals:
/// `&`, `<`, `>`, `"`, `'` and the backtick.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            '`' => out.push_str("&#x60;"),
            _ => out.push(c),
        }
    }
    out
}
