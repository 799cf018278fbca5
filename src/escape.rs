//! Entity escaping for raw post text
//!
//! Post bodies are escaped before any Markdown structure is recognized, so a
//! literal `<script>` in the source never becomes a live tag. Only the tags the
//! renderer itself emits are live markup.
//!
//! # Escaping Rules
//!
//! - `&` → `&amp;`
//! - `<` → `&lt;`
//! - `>` → `&gt;`
//!
//! Attribute values written by the page layer additionally escape `"` → `&quot;`.
//!
//! Escaping is a single left-to-right pass: an entity already present in the
//! input (`&lt;`) is escaped again (`&amp;lt;`).

use std::borrow::Cow;

/// Escape `&`, `<` and `>` in text content
///
/// Returns the input unchanged (borrowed) when it contains none of them.
///
/// # Examples
///
/// ```
/// use renovar_markdown::escape::escape_html;
///
/// assert_eq!(escape_html("<script>"), "&lt;script&gt;");
/// assert_eq!(escape_html("fish & chips"), "fish &amp; chips");
/// assert_eq!(escape_html("plain"), "plain");
/// ```
pub fn escape_html(text: &str) -> Cow<'_, str> {
    escape_with(text, false)
}

/// Escape text for use inside a double-quoted attribute value
///
/// # Examples
///
/// ```
/// use renovar_markdown::escape::escape_attribute;
///
/// assert_eq!(escape_attribute("a \"b\" <c>"), "a &quot;b&quot; &lt;c&gt;");
/// ```
pub fn escape_attribute(text: &str) -> Cow<'_, str> {
    escape_with(text, true)
}

fn escape_with(text: &str, quotes: bool) -> Cow<'_, str> {
    let needs_escape = |c: char| matches!(c, '&' | '<' | '>') || (quotes && c == '"');

    let Some(first) = text.find(needs_escape) else {
        return Cow::Borrowed(text);
    };

    let mut escaped = String::with_capacity(text.len() + 16);
    escaped.push_str(&text[..first]);
    for c in text[first..].chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' if quotes => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}
