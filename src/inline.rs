//! Inline formatting pass
//!
//! Runs after block assembly over the whole HTML string, including the tags the
//! block pass emitted. Substitutions are applied in a fixed order:
//!
//! 1. `**text**` → `<strong>text</strong>`
//! 2. `*text*` → `<em>text</em>` (bold spans are already consumed)
//! 3. `` `text` `` → `<code>text</code>`
//! 4. `[label](url)` → `<a href="url" target="_blank" rel="noopener noreferrer">label</a>`
//!
//! Emphasis and code spans are non-greedy and stop at line terminators
//! (`\n`, `\r`, U+2028, U+2029). Link labels and URLs may span lines.
//!
//! The pass is not scoped to text nodes. A `*` or `[..](..)` that ends up inside
//! a generated tag is rewritten too; the only tags the block pass emits carry no
//! attributes, so this only matters for content that itself looks like markup.

use regex::Regex;
use std::sync::OnceLock;

struct InlinePatterns {
    bold: Regex,
    italic: Regex,
    code: Regex,
    link: Regex,
}

fn patterns() -> Option<&'static InlinePatterns> {
    static PATTERNS: OnceLock<Option<InlinePatterns>> = OnceLock::new();
    PATTERNS
        .get_or_init(|| {
            Some(InlinePatterns {
                bold: Regex::new(r"\*\*([^\n\r\x{2028}\x{2029}]*?)\*\*").ok()?,
                italic: Regex::new(r"\*([^\n\r\x{2028}\x{2029}]*?)\*").ok()?,
                code: Regex::new(r"`([^\n\r\x{2028}\x{2029}]*?)`").ok()?,
                link: Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").ok()?,
            })
        })
        .as_ref()
}

/// Apply bold, italic, inline code and link substitutions to assembled HTML
///
/// # Examples
///
/// ```
/// use renovar_markdown::inline::apply_inline;
///
/// assert_eq!(
///     apply_inline("<p>**bold** and *italic*</p>"),
///     "<p><strong>bold</strong> and <em>italic</em></p>"
/// );
/// ```
pub fn apply_inline(html: &str) -> String {
    let Some(patterns) = patterns() else {
        return html.to_string();
    };

    let bold = patterns.bold.replace_all(html, "<strong>${1}</strong>");
    let italic = patterns.italic.replace_all(&bold, "<em>${1}</em>");
    let code = patterns.code.replace_all(&italic, "<code>${1}</code>");
    let linked = patterns.link.replace_all(
        &code,
        r#"<a href="${2}" target="_blank" rel="noopener noreferrer">${1}</a>"#,
    );

    linked.into_owned()
}
