//! Markdown renderer - transforms post bodies into HTML
//!
//! Post bodies use a small Markdown dialect. The renderer turns them into an
//! HTML fragment ready for injection into a page's content area.
//!
//! # Rendering Strategy
//!
//! Rendering is two passes over the text:
//!
//! 1. **Escape**: `&`, `<` and `>` are replaced with entities across the whole
//!    input, before any structure is recognized.
//! 2. **Block pass**: the escaped text is split on `\n` and scanned line by line.
//!    Three flags track open blocks (code fence, blockquote, list).
//! 3. **Inline pass**: bold, italic, inline code and links are substituted over
//!    the assembled HTML (see [`crate::inline`]).
//!
//! # Line Classification
//!
//! Each line is tested in this order, and the first match wins:
//!
//! | Line starts with | Meaning |
//! |---|---|
//! | `` ``` `` | toggle fenced code block |
//! | (inside code block) | verbatim line |
//! | `> ` | blockquote content |
//! | `### `, `## `, `# ` | `<h3>`, `<h2>`, `<h1>` |
//! | `* ` | list item |
//! | anything else | paragraph, or nothing if blank |
//!
//! Because escaping runs first, the blockquote marker is matched in its
//! escaped form `&gt; `.
//!
//! A blockquote closes on the first line that is not blockquote content. A list
//! closes only on a paragraph or blank line; headers and blockquotes leave it
//! open. At end of input any open list, blockquote and code block are closed,
//! in that order.
//!
//! # Examples
//!
//! Input:
//! ```markdown
//! # Welcome
//! Some **bold** text.
//! * one
//! * two
//! ```
//!
//! Output:
//! ```html
//! <h1>Welcome</h1><p>Some <strong>bold</strong> text.</p><ul><li>one</li><li>two</li></ul>
//! ```
//!
//! # Known Properties
//!
//! - Rendering never fails: malformed Markdown degrades to paragraphs.
//! - Rendering is not idempotent. Feeding the output back in escapes the
//!   generated tags and wraps the result in a paragraph.

use crate::escape::escape_html;
use crate::inline::apply_inline;

const FENCE_MARKER: &str = "```";
const QUOTE_MARKER: &str = "&gt; ";
const LIST_MARKER: &str = "* ";

/// Open-block flags for the line scan
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct BlockState {
    in_code: bool,
    in_quote: bool,
    in_list: bool,
}

impl BlockState {
    /// Append the HTML for one escaped line and update the flags
    fn push_line(&mut self, line: &str, html: &mut String) {
        if line.starts_with(FENCE_MARKER) {
            self.in_code = !self.in_code;
            html.push_str(if self.in_code {
                "<pre><code>"
            } else {
                "</code></pre>"
            });
            return;
        }

        if self.in_code {
            html.push_str(line);
            html.push('\n');
            return;
        }

        if let Some(quoted) = line.strip_prefix(QUOTE_MARKER) {
            if !self.in_quote {
                html.push_str("<blockquote>");
                self.in_quote = true;
            }
            html.push_str(quoted);
            html.push('\n');
            return;
        }

        if self.in_quote {
            html.push_str("</blockquote>");
            self.in_quote = false;
        }

        if let Some((level, text)) = heading(line) {
            push_wrapped(html, HEADING_TAGS[level - 1], text);
        } else if let Some(item) = line.strip_prefix(LIST_MARKER) {
            if !self.in_list {
                html.push_str("<ul>");
                self.in_list = true;
            }
            push_wrapped(html, "li", item);
        } else {
            if self.in_list {
                html.push_str("</ul>");
                self.in_list = false;
            }
            if !line.trim().is_empty() {
                push_wrapped(html, "p", line);
            }
        }
    }

    /// Close whatever is still open at end of input
    fn finish(self, html: &mut String) {
        if self.in_list {
            html.push_str("</ul>");
        }
        if self.in_quote {
            html.push_str("</blockquote>");
        }
        if self.in_code {
            html.push_str("</code></pre>");
        }
    }
}

const HEADING_TAGS: [&str; 3] = ["h1", "h2", "h3"];

/// Match `### `, `## ` or `# `, longest marker first
fn heading(line: &str) -> Option<(usize, &str)> {
    if let Some(text) = line.strip_prefix("### ") {
        Some((3, text))
    } else if let Some(text) = line.strip_prefix("## ") {
        Some((2, text))
    } else {
        line.strip_prefix("# ").map(|text| (1, text))
    }
}

fn push_wrapped(html: &mut String, tag: &str, content: &str) {
    html.push('<');
    html.push_str(tag);
    html.push('>');
    html.push_str(content);
    html.push_str("</");
    html.push_str(tag);
    html.push('>');
}

/// Render a Markdown post body to HTML
///
/// Empty input renders as an empty string. Every other input, however
/// malformed, produces a sequence of closed block elements.
///
/// # Examples
///
/// ```
/// use renovar_markdown::render;
///
/// assert_eq!(render(""), "");
/// assert_eq!(render("# Title"), "<h1>Title</h1>");
/// assert_eq!(render("<script>"), "<p>&lt;script&gt;</p>");
/// assert_eq!(render("* a\n* b"), "<ul><li>a</li><li>b</li></ul>");
/// ```
pub fn render(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let escaped = escape_html(text);
    let mut html = String::with_capacity(escaped.len() + escaped.len() / 2);
    let mut state = BlockState::default();

    for line in escaped.split('\n') {
        state.push_line(line, &mut html);
    }
    state.finish(&mut html);

    apply_inline(&html)
}

/// Render an optional post body; an absent body renders as an empty string
///
/// # Examples
///
/// ```
/// use renovar_markdown::render_optional;
///
/// assert_eq!(render_optional(None), "");
/// assert_eq!(render_optional(Some("## Hi")), "<h2>Hi</h2>");
/// ```
pub fn render_optional(text: Option<&str>) -> String {
    text.map(render).unwrap_or_default()
}
