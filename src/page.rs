//! Post page presentation
//!
//! Builds the HTML fragments around a rendered post body: the header and
//! detail card shown on a post's own page, the summary cards of the blog
//! listing, and the error cards shown when a post or the listing cannot be
//! loaded.
//!
//! # Date Line
//!
//! The detail card shows one date, picked in this order:
//!
//! 1. `Updated: <updated>` when the post was edited
//! 2. `Published: <createdAt>` when the creation timestamp is known
//! 3. `Published: <date>` with the author's free-form date, verbatim
//!
//! Timestamps are formatted with [`crate::date::format_timestamp`]; one that
//! cannot be parsed is shown as-is.
//!
//! # Examples
//!
//! ```rust
//! use renovar_markdown::page::PostPage;
//! use renovar_markdown::post::Post;
//!
//! let post = Post::from_json(br#"{"id": 1, "title": "Hello", "content": "**hi**"}"#).unwrap();
//! let page = PostPage::default();
//!
//! let rendered = page.render_post(&post);
//! assert_eq!(rendered.title, "Hello | RENOVAR");
//! assert!(rendered.html.contains("<strong>hi</strong>"));
//! ```

use serde::Deserialize;
use tracing::debug;

use crate::date::format_timestamp;
use crate::escape::{escape_attribute, escape_html};
use crate::post::Post;
use crate::renderer::render;

/// Not-found card message for an identifier the backend does not know
pub const POST_NOT_FOUND: &str = "Post not found";

/// Not-found card message for a request without an identifier
pub const NO_POST_SPECIFIED: &str = "No post specified. Please provide a post ID or slug.";

/// Listing error message for a failed fetch
pub const LISTING_UNAVAILABLE: &str =
    "Unable to load posts. Please check your connection and try again.";

/// Presentation options
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PageOptions {
    /// Appended to document titles
    pub site_name: String,
    /// Shown when a post has no label
    pub default_label: String,
    /// Listing path; permalinks are `{blog_path}/{identifier}`
    pub blog_path: String,
    /// Listing image for posts without one
    pub placeholder_image: String,
    /// Summary title length in characters
    pub title_limit: usize,
    /// Summary label length in characters
    pub label_limit: usize,
    /// Summary excerpt length in characters
    pub excerpt_limit: usize,
}

impl Default for PageOptions {
    fn default() -> Self {
        Self {
            site_name: "RENOVAR".to_string(),
            default_label: "Uncategorized".to_string(),
            blog_path: "/blog".to_string(),
            placeholder_image: "https://placehold.co/600x400/000000/FFFFFF?text=POST".to_string(),
            title_limit: 25,
            label_limit: 25,
            excerpt_limit: 50,
        }
    }
}

/// A rendered post detail page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPost {
    /// Document title, e.g. `Hello | RENOVAR`
    pub title: String,
    /// Page header followed by the detail card
    pub html: String,
}

/// Post page renderer
#[derive(Debug, Clone, Default)]
pub struct PostPage {
    options: PageOptions,
}

impl PostPage {
    /// Create a page renderer with custom options
    pub fn new(options: PageOptions) -> Self {
        Self { options }
    }

    /// Document title for a post's page
    pub fn document_title(&self, post: &Post) -> String {
        format!("{} | {}", post.title, self.options.site_name)
    }

    /// Label to display, falling back to the default label
    pub fn label<'a>(&'a self, post: &'a Post) -> &'a str {
        match post.label.as_deref() {
            Some(label) if !label.is_empty() => label,
            _ => &self.options.default_label,
        }
    }

    /// Published/Updated line; empty when the post carries no date at all
    pub fn date_line(&self, post: &Post) -> String {
        if let Some(updated) = non_empty(&post.updated) {
            format!("Updated: {}", display_timestamp(updated))
        } else if let Some(created) = non_empty(&post.created_at) {
            format!("Published: {}", display_timestamp(created))
        } else if let Some(date) = non_empty(&post.date) {
            format!("Published: {date}")
        } else {
            String::new()
        }
    }

    /// Link to a post's detail page
    pub fn permalink(&self, post: &Post) -> String {
        format!(
            "{}/{}",
            self.options.blog_path.trim_end_matches('/'),
            post.identifier()
        )
    }

    /// Site header shown above the detail card
    pub fn render_header(&self) -> String {
        format!(
            "<div class=\"header\"><h1>{}</h1><p>BLOG POST</p></div>",
            escape_html(&self.options.site_name)
        )
    }

    /// Render a post's page: the header, then its detail card
    pub fn render_post(&self, post: &Post) -> RenderedPost {
        let content = render(post.content());
        let mut html = String::with_capacity(content.len() + 512);

        html.push_str(&self.render_header());
        html.push_str("<article class=\"post-card\">");
        html.push_str("<div class=\"post-meta\"><span class=\"post-label\">");
        html.push_str(&escape_html(self.label(post)));
        html.push_str("</span><span class=\"post-date\">");
        html.push_str(&escape_html(&self.date_line(post)));
        html.push_str("</span></div>");
        html.push_str("<h1 class=\"post-title\">");
        html.push_str(&escape_html(&post.title));
        html.push_str("</h1>");
        html.push_str("<div class=\"post-content\">");
        html.push_str(&content);
        html.push_str("</div>");
        html.push_str("<a class=\"back-btn\" href=\"");
        html.push_str(&escape_attribute(&self.options.blog_path));
        html.push_str("\">\u{2190} BACK TO BLOG</a>");
        html.push_str("</article>");

        debug!(
            post = %post.id,
            content_bytes = post.content().len(),
            html_bytes = html.len(),
            "Rendered post page"
        );

        RenderedPost {
            title: self.document_title(post),
            html,
        }
    }

    /// Render a post's listing card
    pub fn render_summary(&self, post: &Post) -> String {
        let image = non_empty(&post.image).unwrap_or(self.options.placeholder_image.as_str());
        let title = truncate(&post.title, self.options.title_limit);
        let excerpt = truncate(post.content(), self.options.excerpt_limit);
        let label = truncate(self.label(post), self.options.label_limit);

        let mut html = String::with_capacity(256);
        html.push_str("<a class=\"post\" href=\"");
        html.push_str(&escape_attribute(&self.permalink(post)));
        html.push_str("\"><img src=\"");
        html.push_str(&escape_attribute(image));
        html.push_str("\" alt=\"");
        html.push_str(&escape_attribute(&post.title));
        html.push_str("\"><div class=\"post-content\"><h2>");
        html.push_str(&escape_html(&title));
        html.push_str("</h2><p>");
        html.push_str(&escape_html(&excerpt));
        html.push_str("</p><div class=\"post-meta\"><span class=\"label\">");
        html.push_str(&escape_html(&label));
        html.push_str("</span><span class=\"date\">");
        html.push_str(&escape_html(post.date.as_deref().unwrap_or_default()));
        html.push_str("</span></div></div></a>");
        html
    }

    /// Render the blog listing, newest post first
    ///
    /// The backend returns posts oldest first.
    pub fn render_listing(&self, posts: &[Post]) -> String {
        if posts.is_empty() {
            return "<div class=\"empty-state\"><h3>NO POSTS YET</h3></div>".to_string();
        }

        let mut html = String::from("<div class=\"posts-grid\">");
        for post in posts.iter().rev() {
            html.push_str(&self.render_summary(post));
        }
        html.push_str("</div>");

        debug!(posts = posts.len(), html_bytes = html.len(), "Rendered post listing");
        html
    }

    /// Card shown in place of a post that could not be found
    ///
    /// `message` is usually [`POST_NOT_FOUND`] or [`NO_POST_SPECIFIED`].
    pub fn render_not_found(&self, message: &str) -> String {
        format!(
            "<div class=\"error-message\">{}<a class=\"back-btn\" href=\"{}\">Back to Blog</a></div>",
            escape_html(message),
            escape_attribute(&self.options.blog_path)
        )
    }

    /// Listing error state; RETRY reloads the listing
    pub fn render_listing_error(&self, message: &str) -> String {
        format!(
            "<div class=\"empty-state\"><h3>UNABLE TO LOAD POSTS</h3><p>{}</p>\
<a class=\"cta-button\" href=\"{}\">RETRY</a></div>",
            escape_html(message),
            escape_attribute(&self.options.blog_path)
        )
    }
}

/// Set means present and non-empty; whitespace counts as set
fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn display_timestamp(raw: &str) -> String {
    format_timestamp(raw).unwrap_or_else(|| raw.to_string())
}

/// Keep the first `limit` characters, appending `...` when anything was cut
fn truncate(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}
