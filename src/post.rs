//! Post records as served by the REST backend
//!
//! The backend returns posts as JSON objects with camelCase keys. Only the
//! fields the pages display are modeled; anything else is ignored.

use serde::{Deserialize, Deserializer};
use std::fmt;

use crate::error::RenderError;

/// Post identifier; the backend emits either numbers or strings
///
/// Any JSON number is accepted, including negative and fractional ones, and
/// is displayed the way `serde_json` prints it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum PostId {
    Number(serde_json::Number),
    Text(String),
}

impl Default for PostId {
    fn default() -> Self {
        PostId::Text(String::new())
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PostId::Number(n) => write!(f, "{n}"),
            PostId::Text(s) => f.write_str(s),
        }
    }
}

/// A blog post
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Post {
    #[serde(deserialize_with = "null_as_default")]
    pub id: PostId,
    pub slug: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    /// Markdown body
    pub content: Option<String>,
    pub label: Option<String>,
    /// Free-form display date set by the author
    pub date: Option<String>,
    /// ISO 8601 creation timestamp
    pub created_at: Option<String>,
    /// ISO 8601 last-edit timestamp
    pub updated: Option<String>,
    pub image: Option<String>,
    pub image_position: Option<String>,
}

/// Explicit `null` decodes like a missing key
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Post {
    /// Decode a single post from JSON bytes
    ///
    /// # Examples
    ///
    /// ```
    /// use renovar_markdown::post::Post;
    ///
    /// let post = Post::from_json(br##"{"id": 7, "title": "Hello", "content": "# Hi"}"##).unwrap();
    /// assert_eq!(post.title, "Hello");
    /// assert_eq!(post.identifier(), "7");
    /// ```
    pub fn from_json(bytes: &[u8]) -> Result<Self, RenderError> {
        Ok(serde_json::from_slice(bytes)?)
    }

    /// Decode a post listing (a JSON array) from bytes
    pub fn list_from_json(bytes: &[u8]) -> Result<Vec<Self>, RenderError> {
        Ok(serde_json::from_slice(bytes)?)
    }

    /// Identifier used in permalinks: the slug when set, otherwise the id
    pub fn identifier(&self) -> String {
        match self.slug.as_deref() {
            Some(slug) if !slug.is_empty() => slug.to_string(),
            _ => self.id.to_string(),
        }
    }

    /// Markdown body, empty when absent
    pub fn content(&self) -> &str {
        self.content.as_deref().unwrap_or_default()
    }
}
