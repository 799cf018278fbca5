//! RENOVAR Markdown Renderer
//!
//! This library turns blog post bodies written in a small Markdown dialect
//! into HTML, and renders the post pages of the RENOVAR website around them.
//! It is callable from Rust or, via FFI, from any host page renderer.
//!
//! # Architecture
//!
//! The library is structured into several modules:
//! - `renderer`: Markdown to HTML block pass
//! - `inline`: Bold, italic, inline code and link substitution
//! - `escape`: Entity escaping for raw text and attribute values
//! - `post`: Post records decoded from the REST backend's JSON
//! - `page`: Page header, post detail card, listing cards, error cards and
//!   document titles
//! - `date`: Published/Updated timestamp formatting
//! - `ffi`: C-compatible interface for host integration
//!
//! # Example
//!
//! ```rust
//! use renovar_markdown::render;
//!
//! let html = render("# Obra concluída\n**Pronto** para *mudança*.");
//! assert_eq!(
//!     html,
//!     "<h1>Obra concluída</h1><p><strong>Pronto</strong> para <em>mudança</em>.</p>"
//! );
//! ```
//!
//! # Safety
//!
//! All FFI functions are marked `unsafe` and document their pointer contracts.
//! Memory allocated by Rust must be freed by Rust via `renovar_result_free`.

// Module declarations
pub mod date;
pub mod error;
pub mod escape;
pub mod ffi;
pub mod inline;
pub mod page;
pub mod post;
pub mod renderer;

// Re-export main types for convenience
pub use error::RenderError;
pub use ffi::{PostOptions, RenderResult};
pub use page::{PageOptions, PostPage, RenderedPost};
pub use post::{Post, PostId};
pub use renderer::{render, render_optional};
