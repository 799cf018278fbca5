//! FFI (Foreign Function Interface) layer for C integration
//!
//! This module exposes the renderer to host page renderers through a C ABI.
//!
//! # FFI Boundary Contract
//!
//! ## String Representation
//!
//! **All strings use UTF-8 bytes + length (NOT NUL-terminated C strings).**
//!
//! - Pointer field: `*mut u8` / `*const u8`
//! - Length field: `usize` with `_len` suffix (byte count, no terminator)
//!
//! ## Memory Management
//!
//! - Rust allocates all output memory as `Box<[u8]>`
//! - The caller must call `renovar_result_free()` exactly once per result
//! - After free, every pointer in the result is NULL and every length 0
//!
//! ```rust
//! use renovar_markdown::ffi::{renovar_render, renovar_result_free, RenderResult};
//! use std::slice;
//!
//! let text = b"# Hello";
//! let mut result = RenderResult::empty();
//! unsafe { renovar_render(text.as_ptr(), text.len(), &mut result) };
//!
//! assert_eq!(result.error_code, 0);
//! let html = unsafe { slice::from_raw_parts(result.html, result.html_len) };
//! assert_eq!(html, b"<h1>Hello</h1>");
//!
//! unsafe { renovar_result_free(&mut result) };
//! assert!(result.html.is_null());
//! ```
//!
//! ## Error Handling Contract
//!
//! **Success:** `error_code = 0`, `error_message = NULL`, `error_len = 0`.
//! `html` is non-NULL (possibly zero length).
//!
//! **Error:** `error_code != 0`, `error_message` holds a UTF-8 description,
//! `html` and `title` are NULL.
//!
//! Every entry point uses `catch_unwind`; a panic is reported as
//! `ERROR_INTERNAL` and never unwinds into C.
//!
//! ## Thread Safety
//!
//! Rendering keeps no per-call state, so all functions may be called from any
//! thread concurrently. A single `RenderResult` must not be shared between
//! concurrent calls.

use std::panic;
use std::ptr;
use std::slice;

use tracing::{debug, warn};

use crate::error::RenderError;
use crate::page::{PageOptions, PostPage};
use crate::post::Post;
use crate::renderer::render;

// ============================================================================
// Error Code Constants
// ============================================================================

/// Success - no error occurred
pub const ERROR_SUCCESS: u32 = 0;

/// Post JSON could not be decoded
pub const ERROR_PAYLOAD: u32 = 1;

/// Input is not valid UTF-8
pub const ERROR_ENCODING: u32 = 2;

/// Invalid input data (NULL pointers, invalid parameters)
pub const ERROR_INVALID_INPUT: u32 = 5;

/// Internal error (unexpected condition, panic caught)
pub const ERROR_INTERNAL: u32 = 99;

// ============================================================================
// FFI Data Structures
// ============================================================================

/// Post page options passed from C to Rust
///
/// Every field is optional: a NULL pointer with zero length keeps the default
/// (`RENOVAR` for `site_name`, `/blog` for `blog_path`).
///
/// # Example Usage (C)
///
/// ```c
/// const char *site = "RENOVAR";
/// renovar_post_options_t options = {
///     .site_name = (const uint8_t*)site,
///     .site_name_len = strlen(site),
///     .blog_path = NULL,
///     .blog_path_len = 0
/// };
/// ```
#[repr(C)]
pub struct PostOptions {
    /// Site name appended to document titles (UTF-8 bytes, can be NULL)
    pub site_name: *const u8,
    /// Length of site_name in bytes (0 if NULL)
    pub site_name_len: usize,
    /// Listing path used for back links and permalinks (UTF-8 bytes, can be NULL)
    pub blog_path: *const u8,
    /// Length of blog_path in bytes (0 if NULL)
    pub blog_path_len: usize,
}

/// Render result returned from Rust to C
///
/// # State Invariants
///
/// **Success (error_code == 0):**
/// - `html` is non-NULL, `html_len` is its byte length (may be 0)
/// - `title` is non-NULL for post renders, NULL for Markdown and listing renders
/// - `error_message` is NULL
///
/// **Error (error_code != 0):**
/// - `html` and `title` are NULL with zero lengths
/// - `error_message` is non-NULL, `error_len` > 0
#[repr(C)]
pub struct RenderResult {
    /// Rendered HTML (UTF-8 bytes, NOT NUL-terminated)
    pub html: *mut u8,
    /// Length of html in bytes
    pub html_len: usize,
    /// Document title for post renders (UTF-8 bytes, NULL otherwise)
    pub title: *mut u8,
    /// Length of title in bytes
    pub title_len: usize,
    /// Error code: 0=success, non-zero=error (see ERROR_* constants)
    pub error_code: u32,
    /// Error message (UTF-8 bytes, NULL on success)
    pub error_message: *mut u8,
    /// Length of error message in bytes
    pub error_len: usize,
}

impl RenderResult {
    /// A result with every pointer NULL, ready to be populated
    pub fn empty() -> Self {
        Self {
            html: ptr::null_mut(),
            html_len: 0,
            title: ptr::null_mut(),
            title_len: 0,
            error_code: ERROR_SUCCESS,
            error_message: ptr::null_mut(),
            error_len: 0,
        }
    }
}

struct RenderOutput {
    html: Box<[u8]>,
    title: Option<Box<[u8]>>,
}

fn reset_result(result: &mut RenderResult) {
    *result = RenderResult::empty();
}

fn set_error_result(result: &mut RenderResult, error_code: u32, error_message: String) {
    let error_bytes = error_message.into_bytes().into_boxed_slice();
    result.error_code = error_code;
    result.error_len = error_bytes.len();
    result.error_message = Box::into_raw(error_bytes) as *mut u8;
}

fn set_success_result(result: &mut RenderResult, output: RenderOutput) {
    result.html_len = output.html.len();
    result.html = Box::into_raw(output.html) as *mut u8;

    if let Some(title_bytes) = output.title {
        result.title_len = title_bytes.len();
        result.title = Box::into_raw(title_bytes) as *mut u8;
    }
}

fn deliver(result: &mut RenderResult, outcome: std::thread::Result<Result<RenderOutput, RenderError>>) {
    match outcome {
        Ok(Ok(output)) => set_success_result(result, output),
        Ok(Err(e)) => {
            warn!(code = e.code(), error = %e, "Render call rejected");
            set_error_result(result, e.code(), e.to_string());
        }
        Err(_) => {
            warn!("Panic caught at FFI boundary");
            set_error_result(
                result,
                ERROR_INTERNAL,
                "Internal panic during rendering".to_string(),
            );
        }
    }
}

fn required_bytes<'a>(ptr: *const u8, len: usize, name: &str) -> Result<&'a [u8], RenderError> {
    if len == 0 {
        return Ok(&[]);
    }

    if ptr.is_null() {
        return Err(RenderError::InvalidInput(format!(
            "{name}_len > 0 with NULL {name} pointer"
        )));
    }

    // SAFETY: Pointer was validated as non-NULL above; caller guarantees `len`
    // bytes are valid and readable for the duration of this call.
    Ok(unsafe { slice::from_raw_parts(ptr, len) })
}

fn optional_utf8<'a>(
    ptr: *const u8,
    len: usize,
    field_name: &str,
) -> Result<Option<&'a str>, RenderError> {
    let bytes = required_bytes(ptr, len, field_name)?;
    if bytes.is_empty() {
        return Ok(None);
    }
    Ok(Some(std::str::from_utf8(bytes)?))
}

fn page_options(options: *const PostOptions) -> Result<PageOptions, RenderError> {
    let mut page_options = PageOptions::default();
    if options.is_null() {
        return Ok(page_options);
    }

    // SAFETY: Non-NULL pointer; caller guarantees it points to a valid
    // `PostOptions` for the duration of this call.
    let options_ref = unsafe { &*options };

    if let Some(site_name) =
        optional_utf8(options_ref.site_name, options_ref.site_name_len, "site_name")?
    {
        page_options.site_name = site_name.to_string();
    }
    if let Some(blog_path) =
        optional_utf8(options_ref.blog_path, options_ref.blog_path_len, "blog_path")?
    {
        page_options.blog_path = blog_path.to_string();
    }
    Ok(page_options)
}

fn render_inner(text: &[u8]) -> Result<RenderOutput, RenderError> {
    let text = std::str::from_utf8(text)?;
    let html = render(text);
    debug!(
        text_bytes = text.len(),
        html_bytes = html.len(),
        "Rendered Markdown"
    );

    Ok(RenderOutput {
        html: html.into_bytes().into_boxed_slice(),
        title: None,
    })
}

fn render_post_inner(json: &[u8], options: *const PostOptions) -> Result<RenderOutput, RenderError> {
    if json.is_empty() {
        return Err(RenderError::InvalidInput("post JSON is empty".to_string()));
    }

    let page = PostPage::new(page_options(options)?);
    let post = Post::from_json(json)?;
    let rendered = page.render_post(&post);

    Ok(RenderOutput {
        html: rendered.html.into_bytes().into_boxed_slice(),
        title: Some(rendered.title.into_bytes().into_boxed_slice()),
    })
}

fn render_listing_inner(json: &[u8], options: *const PostOptions) -> Result<RenderOutput, RenderError> {
    if json.is_empty() {
        return Err(RenderError::InvalidInput("listing JSON is empty".to_string()));
    }

    let page = PostPage::new(page_options(options)?);
    let posts = Post::list_from_json(json)?;
    let html = page.render_listing(&posts);

    Ok(RenderOutput {
        html: html.into_bytes().into_boxed_slice(),
        title: None,
    })
}

fn free_buffer(ptr_field: &mut *mut u8, len_field: &mut usize) {
    if (*ptr_field).is_null() {
        return;
    }

    let raw = ptr::slice_from_raw_parts_mut(*ptr_field, *len_field);
    // SAFETY: `raw` was allocated by `Box<[u8]>` via `Box::into_raw`.
    let _ = unsafe { Box::from_raw(raw) };
    *ptr_field = ptr::null_mut();
    *len_field = 0;
}

// ============================================================================
// FFI Functions
// ============================================================================

/// Render a Markdown post body to HTML
///
/// # Parameters
///
/// - `text`: UTF-8 Markdown bytes; may be NULL when `text_len == 0`, which
///   renders the absent body (empty HTML)
/// - `text_len`: byte length of `text`
/// - `result`: result structure to populate; previous contents are
///   overwritten without being freed
///
/// # Error Codes
///
/// - `ERROR_INVALID_INPUT` (5): `text` is NULL with a non-zero length
/// - `ERROR_ENCODING` (2): `text` is not valid UTF-8
/// - `ERROR_INTERNAL` (99): panic caught
///
/// # Example (C)
///
/// ```c
/// renovar_result_t result;
/// renovar_render(body, body_len, &result);
/// if (result.error_code == 0) {
///     inject_html(result.html, result.html_len);
/// }
/// renovar_result_free(&result);
/// ```
///
/// # Safety
///
/// - `text` must point to `text_len` readable bytes when non-NULL
/// - `result` must be NULL or point to a writable `RenderResult`
#[unsafe(no_mangle)]
pub unsafe extern "C" fn renovar_render(text: *const u8, text_len: usize, result: *mut RenderResult) {
    // Cannot report an error without a result.
    if result.is_null() {
        return;
    }

    // SAFETY: `result` was validated as non-NULL above.
    let result_ref = unsafe { &mut *result };
    reset_result(result_ref);

    let outcome = panic::catch_unwind(|| -> Result<RenderOutput, RenderError> {
        let text_slice = required_bytes(text, text_len, "text")?;
        render_inner(text_slice)
    });
    deliver(result_ref, outcome);
}

/// Render a post detail card from the backend's post JSON
///
/// On success `result.html` holds the card and `result.title` the document
/// title (`"{title} | {site_name}"`).
///
/// # Parameters
///
/// - `json`: UTF-8 JSON object for one post
/// - `json_len`: byte length of `json`; must be non-zero
/// - `options`: optional overrides, may be NULL
/// - `result`: result structure to populate
///
/// # Error Codes
///
/// - `ERROR_INVALID_INPUT` (5): empty JSON, or a NULL pointer with non-zero length
/// - `ERROR_ENCODING` (2): an option string is not valid UTF-8
/// - `ERROR_PAYLOAD` (1): JSON does not decode as a post
/// - `ERROR_INTERNAL` (99): panic caught
///
/// # Safety
///
/// - `json` must point to `json_len` readable bytes when non-NULL
/// - `options` must be NULL or point to a valid `PostOptions`
/// - `result` must be NULL or point to a writable `RenderResult`
#[unsafe(no_mangle)]
pub unsafe extern "C" fn renovar_render_post(
    json: *const u8,
    json_len: usize,
    options: *const PostOptions,
    result: *mut RenderResult,
) {
    if result.is_null() {
        return;
    }

    // SAFETY: `result` was validated as non-NULL above.
    let result_ref = unsafe { &mut *result };
    reset_result(result_ref);

    let outcome = panic::catch_unwind(|| -> Result<RenderOutput, RenderError> {
        let json_slice = required_bytes(json, json_len, "json")?;
        render_post_inner(json_slice, options)
    });
    deliver(result_ref, outcome);
}

/// Render the blog listing grid from the backend's post array JSON
///
/// Posts are shown newest first. An empty array renders the `NO POSTS YET`
/// empty state. `result.title` stays NULL.
///
/// # Error Codes
///
/// - `ERROR_INVALID_INPUT` (5): empty JSON, or a NULL pointer with non-zero length
/// - `ERROR_ENCODING` (2): an option string is not valid UTF-8
/// - `ERROR_PAYLOAD` (1): JSON is not an array of posts
/// - `ERROR_INTERNAL` (99): panic caught
///
/// # Safety
///
/// - `json` must point to `json_len` readable bytes when non-NULL
/// - `options` must be NULL or point to a valid `PostOptions`
/// - `result` must be NULL or point to a writable `RenderResult`
#[unsafe(no_mangle)]
pub unsafe extern "C" fn renovar_render_listing(
    json: *const u8,
    json_len: usize,
    options: *const PostOptions,
    result: *mut RenderResult,
) {
    if result.is_null() {
        return;
    }

    // SAFETY: `result` was validated as non-NULL above.
    let result_ref = unsafe { &mut *result };
    reset_result(result_ref);

    let outcome = panic::catch_unwind(|| -> Result<RenderOutput, RenderError> {
        let json_slice = required_bytes(json, json_len, "json")?;
        render_listing_inner(json_slice, options)
    });
    deliver(result_ref, outcome);
}

/// Free memory allocated for a render result
///
/// Frees `html`, `title` and `error_message`, then resets every field. Calling
/// it again on the same result is a no-op. A NULL `result` is ignored.
///
/// # Safety
///
/// `result` must be NULL or point to a `RenderResult` populated by
/// `renovar_render()`, `renovar_render_post()`, `renovar_render_listing()`
/// (or `RenderResult::empty()`).
/// Do NOT call C's `free()` on any of its pointers.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn renovar_result_free(result: *mut RenderResult) {
    if result.is_null() {
        return;
    }

    // SAFETY: `result` was validated as non-NULL above.
    let result_ref = unsafe { &mut *result };
    free_buffer(&mut result_ref.html, &mut result_ref.html_len);
    free_buffer(&mut result_ref.title, &mut result_ref.title_len);
    free_buffer(&mut result_ref.error_message, &mut result_ref.error_len);
    result_ref.error_code = ERROR_SUCCESS;
}
