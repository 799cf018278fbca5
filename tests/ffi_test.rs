//! FFI integration tests
//!
//! These tests verify that the FFI functions work correctly and handle
//! memory management properly.

use proptest::prelude::*;
use renovar_markdown::ffi::*;
use std::ptr;
use std::slice;

fn ffi_render(text: *const u8, text_len: usize, result: *mut RenderResult) {
    unsafe { renovar_markdown::ffi::renovar_render(text, text_len, result) }
}

fn ffi_render_post(
    json: *const u8,
    json_len: usize,
    options: *const PostOptions,
    result: *mut RenderResult,
) {
    unsafe { renovar_markdown::ffi::renovar_render_post(json, json_len, options, result) }
}

fn ffi_render_listing(
    json: *const u8,
    json_len: usize,
    options: *const PostOptions,
    result: *mut RenderResult,
) {
    unsafe { renovar_markdown::ffi::renovar_render_listing(json, json_len, options, result) }
}

fn ffi_result_free(result: *mut RenderResult) {
    unsafe { renovar_markdown::ffi::renovar_result_free(result) }
}

fn bytes_of<'a>(ptr: *const u8, len: usize) -> &'a [u8] {
    if len == 0 {
        return &[];
    }
    unsafe { slice::from_raw_parts(ptr, len) }
}

fn html_of(result: &RenderResult) -> String {
    String::from_utf8(bytes_of(result.html, result.html_len).to_vec()).expect("HTML is UTF-8")
}

fn error_of(result: &RenderResult) -> String {
    String::from_utf8(bytes_of(result.error_message, result.error_len).to_vec())
        .expect("Error is UTF-8")
}

#[test]
fn test_basic_render() {
    let text = b"# Hello World\nThis is a **test**.";
    let mut result = RenderResult::empty();

    ffi_render(text.as_ptr(), text.len(), &mut result);

    assert_eq!(result.error_code, ERROR_SUCCESS);
    assert!(result.error_message.is_null());
    assert!(result.title.is_null());
    assert_eq!(
        html_of(&result),
        "<h1>Hello World</h1><p>This is a <strong>test</strong>.</p>"
    );

    ffi_result_free(&mut result);
    assert!(result.html.is_null());
    assert_eq!(result.html_len, 0);
}

#[test]
fn test_null_text_with_zero_length_is_empty_render() {
    let mut result = RenderResult::empty();

    ffi_render(ptr::null(), 0, &mut result);

    assert_eq!(result.error_code, ERROR_SUCCESS);
    assert!(!result.html.is_null(), "Success always carries an HTML buffer");
    assert_eq!(result.html_len, 0);

    ffi_result_free(&mut result);
}

#[test]
fn test_null_text_with_length_is_invalid_input() {
    let mut result = RenderResult::empty();

    ffi_render(ptr::null(), 10, &mut result);

    assert_eq!(result.error_code, ERROR_INVALID_INPUT);
    assert!(result.html.is_null());
    assert!(error_of(&result).contains("NULL text pointer"));

    ffi_result_free(&mut result);
    assert!(result.error_message.is_null());
    assert_eq!(result.error_code, ERROR_SUCCESS);
}

#[test]
fn test_invalid_utf8_is_encoding_error() {
    let text = [b'#', b' ', 0xff, 0xfe];
    let mut result = RenderResult::empty();

    ffi_render(text.as_ptr(), text.len(), &mut result);

    assert_eq!(result.error_code, ERROR_ENCODING);
    assert!(result.html.is_null());
    assert!(error_of(&result).starts_with("Encoding error"));

    ffi_result_free(&mut result);
}

#[test]
fn test_null_result_is_ignored() {
    let text = b"# Hi";
    ffi_render(text.as_ptr(), text.len(), ptr::null_mut());
    ffi_render_post(text.as_ptr(), text.len(), ptr::null(), ptr::null_mut());
    ffi_result_free(ptr::null_mut());
}

#[test]
fn test_double_free_is_noop() {
    let text = b"* a";
    let mut result = RenderResult::empty();
    ffi_render(text.as_ptr(), text.len(), &mut result);

    ffi_result_free(&mut result);
    ffi_result_free(&mut result);

    assert!(result.html.is_null());
    assert!(result.title.is_null());
    assert!(result.error_message.is_null());
}

#[test]
fn test_render_post_with_defaults() {
    let json = br##"{"id": 3, "title": "Nova obra", "label": "Projetos", "date": "Hoje", "content": "# Fotos"}"##;
    let mut result = RenderResult::empty();

    ffi_render_post(json.as_ptr(), json.len(), ptr::null(), &mut result);

    assert_eq!(result.error_code, ERROR_SUCCESS);
    let title = bytes_of(result.title, result.title_len);
    assert_eq!(title, b"Nova obra | RENOVAR");

    let html = html_of(&result);
    assert!(html.starts_with("<div class=\"header\"><h1>RENOVAR</h1><p>BLOG POST</p></div>"));
    assert!(html.contains("<span class=\"post-label\">Projetos</span>"));
    assert!(html.contains("<span class=\"post-date\">Published: Hoje</span>"));
    assert!(html.contains("<div class=\"post-content\"><h1>Fotos</h1></div>"));
    assert!(html.contains("href=\"/blog\""));

    ffi_result_free(&mut result);
    assert!(result.title.is_null());
    assert_eq!(result.title_len, 0);
}

#[test]
fn test_render_post_with_options() {
    let json = br#"{"id": 1, "title": "T"}"#;
    let site = b"Demo";
    let blog = b"/noticias";
    let options = PostOptions {
        site_name: site.as_ptr(),
        site_name_len: site.len(),
        blog_path: blog.as_ptr(),
        blog_path_len: blog.len(),
    };
    let mut result = RenderResult::empty();

    ffi_render_post(json.as_ptr(), json.len(), &options, &mut result);

    assert_eq!(result.error_code, ERROR_SUCCESS);
    assert_eq!(bytes_of(result.title, result.title_len), b"T | Demo");
    assert!(html_of(&result).contains("href=\"/noticias\""));

    ffi_result_free(&mut result);
}

#[test]
fn test_render_post_option_with_null_pointer() {
    let json = br#"{"id": 1}"#;
    let options = PostOptions {
        site_name: ptr::null(),
        site_name_len: 4,
        blog_path: ptr::null(),
        blog_path_len: 0,
    };
    let mut result = RenderResult::empty();

    ffi_render_post(json.as_ptr(), json.len(), &options, &mut result);

    assert_eq!(result.error_code, ERROR_INVALID_INPUT);
    assert!(error_of(&result).contains("site_name"));

    ffi_result_free(&mut result);
}

#[test]
fn test_render_post_invalid_json() {
    let json = b"{\"title\": ";
    let mut result = RenderResult::empty();

    ffi_render_post(json.as_ptr(), json.len(), ptr::null(), &mut result);

    assert_eq!(result.error_code, ERROR_PAYLOAD);
    assert!(result.html.is_null());
    assert!(result.title.is_null());

    ffi_result_free(&mut result);
}

#[test]
fn test_render_post_empty_json() {
    let mut result = RenderResult::empty();

    ffi_render_post(ptr::null(), 0, ptr::null(), &mut result);

    assert_eq!(result.error_code, ERROR_INVALID_INPUT);

    ffi_result_free(&mut result);
}

#[test]
fn test_render_listing_with_defaults() {
    let json = br#"[{"id": 1, "title": "Velha"}, {"id": 2, "slug": "nova", "title": "Nova"}]"#;
    let mut result = RenderResult::empty();

    ffi_render_listing(json.as_ptr(), json.len(), ptr::null(), &mut result);

    assert_eq!(result.error_code, ERROR_SUCCESS);
    assert!(result.title.is_null());
    let html = html_of(&result);
    assert!(html.starts_with("<div class=\"posts-grid\"><a class=\"post\" href=\"/blog/nova\">"));
    assert!(html.contains("href=\"/blog/1\""));
    assert_eq!(html, renovar_markdown::PostPage::default().render_listing(
        &renovar_markdown::Post::list_from_json(json).unwrap()
    ));

    ffi_result_free(&mut result);
    assert!(result.html.is_null());
}

#[test]
fn test_render_listing_with_options() {
    let json = br#"[{"id": 5}]"#;
    let blog = b"/noticias/";
    let options = PostOptions {
        site_name: ptr::null(),
        site_name_len: 0,
        blog_path: blog.as_ptr(),
        blog_path_len: blog.len(),
    };
    let mut result = RenderResult::empty();

    ffi_render_listing(json.as_ptr(), json.len(), &options, &mut result);

    assert_eq!(result.error_code, ERROR_SUCCESS);
    assert!(html_of(&result).contains("href=\"/noticias/5\""));

    ffi_result_free(&mut result);
}

#[test]
fn test_render_listing_empty_array() {
    let json = b"[]";
    let mut result = RenderResult::empty();

    ffi_render_listing(json.as_ptr(), json.len(), ptr::null(), &mut result);

    assert_eq!(result.error_code, ERROR_SUCCESS);
    assert_eq!(html_of(&result), "<div class=\"empty-state\"><h3>NO POSTS YET</h3></div>");

    ffi_result_free(&mut result);
}

#[test]
fn test_render_listing_errors() {
    let mut result = RenderResult::empty();

    ffi_render_listing(ptr::null(), 0, ptr::null(), &mut result);
    assert_eq!(result.error_code, ERROR_INVALID_INPUT);
    ffi_result_free(&mut result);

    ffi_render_listing(ptr::null(), 3, ptr::null(), &mut result);
    assert_eq!(result.error_code, ERROR_INVALID_INPUT);
    ffi_result_free(&mut result);

    let object = br#"{"id": 1}"#;
    ffi_render_listing(object.as_ptr(), object.len(), ptr::null(), &mut result);
    assert_eq!(result.error_code, ERROR_PAYLOAD);
    assert!(result.html.is_null());
    assert!(error_of(&result).starts_with("Payload error"));
    ffi_result_free(&mut result);
}

#[test]
fn test_result_reused_after_error() {
    let mut result = RenderResult::empty();
    ffi_render(ptr::null(), 1, &mut result);
    assert_eq!(result.error_code, ERROR_INVALID_INPUT);
    ffi_result_free(&mut result);

    let text = b"ok";
    ffi_render(text.as_ptr(), text.len(), &mut result);
    assert_eq!(result.error_code, ERROR_SUCCESS);
    assert!(result.error_message.is_null());
    assert_eq!(html_of(&result), "<p>ok</p>");
    ffi_result_free(&mut result);
}

#[test]
fn test_concurrent_renders() {
    let handles: Vec<_> = (0..4)
        .map(|i| {
            std::thread::spawn(move || {
                let text = format!("## Thread {i}");
                let mut result = RenderResult::empty();
                ffi_render(text.as_ptr(), text.len(), &mut result);
                let html = html_of(&result);
                ffi_result_free(&mut result);
                html
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        assert_eq!(handle.join().unwrap(), format!("<h2>Thread {i}</h2>"));
    }
}

proptest! {
    #[test]
    fn prop_ffi_matches_rust_api(text in "\\PC{0,200}") {
        let mut result = RenderResult::empty();
        ffi_render(text.as_ptr(), text.len(), &mut result);

        prop_assert_eq!(result.error_code, ERROR_SUCCESS);
        prop_assert_eq!(html_of(&result), renovar_markdown::render(&text));

        ffi_result_free(&mut result);
    }

    #[test]
    fn prop_listing_bytes_never_panic(bytes in prop::collection::vec(any::<u8>(), 0..256)) {
        let mut result = RenderResult::empty();
        ffi_render_listing(bytes.as_ptr(), bytes.len(), ptr::null(), &mut result);

        prop_assert!(result.error_code != ERROR_INTERNAL);

        ffi_result_free(&mut result);
    }

    #[test]
    fn prop_arbitrary_bytes_never_panic(bytes in prop::collection::vec(any::<u8>(), 0..256)) {
        let mut result = RenderResult::empty();
        ffi_render(bytes.as_ptr(), bytes.len(), &mut result);

        prop_assert!(result.error_code == ERROR_SUCCESS || result.error_code == ERROR_ENCODING);

        ffi_result_free(&mut result);
    }
}
