#![no_main]

use libfuzzer_sys::fuzz_target;
use renovar_markdown::ffi::{RenderResult, renovar_render_listing, renovar_result_free};
use std::ptr;

fuzz_target!(|data: &[u8]| {
    let mut result = RenderResult::empty();
    unsafe {
        renovar_render_listing(data.as_ptr(), data.len(), ptr::null(), &mut result);
        renovar_result_free(&mut result);
    }
});
