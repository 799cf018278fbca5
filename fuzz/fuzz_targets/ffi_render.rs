#![no_main]

use libfuzzer_sys::fuzz_target;
use renovar_markdown::ffi::{RenderResult, renovar_render, renovar_result_free};

fuzz_target!(|data: &[u8]| {
    let mut result = RenderResult::empty();
    unsafe {
        renovar_render(data.as_ptr(), data.len(), &mut result);
        renovar_result_free(&mut result);
    }
    assert!(result.html.is_null());
    assert!(result.error_message.is_null());
});
