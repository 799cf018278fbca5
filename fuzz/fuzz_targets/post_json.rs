#![no_main]

use libfuzzer_sys::fuzz_target;
use renovar_markdown::{Post, PostPage};

fuzz_target!(|data: &[u8]| {
    if let Ok(post) = Post::from_json(data) {
        let page = PostPage::default();
        let _ = page.render_post(&post);
        let _ = page.render_summary(&post);
    }
});
