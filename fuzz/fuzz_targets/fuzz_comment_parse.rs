#![no_main]

use libfuzzer_sys::fuzz_target;
use marginalia::{Comment, CommentStyle};

fuzz_target!(|data: &[u8]| {
    if let Ok(content) = std::str::from_utf8(data) {
        let lines: Vec<&str> = content.lines().collect();
        // Parsing a classified block never fails
        let comment = Comment::parse(&lines).expect("classified block must parse");

        for style in CommentStyle::ALL {
            let _ = Comment::parse_with_style(&lines, style);
            let _ = comment.render(2, style);
        }
    }
});
