#![no_main]

use libfuzzer_sys::fuzz_target;
use marginalia::CommentStyle;

fuzz_target!(|data: &[u8]| {
    if let Ok(content) = std::str::from_utf8(data) {
        let lines: Vec<&str> = content.lines().collect();
        // Classification is total and deterministic
        assert_eq!(CommentStyle::classify(&lines), CommentStyle::classify(&lines));
    }
});
