#![no_main]

use libfuzzer_sys::fuzz_target;
use marginalia::YamlDocument;

fuzz_target!(|data: &[u8]| {
    if let Ok(content) = std::str::from_utf8(data) {
        // Reading settings text should never panic, and whatever parses must re-render
        if let Ok(doc) = YamlDocument::from_text("config.yml", content) {
            let _ = doc.to_text();
        }
    }
});
