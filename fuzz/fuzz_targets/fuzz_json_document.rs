#![no_main]

use libfuzzer_sys::fuzz_target;
use marginalia::{DocumentStore, JsonDocument};

fuzz_target!(|data: &[u8]| {
    let Ok(dir) = std::env::temp_dir().canonicalize() else {
        return;
    };
    let path = dir.join(format!("marginalia-fuzz-{}.json", std::process::id()));
    if std::fs::write(&path, data).is_ok() {
        // Loading arbitrary bytes as a JSON document should never panic
        let _ = JsonDocument::new("fuzz", &path).load();
        let _ = std::fs::remove_file(&path);
    }
});
