#![no_main]

use diaggen_text::{DiagnosticTextBuilder, TextRecord};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Convert bytes to UTF-8 string (ignore invalid UTF-8)
    if let Ok(s) = std::str::from_utf8(data) {
        let Ok(builder) = DiagnosticTextBuilder::new([]) else {
            return;
        };
        let record = TextRecord::new("fuzz", "fuzz:1", s);
        // Every printer must either succeed or report an error, never panic
        let _ = builder.build_for_definition(&record);
        let _ = builder.build_for_documentation("warning", &record);
        let _ = builder.build_for_enum(&record);
    }
});
