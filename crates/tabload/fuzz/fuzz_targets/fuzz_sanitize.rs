//! Fuzz target for table name sanitization.

#![no_main]

use libfuzzer_sys::fuzz_target;
use tabload::{derive_name, sanitize};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    let name = sanitize(text);
    assert!(!name.is_empty());
    assert_eq!(sanitize(&name), name);

    let _ = derive_name(text, None);
    let _ = derive_name("https://example.org/data.csv", Some(text));
});
