#![no_main]

use libfuzzer_sys::fuzz_target;

use folio::sanitizer::{sanitize, sanitize_post};
use folio::seo::add_internal_links;

fuzz_target!(|data: &[u8]| {
    // Arbitrary bytes, lossily decoded; nothing here may panic
    let html = String::from_utf8_lossy(data);

    let clean = sanitize(&html);
    assert_eq!(sanitize(&clean), clean, "sanitizer output is not a fixed point");

    let post = sanitize_post(&html);
    assert!(post.reading_time_minutes >= 1);

    let _ = add_internal_links(&clean, "/blog/fuzz");
});
