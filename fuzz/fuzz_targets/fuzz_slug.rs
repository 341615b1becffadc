#![no_main]

use folio::domain::value_objects::{generate_path, generate_slug, title_from_filename};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(title) = std::str::from_utf8(data) {
        let slug = generate_slug(title);
        assert!(!slug.starts_with('-') && !slug.ends_with('-'));
        assert!(generate_path(title).ends_with(".html"));
        let _ = title_from_filename(title);
    }
});
