#![no_main]

use folio::domain::services::document_to_html;
use folio::EditorDocument;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(doc) = serde_json::from_slice::<EditorDocument>(data) {
        let _ = document_to_html(&doc);
        let _ = doc.plain_text();
    }
});
