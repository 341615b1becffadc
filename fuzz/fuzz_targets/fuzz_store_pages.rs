#![no_main]

use folio::domain::ports::KeyValueStore;
use folio::infrastructure::MemoryStore;
use folio::SharedPageStorage;
use libfuzzer_sys::fuzz_target;

// Whatever sits under the pages key, loading either fails cleanly or yields
// a consistent tree.
fuzz_target!(|data: &[u8]| {
    if let Ok(raw) = std::str::from_utf8(data) {
        let store = MemoryStore::new();
        if store.set(folio::application::PAGES_KEY, raw).is_err() {
            return;
        }
        if let Ok(storage) = SharedPageStorage::open(store) {
            assert!(storage.tree_is_consistent());
        }
    }
});
