#![no_main]

use jsift::document::Document;
use jsift::index::{build_value_index, flatten_keys};
use jsift::query::resolve;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Arbitrary bytes as a JSON document: flatten, index
    // and check every indexed value resolves back
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(doc) = Document::from_json_str(text) else {
        return;
    };

    for key in flatten_keys(&doc) {
        assert!(!resolve(doc.root(), &key).is_empty());
    }
    let index = build_value_index(&doc);
    for (_, keys) in index.iter() {
        for key in keys {
            assert!(!resolve(doc.root(), key).is_empty());
        }
    }
});
