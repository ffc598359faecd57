#![no_main]

use libfuzzer_sys::fuzz_target;
use ustid::vat::{VatId, cache_key, is_german_vat, normalize, numeric_body};

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let id = normalize(s);
        let valid = is_german_vat(&id);
        assert_eq!(VatId::parse(s).is_ok(), valid);
        if valid {
            let body = numeric_body(&id);
            let key = cache_key(&id);
            assert_eq!(body.len(), 9);
            assert!(key.is_empty() || key == body);
        }
    }
});
