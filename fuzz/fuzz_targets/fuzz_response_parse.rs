#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // Arbitrary input may be rejected, but decoding never panics.
        let _ = ustid::vies::parse_check_vat_response(s);
    }
});
