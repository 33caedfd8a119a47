#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // Must not panic — errors are fine, panics are bugs.
        let _ = finident::vat::validate_vat(s);
        if let Some(details) = finident::vat::parse_vat(s) {
            let rebuilt = format!("{}{}", details.country_code, details.number);
            assert!(finident::vat::validate_vat(&rebuilt).is_valid());
        }
    }
});
