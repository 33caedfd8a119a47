#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // Must not panic — errors are fine, panics are bugs.
        let _ = finident::iban::validate_iban(s);
        if let Some(details) = finident::iban::parse_iban(s) {
            // A parsed IBAN must re-validate from its own pieces.
            let rebuilt = format!("{}{}{}", details.country_code, details.check_digits, details.bban);
            assert!(finident::iban::validate_iban(&rebuilt).is_valid());
        }
    }
});
