#![no_main]

use finident::payref::{PaymentReferenceFormat, validate_reference};
use libfuzzer_sys::fuzz_target;

const FORMATS: [PaymentReferenceFormat; 8] = [
    PaymentReferenceFormat::IsoRf,
    PaymentReferenceFormat::LocalBelgian,
    PaymentReferenceFormat::LocalFinland,
    PaymentReferenceFormat::LocalNorway,
    PaymentReferenceFormat::LocalSweden,
    PaymentReferenceFormat::LocalSwitzerland,
    PaymentReferenceFormat::LocalSlovenia,
    PaymentReferenceFormat::LocalItaly,
];

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // Every scheme must reject garbage without panicking.
        for format in FORMATS {
            let _ = validate_reference(s, format);
        }
    }
});
