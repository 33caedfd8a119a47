#![no_main]

use finident::registry::Registry;
use finident::rules::IdentifierKind;
use libfuzzer_sys::fuzz_target;

const KINDS: [IdentifierKind; 8] = [
    IdentifierKind::Iban,
    IdentifierKind::Bban,
    IdentifierKind::Vat,
    IdentifierKind::TaxId,
    IdentifierKind::NationalId,
    IdentifierKind::BankRouting,
    IdentifierKind::BankAccount,
    IdentifierKind::PaymentReference,
];

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let (cc, value) = if s.is_char_boundary(2) { s.split_at(2) } else { ("", s) };
        let registry = Registry::global();
        for kind in KINDS {
            let _ = registry.validate(kind, cc, value);
        }
    }
});
