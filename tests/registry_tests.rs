#![cfg(feature = "registry")]

use finident::ValidationErrorCode;
use finident::registry::{self, Registry};
use finident::rules::IdentifierKind;

// ---------------------------------------------------------------------------
// Global routers
// ---------------------------------------------------------------------------

#[test]
fn routers_reach_every_module() {
    assert!(registry::validate_iban("BE68 5390 0754 7034").is_valid());
    assert!(registry::validate_vat("ATU13585627").is_valid());
    assert!(registry::validate_national_id("SE", "811218-9876").is_valid());
    assert!(registry::validate_tax_id("DE", "12345678995").is_valid());
}

#[test]
fn router_prefix_inference() {
    assert_eq!(
        registry::validate_iban("68539007547034").first_code(),
        Some(ValidationErrorCode::InvalidCountryCode)
    );
    assert_eq!(
        registry::validate_vat("").first_code(),
        Some(ValidationErrorCode::InvalidInput)
    );
}

// ---------------------------------------------------------------------------
// Resolution policy
// ---------------------------------------------------------------------------

#[test]
fn zero_candidates_is_unsupported() {
    let registry = Registry::global();
    assert_eq!(
        registry
            .validate(IdentifierKind::Iban, "US", "US12345678901234")
            .first_code(),
        Some(ValidationErrorCode::UnsupportedCountry)
    );
    assert_eq!(
        registry
            .validate(IdentifierKind::NationalId, "DK", "1234567890")
            .first_code(),
        Some(ValidationErrorCode::UnsupportedCountry)
    );
}

#[test]
fn one_candidate_returns_errors_verbatim() {
    // The specific error detail of the single registered validator is
    // preserved through dispatch, message and all.
    let r = Registry::global().validate(IdentifierKind::Iban, "BE", "BE6853900754703");
    assert_eq!(r.first_code(), Some(ValidationErrorCode::InvalidLength));
    assert!(r.errors()[0].message.contains("expected length 16"));

    let r = Registry::global().validate(IdentifierKind::Vat, "SI", "SI50223055");
    assert_eq!(r.first_code(), Some(ValidationErrorCode::InvalidCheckDigit));
}

#[test]
fn many_candidates_accept_first_success() {
    let registry = Registry::global();
    // One KID satisfies only mod 10, the other only mod 11
    assert!(
        registry
            .validate(IdentifierKind::PaymentReference, "NO", "1234566")
            .is_valid()
    );
    assert!(
        registry
            .validate(IdentifierKind::PaymentReference, "NO", "0365327")
            .is_valid()
    );
}

#[test]
fn many_candidates_fail_generically() {
    // Each candidate has its own specific complaint; the dispatcher
    // deliberately reports none of them.
    let r = Registry::global().validate(IdentifierKind::PaymentReference, "NO", "0365321");
    assert_eq!(r.first_code(), Some(ValidationErrorCode::InvalidFormat));
    assert_eq!(r.errors().len(), 1);
}

// ---------------------------------------------------------------------------
// Shelves
// ---------------------------------------------------------------------------

#[test]
fn regional_shelf_covers_all_iban_regions() {
    let registry = Registry::global();
    // One country per region
    for (cc, iban) in [
        ("BE", "BE68539007547034"),
        ("SA", "SA0380000000608010167519"),
        ("EG", "EG380019000500000000263180002"),
        ("BR", "BR1800360305000010009795493C1"),
        ("KZ", "KZ86125KZT5004100100"),
    ] {
        let r = registry.validate(IdentifierKind::Iban, cc, iban);
        assert!(r.is_valid(), "{cc}: {:?}", r.errors());
    }
}

#[test]
fn vat_shelf_uses_vies_prefixes() {
    let registry = Registry::global();
    assert!(
        registry
            .validate(IdentifierKind::Vat, "GR", "094259216")
            .is_valid()
    );
    let supported = registry.supported_countries(IdentifierKind::Vat);
    assert!(supported.contains(&"EL"));
    assert!(supported.contains(&"XI"));
    assert!(!supported.contains(&"GR"));
}

#[test]
fn flat_shelf_coverage() {
    let registry = Registry::global();
    assert_eq!(
        registry.supported_countries(IdentifierKind::BankRouting),
        vec!["DE", "GB", "US"]
    );
    assert_eq!(
        registry.supported_countries(IdentifierKind::BankAccount),
        vec!["FR", "NL"]
    );
    assert!(
        registry
            .supported_countries(IdentifierKind::NationalId)
            .contains(&"NO")
    );
}

#[test]
fn bban_kind_dispatches_without_envelope() {
    assert!(
        Registry::global()
            .validate(IdentifierKind::Bban, "BE", "539007547034")
            .is_valid()
    );
}

#[test]
fn lookups_are_safe_across_threads() {
    let registry = Registry::global();
    std::thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| {
                for _ in 0..50 {
                    assert!(registry
                        .validate(IdentifierKind::Iban, "DE", "DE89370400440532013000")
                        .is_valid());
                }
            });
        }
    });
}
