#![cfg(feature = "bank")]

use finident::ValidationErrorCode;
use finident::bank::*;

// ---------------------------------------------------------------------------
// Routing numbers
// ---------------------------------------------------------------------------

#[test]
fn aba_routing_numbers() {
    for aba in ["011000015", "111000025", "021000021"] {
        let r = validate_routing_number("US", aba);
        assert!(r.is_valid(), "{aba}: {:?}", r.errors());
    }
}

#[test]
fn aba_checksum_and_prefix() {
    assert_eq!(
        validate_routing_number("US", "111000024").first_code(),
        Some(ValidationErrorCode::InvalidChecksum)
    );
    assert_eq!(
        validate_routing_number("US", "991000025").first_code(),
        Some(ValidationErrorCode::InvalidFormat)
    );
}

#[test]
fn uk_sort_codes() {
    assert!(validate_routing_number("GB", "60-16-13").is_valid());
    assert!(validate_routing_number("gb", "601613").is_valid());
    assert!(!validate_routing_number("GB", "60161").is_valid());
    assert!(!validate_routing_number("GB", "6016A3").is_valid());
}

#[test]
fn german_bankleitzahl() {
    assert!(validate_routing_number("DE", "370 400 44").is_valid());
    assert_eq!(
        validate_routing_number("DE", "07040044").first_code(),
        Some(ValidationErrorCode::InvalidFormat)
    );
}

#[test]
fn routing_parse() {
    let d = parse_routing_number("US", "011000015").unwrap();
    assert_eq!(d.country_code, "US");
    assert_eq!(d.routing_number, "011000015");
    assert!(parse_routing_number("US", "011000016").is_none());
}

// ---------------------------------------------------------------------------
// Account numbers
// ---------------------------------------------------------------------------

#[test]
fn french_rib() {
    assert!(validate_account_number("FR", "20041 01005 0500013M026 06").is_valid());
    assert_eq!(
        validate_account_number("FR", "20041010050500013M02605").first_code(),
        Some(ValidationErrorCode::InvalidChecksum)
    );
    assert_eq!(
        validate_account_number("FR", "20041010050500013M026").first_code(),
        Some(ValidationErrorCode::InvalidLength)
    );
}

#[test]
fn rib_decomposition() {
    let d = parse_account_number("FR", "20041010050500013M02606").unwrap();
    assert_eq!(d.bank_code.as_deref(), Some("20041"));
    assert_eq!(d.branch_code.as_deref(), Some("01005"));
    assert_eq!(d.account_number, "0500013M026");
    assert_eq!(d.check_digits.as_deref(), Some("06"));
}

#[test]
fn dutch_elfproef() {
    assert!(validate_account_number("NL", "0417164300").is_valid());
    assert!(validate_account_number("NL", "417164300").is_valid());
    assert_eq!(
        validate_account_number("NL", "0417164301").first_code(),
        Some(ValidationErrorCode::InvalidChecksum)
    );
}

#[test]
fn unsupported_countries() {
    assert_eq!(
        validate_routing_number("FR", "123456789").first_code(),
        Some(ValidationErrorCode::UnsupportedCountry)
    );
    assert_eq!(
        validate_account_number("US", "123456789").first_code(),
        Some(ValidationErrorCode::UnsupportedCountry)
    );
}
