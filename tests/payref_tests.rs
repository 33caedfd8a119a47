#![cfg(feature = "payref")]

use finident::ValidationErrorCode;
use finident::payref::*;

use PaymentReferenceFormat::*;

// ---------------------------------------------------------------------------
// ISO 11649
// ---------------------------------------------------------------------------

#[test]
fn rf_reference() {
    assert!(validate_reference("RF18539007547034", IsoRf).is_valid());
    assert!(validate_reference("RF18 5390 0754 7034", IsoRf).is_valid());
    assert_eq!(
        validate_reference("RF02539007547034", IsoRf).first_code(),
        Some(ValidationErrorCode::InvalidChecksum)
    );
}

#[test]
fn rf_structure() {
    assert_eq!(
        validate_reference("XX18539007547034", IsoRf).first_code(),
        Some(ValidationErrorCode::InvalidFormat)
    );
    // 21-character payload is the ceiling
    assert_eq!(
        validate_reference("RF181234567890123456789012", IsoRf).first_code(),
        Some(ValidationErrorCode::InvalidLength)
    );
}

// ---------------------------------------------------------------------------
// National schemes
// ---------------------------------------------------------------------------

#[test]
fn belgian_structured_communication() {
    assert!(validate_reference("+++090/9337/55493+++", LocalBelgian).is_valid());
    assert!(validate_reference("000000009797", LocalBelgian).is_valid());
    assert_eq!(
        validate_reference("090933755492", LocalBelgian).first_code(),
        Some(ValidationErrorCode::InvalidCheckDigit)
    );
}

#[test]
fn finnish_viite() {
    assert!(validate_reference("1232", LocalFinland).is_valid());
    assert!(validate_reference("1234561", LocalFinland).is_valid());
    assert!(!validate_reference("1234560", LocalFinland).is_valid());
}

#[test]
fn norwegian_kid() {
    assert!(validate_reference("1234566", LocalNorway).is_valid());
    assert!(validate_reference("0365327", LocalNorway).is_valid());
    // Mod 10 expects a trailing 0 here and mod 11 a trailing 7, so this
    // fails under both schemes.
    assert_eq!(
        validate_reference("0365321", LocalNorway).first_code(),
        Some(ValidationErrorCode::InvalidChecksum)
    );
}

#[test]
fn swedish_ocr() {
    assert!(validate_reference("1234574", LocalSweden).is_valid());
    // Right Luhn digit but wrong length digit
    assert!(!validate_reference("1234582", LocalSweden).is_valid());
}

#[test]
fn swiss_esr() {
    assert!(validate_reference("21 00000 00003 13947 14300 09017", LocalSwitzerland).is_valid());
    assert!(!validate_reference("210000000003139471430009016", LocalSwitzerland).is_valid());
}

#[test]
fn slovenian_model_12() {
    assert!(validate_reference("SI12 12345679", LocalSlovenia).is_valid());
    assert!(!validate_reference("SI12 12345670", LocalSlovenia).is_valid());
}

#[test]
fn italian_avviso() {
    assert!(validate_reference("123456789012345671", LocalItaly).is_valid());
    assert_eq!(
        validate_reference("12345678901234567", LocalItaly).first_code(),
        Some(ValidationErrorCode::InvalidLength)
    );
}

// ---------------------------------------------------------------------------
// Format discipline
// ---------------------------------------------------------------------------

#[test]
fn wrong_format_tag_rejected_up_front() {
    assert_eq!(
        validate_reference("RF18539007547034", LocalFinland).first_code(),
        Some(ValidationErrorCode::InvalidFormat)
    );
    assert_eq!(
        validate_reference("090933755493", IsoRf).first_code(),
        Some(ValidationErrorCode::InvalidFormat)
    );
    assert_eq!(
        validate_reference("RF18539007547034", LocalSlovenia).first_code(),
        Some(ValidationErrorCode::InvalidFormat)
    );
}

#[test]
fn parse_reference_details() {
    let d = parse_reference("RF18 5390 0754 7034", IsoRf).unwrap();
    assert_eq!(d.format, IsoRf);
    assert_eq!(d.reference, "RF18539007547034");
    assert!(parse_reference("RF02539007547034", IsoRf).is_none());
}
