#![cfg(feature = "vat")]

use finident::ValidationErrorCode;
use finident::vat::*;

// ---------------------------------------------------------------------------
// Per-country acceptance
// ---------------------------------------------------------------------------

#[test]
fn every_registered_country_accepts_a_real_number() {
    for vat in [
        "ATU13585627",
        "BE0403170701",
        "BG101004508",
        "CY10259033P",
        "CZ25123891",
        "DE136695976",
        "DK13585628",
        "EE100931558",
        "EL094259216",
        "ESA08001851",
        "FI13669598",
        "FR40303265045",
        "GB980780684",
        "HR33392005961",
        "HU12892312",
        "IE6433435F",
        "IT00743110157",
        "LT119511515",
        "LU10000356",
        "LV40003567907",
        "MT11679112",
        "NL004495445B01",
        "PL8567346215",
        "PT501964843",
        "RO18547290",
        "SE556012579001",
        "SI50223054",
        "SK2020032377",
        "XI980780684",
    ] {
        let r = validate_vat(vat);
        assert!(r.is_valid(), "{vat}: {:?}", r.errors());
    }
}

#[test]
fn single_digit_corruption_rejected() {
    // Flip the final digit of each checksum-bearing number
    for vat in [
        "ATU13585628",
        "BE0403170702",
        "DE136695977",
        "DK13585629",
        "EE100931559",
        "EL094259217",
        "FI13669599",
        "FR41303265045",
        "GB980780685",
        "HR33392005962",
        "HU12892313",
        "IT00743110158",
        "LT119511516",
        "LU10000357",
        "MT11679113",
        "PL8567346216",
        "PT501964844",
        "RO18547291",
        "SE556012579101",
        "SI50223055",
        "SK2020032378",
    ] {
        assert!(!validate_vat(vat).is_valid(), "{vat} should fail");
    }
}

// ---------------------------------------------------------------------------
// Format dispatch inside a country
// ---------------------------------------------------------------------------

#[test]
fn italian_length_dispatch() {
    // 11 digits → Partita IVA, 16 characters → Codice Fiscale
    assert!(validate_vat_for("IT", "00743110157").is_valid());
    assert!(validate_vat_for("IT", "RSSMRA85T10A562S").is_valid());
    assert_eq!(
        validate_vat_for("IT", "007431101").first_code(),
        Some(ValidationErrorCode::InvalidLength)
    );
}

#[test]
fn spanish_format_dispatch() {
    assert!(validate_vat_for("ES", "12345678Z").is_valid());
    assert!(validate_vat_for("ES", "X1234567L").is_valid());
    assert!(validate_vat_for("ES", "A08001851").is_valid());
    assert_eq!(
        validate_vat_for("ES", "12345678T").first_code(),
        Some(ValidationErrorCode::InvalidCheckLetter)
    );
}

#[test]
fn dutch_candidate_schemes() {
    assert!(validate_vat("NL004495445B01").is_valid());
    assert!(validate_vat("NL123456789B13").is_valid());
    assert!(!validate_vat("NL123456789B12").is_valid());
}

#[test]
fn irish_layout_variants() {
    assert!(validate_vat("IE6433435F").is_valid());
    assert!(validate_vat("IE6433435OA").is_valid());
    assert!(validate_vat("IE8D79739I").is_valid());
}

// ---------------------------------------------------------------------------
// VIES eligibility quirks
// ---------------------------------------------------------------------------

#[test]
fn greece_is_el_not_gr() {
    assert!(validate_vat("GR094259216").is_valid());
    let d = parse_vat("GR094259216").unwrap();
    assert_eq!(d.country_code, "EL");
    assert!(d.is_eu_vat);
    assert!(d.is_vies_eligible);
}

#[test]
fn northern_ireland_vs_great_britain() {
    let xi = parse_vat("XI980780684").unwrap();
    assert!(xi.is_vies_eligible);
    assert!(!xi.is_eu_vat);

    let gb = parse_vat("GB980780684").unwrap();
    assert!(!gb.is_vies_eligible);
    assert!(!gb.is_eu_vat);
}

// ---------------------------------------------------------------------------
// Normalization and errors
// ---------------------------------------------------------------------------

#[test]
fn printed_forms_accepted() {
    assert!(validate_vat("BE 0403.170.701").is_valid());
    assert!(validate_vat("de136695976").is_valid());
    assert!(validate_vat_for("FR", "FR 40 303 265 045").is_valid());
}

#[test]
fn error_taxonomy() {
    assert_eq!(
        validate_vat("").first_code(),
        Some(ValidationErrorCode::InvalidInput)
    );
    assert_eq!(
        validate_vat("99999999").first_code(),
        Some(ValidationErrorCode::InvalidCountryCode)
    );
    assert_eq!(
        validate_vat("US123456789").first_code(),
        Some(ValidationErrorCode::UnsupportedCountry)
    );
    assert_eq!(
        validate_vat("DE13669597").first_code(),
        Some(ValidationErrorCode::InvalidLength)
    );
    assert_eq!(
        validate_vat("DE13669597A").first_code(),
        Some(ValidationErrorCode::InvalidFormat)
    );
}

#[test]
fn parse_round_trip() {
    let d = parse_vat("NL 0044.95.445.B01").unwrap();
    assert_eq!(d.country_code, "NL");
    assert_eq!(d.number, "004495445B01");
    assert!(parse_vat("NL004495445B02").is_none());
}
