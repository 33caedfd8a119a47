//! Payment reference (remittance identifier) validation.
//!
//! One entry point over an explicit format tag: the caller says which
//! national scheme the reference claims to be, and a value that does not
//! even match that scheme's surface shape fails with `InvalidFormat`.
//!
//! # Example
//!
//! ```rust
//! use finident::payref::{validate_reference, PaymentReferenceFormat};
//!
//! assert!(validate_reference("RF18 5390 0754 7034", PaymentReferenceFormat::IsoRf).is_valid());
//! assert!(validate_reference("+++090/9337/55493+++", PaymentReferenceFormat::LocalBelgian).is_valid());
//! ```

use serde::{Deserialize, Serialize};

use crate::checksum::luhn::{self, Direction};
use crate::checksum::mod11;
use crate::checksum::mod97;
use crate::core::{ValidationErrorCode, ValidationResult, normalize};

/// The national payment reference schemes understood by this module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentReferenceFormat {
    /// ISO 11649 creditor reference (`RF` + check digits + payload).
    IsoRf,
    /// Belgian structured communication (OGM/VCS, 12 digits, mod 97).
    LocalBelgian,
    /// Finnish viitenumero (7-3-1 weights from the right).
    LocalFinland,
    /// Norwegian KID (mod 10 or mod 11 variant).
    LocalNorway,
    /// Swedish OCR (Luhn plus a length digit).
    LocalSweden,
    /// Swiss ESR/QR reference (recursive mod 10 carry table).
    LocalSwitzerland,
    /// Slovenian model 12 reference (`SI12` + weighted mod 11).
    LocalSlovenia,
    /// Italian codice avviso (18 digits, Luhn).
    LocalItaly,
}

/// A validated payment reference in normalized form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentReferenceDetails {
    pub format: PaymentReferenceFormat,
    pub reference: String,
}

fn empty_input() -> ValidationResult {
    ValidationResult::fail(
        ValidationErrorCode::InvalidInput,
        "input is empty or whitespace-only",
    )
}

fn format_failure(message: impl Into<String>) -> ValidationResult {
    ValidationResult::fail(ValidationErrorCode::InvalidFormat, message)
}

fn all_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// Validate `value` against the claimed `format`.
pub fn validate_reference(value: &str, format: PaymentReferenceFormat) -> ValidationResult {
    let n = normalize(value);
    if n.is_empty() {
        return empty_input();
    }
    match format {
        PaymentReferenceFormat::IsoRf => validate_iso_rf(&n),
        PaymentReferenceFormat::LocalBelgian => validate_belgian_ogm(&n),
        PaymentReferenceFormat::LocalFinland => validate_finnish_viite(&n),
        PaymentReferenceFormat::LocalNorway => validate_norwegian_kid(&n),
        PaymentReferenceFormat::LocalSweden => validate_swedish_ocr(&n),
        PaymentReferenceFormat::LocalSwitzerland => validate_swiss_esr(&n),
        PaymentReferenceFormat::LocalSlovenia => validate_slovenian_model(&n),
        PaymentReferenceFormat::LocalItaly => validate_italian_avviso(&n),
    }
}

/// Parse a reference; `None` if it fails validation for `format`.
pub fn parse_reference(
    value: &str,
    format: PaymentReferenceFormat,
) -> Option<PaymentReferenceDetails> {
    if !validate_reference(value, format).is_valid() {
        return None;
    }
    Some(PaymentReferenceDetails {
        format,
        reference: normalize(value),
    })
}

/// ISO 11649: `RF` + 2 digits + up to 21 alphanumerics; like an IBAN, the
/// first four characters move to the end and the mod 97 fold must be 1.
fn validate_iso_rf(n: &str) -> ValidationResult {
    if !n.starts_with("RF") {
        return format_failure("creditor reference must start with 'RF'");
    }
    if n.len() < 5 || n.len() > 25 {
        return ValidationResult::fail(
            ValidationErrorCode::InvalidLength,
            format!("expected length 5 to 25, got {}", n.len()),
        );
    }
    if !n.as_bytes()[2..4].iter().all(u8::is_ascii_digit) {
        return format_failure("RF check digits (positions 3-4) must be numeric");
    }
    if !n[4..].bytes().all(|b| b.is_ascii_alphanumeric()) {
        return format_failure("RF payload must be alphanumeric");
    }
    if mod97::iban_remainder(n) != Some(1) {
        return ValidationResult::fail(
            ValidationErrorCode::InvalidChecksum,
            "creditor reference mod 97 remainder is not 1",
        );
    }
    ValidationResult::ok()
}

/// Belgian OGM: 12 digits; last two = first ten mod 97, with 0 read as 97.
fn validate_belgian_ogm(n: &str) -> ValidationResult {
    if !all_digits(n) {
        return format_failure("structured communication must be numeric");
    }
    if n.len() != 12 {
        return ValidationResult::fail(
            ValidationErrorCode::InvalidLength,
            format!("expected length 12, got {}", n.len()),
        );
    }
    let body: u64 = n[..10].parse().expect("digits verified above");
    let check: u64 = n[10..].parse().expect("digits verified above");
    let expected = match body % 97 {
        0 => 97,
        r => r,
    };
    if check != expected {
        return ValidationResult::fail(
            ValidationErrorCode::InvalidCheckDigit,
            format!("expected check pair {expected:02}"),
        );
    }
    ValidationResult::ok()
}

/// Finnish viitenumero: 4-20 digits, 7-3-1 weights from the right over the
/// body, check = (10 − sum) mod 10.
fn validate_finnish_viite(n: &str) -> ValidationResult {
    if !all_digits(n) {
        return format_failure("viitenumero must be numeric");
    }
    if n.len() < 4 || n.len() > 20 {
        return ValidationResult::fail(
            ValidationErrorCode::InvalidLength,
            format!("expected length 4 to 20, got {}", n.len()),
        );
    }
    let body = &n[..n.len() - 1];
    let sum = mod11::weighted_sum_rtl(body, &[7, 3, 1]).expect("digits verified above");
    let expected = (10 - sum % 10) % 10;
    let check = u32::from(n.as_bytes()[n.len() - 1] - b'0');
    if check != expected {
        return ValidationResult::fail(
            ValidationErrorCode::InvalidCheckDigit,
            format!("expected check digit {expected}"),
        );
    }
    ValidationResult::ok()
}

fn kid_shape(n: &str) -> Option<ValidationResult> {
    if !all_digits(n) {
        return Some(format_failure("KID must be numeric"));
    }
    if n.len() < 3 || n.len() > 25 {
        return Some(ValidationResult::fail(
            ValidationErrorCode::InvalidLength,
            format!("expected length 3 to 25, got {}", n.len()),
        ));
    }
    None
}

/// Norwegian KID issued under the mod 10 (Luhn) scheme.
pub fn validate_norwegian_kid_mod10(value: &str) -> ValidationResult {
    let n = normalize(value);
    if n.is_empty() {
        return empty_input();
    }
    if let Some(failure) = kid_shape(&n) {
        return failure;
    }
    if !luhn::is_valid(&n, Direction::FromRight) {
        return ValidationResult::fail(
            ValidationErrorCode::InvalidChecksum,
            "Luhn checksum mismatch",
        );
    }
    ValidationResult::ok()
}

/// Norwegian KID issued under the mod 11 (2-3-4-5-6-7 weights) scheme.
pub fn validate_norwegian_kid_mod11(value: &str) -> ValidationResult {
    let n = normalize(value);
    if n.is_empty() {
        return empty_input();
    }
    if let Some(failure) = kid_shape(&n) {
        return failure;
    }
    let body = &n[..n.len() - 1];
    let check = u32::from(n.as_bytes()[n.len() - 1] - b'0');
    let sum = mod11::weighted_sum_rtl(body, &[2, 3, 4, 5, 6, 7]).expect("digits verified above");
    match mod11::RemainderRule::Complement.digit_for(sum % 11) {
        None => ValidationResult::fail(
            ValidationErrorCode::InvalidChecksum,
            "remainder 1 has no valid check digit",
        ),
        Some(expected) if check != expected => ValidationResult::fail(
            ValidationErrorCode::InvalidCheckDigit,
            format!("expected check digit {expected}"),
        ),
        Some(_) => ValidationResult::ok(),
    }
}

/// Norwegian KID: 3-25 digits; issuers choose between a mod 10 (Luhn) and
/// a mod 11 (2-3-4-5-6-7 weights) scheme, so either verifying accepts.
fn validate_norwegian_kid(n: &str) -> ValidationResult {
    if let Some(failure) = kid_shape(n) {
        return failure;
    }
    if validate_norwegian_kid_mod10(n).is_valid() || validate_norwegian_kid_mod11(n).is_valid() {
        return ValidationResult::ok();
    }
    ValidationResult::fail(
        ValidationErrorCode::InvalidChecksum,
        "neither the mod 10 nor the mod 11 scheme verifies",
    )
}

/// Swedish OCR: 2-25 digits, Luhn over the whole value, and the
/// second-to-last digit encodes the total length mod 10.
fn validate_swedish_ocr(n: &str) -> ValidationResult {
    if !all_digits(n) {
        return format_failure("OCR reference must be numeric");
    }
    if n.len() < 2 || n.len() > 25 {
        return ValidationResult::fail(
            ValidationErrorCode::InvalidLength,
            format!("expected length 2 to 25, got {}", n.len()),
        );
    }
    let length_digit = u32::from(n.as_bytes()[n.len() - 2] - b'0');
    if length_digit != (n.len() as u32) % 10 {
        return ValidationResult::fail(
            ValidationErrorCode::InvalidCheckDigit,
            format!("length digit should be {}", (n.len() as u32) % 10),
        );
    }
    if !luhn::is_valid(n, Direction::FromRight) {
        return ValidationResult::fail(
            ValidationErrorCode::InvalidChecksum,
            "Luhn checksum mismatch",
        );
    }
    ValidationResult::ok()
}

// The ESR carry table; index with (carry + digit) mod 10.
const ESR_CARRY: [u32; 10] = [0, 9, 4, 6, 8, 2, 7, 1, 3, 5];

/// Swiss ESR/QR reference: 27 digits, recursive carry, check =
/// (10 − final carry) mod 10.
fn validate_swiss_esr(n: &str) -> ValidationResult {
    if !all_digits(n) {
        return format_failure("ESR reference must be numeric");
    }
    if n.len() != 27 {
        return ValidationResult::fail(
            ValidationErrorCode::InvalidLength,
            format!("expected length 27, got {}", n.len()),
        );
    }
    let mut carry = 0;
    for b in n[..26].bytes() {
        carry = ESR_CARRY[((carry + u32::from(b - b'0')) % 10) as usize];
    }
    let expected = (10 - carry) % 10;
    let check = u32::from(n.as_bytes()[26] - b'0');
    if check != expected {
        return ValidationResult::fail(
            ValidationErrorCode::InvalidCheckDigit,
            format!("expected check digit {expected}"),
        );
    }
    ValidationResult::ok()
}

/// Slovenian model 12 reference: `SI12` + up to 13 digits, ascending
/// weights from the right, high remainders folding the check to 0.
fn validate_slovenian_model(n: &str) -> ValidationResult {
    let Some(digits) = n.strip_prefix("SI12") else {
        return format_failure("reference must start with model prefix 'SI12'");
    };
    if !all_digits(digits) {
        return format_failure("reference body must be numeric");
    }
    if digits.len() < 2 || digits.len() > 13 {
        return ValidationResult::fail(
            ValidationErrorCode::InvalidLength,
            format!("expected 2 to 13 digits after SI12, got {}", digits.len()),
        );
    }
    let body = &digits[..digits.len() - 1];
    let check = u32::from(digits.as_bytes()[digits.len() - 1] - b'0');
    let sum = mod11::weighted_sum_rtl(body, &[2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13])
        .expect("digits verified above");
    let expected = mod11::RemainderRule::ComplementHighToZero
        .digit_for(sum % 11)
        .expect("rule is total over digits");
    if check != expected {
        return ValidationResult::fail(
            ValidationErrorCode::InvalidCheckDigit,
            format!("expected check digit {expected}"),
        );
    }
    ValidationResult::ok()
}

/// Italian codice avviso: 18 digits, Luhn.
fn validate_italian_avviso(n: &str) -> ValidationResult {
    if !all_digits(n) {
        return format_failure("codice avviso must be numeric");
    }
    if n.len() != 18 {
        return ValidationResult::fail(
            ValidationErrorCode::InvalidLength,
            format!("expected length 18, got {}", n.len()),
        );
    }
    if !luhn::is_valid(n, Direction::FromRight) {
        return ValidationResult::fail(
            ValidationErrorCode::InvalidChecksum,
            "Luhn checksum mismatch",
        );
    }
    ValidationResult::ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use PaymentReferenceFormat::*;

    #[test]
    fn iso_rf_seed_vector() {
        assert!(validate_reference("RF18539007547034", IsoRf).is_valid());
        assert!(validate_reference("rf18 5390 0754 7034", IsoRf).is_valid());
        assert_eq!(
            validate_reference("RF19539007547034", IsoRf).first_code(),
            Some(ValidationErrorCode::InvalidChecksum)
        );
    }

    #[test]
    fn rf_requires_prefix() {
        assert_eq!(
            validate_reference("539007547034", IsoRf).first_code(),
            Some(ValidationErrorCode::InvalidFormat)
        );
    }

    #[test]
    fn belgian_ogm() {
        assert!(validate_reference("+++090/9337/55493+++", LocalBelgian).is_valid());
        assert!(validate_reference("090933755493", LocalBelgian).is_valid());
        assert_eq!(
            validate_reference("090933755494", LocalBelgian).first_code(),
            Some(ValidationErrorCode::InvalidCheckDigit)
        );
    }

    #[test]
    fn belgian_zero_remainder_reads_97() {
        // 0000000097 mod 97 = 0, so the printed pair is 97
        assert!(validate_reference("000000009797", LocalBelgian).is_valid());
        assert!(!validate_reference("000000009700", LocalBelgian).is_valid());
    }

    #[test]
    fn finnish_viite() {
        assert!(validate_reference("1232", LocalFinland).is_valid());
        assert!(validate_reference("1234561", LocalFinland).is_valid());
        assert_eq!(
            validate_reference("1234562", LocalFinland).first_code(),
            Some(ValidationErrorCode::InvalidCheckDigit)
        );
    }

    #[test]
    fn norwegian_kid_both_schemes() {
        // Luhn-checked issuance
        assert!(validate_reference("1234566", LocalNorway).is_valid());
        // Mod 11-checked issuance (fails Luhn)
        assert!(validate_reference("0365327", LocalNorway).is_valid());
        assert_eq!(
            validate_reference("0365321", LocalNorway).first_code(),
            Some(ValidationErrorCode::InvalidChecksum)
        );
    }

    #[test]
    fn kid_variant_entry_points() {
        assert!(validate_norwegian_kid_mod10("1234566").is_valid());
        assert!(!validate_norwegian_kid_mod10("0365327").is_valid());
        assert!(validate_norwegian_kid_mod11("0365327").is_valid());
        assert!(!validate_norwegian_kid_mod11("1234566").is_valid());
    }

    #[test]
    fn swedish_ocr() {
        // Length 7 → length digit 7, Luhn check 4
        assert!(validate_reference("1234574", LocalSweden).is_valid());
        assert_eq!(
            validate_reference("1234584", LocalSweden).first_code(),
            Some(ValidationErrorCode::InvalidCheckDigit)
        );
    }

    #[test]
    fn swiss_esr() {
        assert!(validate_reference("210000000003139471430009017", LocalSwitzerland).is_valid());
        assert_eq!(
            validate_reference("210000000003139471430009018", LocalSwitzerland).first_code(),
            Some(ValidationErrorCode::InvalidCheckDigit)
        );
        assert_eq!(
            validate_reference("2100000000031394714300090", LocalSwitzerland).first_code(),
            Some(ValidationErrorCode::InvalidLength)
        );
    }

    #[test]
    fn slovenian_model() {
        assert!(validate_reference("SI12 12345679", LocalSlovenia).is_valid());
        assert_eq!(
            validate_reference("SI12 12345678", LocalSlovenia).first_code(),
            Some(ValidationErrorCode::InvalidCheckDigit)
        );
        assert_eq!(
            validate_reference("12345679", LocalSlovenia).first_code(),
            Some(ValidationErrorCode::InvalidFormat)
        );
    }

    #[test]
    fn italian_avviso() {
        assert!(validate_reference("123456789012345671", LocalItaly).is_valid());
        assert_eq!(
            validate_reference("123456789012345672", LocalItaly).first_code(),
            Some(ValidationErrorCode::InvalidChecksum)
        );
    }

    #[test]
    fn wrong_format_is_format_error() {
        // An RF reference handed to the Belgian validator, and vice versa
        assert_eq!(
            validate_reference("RF18539007547034", LocalBelgian).first_code(),
            Some(ValidationErrorCode::InvalidFormat)
        );
        assert_eq!(
            validate_reference("090933755493", IsoRf).first_code(),
            Some(ValidationErrorCode::InvalidFormat)
        );
    }

    #[test]
    fn empty_input() {
        assert_eq!(
            validate_reference("   ", IsoRf).first_code(),
            Some(ValidationErrorCode::InvalidInput)
        );
    }

    #[test]
    fn parse_carries_format() {
        let d = parse_reference("+++090/9337/55493+++", LocalBelgian).unwrap();
        assert_eq!(d.format, LocalBelgian);
        assert_eq!(d.reference, "090933755493");
        assert!(parse_reference("090933755494", LocalBelgian).is_none());
    }
}
