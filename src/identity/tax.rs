//! Tax and company registration numbers.

use crate::checksum::luhn::{self, Direction};
use crate::checksum::mod11;
use crate::core::{ValidationErrorCode, ValidationResult, normalize, strip_country_prefix};

fn empty_input() -> ValidationResult {
    ValidationResult::fail(
        ValidationErrorCode::InvalidInput,
        "input is empty or whitespace-only",
    )
}

fn length_failure(expected: usize, actual: usize) -> ValidationResult {
    ValidationResult::fail(
        ValidationErrorCode::InvalidLength,
        format!("expected length {expected}, got {actual}"),
    )
}

/// Belgian enterprise number (KBO/BCE, 10 digits starting 0 or 1).
///
/// The last two digits are 97 minus the leading 8-digit number mod 97.
/// The Belgian VAT number is this number with a "BE" prefix, so the VAT
/// validator delegates here.
pub fn validate_be_enterprise_number(value: &str) -> ValidationResult {
    let n = normalize(value);
    let n = strip_country_prefix(&n, "BE");
    if n.is_empty() {
        return empty_input();
    }
    if n.len() != 10 {
        return length_failure(10, n.len());
    }
    if !n.bytes().all(|b| b.is_ascii_digit()) {
        return ValidationResult::fail(
            ValidationErrorCode::InvalidFormat,
            "enterprise number must be 10 digits",
        );
    }
    if !matches!(n.as_bytes()[0], b'0' | b'1') {
        return ValidationResult::fail(
            ValidationErrorCode::InvalidFormat,
            "enterprise number must start with 0 or 1",
        );
    }
    let base: u64 = n[..8].parse().expect("digits verified above");
    let check: u64 = n[8..].parse().expect("digits verified above");
    if 97 - (base % 97) != check {
        return ValidationResult::fail(
            ValidationErrorCode::InvalidChecksum,
            "mod 97 check pair mismatch",
        );
    }
    ValidationResult::ok()
}

/// German Steuer-IdNr (11 digits, ISO 7064 MOD 11,10).
///
/// Among the first 10 digits exactly one value repeats (twice, or three
/// times for IDs issued since 2016); the first digit must not be 0.
pub fn validate_de_steuer_id(value: &str) -> ValidationResult {
    let n = normalize(value);
    let n = strip_country_prefix(&n, "DE");
    if n.is_empty() {
        return empty_input();
    }
    if n.len() != 11 {
        return length_failure(11, n.len());
    }
    if !n.bytes().all(|b| b.is_ascii_digit()) {
        return ValidationResult::fail(
            ValidationErrorCode::InvalidFormat,
            "Steuer-IdNr must be 11 digits",
        );
    }
    if n.as_bytes()[0] == b'0' {
        return ValidationResult::fail(
            ValidationErrorCode::InvalidFormat,
            "Steuer-IdNr must not start with 0",
        );
    }
    let mut counts = [0u8; 10];
    for b in n[..10].bytes() {
        counts[(b - b'0') as usize] += 1;
    }
    let repeated: Vec<u8> = counts.iter().copied().filter(|&c| c > 1).collect();
    if repeated.len() != 1 || repeated[0] > 3 {
        return ValidationResult::fail(
            ValidationErrorCode::InvalidFormat,
            "exactly one digit must repeat among the first 10",
        );
    }
    let expected = mod11::iso7064_mod11_10(&n[..10]).expect("digits verified above");
    let actual = u32::from(n.as_bytes()[10] - b'0');
    if actual != expected {
        return ValidationResult::fail(
            ValidationErrorCode::InvalidCheckDigit,
            format!("check digit mismatch: expected {expected}, got {actual}"),
        );
    }
    ValidationResult::ok()
}

/// French SIREN (9 digits, Luhn indexed from the left).
pub fn validate_fr_siren(value: &str) -> ValidationResult {
    let n = normalize(value);
    if n.is_empty() {
        return empty_input();
    }
    if n.len() != 9 {
        return length_failure(9, n.len());
    }
    if !n.bytes().all(|b| b.is_ascii_digit()) {
        return ValidationResult::fail(
            ValidationErrorCode::InvalidFormat,
            "SIREN must be 9 digits",
        );
    }
    if !luhn::is_valid(&n, Direction::FromLeft) {
        return ValidationResult::fail(
            ValidationErrorCode::InvalidChecksum,
            "Luhn checksum mismatch",
        );
    }
    ValidationResult::ok()
}

/// French SIRET (14 digits: SIREN + 5-digit establishment NIC).
///
/// Both the full SIRET and its embedded SIREN must verify.
pub fn validate_fr_siret(value: &str) -> ValidationResult {
    let n = normalize(value);
    if n.is_empty() {
        return empty_input();
    }
    if n.len() != 14 {
        return length_failure(14, n.len());
    }
    if !n.bytes().all(|b| b.is_ascii_digit()) {
        return ValidationResult::fail(
            ValidationErrorCode::InvalidFormat,
            "SIRET must be 14 digits",
        );
    }
    let siren = validate_fr_siren(&n[..9]);
    if !siren.is_valid() {
        return siren;
    }
    if !luhn::is_valid(&n, Direction::FromRight) {
        return ValidationResult::fail(
            ValidationErrorCode::InvalidChecksum,
            "Luhn checksum mismatch",
        );
    }
    ValidationResult::ok()
}

/// Length-dispatched French company number: 9 digits → SIREN, 14 → SIRET.
pub fn validate_fr_siren_or_siret(value: &str) -> ValidationResult {
    let n = normalize(value);
    if n.is_empty() {
        return empty_input();
    }
    match n.len() {
        9 => validate_fr_siren(&n),
        14 => validate_fr_siret(&n),
        other => ValidationResult::fail(
            ValidationErrorCode::InvalidLength,
            format!("expected length 9 (SIREN) or 14 (SIRET), got {other}"),
        ),
    }
}
