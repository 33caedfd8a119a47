//! Securities identifiers: CUSIP and ISIN.
//!
//! Both close with a Luhn-family check digit; the CUSIP sums its base-39
//! character values directly, the ISIN expands letters to two digits and
//! runs plain Luhn over the result.
//!
//! # Example
//!
//! ```rust
//! use finident::securities::{validate_cusip, validate_isin};
//!
//! assert!(validate_cusip("037833100").is_valid());
//! assert!(validate_isin("US0378331005").is_valid());
//! ```

use crate::checksum::luhn::{self, Direction};
use crate::core::{ValidationErrorCode, ValidationResult, is_known_country_code, normalize};

fn empty_input() -> ValidationResult {
    ValidationResult::fail(
        ValidationErrorCode::InvalidInput,
        "input is empty or whitespace-only",
    )
}

// CUSIP character values: digits, letters A=10..Z=35, then the three
// special issue characters.
fn cusip_value(c: char) -> Option<u32> {
    match c {
        '0'..='9' => Some(c as u32 - '0' as u32),
        'A'..='Z' => Some(c as u32 - 'A' as u32 + 10),
        '*' => Some(36),
        '@' => Some(37),
        '#' => Some(38),
        _ => None,
    }
}

/// Validate a 9-character CUSIP.
pub fn validate_cusip(value: &str) -> ValidationResult {
    let n = normalize(value);
    if n.is_empty() {
        return empty_input();
    }
    if n.len() != 9 {
        return ValidationResult::fail(
            ValidationErrorCode::InvalidLength,
            format!("expected length 9, got {}", n.len()),
        );
    }
    let check_char = n.as_bytes()[8];
    if !check_char.is_ascii_digit() {
        return ValidationResult::fail(
            ValidationErrorCode::InvalidFormat,
            "CUSIP check digit must be numeric",
        );
    }
    let mut sum = 0;
    for (i, c) in n[..8].chars().enumerate() {
        let Some(mut v) = cusip_value(c) else {
            return ValidationResult::fail(
                ValidationErrorCode::InvalidFormat,
                format!("character '{c}' is not valid in a CUSIP"),
            );
        };
        if i % 2 == 1 {
            v *= 2;
        }
        sum += v / 10 + v % 10;
    }
    let expected = (10 - sum % 10) % 10;
    if u32::from(check_char - b'0') != expected {
        return ValidationResult::fail(
            ValidationErrorCode::InvalidChecksum,
            format!("expected check digit {expected}"),
        );
    }
    ValidationResult::ok()
}

/// Validate a 12-character ISIN: 2-letter country prefix, 9 alphanumeric
/// NSIN characters, letter-expanded Luhn check digit.
pub fn validate_isin(value: &str) -> ValidationResult {
    let n = normalize(value);
    if n.is_empty() {
        return empty_input();
    }
    if n.len() != 12 {
        return ValidationResult::fail(
            ValidationErrorCode::InvalidLength,
            format!("expected length 12, got {}", n.len()),
        );
    }
    let bytes = n.as_bytes();
    if !bytes[..2].iter().all(u8::is_ascii_uppercase) {
        return ValidationResult::fail(
            ValidationErrorCode::InvalidCountryCode,
            "ISIN must start with a 2-letter country code",
        );
    }
    // XS marks international securities numbered outside any national
    // agency; everything else must be a real ISO 3166 code.
    let prefix = &n[..2];
    if prefix != "XS" && !is_known_country_code(prefix) {
        return ValidationResult::fail(
            ValidationErrorCode::InvalidCountryCode,
            format!("'{prefix}' is not an ISO 3166 country code"),
        );
    }
    if !bytes[2..11].iter().all(u8::is_ascii_alphanumeric) {
        return ValidationResult::fail(
            ValidationErrorCode::InvalidFormat,
            "ISIN body must be alphanumeric",
        );
    }
    if !bytes[11].is_ascii_digit() {
        return ValidationResult::fail(
            ValidationErrorCode::InvalidFormat,
            "ISIN check digit must be numeric",
        );
    }
    // Letters expand to their two-digit value before the Luhn pass.
    let mut expanded = String::with_capacity(n.len() * 2);
    for b in bytes {
        match b {
            b'0'..=b'9' => expanded.push(char::from(*b)),
            b'A'..=b'Z' => {
                let v = u32::from(b - b'A') + 10;
                expanded.push_str(&v.to_string());
            }
            _ => unreachable!("character classes verified above"),
        }
    }
    if !luhn::is_valid(&expanded, Direction::FromRight) {
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

    #[test]
    fn cusip_seed_vectors() {
        assert!(validate_cusip("037833100").is_valid());
        assert_eq!(
            validate_cusip("037833101").first_code(),
            Some(ValidationErrorCode::InvalidChecksum)
        );
    }

    #[test]
    fn cusip_letters_and_specials() {
        // 8th position doubled: G = 16 → 32 → 3 + 2
        assert!(validate_cusip("38259P508").is_valid());
        assert_eq!(
            validate_cusip("03783310").first_code(),
            Some(ValidationErrorCode::InvalidLength)
        );
        assert_eq!(
            validate_cusip("03783_100").first_code(),
            Some(ValidationErrorCode::InvalidFormat)
        );
    }

    #[test]
    fn isin_seed_vectors() {
        assert!(validate_isin("US0378331005").is_valid());
        assert!(validate_isin("us 0378 3310 05").is_valid());
        assert_eq!(
            validate_isin("US0378331006").first_code(),
            Some(ValidationErrorCode::InvalidChecksum)
        );
    }

    #[test]
    fn isin_structure_errors() {
        assert_eq!(
            validate_isin("0S0378331005").first_code(),
            Some(ValidationErrorCode::InvalidCountryCode)
        );
        assert_eq!(
            validate_isin("US037833100").first_code(),
            Some(ValidationErrorCode::InvalidLength)
        );
        assert_eq!(
            validate_isin("US037833100A").first_code(),
            Some(ValidationErrorCode::InvalidFormat)
        );
    }

    #[test]
    fn isin_prefix_must_be_a_country() {
        assert_eq!(
            validate_isin("ZZ0378331005").first_code(),
            Some(ValidationErrorCode::InvalidCountryCode)
        );
        // International issues numbered by Euroclear/Clearstream.
        assert!(validate_isin("XS0104440986").is_valid());
    }

    #[test]
    fn empty_inputs() {
        assert_eq!(
            validate_cusip(" ").first_code(),
            Some(ValidationErrorCode::InvalidInput)
        );
        assert_eq!(
            validate_isin(" ").first_code(),
            Some(ValidationErrorCode::InvalidInput)
        );
    }
}
