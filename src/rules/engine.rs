//! The generic structural validator interpreting [`CountryRule`]s.

use crate::checksum::{luhn, mod11, mod97};
use crate::core::{ValidationErrorCode, ValidationResult};

use super::{ChecksumSpec, CountryRule, FieldRole};

/// Validate a normalized identifier against a country rule.
///
/// The five-step pipeline: empty input → `InvalidInput`; length mismatch →
/// `InvalidLength` (message carries expected vs actual); per-field character
/// classes → `InvalidFormat`; checksum obligations → `InvalidChecksum` /
/// `InvalidCheckDigit`; otherwise success. Referentially transparent — the
/// same input always yields the same result.
pub fn validate(rule: &CountryRule, input: &str) -> ValidationResult {
    if input.is_empty() {
        return ValidationResult::fail(
            ValidationErrorCode::InvalidInput,
            "input is empty or whitespace-only",
        );
    }
    if input.len() != rule.total_len {
        return ValidationResult::fail(
            ValidationErrorCode::InvalidLength,
            format!("expected length {}, got {}", rule.total_len, input.len()),
        );
    }
    let bytes = input.as_bytes();
    for field in rule.fields {
        for (i, &b) in bytes[field.span.offset..field.span.offset + field.span.len]
            .iter()
            .enumerate()
        {
            if !field.class.matches(b) {
                return ValidationResult::fail(
                    ValidationErrorCode::InvalidFormat,
                    format!(
                        "{:?} expects {} at position {}, got '{}'",
                        field.role,
                        field.class.describe(),
                        field.span.offset + i,
                        b as char
                    ),
                );
            }
        }
    }
    for checksum in rule.checksums {
        if let Some(failure) = check(checksum, input) {
            return failure;
        }
    }
    ValidationResult::ok()
}

/// Extract the sub-field with `role` from an input that already passed
/// [`validate`] for this rule.
pub fn field<'a>(rule: &CountryRule, input: &'a str, role: FieldRole) -> Option<&'a str> {
    rule.field(role).map(|f| f.span.slice(input))
}

// Evaluate one checksum obligation; `None` means it passed.
fn check(spec: &ChecksumSpec, input: &str) -> Option<ValidationResult> {
    match spec {
        ChecksumSpec::Mod97Pair { data, check } => {
            let Some(r) = mod97::fold_remainder(data.slice(input)) else {
                return Some(ValidationResult::fail(
                    ValidationErrorCode::InvalidChecksum,
                    "checksum base is not numeric",
                ));
            };
            let expected = if r == 0 { 97 } else { r };
            let Ok(actual) = check.slice(input).parse::<u32>() else {
                return Some(ValidationResult::fail(
                    ValidationErrorCode::InvalidChecksum,
                    "check digits are not numeric",
                ));
            };
            if actual != expected {
                return Some(ValidationResult::fail(
                    ValidationErrorCode::InvalidChecksum,
                    format!("mod 97 check digits mismatch: expected {expected:02}, got {actual:02}"),
                ));
            }
            None
        }
        ChecksumSpec::Mod97Whole { expect } => {
            if mod97::fold_remainder(input) != Some(*expect) {
                return Some(ValidationResult::fail(
                    ValidationErrorCode::InvalidChecksum,
                    format!("mod 97 remainder over the full value must be {expect}"),
                ));
            }
            None
        }
        ChecksumSpec::WeightedMod11 {
            data,
            check_at,
            weights,
            rule,
        } => {
            let Some(sum) = mod11::weighted_sum(data.slice(input), weights) else {
                return Some(ValidationResult::fail(
                    ValidationErrorCode::InvalidChecksum,
                    "checksum base is not numeric",
                ));
            };
            let Some(expected) = rule.digit_for(sum % 11) else {
                return Some(ValidationResult::fail(
                    ValidationErrorCode::InvalidChecksum,
                    "no valid check digit exists for this remainder",
                ));
            };
            let actual = u32::from(input.as_bytes()[*check_at] - b'0');
            if actual != expected {
                return Some(ValidationResult::fail(
                    ValidationErrorCode::InvalidCheckDigit,
                    format!("check digit mismatch: expected {expected}, got {actual}"),
                ));
            }
            None
        }
        ChecksumSpec::WeightedMod11Zero { data, weights } => {
            let Some(sum) = mod11::weighted_sum(data.slice(input), weights) else {
                return Some(ValidationResult::fail(
                    ValidationErrorCode::InvalidChecksum,
                    "checksum base is not numeric",
                ));
            };
            if sum % 11 != 0 {
                return Some(ValidationResult::fail(
                    ValidationErrorCode::InvalidChecksum,
                    "weighted sum is not divisible by 11",
                ));
            }
            None
        }
        ChecksumSpec::Luhn { data, direction } => {
            if !luhn::is_valid(data.slice(input), *direction) {
                return Some(ValidationResult::fail(
                    ValidationErrorCode::InvalidChecksum,
                    "Luhn checksum mismatch",
                ));
            }
            None
        }
    }
}
