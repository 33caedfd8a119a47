//! Domestic bank routing and account numbers.
//!
//! These are the identifiers that live *inside* national payment systems
//! rather than on the IBAN surface: the US ABA routing number, the UK sort
//! code, the German Bankleitzahl, the full French RIB and the Dutch
//! elfproef account number.
//!
//! # Example
//!
//! ```rust
//! use finident::bank::{validate_routing_number, validate_account_number};
//!
//! assert!(validate_routing_number("US", "011000015").is_valid());
//! assert!(validate_account_number("NL", "0417164300").is_valid());
//! ```

use serde::{Deserialize, Serialize};

use crate::checksum::letters::rib_fold;
use crate::checksum::mod11;
use crate::core::{ValidationErrorCode, ValidationResult, normalize};

/// A validated domestic routing identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankRoutingDetails {
    pub country_code: String,
    pub routing_number: String,
}

/// A validated domestic account identifier; sub-fields are populated where
/// the national format defines them (currently the French RIB).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankAccountDetails {
    pub country_code: String,
    pub bank_code: Option<String>,
    pub branch_code: Option<String>,
    pub account_number: String,
    pub check_digits: Option<String>,
}

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

fn all_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// Validate a domestic routing number for `cc`.
///
/// US routing numbers carry the ABA checksum; UK sort codes and German
/// Bankleitzahlen are structural.
pub fn validate_routing_number(cc: &str, value: &str) -> ValidationResult {
    let n = normalize(value);
    if n.is_empty() {
        return empty_input();
    }
    match cc.to_ascii_uppercase().as_str() {
        "US" => validate_us_aba(&n),
        "GB" => validate_gb_sort_code(&n),
        "DE" => validate_de_blz(&n),
        cc => ValidationResult::fail(
            ValidationErrorCode::UnsupportedCountry,
            format!("no routing number validator registered for country '{cc}'"),
        ),
    }
}

/// Parse a routing number; `None` if validation fails.
pub fn parse_routing_number(cc: &str, value: &str) -> Option<BankRoutingDetails> {
    let cc = cc.to_ascii_uppercase();
    if !validate_routing_number(&cc, value).is_valid() {
        return None;
    }
    Some(BankRoutingDetails {
        country_code: cc,
        routing_number: normalize(value),
    })
}

/// Validate a domestic account number for `cc`.
///
/// France expects the full 23-character RIB (bank, branch, account, key);
/// the Netherlands a 9- or 10-digit elfproef account.
pub fn validate_account_number(cc: &str, value: &str) -> ValidationResult {
    let n = normalize(value);
    if n.is_empty() {
        return empty_input();
    }
    match cc.to_ascii_uppercase().as_str() {
        "FR" => validate_fr_rib(&n),
        "NL" => validate_nl_account(&n),
        cc => ValidationResult::fail(
            ValidationErrorCode::UnsupportedCountry,
            format!("no account number validator registered for country '{cc}'"),
        ),
    }
}

/// Parse an account number; `None` if validation fails.
pub fn parse_account_number(cc: &str, value: &str) -> Option<BankAccountDetails> {
    let cc = cc.to_ascii_uppercase();
    if !validate_account_number(&cc, value).is_valid() {
        return None;
    }
    let n = normalize(value);
    Some(match cc.as_str() {
        "FR" => BankAccountDetails {
            country_code: cc,
            bank_code: Some(n[..5].to_owned()),
            branch_code: Some(n[5..10].to_owned()),
            account_number: n[10..21].to_owned(),
            check_digits: Some(n[21..].to_owned()),
        },
        _ => BankAccountDetails {
            country_code: cc,
            bank_code: None,
            branch_code: None,
            account_number: n,
            check_digits: None,
        },
    })
}

// Federal Reserve district prefixes plus the thrift and electronic ranges.
fn aba_prefix_is_assigned(prefix: u32) -> bool {
    matches!(prefix, 0..=12 | 21..=32 | 61..=72 | 80)
}

/// US ABA routing number: 9 digits, 3-7-1 weighted sum divisible by 10,
/// first two digits in an assigned range.
fn validate_us_aba(n: &str) -> ValidationResult {
    if n.len() != 9 {
        return length_failure(9, n.len());
    }
    if !all_digits(n) {
        return ValidationResult::fail(
            ValidationErrorCode::InvalidFormat,
            "routing number must be 9 digits",
        );
    }
    let prefix: u32 = n[..2].parse().expect("digits verified above");
    if !aba_prefix_is_assigned(prefix) {
        return ValidationResult::fail(
            ValidationErrorCode::InvalidFormat,
            format!("routing prefix {prefix:02} is not an assigned range"),
        );
    }
    let sum = mod11::weighted_sum(n, &[3, 7, 1]).expect("digits verified above");
    if sum % 10 != 0 {
        return ValidationResult::fail(
            ValidationErrorCode::InvalidChecksum,
            "weighted sum not divisible by 10",
        );
    }
    ValidationResult::ok()
}

/// UK sort code: 6 digits, no public checksum.
fn validate_gb_sort_code(n: &str) -> ValidationResult {
    if n.len() != 6 {
        return length_failure(6, n.len());
    }
    if !all_digits(n) {
        return ValidationResult::fail(
            ValidationErrorCode::InvalidFormat,
            "sort code must be 6 digits",
        );
    }
    ValidationResult::ok()
}

/// German Bankleitzahl: 8 digits, leading clearing-area digit 1-8.
fn validate_de_blz(n: &str) -> ValidationResult {
    if n.len() != 8 {
        return length_failure(8, n.len());
    }
    if !all_digits(n) {
        return ValidationResult::fail(
            ValidationErrorCode::InvalidFormat,
            "Bankleitzahl must be 8 digits",
        );
    }
    if !(b'1'..=b'8').contains(&n.as_bytes()[0]) {
        return ValidationResult::fail(
            ValidationErrorCode::InvalidFormat,
            "clearing area digit must be 1-8",
        );
    }
    ValidationResult::ok()
}

/// French RIB: 5-digit bank, 5-digit branch, 11-character account (letters
/// folded base 36), 2-digit key with `89B + 15G + 3C + K ≡ 0 (mod 97)`.
fn validate_fr_rib(n: &str) -> ValidationResult {
    if n.len() != 23 {
        return length_failure(23, n.len());
    }
    if !n.is_ascii() {
        return ValidationResult::fail(
            ValidationErrorCode::InvalidFormat,
            "RIB contains a non-ASCII character",
        );
    }
    let (bank, rest) = n.split_at(5);
    let (branch, rest) = rest.split_at(5);
    let (account, key) = rest.split_at(11);
    if !all_digits(bank) || !all_digits(branch) || !all_digits(key) {
        return ValidationResult::fail(
            ValidationErrorCode::InvalidFormat,
            "bank, branch and key must be numeric",
        );
    }
    let mut folded_account: u64 = 0;
    for c in account.chars() {
        let Some(v) = rib_fold(c) else {
            return ValidationResult::fail(
                ValidationErrorCode::InvalidFormat,
                "account part must be alphanumeric",
            );
        };
        folded_account = folded_account * 10 + u64::from(v);
    }
    let bank: u64 = bank.parse().expect("digits verified above");
    let branch: u64 = branch.parse().expect("digits verified above");
    let key: u64 = key.parse().expect("digits verified above");
    if (89 * bank + 15 * branch + 3 * folded_account + key) % 97 != 0 {
        return ValidationResult::fail(
            ValidationErrorCode::InvalidChecksum,
            "RIB key mismatch",
        );
    }
    ValidationResult::ok()
}

/// Dutch elfproef account number: 9 or 10 digits, descending weights,
/// sum divisible by 11.
fn validate_nl_account(n: &str) -> ValidationResult {
    if n.len() != 9 && n.len() != 10 {
        return ValidationResult::fail(
            ValidationErrorCode::InvalidLength,
            format!("expected length 9 or 10, got {}", n.len()),
        );
    }
    if !all_digits(n) {
        return ValidationResult::fail(
            ValidationErrorCode::InvalidFormat,
            "account number must be numeric",
        );
    }
    let weights: Vec<u32> = (1..=n.len() as u32).rev().collect();
    let sum = mod11::weighted_sum(n, &weights).expect("digits verified above");
    if sum % 11 != 0 {
        return ValidationResult::fail(
            ValidationErrorCode::InvalidChecksum,
            "weighted sum not divisible by 11",
        );
    }
    ValidationResult::ok()
}
