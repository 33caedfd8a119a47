//! Per-country BBAN rule table and the irregular national check rules.
//!
//! Lengths and field layouts follow the SWIFT IBAN registry. Countries
//! whose national check rule fits the declarative engine carry it in their
//! rule row; the French RIB key, the Italian/San Marino CIN and the
//! Estonian right-to-left 7-3-1 check need letter folding or an indexing
//! direction the engine does not model and are layered on top as extra
//! checks. Countries whose national check rule is not reliably documented
//! are validated structurally only.

use crate::checksum::letters::{italian_check_char, rib_fold};
use crate::checksum::luhn::Direction;
use crate::checksum::mod11::{self, RemainderRule};
use crate::core::{ValidationErrorCode, ValidationResult};
use crate::rules::{
    CharClass::{Alnum, Digit, Upper},
    ChecksumSpec, CountryRule, FieldRole, FieldSpec, IdentifierKind, Span,
};

macro_rules! bban_rule {
    ($cc:literal, $len:expr, [$($field:expr),+ $(,)?], [$($sum:expr),* $(,)?]) => {
        CountryRule {
            country: $cc,
            kind: IdentifierKind::Bban,
            total_len: $len,
            fields: &[$($field),+],
            checksums: &[$($sum),*],
        }
    };
}

const fn f(offset: usize, len: usize, class: crate::rules::CharClass, role: FieldRole) -> FieldSpec {
    FieldSpec::new(offset, len, class, role)
}

use FieldRole::{
    AccountNumber as Acct, AccountType, BankCode as Bank, BranchCode as Branch, CheckDigits as Chk,
    Currency, Reserved,
};

/// BBAN rules, sorted by country code for binary search.
pub(crate) static BBAN_RULES: &[CountryRule] = &[
    bban_rule!("AD", 20, [f(0, 4, Digit, Bank), f(4, 4, Digit, Branch), f(8, 12, Alnum, Acct)], []),
    bban_rule!("AE", 19, [f(0, 3, Digit, Bank), f(3, 16, Digit, Acct)], []),
    bban_rule!("AT", 16, [f(0, 5, Digit, Bank), f(5, 11, Digit, Acct)], []),
    bban_rule!("AZ", 24, [f(0, 4, Upper, Bank), f(4, 20, Alnum, Acct)], []),
    bban_rule!("BE", 12, [f(0, 3, Digit, Bank), f(3, 7, Digit, Acct), f(10, 2, Digit, Chk)],
        [ChecksumSpec::Mod97Pair { data: Span::new(0, 10), check: Span::new(10, 2) }]),
    bban_rule!("BG", 18, [f(0, 4, Upper, Bank), f(4, 4, Digit, Branch), f(8, 2, Digit, AccountType), f(10, 8, Alnum, Acct)], []),
    bban_rule!("BH", 18, [f(0, 4, Upper, Bank), f(4, 14, Alnum, Acct)], []),
    bban_rule!("BR", 25, [f(0, 8, Digit, Bank), f(8, 5, Digit, Branch), f(13, 10, Digit, Acct), f(23, 1, Upper, AccountType), f(24, 1, Alnum, Reserved)], []),
    bban_rule!("CH", 17, [f(0, 5, Digit, Bank), f(5, 12, Alnum, Acct)], []),
    bban_rule!("CR", 18, [f(0, 4, Digit, Bank), f(4, 14, Digit, Acct)], []),
    bban_rule!("CY", 24, [f(0, 3, Digit, Bank), f(3, 5, Digit, Branch), f(8, 16, Alnum, Acct)], []),
    bban_rule!("CZ", 20, [f(0, 4, Digit, Bank), f(4, 6, Digit, Branch), f(10, 10, Digit, Acct)],
        [ChecksumSpec::WeightedMod11Zero { data: Span::new(4, 6), weights: &[10, 5, 8, 4, 2, 1] },
         ChecksumSpec::WeightedMod11Zero { data: Span::new(10, 10), weights: &[6, 3, 7, 9, 10, 5, 8, 4, 2, 1] }]),
    bban_rule!("DE", 18, [f(0, 8, Digit, Bank), f(8, 10, Digit, Acct)], []),
    bban_rule!("DK", 14, [f(0, 4, Digit, Bank), f(4, 10, Digit, Acct)], []),
    bban_rule!("DO", 24, [f(0, 4, Alnum, Bank), f(4, 20, Digit, Acct)], []),
    bban_rule!("DZ", 22, [f(0, 3, Digit, Bank), f(3, 5, Digit, Branch), f(8, 12, Digit, Acct), f(20, 2, Digit, Chk)], []),
    bban_rule!("EE", 16, [f(0, 2, Digit, Bank), f(2, 2, Digit, Branch), f(4, 11, Digit, Acct), f(15, 1, Digit, Chk)], []),
    bban_rule!("EG", 25, [f(0, 4, Digit, Bank), f(4, 4, Digit, Branch), f(8, 17, Digit, Acct)], []),
    bban_rule!("ES", 20, [f(0, 4, Digit, Bank), f(4, 4, Digit, Branch), f(8, 2, Digit, Chk), f(10, 10, Digit, Acct)],
        [ChecksumSpec::WeightedMod11 { data: Span::new(0, 8), check_at: 8, weights: &[4, 8, 5, 10, 9, 7, 3, 6], rule: RemainderRule::ComplementTenToOne },
         ChecksumSpec::WeightedMod11 { data: Span::new(10, 10), check_at: 9, weights: &[1, 2, 4, 8, 5, 10, 9, 7, 3, 6], rule: RemainderRule::ComplementTenToOne }]),
    bban_rule!("FI", 14, [f(0, 6, Digit, Bank), f(6, 7, Digit, Acct), f(13, 1, Digit, Chk)],
        [ChecksumSpec::Luhn { data: Span::new(0, 14), direction: Direction::FromRight }]),
    bban_rule!("FO", 14, [f(0, 4, Digit, Bank), f(4, 9, Digit, Acct), f(13, 1, Digit, Chk)], []),
    bban_rule!("FR", 23, [f(0, 5, Digit, Bank), f(5, 5, Digit, Branch), f(10, 11, Alnum, Acct), f(21, 2, Digit, Chk)], []),
    bban_rule!("GB", 18, [f(0, 4, Upper, Bank), f(4, 6, Digit, Branch), f(10, 8, Digit, Acct)], []),
    bban_rule!("GE", 18, [f(0, 2, Upper, Bank), f(2, 16, Digit, Acct)], []),
    bban_rule!("GI", 19, [f(0, 4, Upper, Bank), f(4, 15, Alnum, Acct)], []),
    bban_rule!("GR", 23, [f(0, 3, Digit, Bank), f(3, 4, Digit, Branch), f(7, 16, Alnum, Acct)], []),
    bban_rule!("GT", 24, [f(0, 4, Alnum, Bank), f(4, 2, Digit, Currency), f(6, 2, Digit, AccountType), f(8, 16, Alnum, Acct)], []),
    bban_rule!("HR", 17, [f(0, 7, Digit, Bank), f(7, 10, Digit, Acct)], []),
    bban_rule!("HU", 24, [f(0, 3, Digit, Bank), f(3, 4, Digit, Branch), f(7, 17, Digit, Acct)], []),
    bban_rule!("IE", 18, [f(0, 4, Upper, Bank), f(4, 6, Digit, Branch), f(10, 8, Digit, Acct)], []),
    bban_rule!("IL", 19, [f(0, 3, Digit, Bank), f(3, 3, Digit, Branch), f(6, 13, Digit, Acct)], []),
    bban_rule!("IQ", 19, [f(0, 4, Upper, Bank), f(4, 3, Digit, Branch), f(7, 12, Digit, Acct)], []),
    bban_rule!("IS", 22, [f(0, 2, Digit, Bank), f(2, 2, Digit, Branch), f(4, 2, Digit, AccountType), f(6, 6, Digit, Acct), f(12, 10, Digit, FieldRole::IdNumber)],
        [ChecksumSpec::WeightedMod11 { data: Span::new(12, 8), check_at: 20, weights: &[3, 2, 7, 6, 5, 4, 3, 2], rule: RemainderRule::Complement }]),
    bban_rule!("IT", 23, [f(0, 1, Upper, Chk), f(1, 5, Digit, Bank), f(6, 5, Digit, Branch), f(11, 12, Alnum, Acct)], []),
    bban_rule!("JO", 26, [f(0, 4, Upper, Bank), f(4, 4, Digit, Branch), f(8, 18, Alnum, Acct)], []),
    bban_rule!("KW", 26, [f(0, 4, Upper, Bank), f(4, 22, Alnum, Acct)], []),
    bban_rule!("KZ", 16, [f(0, 3, Digit, Bank), f(3, 13, Alnum, Acct)], []),
    bban_rule!("LB", 24, [f(0, 4, Digit, Bank), f(4, 20, Alnum, Acct)], []),
    bban_rule!("LI", 17, [f(0, 5, Digit, Bank), f(5, 12, Alnum, Acct)], []),
    bban_rule!("LT", 16, [f(0, 5, Digit, Bank), f(5, 11, Digit, Acct)], []),
    bban_rule!("LU", 16, [f(0, 3, Digit, Bank), f(3, 13, Alnum, Acct)], []),
    bban_rule!("LV", 17, [f(0, 4, Upper, Bank), f(4, 13, Alnum, Acct)], []),
    bban_rule!("LY", 21, [f(0, 3, Digit, Bank), f(3, 3, Digit, Branch), f(6, 15, Digit, Acct)], []),
    bban_rule!("MC", 23, [f(0, 5, Digit, Bank), f(5, 5, Digit, Branch), f(10, 11, Alnum, Acct), f(21, 2, Digit, Chk)], []),
    bban_rule!("MD", 20, [f(0, 2, Alnum, Bank), f(2, 18, Alnum, Acct)], []),
    bban_rule!("ME", 18, [f(0, 3, Digit, Bank), f(3, 13, Digit, Acct), f(16, 2, Digit, Chk)], []),
    bban_rule!("MK", 15, [f(0, 3, Digit, Bank), f(3, 10, Alnum, Acct), f(13, 2, Digit, Chk)], []),
    bban_rule!("MR", 23, [f(0, 5, Digit, Bank), f(5, 5, Digit, Branch), f(10, 11, Digit, Acct), f(21, 2, Digit, Chk)], []),
    bban_rule!("MT", 27, [f(0, 4, Upper, Bank), f(4, 5, Digit, Branch), f(9, 18, Alnum, Acct)], []),
    bban_rule!("MU", 26, [f(0, 4, Upper, Bank), f(4, 2, Digit, Reserved), f(6, 2, Digit, Branch), f(8, 12, Digit, Acct), f(20, 3, Digit, Reserved), f(23, 3, Upper, Currency)], []),
    bban_rule!("NL", 14, [f(0, 4, Upper, Bank), f(4, 10, Digit, Acct)],
        [ChecksumSpec::WeightedMod11Zero { data: Span::new(4, 10), weights: &[10, 9, 8, 7, 6, 5, 4, 3, 2, 1] }]),
    bban_rule!("NO", 11, [f(0, 4, Digit, Bank), f(4, 6, Digit, Acct), f(10, 1, Digit, Chk)],
        [ChecksumSpec::WeightedMod11 { data: Span::new(0, 10), check_at: 10, weights: &[5, 4, 3, 2, 7, 6, 5, 4, 3, 2], rule: RemainderRule::Complement }]),
    bban_rule!("PK", 20, [f(0, 4, Upper, Bank), f(4, 16, Alnum, Acct)], []),
    bban_rule!("PL", 24, [f(0, 8, Digit, Bank), f(8, 16, Digit, Acct)], []),
    bban_rule!("PS", 25, [f(0, 4, Upper, Bank), f(4, 21, Alnum, Acct)], []),
    bban_rule!("PT", 21, [f(0, 4, Digit, Bank), f(4, 4, Digit, Branch), f(8, 11, Digit, Acct), f(19, 2, Digit, Chk)],
        [ChecksumSpec::Mod97Whole { expect: 1 }]),
    bban_rule!("QA", 25, [f(0, 4, Upper, Bank), f(4, 21, Alnum, Acct)], []),
    bban_rule!("RO", 20, [f(0, 4, Upper, Bank), f(4, 16, Alnum, Acct)], []),
    bban_rule!("RS", 18, [f(0, 3, Digit, Bank), f(3, 13, Digit, Acct), f(16, 2, Digit, Chk)], []),
    bban_rule!("SA", 20, [f(0, 2, Digit, Bank), f(2, 18, Alnum, Acct)], []),
    bban_rule!("SC", 27, [f(0, 4, Upper, Bank), f(4, 2, Digit, Reserved), f(6, 2, Digit, Branch), f(8, 16, Digit, Acct), f(24, 3, Upper, Currency)], []),
    bban_rule!("SE", 20, [f(0, 3, Digit, Bank), f(3, 16, Digit, Acct), f(19, 1, Digit, Chk)], []),
    bban_rule!("SI", 15, [f(0, 5, Digit, Bank), f(5, 8, Digit, Acct), f(13, 2, Digit, Chk)],
        [ChecksumSpec::Mod97Whole { expect: 1 }]),
    bban_rule!("SK", 20, [f(0, 4, Digit, Bank), f(4, 6, Digit, Branch), f(10, 10, Digit, Acct)],
        [ChecksumSpec::WeightedMod11Zero { data: Span::new(4, 6), weights: &[10, 5, 8, 4, 2, 1] },
         ChecksumSpec::WeightedMod11Zero { data: Span::new(10, 10), weights: &[6, 3, 7, 9, 10, 5, 8, 4, 2, 1] }]),
    bban_rule!("SM", 23, [f(0, 1, Upper, Chk), f(1, 5, Digit, Bank), f(6, 5, Digit, Branch), f(11, 12, Alnum, Acct)], []),
    bban_rule!("ST", 21, [f(0, 4, Digit, Bank), f(4, 4, Digit, Branch), f(8, 11, Digit, Acct), f(19, 2, Digit, Chk)], []),
    bban_rule!("SV", 24, [f(0, 4, Upper, Bank), f(4, 20, Digit, Acct)], []),
    bban_rule!("TL", 19, [f(0, 3, Digit, Bank), f(3, 14, Digit, Acct), f(17, 2, Digit, Chk)], []),
    bban_rule!("TN", 20, [f(0, 2, Digit, Bank), f(2, 3, Digit, Branch), f(5, 13, Digit, Acct), f(18, 2, Digit, Chk)], []),
    bban_rule!("TR", 22, [f(0, 5, Digit, Bank), f(5, 1, Alnum, Reserved), f(6, 16, Alnum, Acct)], []),
    bban_rule!("UA", 25, [f(0, 6, Digit, Bank), f(6, 19, Alnum, Acct)], []),
    bban_rule!("VA", 18, [f(0, 3, Digit, Bank), f(3, 15, Digit, Acct)], []),
    bban_rule!("VG", 20, [f(0, 4, Upper, Bank), f(4, 16, Digit, Acct)], []),
    bban_rule!("YE", 26, [f(0, 4, Upper, Bank), f(4, 4, Digit, Branch), f(8, 18, Alnum, Acct)], []),
];

/// Look up the BBAN rule for a country.
pub(crate) fn bban_rule(cc: &str) -> Option<&'static CountryRule> {
    BBAN_RULES
        .binary_search_by(|rule| rule.country.cmp(cc))
        .ok()
        .map(|i| &BBAN_RULES[i])
}

/// National check rules the declarative engine cannot express, applied
/// after the structural rule passed. `None` means no extra rule.
pub(crate) fn extra_check(cc: &str, bban: &str) -> Option<ValidationResult> {
    match cc {
        "EE" => Some(check_estonian_account(bban)),
        "FR" | "MC" => Some(check_rib_key(bban)),
        "IT" | "SM" => Some(check_cin(bban)),
        _ => None,
    }
}

// Estonian domestic account check digit: weights 7-3-1 applied right-to-left
// over branch + account (positions 2..15), check = (10 − sum mod 10) mod 10.
fn check_estonian_account(bban: &str) -> ValidationResult {
    let sum = mod11::weighted_sum_rtl(&bban[2..15], &[7, 3, 1])
        .expect("structural rule admits digits");
    let expected = (10 - sum % 10) % 10;
    let actual = u32::from(bban.as_bytes()[15] - b'0');
    if actual != expected {
        return ValidationResult::fail(
            ValidationErrorCode::InvalidCheckDigit,
            format!("check digit mismatch: expected {expected}, got {actual}"),
        );
    }
    ValidationResult::ok()
}

// French/Monegasque RIB key: 97 − ((89·bank + 15·branch + 3·account) mod 97),
// account letters folded to digits first.
fn check_rib_key(bban: &str) -> ValidationResult {
    let bank: u64 = bban[0..5].parse().expect("structural rule admits digits");
    let branch: u64 = bban[5..10].parse().expect("structural rule admits digits");
    let mut account: u64 = 0;
    for c in bban[10..21].chars() {
        let Some(v) = rib_fold(c) else {
            return ValidationResult::fail(
                ValidationErrorCode::InvalidFormat,
                format!("account character '{c}' has no RIB digit value"),
            );
        };
        account = account * 10 + u64::from(v);
    }
    let key: u64 = bban[21..23].parse().expect("structural rule admits digits");
    if (89 * bank + 15 * branch + 3 * account + key) % 97 != 0 {
        return ValidationResult::fail(
            ValidationErrorCode::InvalidChecksum,
            "RIB key mismatch",
        );
    }
    ValidationResult::ok()
}

// Italian/Sammarinese CIN: check letter over bank + branch + account.
fn check_cin(bban: &str) -> ValidationResult {
    let expected = match italian_check_char(&bban[1..]) {
        Some(c) => c,
        None => {
            return ValidationResult::fail(
                ValidationErrorCode::InvalidChecksum,
                "CIN base contains an unexpected character",
            );
        }
    };
    let actual = bban.as_bytes()[0] as char;
    if actual != expected {
        return ValidationResult::fail(
            ValidationErrorCode::InvalidCheckLetter,
            format!("CIN mismatch: expected {expected}, got {actual}"),
        );
    }
    ValidationResult::ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_sorted() {
        for window in BBAN_RULES.windows(2) {
            assert!(
                window[0].country < window[1].country,
                "BBAN rules not sorted: {} >= {}",
                window[0].country,
                window[1].country
            );
        }
    }

    #[test]
    fn every_layout_tiles() {
        for rule in BBAN_RULES {
            rule.verify_layout()
                .unwrap_or_else(|e| panic!("{}: {e}", rule.country));
        }
    }

    #[test]
    fn estonian_check_digit() {
        // EE38 2200 2210 2014 5685
        assert!(check_estonian_account("2200221020145685").is_valid());
        let r = check_estonian_account("2200221020145684");
        assert_eq!(r.first_code(), Some(ValidationErrorCode::InvalidCheckDigit));
    }

    #[test]
    fn rib_key_accepts_registry_sample() {
        // FR14 2004 1010 0505 0001 3M02 606
        assert!(check_rib_key("20041010050500013M02606").is_valid());
    }

    #[test]
    fn rib_key_rejects_corruption() {
        let r = check_rib_key("20041010050500013M02607");
        assert_eq!(r.first_code(), Some(ValidationErrorCode::InvalidChecksum));
    }

    #[test]
    fn cin_accepts_registry_sample() {
        // IT60 X054 2811 1010 0000 0123 456
        assert!(check_cin("X0542811101000000123456").is_valid());
    }

    #[test]
    fn cin_rejects_wrong_letter() {
        let r = check_cin("Y0542811101000000123456");
        assert_eq!(r.first_code(), Some(ValidationErrorCode::InvalidCheckLetter));
    }
}
