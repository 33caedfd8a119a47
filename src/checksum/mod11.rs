//! Weighted MOD 11 sums and their country-specific remainder rules.
//!
//! The weighted sum itself is one algorithm; what a country does with the
//! remainder varies (complement, plain, forbidden remainders), so the
//! mapping is a configurable [`RemainderRule`] rather than hard-coded.

use serde::{Deserialize, Serialize};

/// Weighted digit sum, weights applied left-to-right and cycled if the
/// weight vector is shorter than the digit string.
///
/// Returns `None` on empty input or a non-digit character.
pub fn weighted_sum(digits: &str, weights: &[u32]) -> Option<u32> {
    if digits.is_empty() || weights.is_empty() {
        return None;
    }
    let mut sum: u32 = 0;
    for (i, b) in digits.bytes().enumerate() {
        if !b.is_ascii_digit() {
            return None;
        }
        sum += u32::from(b - b'0') * weights[i % weights.len()];
    }
    Some(sum)
}

/// Weighted digit sum with weights applied right-to-left (cycled).
///
/// Several reference schemes (Finnish viite, Norwegian KID) define their
/// weight vector starting from the rightmost data digit.
pub fn weighted_sum_rtl(digits: &str, weights: &[u32]) -> Option<u32> {
    if digits.is_empty() || weights.is_empty() {
        return None;
    }
    let mut sum: u32 = 0;
    for (i, b) in digits.bytes().rev().enumerate() {
        if !b.is_ascii_digit() {
            return None;
        }
        sum += u32::from(b - b'0') * weights[i % weights.len()];
    }
    Some(sum)
}

/// How a MOD 11 remainder maps to the expected check digit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RemainderRule {
    /// `11 − r`, with `r == 0` mapping to 0 and `r == 1` having no valid
    /// check digit (Norwegian/Slovenian style — the input is rejected).
    Complement,
    /// `11 − r`, with results 10 and 11 both wrapping to 0 (Portuguese
    /// style).
    ComplementHighToZero,
    /// `11 − r`, with 11 wrapping to 0 and 10 wrapping to 1 (Spanish
    /// account check digits).
    ComplementTenToOne,
    /// The remainder itself is the check digit; `r == 10` is forbidden
    /// (Polish style).
    Plain,
    /// The remainder modulo 10 (Greek style — remainder 10 folds to 0).
    PlainMod10,
}

impl RemainderRule {
    /// Expected check digit for remainder `r`, or `None` if no valid
    /// check digit exists under this rule.
    pub fn digit_for(self, r: u32) -> Option<u32> {
        debug_assert!(r < 11);
        match self {
            Self::Complement => match r {
                0 => Some(0),
                1 => None,
                r => Some(11 - r),
            },
            Self::ComplementHighToZero => {
                let d = 11 - r;
                Some(if d >= 10 { 0 } else { d })
            }
            Self::ComplementTenToOne => Some(match 11 - r {
                11 => 0,
                10 => 1,
                d => d,
            }),
            Self::Plain => {
                if r == 10 {
                    None
                } else {
                    Some(r)
                }
            }
            Self::PlainMod10 => Some(r % 10),
        }
    }
}

/// Expected check digit for `digits` under the given weights and rule.
///
/// `None` means the input is structurally unusable *or* the remainder is
/// forbidden under the rule; callers reject either way.
pub fn check_digit(digits: &str, weights: &[u32], rule: RemainderRule) -> Option<u32> {
    let sum = weighted_sum(digits, weights)?;
    rule.digit_for(sum % 11)
}

/// ISO 7064 MOD 11,10 check digit over `body` (used by the German
/// Steuer-IdNr, German VAT and Croatian OIB).
pub fn iso7064_mod11_10(body: &str) -> Option<u32> {
    if body.is_empty() {
        return None;
    }
    let mut product: u32 = 10;
    for b in body.bytes() {
        if !b.is_ascii_digit() {
            return None;
        }
        let mut sum = (u32::from(b - b'0') + product) % 10;
        if sum == 0 {
            sum = 10;
        }
        product = (2 * sum) % 11;
    }
    Some((11 - product) % 10)
}
