use serde::{Deserialize, Serialize};

use crate::checksum::luhn::Direction;
use crate::checksum::mod11::RemainderRule;
use crate::core::FinidentError;

/// The identifier capabilities the registry dispatches on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IdentifierKind {
    Iban,
    Bban,
    Vat,
    TaxId,
    NationalId,
    BankRouting,
    BankAccount,
    PaymentReference,
}

/// Character class a field position must satisfy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CharClass {
    /// ASCII digit.
    Digit,
    /// ASCII upper-case letter.
    Upper,
    /// ASCII digit or upper-case letter.
    Alnum,
}

impl CharClass {
    pub fn matches(self, b: u8) -> bool {
        match self {
            Self::Digit => b.is_ascii_digit(),
            Self::Upper => b.is_ascii_uppercase(),
            Self::Alnum => b.is_ascii_digit() || b.is_ascii_uppercase(),
        }
    }

    pub fn describe(self) -> &'static str {
        match self {
            Self::Digit => "digit",
            Self::Upper => "letter",
            Self::Alnum => "alphanumeric",
        }
    }
}

/// Which named sub-field a span carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldRole {
    BankCode,
    BranchCode,
    AccountNumber,
    CheckDigits,
    AccountType,
    Currency,
    Reserved,
    IdNumber,
}

/// A contiguous span within an identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub offset: usize,
    pub len: usize,
}

impl Span {
    pub const fn new(offset: usize, len: usize) -> Self {
        Self { offset, len }
    }

    pub fn slice<'a>(&self, s: &'a str) -> &'a str {
        &s[self.offset..self.offset + self.len]
    }
}

/// One named, character-classed sub-field of an identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub span: Span,
    pub class: CharClass,
    pub role: FieldRole,
}

impl FieldSpec {
    pub const fn new(offset: usize, len: usize, class: CharClass, role: FieldRole) -> Self {
        Self {
            span: Span::new(offset, len),
            class,
            role,
        }
    }
}

/// A checksum obligation the engine evaluates over designated sub-fields.
///
/// The static weight tables make this `Serialize`-only, like [`CountryRule`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ChecksumSpec {
    /// `data` mod 97 must equal the two digits in `check`, a remainder of
    /// 0 printing as 97 (Belgian BBAN).
    Mod97Pair { data: Span, check: Span },
    /// The whole value folded mod 97 must equal `expect` (Portuguese and
    /// Slovenian NIB rule: remainder 1).
    Mod97Whole { expect: u32 },
    /// Weighted MOD 11 over `data`; the digit at `check_at` must match the
    /// remainder mapped through `rule`. A forbidden remainder rejects the
    /// input outright.
    WeightedMod11 {
        data: Span,
        check_at: usize,
        weights: &'static [u32],
        rule: RemainderRule,
    },
    /// Weighted sum over `data` must be divisible by 11 (Czech/Slovak
    /// account fields, Dutch elfproef).
    WeightedMod11Zero { data: Span, weights: &'static [u32] },
    /// Standard Luhn over `data` (check digit included in the span).
    Luhn { data: Span, direction: Direction },
}

/// Declarative validation rule for one country and identifier kind.
///
/// The data-driven replacement for a hand-written per-country validator:
/// total length, exact field tiling, and zero or more checksum obligations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CountryRule {
    pub country: &'static str,
    pub kind: IdentifierKind,
    pub total_len: usize,
    pub fields: &'static [FieldSpec],
    pub checksums: &'static [ChecksumSpec],
}

impl CountryRule {
    /// Assert that the field layout exactly tiles `total_len` with no gaps
    /// or overlaps, and that checksum spans stay in bounds.
    ///
    /// Called once per rule at registry construction; a violation is a
    /// programmer error in the rule table, not a data error.
    pub fn verify_layout(&self) -> Result<(), FinidentError> {
        let mut cursor = 0;
        for field in self.fields {
            if field.span.offset != cursor {
                return Err(FinidentError::Descriptor(format!(
                    "{} {:?}: field at offset {} leaves a gap or overlap (expected offset {})",
                    self.country, self.kind, field.span.offset, cursor
                )));
            }
            cursor += field.span.len;
        }
        if cursor != self.total_len {
            return Err(FinidentError::Descriptor(format!(
                "{} {:?}: fields cover {} of {} declared characters",
                self.country, self.kind, cursor, self.total_len
            )));
        }
        for checksum in self.checksums {
            let in_bounds = match checksum {
                ChecksumSpec::Mod97Pair { data, check, .. } => {
                    data.offset + data.len <= self.total_len
                        && check.offset + check.len <= self.total_len
                        && check.len == 2
                }
                ChecksumSpec::Mod97Whole { .. } => true,
                ChecksumSpec::WeightedMod11 { data, check_at, .. } => {
                    data.offset + data.len <= self.total_len && *check_at < self.total_len
                }
                ChecksumSpec::WeightedMod11Zero { data, .. }
                | ChecksumSpec::Luhn { data, .. } => data.offset + data.len <= self.total_len,
            };
            if !in_bounds {
                return Err(FinidentError::Descriptor(format!(
                    "{} {:?}: checksum span out of bounds",
                    self.country, self.kind
                )));
            }
        }
        Ok(())
    }

    /// The first field carrying `role`, if the layout names one.
    pub fn field(&self, role: FieldRole) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.role == role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GOOD: CountryRule = CountryRule {
        country: "AT",
        kind: IdentifierKind::Bban,
        total_len: 16,
        fields: &[
            FieldSpec::new(0, 5, CharClass::Digit, FieldRole::BankCode),
            FieldSpec::new(5, 11, CharClass::Digit, FieldRole::AccountNumber),
        ],
        checksums: &[],
    };

    const GAPPY: CountryRule = CountryRule {
        country: "XX",
        kind: IdentifierKind::Bban,
        total_len: 16,
        fields: &[
            FieldSpec::new(0, 5, CharClass::Digit, FieldRole::BankCode),
            FieldSpec::new(6, 10, CharClass::Digit, FieldRole::AccountNumber),
        ],
        checksums: &[],
    };

    #[test]
    fn layout_verification() {
        assert!(GOOD.verify_layout().is_ok());
        assert!(GAPPY.verify_layout().is_err());
    }

    #[test]
    fn role_lookup() {
        assert_eq!(GOOD.field(FieldRole::BankCode).unwrap().span.len, 5);
        assert!(GOOD.field(FieldRole::BranchCode).is_none());
    }

    const CHECKED: CountryRule = CountryRule {
        country: "AT",
        kind: IdentifierKind::Bban,
        total_len: 16,
        fields: GOOD.fields,
        checksums: &[
            ChecksumSpec::Mod97Pair {
                data: Span::new(0, 10),
                check: Span::new(10, 2),
            },
            ChecksumSpec::WeightedMod11 {
                data: Span::new(0, 8),
                check_at: 8,
                weights: &[4, 8, 5, 10, 9, 7, 3, 6],
                rule: RemainderRule::ComplementTenToOne,
            },
        ],
    };

    #[test]
    fn rules_serialize() {
        let json = serde_json::to_string(&CHECKED).unwrap();
        assert!(json.contains("\"country\":\"AT\""));
        assert!(json.contains("Mod97Pair"));
        assert!(json.contains("WeightedMod11"));
    }
}
