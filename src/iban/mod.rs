//! IBAN and BBAN validation.
//!
//! An IBAN validator is not a leaf: it checks the envelope (country code,
//! check digits, total length), delegates the trailing part to the
//! country's BBAN validator, and only if the BBAN passed runs the ISO 7064
//! MOD 97-10 check over the whole string. That ordering is load-bearing — a
//! structurally malformed BBAN is reported with BBAN-specific errors, never
//! masked by a generic checksum failure.
//!
//! # Example
//!
//! ```rust
//! use finident::iban::{validate_iban, parse_iban, derive_check_digits};
//!
//! assert!(validate_iban("DE89 3704 0044 0532 0130 00").is_valid());
//! assert_eq!(derive_check_digits("BE", "539007547034").as_deref(), Some("68"));
//!
//! let details = parse_iban("FR1420041010050500013M02606").unwrap();
//! assert_eq!(details.branch_code.as_deref(), Some("01005"));
//! ```

mod bban;

use serde::{Deserialize, Serialize};

use crate::checksum::mod97;
use crate::core::{
    ValidationErrorCode, ValidationResult, country_prefix, is_known_country_code, normalize,
};
use crate::rules::{FieldRole, engine};

use bban::{bban_rule, extra_check};

/// Structured decomposition of a successfully validated BBAN.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BbanDetails {
    pub country_code: String,
    pub bank_code: Option<String>,
    pub branch_code: Option<String>,
    pub account_number: Option<String>,
    pub national_check_digits: Option<String>,
}

/// Structured decomposition of a successfully validated IBAN.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IbanDetails {
    pub country_code: String,
    pub check_digits: String,
    pub bban: String,
    pub bank_code: Option<String>,
    pub branch_code: Option<String>,
    pub account_number: Option<String>,
    pub national_check_digits: Option<String>,
}

/// Whether a country participates in the IBAN scheme as modelled here.
pub fn is_supported_country(cc: &str) -> bool {
    bban_rule(&cc.to_ascii_uppercase()).is_some()
}

/// Country codes with a registered BBAN rule, in sorted order.
pub fn supported_countries() -> impl Iterator<Item = &'static str> {
    bban::BBAN_RULES.iter().map(|rule| rule.country)
}

/// All registered BBAN rules, for layout verification at registry build.
pub(crate) fn rules() -> &'static [crate::rules::CountryRule] {
    bban::BBAN_RULES
}

/// Validate a BBAN (the country-specific part of an IBAN) for `cc`.
pub fn validate_bban(cc: &str, value: &str) -> ValidationResult {
    let cc = cc.to_ascii_uppercase();
    let normalized = normalize(value);
    if normalized.is_empty() {
        return ValidationResult::fail(
            ValidationErrorCode::InvalidInput,
            "input is empty or whitespace-only",
        );
    }
    if !is_known_country_code(&cc) {
        return ValidationResult::fail(
            ValidationErrorCode::InvalidCountryCode,
            format!("'{cc}' is not an ISO 3166 country code"),
        );
    }
    let Some(rule) = bban_rule(&cc) else {
        return ValidationResult::fail(
            ValidationErrorCode::UnsupportedCountry,
            format!("no BBAN rule registered for country '{cc}'"),
        );
    };
    let structural = engine::validate(rule, &normalized);
    if !structural.is_valid() {
        return structural;
    }
    if let Some(result) = extra_check(&cc, &normalized) {
        if !result.is_valid() {
            return result;
        }
    }
    ValidationResult::ok()
}

/// Parse a BBAN into its named sub-fields; `None` if validation fails.
pub fn parse_bban(cc: &str, value: &str) -> Option<BbanDetails> {
    let cc = cc.to_ascii_uppercase();
    if !validate_bban(&cc, value).is_valid() {
        return None;
    }
    let normalized = normalize(value);
    let rule = bban_rule(&cc)?;
    let get = |role| engine::field(rule, &normalized, role).map(str::to_owned);
    Some(BbanDetails {
        country_code: cc,
        bank_code: get(FieldRole::BankCode),
        branch_code: get(FieldRole::BranchCode),
        account_number: get(FieldRole::AccountNumber),
        national_check_digits: get(FieldRole::CheckDigits),
    })
}

/// Validate an IBAN, inferring the country from its first two characters.
pub fn validate_iban(value: &str) -> ValidationResult {
    let normalized = normalize(value);
    if normalized.is_empty() {
        return ValidationResult::fail(
            ValidationErrorCode::InvalidInput,
            "input is empty or whitespace-only",
        );
    }
    let Some(cc) = country_prefix(&normalized) else {
        return ValidationResult::fail(
            ValidationErrorCode::InvalidCountryCode,
            "IBAN must start with a 2-letter country code",
        );
    };
    validate_iban_for(&cc.to_owned(), value)
}

/// Validate an IBAN that must belong to country `cc`.
pub fn validate_iban_for(cc: &str, value: &str) -> ValidationResult {
    let cc = cc.to_ascii_uppercase();
    let normalized = normalize(value);
    if normalized.is_empty() {
        return ValidationResult::fail(
            ValidationErrorCode::InvalidInput,
            "input is empty or whitespace-only",
        );
    }
    if !normalized.starts_with(&cc) {
        return ValidationResult::fail(
            ValidationErrorCode::InvalidCountryCode,
            format!("IBAN does not start with expected country code '{cc}'"),
        );
    }
    if !is_known_country_code(&cc) {
        return ValidationResult::fail(
            ValidationErrorCode::InvalidCountryCode,
            format!("'{cc}' is not an ISO 3166 country code"),
        );
    }
    let Some(rule) = bban_rule(&cc) else {
        return ValidationResult::fail(
            ValidationErrorCode::UnsupportedCountry,
            format!("no IBAN rule registered for country '{cc}'"),
        );
    };
    let expected_len = rule.total_len + 4;
    if normalized.len() != expected_len {
        return ValidationResult::fail(
            ValidationErrorCode::InvalidLength,
            format!("expected length {expected_len}, got {}", normalized.len()),
        );
    }
    if !normalized.as_bytes()[2..4].iter().all(u8::is_ascii_digit) {
        return ValidationResult::fail(
            ValidationErrorCode::InvalidFormat,
            "IBAN check digits (positions 3-4) must be numeric",
        );
    }
    // Delegate the part after the 4-character header to the country's BBAN
    // validator and propagate its failure verbatim.
    let bban_part = &normalized[4..];
    let bban_result = validate_bban(&cc, bban_part);
    if !bban_result.is_valid() {
        return bban_result;
    }
    // Envelope check runs last, over the entire IBAN.
    if mod97::iban_remainder(&normalized) != Some(1) {
        return ValidationResult::fail(
            ValidationErrorCode::InvalidChecksum,
            "IBAN mod 97 remainder is not 1",
        );
    }
    ValidationResult::ok()
}

/// Parse an IBAN into its named sub-fields; `None` if validation fails.
pub fn parse_iban(value: &str) -> Option<IbanDetails> {
    let normalized = normalize(value);
    if !validate_iban(&normalized).is_valid() {
        return None;
    }
    let cc = country_prefix(&normalized)?.to_owned();
    let bban = normalized[4..].to_owned();
    let details = parse_bban(&cc, &bban)?;
    Some(IbanDetails {
        country_code: cc,
        check_digits: normalized[2..4].to_owned(),
        bban,
        bank_code: details.bank_code,
        branch_code: details.branch_code,
        account_number: details.account_number,
        national_check_digits: details.national_check_digits,
    })
}

/// Derive the two IBAN check digits for a country and BBAN.
///
/// Returns `None` if the BBAN itself does not validate for `cc` — check
/// digits are only defined over well-formed BBANs.
pub fn derive_check_digits(cc: &str, bban: &str) -> Option<String> {
    let cc = cc.to_ascii_uppercase();
    let normalized = normalize(bban);
    if !validate_bban(&cc, &normalized).is_valid() {
        return None;
    }
    mod97::iban_check_digits(&cc, &normalized).map(|d| format!("{d:02}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_vectors() {
        assert!(validate_iban("BE68539007547034").is_valid());
        assert!(validate_iban("DE89370400440532013000").is_valid());
        assert!(validate_bban("BE", "539007547034").is_valid());
    }

    #[test]
    fn accepts_printed_grouping() {
        assert!(validate_iban("be68 5390 0754 7034").is_valid());
        assert!(validate_iban("FR14-2004-1010-0505-0001-3M02-606").is_valid());
    }

    #[test]
    fn empty_is_invalid_input() {
        assert_eq!(
            validate_iban("  ").first_code(),
            Some(ValidationErrorCode::InvalidInput)
        );
        assert_eq!(
            validate_bban("BE", "").first_code(),
            Some(ValidationErrorCode::InvalidInput)
        );
    }

    #[test]
    fn unknown_country() {
        // ZZ is not an ISO 3166 code; US is, but has no IBAN rule.
        assert_eq!(
            validate_iban("ZZ68539007547034").first_code(),
            Some(ValidationErrorCode::InvalidCountryCode)
        );
        assert_eq!(
            validate_iban("US68539007547034").first_code(),
            Some(ValidationErrorCode::UnsupportedCountry)
        );
    }

    #[test]
    fn missing_country_code() {
        assert_eq!(
            validate_iban("68539007547034").first_code(),
            Some(ValidationErrorCode::InvalidCountryCode)
        );
    }

    #[test]
    fn explicit_country_mismatch() {
        assert_eq!(
            validate_iban_for("NL", "BE68539007547034").first_code(),
            Some(ValidationErrorCode::InvalidCountryCode)
        );
    }

    #[test]
    fn bban_errors_surface_before_envelope() {
        // Letter inside the Belgian account field: the BBAN's InvalidFormat
        // must win over the (also failing) envelope checksum.
        let r = validate_iban("BE685390075470A4");
        assert_eq!(r.first_code(), Some(ValidationErrorCode::InvalidFormat));
    }

    #[test]
    fn envelope_failure_when_bban_fine() {
        // Both the Belgian national check and the envelope cover the BBAN,
        // so corrupt the IBAN check digits instead.
        let r = validate_iban("DE88370400440532013000");
        assert_eq!(r.first_code(), Some(ValidationErrorCode::InvalidChecksum));
    }

    #[test]
    fn parse_belgian() {
        let d = parse_iban("BE68539007547034").unwrap();
        assert_eq!(d.country_code, "BE");
        assert_eq!(d.check_digits, "68");
        assert_eq!(d.bban, "539007547034");
        assert_eq!(d.bank_code.as_deref(), Some("539"));
        assert_eq!(d.account_number.as_deref(), Some("0075470"));
        assert_eq!(d.national_check_digits.as_deref(), Some("34"));
    }

    #[test]
    fn parse_rejects_invalid() {
        assert!(parse_iban("BE68539007547035").is_none());
    }

    #[test]
    fn derive_round_trip() {
        assert_eq!(derive_check_digits("BE", "539007547034").as_deref(), Some("68"));
        assert_eq!(
            derive_check_digits("DE", "370400440532013000").as_deref(),
            Some("89")
        );
        // Invalid BBAN has no defined check digits
        assert_eq!(derive_check_digits("BE", "539007547035"), None);
    }

    #[test]
    fn registry_samples_across_regions() {
        for iban in [
            "AT611904300234573201",
            "CH9300762011623852957",
            "CY17002001280000001200527600",
            "CZ6508000000192000145399",
            "DK5000400440116243",
            "EE382200221020145685",
            "ES9121000418450200051332",
            "FI2112345600000785",
            "FR1420041010050500013M02606",
            "GB29NWBK60161331926819",
            "GR1601101250000000012300695",
            "IS140159260076545510730339",
            "IT60X0542811101000000123456",
            "LU280019400644750000",
            "NL91ABNA0417164300",
            "NO9386011117947",
            "PL61109010140000071219812874",
            "PT50000201231234567890154",
            "SE4550000000058398257466",
            "SI56263300012039086",
            "SK3112000000198742637541",
            "SM86U0322509800000000270100",
            "AE070331234567890123456",
            "IL620108000000099999999",
            "SA0380000000608010167519",
            "TR330006100519786457841326",
            "EG380019000500000000263180002",
            "MU17BOMM0101101030300200000MUR",
            "BR1800360305000010009795493C1",
            "CR05015202001026284066",
            "GT82TRAJ01020000001210029690",
            "AZ21NABZ00000000137010001944",
            "KZ86125KZT5004100100",
            "PK36SCBL0000001123456702",
        ] {
            let r = validate_iban(iban);
            assert!(r.is_valid(), "{iban}: {:?}", r.errors());
        }
    }

    #[test]
    fn wrong_length_reports_expected_and_actual() {
        let r = validate_iban("BE6853900754703");
        assert_eq!(r.first_code(), Some(ValidationErrorCode::InvalidLength));
        assert!(r.errors()[0].message.contains("expected length 16"));
        assert!(r.errors()[0].message.contains("got 15"));
    }
}
