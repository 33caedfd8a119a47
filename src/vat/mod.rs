//! EU (and adjacent) VAT number validation.
//!
//! Each member state hides a different checksum behind the common
//! `CCnnnnnnn` surface, so the per-country checks live here as free
//! functions over the national part and a single dispatcher maps the
//! two-letter prefix to them. Greece is registered under its VIES prefix
//! `EL` (with `GR` accepted on input) and Northern Ireland under `XI`,
//! which reuses the United Kingdom algorithm.
//!
//! # Example
//!
//! ```rust
//! use finident::vat::{validate_vat, parse_vat};
//!
//! assert!(validate_vat("BE 0403.170.701").is_valid());
//! assert!(validate_vat("ATU13585627").is_valid());
//!
//! let details = parse_vat("EL094259216").unwrap();
//! assert!(details.is_vies_eligible);
//! ```

use serde::{Deserialize, Serialize};

use crate::checksum::luhn::{self, Direction};
use crate::checksum::mod11::{self, RemainderRule};
use crate::checksum::mod97;
use crate::core::{
    ValidationErrorCode, ValidationResult, country_prefix, is_eu_vat_country, normalize,
    strip_country_prefix,
};
use crate::identity;

/// Structured view of a successfully validated VAT number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VatDetails {
    /// Canonical VIES-style prefix (`EL` for Greece, `XI` for Northern
    /// Ireland).
    pub country_code: String,
    /// National part, normalized, without the country prefix.
    pub number: String,
    /// Whether the issuing country is an EU member state.
    pub is_eu_vat: bool,
    /// Whether the number can be looked up in VIES (EU members plus `XI`).
    pub is_vies_eligible: bool,
}

fn empty_input() -> ValidationResult {
    ValidationResult::fail(
        ValidationErrorCode::InvalidInput,
        "input is empty or whitespace-only",
    )
}

fn length_failure(expected: &str, actual: usize) -> ValidationResult {
    ValidationResult::fail(
        ValidationErrorCode::InvalidLength,
        format!("expected length {expected}, got {actual}"),
    )
}

fn not_numeric(what: &str) -> ValidationResult {
    ValidationResult::fail(
        ValidationErrorCode::InvalidFormat,
        format!("{what} must be numeric"),
    )
}

fn all_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

fn digit_at(s: &str, i: usize) -> u32 {
    u32::from(s.as_bytes()[i] - b'0')
}

/// Canonical VIES prefix for an input prefix (`GR` folds to `EL`).
fn canonical_prefix(cc: &str) -> String {
    let cc = cc.to_ascii_uppercase();
    if cc == "GR" { "EL".to_owned() } else { cc }
}

/// Canonical prefixes with a registered VAT validator, in sorted order.
pub(crate) const SUPPORTED_COUNTRIES: &[&str] = &[
    "AT", "BE", "BG", "CY", "CZ", "DE", "DK", "EE", "EL", "ES", "FI", "FR", "GB", "HR", "HU",
    "IE", "IT", "LT", "LU", "LV", "MT", "NL", "PL", "PT", "RO", "SE", "SI", "SK", "XI",
];

/// Whether a VAT validator is registered for `cc`.
pub fn is_supported_country(cc: &str) -> bool {
    SUPPORTED_COUNTRIES
        .binary_search(&canonical_prefix(cc).as_str())
        .is_ok()
}

/// Validate a VAT number, inferring the country from its prefix.
pub fn validate_vat(value: &str) -> ValidationResult {
    let normalized = normalize(value);
    if normalized.is_empty() {
        return empty_input();
    }
    let Some(cc) = country_prefix(&normalized) else {
        return ValidationResult::fail(
            ValidationErrorCode::InvalidCountryCode,
            "VAT number must start with a 2-letter country prefix",
        );
    };
    validate_vat_for(&cc.to_owned(), value)
}

/// Validate a VAT number that must belong to country `cc`; the country
/// prefix on the value itself is optional.
pub fn validate_vat_for(cc: &str, value: &str) -> ValidationResult {
    let cc = canonical_prefix(cc);
    let normalized = normalize(value);
    if normalized.is_empty() {
        return empty_input();
    }
    let body = national_part(&cc, &normalized);
    if body.is_empty() {
        return empty_input();
    }
    // Per-country checks slice the body by byte offset; non-ASCII input
    // must be rejected before any of them run.
    if !body.is_ascii() {
        return ValidationResult::fail(
            ValidationErrorCode::InvalidFormat,
            "VAT number contains a non-ASCII character",
        );
    }
    match cc.as_str() {
        "AT" => validate_at(body),
        "BE" => identity::validate_be_enterprise_number(body),
        "BG" => validate_bg(body),
        "CY" => validate_cy(body),
        "CZ" => validate_cz(body),
        "DE" => validate_de(body),
        "DK" => validate_dk(body),
        "EE" => validate_ee(body),
        "EL" => validate_el(body),
        "ES" => validate_es(body),
        "FI" => validate_fi(body),
        "FR" => validate_fr(body),
        "GB" | "XI" => validate_gb(body),
        "HR" => validate_hr(body),
        "HU" => validate_hu(body),
        "IE" => validate_ie(body),
        "IT" => validate_it(body),
        "LT" => validate_lt(body),
        "LU" => validate_lu(body),
        "LV" => validate_lv(body),
        "MT" => validate_mt(body),
        "NL" => validate_nl(body),
        "PL" => validate_pl(body),
        "PT" => validate_pt(body),
        "RO" => validate_ro(body),
        "SE" => validate_se(body),
        "SI" => validate_si(body),
        "SK" => validate_sk(body),
        cc => ValidationResult::fail(
            ValidationErrorCode::UnsupportedCountry,
            format!("no VAT validator registered for country '{cc}'"),
        ),
    }
}

/// Parse a VAT number into its details; `None` if validation fails.
pub fn parse_vat(value: &str) -> Option<VatDetails> {
    let normalized = normalize(value);
    if !validate_vat(&normalized).is_valid() {
        return None;
    }
    let cc = canonical_prefix(country_prefix(&normalized)?);
    let number = national_part(&cc, &normalized).to_owned();
    let vies = is_eu_vat_country(&cc);
    Some(VatDetails {
        is_eu_vat: vies && cc != "XI",
        is_vies_eligible: vies,
        country_code: cc,
        number,
    })
}

/// National part of a normalized value for country `cc`, with the `GR`
/// alias stripped alongside `EL`.
fn national_part<'a>(cc: &str, normalized: &'a str) -> &'a str {
    let stripped = strip_country_prefix(normalized, cc);
    if cc == "EL" {
        strip_country_prefix(stripped, "GR")
    } else {
        stripped
    }
}

// --- Per-country checks over the national part ---

/// Austria: `U` + 8 digits; check = (96 − Luhn-style sum) mod 10.
fn validate_at(n: &str) -> ValidationResult {
    if n.len() != 9 {
        return length_failure("9", n.len());
    }
    if !n.starts_with('U') || !all_digits(&n[1..]) {
        return ValidationResult::fail(
            ValidationErrorCode::InvalidFormat,
            "expected 'U' followed by 8 digits",
        );
    }
    let mut sum = 0;
    for i in 0..7 {
        let d = digit_at(n, 1 + i);
        sum += if i % 2 == 1 {
            let doubled = d * 2;
            doubled / 10 + doubled % 10
        } else {
            d
        };
    }
    if (96 - sum) % 10 != digit_at(n, 8) {
        return ValidationResult::fail(
            ValidationErrorCode::InvalidCheckDigit,
            "check digit mismatch",
        );
    }
    ValidationResult::ok()
}

/// Bulgaria: 9-digit legal entities carry a two-pass weighted mod 11
/// check; 10-digit personal numbers are accepted structurally.
fn validate_bg(n: &str) -> ValidationResult {
    if !all_digits(n) {
        return not_numeric("VAT number");
    }
    match n.len() {
        9 => {
            let body = &n[..8];
            let check = digit_at(n, 8);
            let first = mod11::weighted_sum(body, &[1, 2, 3, 4, 5, 6, 7, 8])
                .expect("digits verified above")
                % 11;
            let expected = if first == 10 {
                let second = mod11::weighted_sum(body, &[3, 4, 5, 6, 7, 8, 9, 10])
                    .expect("digits verified above")
                    % 11;
                second % 10
            } else {
                first
            };
            if check != expected {
                return ValidationResult::fail(
                    ValidationErrorCode::InvalidCheckDigit,
                    "check digit mismatch",
                );
            }
            ValidationResult::ok()
        }
        10 => ValidationResult::ok(),
        other => length_failure("9 or 10", other),
    }
}

// The Cypriot transformation for digits at odd 1-indexed positions.
const CY_ODD_MAP: [u32; 10] = [1, 0, 5, 7, 9, 13, 15, 17, 19, 21];

/// Cyprus: 8 digits + check letter, odd positions remapped before summing.
fn validate_cy(n: &str) -> ValidationResult {
    if n.len() != 9 {
        return length_failure("9", n.len());
    }
    let (digits, check) = n.split_at(8);
    if !all_digits(digits) || !check.bytes().all(|b| b.is_ascii_uppercase()) {
        return ValidationResult::fail(
            ValidationErrorCode::InvalidFormat,
            "expected 8 digits and a check letter",
        );
    }
    let mut sum = 0;
    for i in 0..8 {
        let d = digit_at(digits, i);
        sum += if i % 2 == 0 { CY_ODD_MAP[d as usize] } else { d };
    }
    let expected = (b'A' + (sum % 26) as u8) as char;
    if check != expected.to_string() {
        return ValidationResult::fail(
            ValidationErrorCode::InvalidCheckLetter,
            format!("expected check letter '{expected}'"),
        );
    }
    ValidationResult::ok()
}

/// Czechia: 8-digit legal entities verify a weighted mod 11 check;
/// 9- and 10-digit personal formats are accepted structurally.
fn validate_cz(n: &str) -> ValidationResult {
    if !all_digits(n) {
        return not_numeric("VAT number");
    }
    match n.len() {
        8 => {
            let sum = mod11::weighted_sum(&n[..7], &[8, 7, 6, 5, 4, 3, 2])
                .expect("digits verified above");
            let expected = (11 - sum % 11) % 10;
            if digit_at(n, 7) != expected {
                return ValidationResult::fail(
                    ValidationErrorCode::InvalidCheckDigit,
                    "check digit mismatch",
                );
            }
            ValidationResult::ok()
        }
        9 | 10 => ValidationResult::ok(),
        other => length_failure("8, 9 or 10", other),
    }
}

/// Germany: 9 digits, ISO 7064 MOD 11,10 over the first 8.
fn validate_de(n: &str) -> ValidationResult {
    if n.len() != 9 {
        return length_failure("9", n.len());
    }
    if !all_digits(n) {
        return not_numeric("VAT number");
    }
    let expected = mod11::iso7064_mod11_10(&n[..8]).expect("digits verified above");
    if digit_at(n, 8) != expected {
        return ValidationResult::fail(
            ValidationErrorCode::InvalidCheckDigit,
            "check digit mismatch",
        );
    }
    ValidationResult::ok()
}

/// Denmark: 8 digits, weighted sum divisible by 11.
fn validate_dk(n: &str) -> ValidationResult {
    if n.len() != 8 {
        return length_failure("8", n.len());
    }
    if !all_digits(n) {
        return not_numeric("VAT number");
    }
    let sum =
        mod11::weighted_sum(n, &[2, 7, 6, 5, 4, 3, 2, 1]).expect("digits verified above");
    if sum % 11 != 0 {
        return ValidationResult::fail(
            ValidationErrorCode::InvalidChecksum,
            "weighted sum not divisible by 11",
        );
    }
    ValidationResult::ok()
}

/// Estonia: 9 digits, weights 3-7-1 cycled, check = (10 − sum) mod 10.
fn validate_ee(n: &str) -> ValidationResult {
    if n.len() != 9 {
        return length_failure("9", n.len());
    }
    if !all_digits(n) {
        return not_numeric("VAT number");
    }
    let sum = mod11::weighted_sum(&n[..8], &[3, 7, 1]).expect("digits verified above");
    if digit_at(n, 8) != (10 - sum % 10) % 10 {
        return ValidationResult::fail(
            ValidationErrorCode::InvalidCheckDigit,
            "check digit mismatch",
        );
    }
    ValidationResult::ok()
}

/// Greece: 9 digits, powers-of-two weights, check = (sum mod 11) mod 10.
fn validate_el(n: &str) -> ValidationResult {
    if n.len() != 9 {
        return length_failure("9", n.len());
    }
    if !all_digits(n) {
        return not_numeric("VAT number");
    }
    let sum = mod11::weighted_sum(&n[..8], &[256, 128, 64, 32, 16, 8, 4, 2])
        .expect("digits verified above");
    let expected = RemainderRule::PlainMod10
        .digit_for(sum % 11)
        .expect("PlainMod10 is total");
    if digit_at(n, 8) != expected {
        return ValidationResult::fail(
            ValidationErrorCode::InvalidCheckDigit,
            "check digit mismatch",
        );
    }
    ValidationResult::ok()
}

/// Spain: personal formats (DNI/NIE) delegate to the identity validator;
/// company CIFs verify the alternating-sum check in digit or letter form.
fn validate_es(n: &str) -> ValidationResult {
    if n.len() != 9 {
        return length_failure("9", n.len());
    }
    let first = n.as_bytes()[0];
    if first.is_ascii_digit() || matches!(first, b'X' | b'Y' | b'Z') {
        return identity::validate_es_dni(n);
    }
    if !first.is_ascii_uppercase() || !all_digits(&n[1..8]) {
        return ValidationResult::fail(
            ValidationErrorCode::InvalidFormat,
            "expected an organization letter followed by 7 digits and a check",
        );
    }
    let mut sum = 0;
    for i in 0..7 {
        let d = digit_at(n, 1 + i);
        sum += if i % 2 == 0 {
            let doubled = d * 2;
            doubled / 10 + doubled % 10
        } else {
            d
        };
    }
    let value = (10 - sum % 10) % 10;
    let as_digit = (b'0' + value as u8) as char;
    let as_letter = "JABCDEFGHI".as_bytes()[value as usize] as char;
    let last = n.chars().last().expect("length verified above");
    if last != as_digit && last != as_letter {
        return ValidationResult::fail(
            ValidationErrorCode::InvalidCheckDigit,
            format!("expected check '{as_digit}' or '{as_letter}'"),
        );
    }
    ValidationResult::ok()
}

/// Finland: 8 digits, weighted mod 11 with the complement rule.
fn validate_fi(n: &str) -> ValidationResult {
    if n.len() != 8 {
        return length_failure("8", n.len());
    }
    if !all_digits(n) {
        return not_numeric("VAT number");
    }
    match mod11::check_digit(&n[..7], &[7, 9, 10, 5, 8, 4, 2], RemainderRule::Complement) {
        None => ValidationResult::fail(
            ValidationErrorCode::InvalidChecksum,
            "remainder 1 has no valid check digit",
        ),
        Some(expected) if digit_at(n, 7) != expected => ValidationResult::fail(
            ValidationErrorCode::InvalidCheckDigit,
            "check digit mismatch",
        ),
        Some(_) => ValidationResult::ok(),
    }
}

/// France: 2-character key + 9-digit SIREN; a numeric key verifies
/// `(siren * 100 + 12) mod 97`. Letter keys (older issuance) are accepted
/// structurally.
fn validate_fr(n: &str) -> ValidationResult {
    if n.len() != 11 {
        return length_failure("11", n.len());
    }
    let (key, siren) = n.split_at(2);
    if !all_digits(siren) {
        return not_numeric("SIREN part");
    }
    if all_digits(key) {
        let siren_num: u64 = siren.parse().expect("digits verified above");
        let expected = (siren_num * 100 + 12) % 97;
        let key_num: u64 = key.parse().expect("digits verified above");
        if key_num != expected {
            return ValidationResult::fail(
                ValidationErrorCode::InvalidChecksum,
                format!("expected key {expected:02}"),
            );
        }
        return ValidationResult::ok();
    }
    // Letter keys never use O or I.
    if key.bytes().any(|b| !b.is_ascii_alphanumeric() || b == b'O' || b == b'I') {
        return ValidationResult::fail(
            ValidationErrorCode::InvalidFormat,
            "key must be two digits or letters excluding O and I",
        );
    }
    ValidationResult::ok()
}

/// United Kingdom (and `XI`): standard 9- or 12-digit numbers verify the
/// mod 97 check in either the original or the "9755" offset scheme;
/// `GD`/`HA` branch numbers verify their 3-digit range.
fn validate_gb(n: &str) -> ValidationResult {
    if let Some(rest) = n.strip_prefix("GD").or_else(|| n.strip_prefix("HA")) {
        if rest.len() != 3 || !all_digits(rest) {
            return ValidationResult::fail(
                ValidationErrorCode::InvalidFormat,
                "expected 3 digits after the GD/HA prefix",
            );
        }
        let num: u32 = rest.parse().expect("digits verified above");
        let in_range = if n.starts_with("GD") { num < 500 } else { num >= 500 };
        if !in_range {
            return ValidationResult::fail(
                ValidationErrorCode::InvalidFormat,
                "branch number outside its reserved range",
            );
        }
        return ValidationResult::ok();
    }
    if !all_digits(n) {
        return not_numeric("VAT number");
    }
    if n.len() != 9 && n.len() != 12 {
        return length_failure("9 or 12", n.len());
    }
    let sum = mod11::weighted_sum(&n[..7], &[8, 7, 6, 5, 4, 3, 2])
        .expect("digits verified above");
    let check: u32 = n[7..9].parse().expect("digits verified above");
    let total = sum + check;
    if total % 97 != 0 && (total + 55) % 97 != 0 {
        return ValidationResult::fail(
            ValidationErrorCode::InvalidChecksum,
            "mod 97 check failed in both schemes",
        );
    }
    ValidationResult::ok()
}

/// Croatia: 11 digits (the OIB), ISO 7064 MOD 11,10 over the first 10.
fn validate_hr(n: &str) -> ValidationResult {
    if n.len() != 11 {
        return length_failure("11", n.len());
    }
    if !all_digits(n) {
        return not_numeric("VAT number");
    }
    let expected = mod11::iso7064_mod11_10(&n[..10]).expect("digits verified above");
    if digit_at(n, 10) != expected {
        return ValidationResult::fail(
            ValidationErrorCode::InvalidCheckDigit,
            "check digit mismatch",
        );
    }
    ValidationResult::ok()
}

/// Hungary: 8 digits, weights 9-7-3-1 cycled, check = (10 − sum) mod 10.
fn validate_hu(n: &str) -> ValidationResult {
    if n.len() != 8 {
        return length_failure("8", n.len());
    }
    if !all_digits(n) {
        return not_numeric("VAT number");
    }
    let sum = mod11::weighted_sum(&n[..7], &[9, 7, 3, 1]).expect("digits verified above");
    if digit_at(n, 7) != (10 - sum % 10) % 10 {
        return ValidationResult::fail(
            ValidationErrorCode::InvalidCheckDigit,
            "check digit mismatch",
        );
    }
    ValidationResult::ok()
}

/// Ireland: mod 23 check letter from [`IE_CHECK_LETTERS`]. The old
/// `digit + letter + 5 digits + check` style is rearranged into the new
/// 7-digit form first; a trailing second letter adds 9 times its ordinal.
///
/// [`IE_CHECK_LETTERS`]: crate::checksum::letters::IE_CHECK_LETTERS
fn validate_ie(n: &str) -> ValidationResult {
    use crate::checksum::letters::{IE_CHECK_LETTERS, check_letter};

    let bad_format = || {
        ValidationResult::fail(
            ValidationErrorCode::InvalidFormat,
            "expected 7 digits and 1-2 letters (or the pre-2013 layout)",
        )
    };
    if n.len() != 8 && n.len() != 9 {
        return length_failure("8 or 9", n.len());
    }
    let bytes = n.as_bytes();
    let (digits, check, second) = if n.len() == 8 && bytes[1].is_ascii_uppercase() {
        // Old style: second character moves to the front as a zero.
        if !all_digits(&n[2..7]) || !bytes[0].is_ascii_digit() {
            return bad_format();
        }
        (format!("0{}{}", &n[2..7], &n[..1]), bytes[7], None)
    } else {
        if !all_digits(&n[..7]) {
            return bad_format();
        }
        (n[..7].to_owned(), bytes[7], bytes.get(8).copied())
    };
    if !check.is_ascii_uppercase() {
        return bad_format();
    }
    let mut sum =
        mod11::weighted_sum(&digits, &[8, 7, 6, 5, 4, 3, 2]).expect("digits rearranged above");
    if let Some(letter) = second {
        if !letter.is_ascii_uppercase() {
            return bad_format();
        }
        sum += 9 * u32::from(letter - b'A' + 1);
    }
    let expected = check_letter(sum % 23, IE_CHECK_LETTERS);
    if char::from(check) != expected {
        return ValidationResult::fail(
            ValidationErrorCode::InvalidCheckLetter,
            format!("expected check letter '{expected}'"),
        );
    }
    ValidationResult::ok()
}

/// Italy: an 11-digit Partita IVA verifies the Luhn check; a 16-character
/// value is treated as a Codice Fiscale and delegated.
fn validate_it(n: &str) -> ValidationResult {
    match n.len() {
        16 => identity::validate_it_codice_fiscale(n),
        11 => {
            if !all_digits(n) {
                return not_numeric("Partita IVA");
            }
            if !luhn::is_valid(n, Direction::FromRight) {
                return ValidationResult::fail(
                    ValidationErrorCode::InvalidChecksum,
                    "Luhn checksum mismatch",
                );
            }
            ValidationResult::ok()
        }
        other => length_failure("11 or 16", other),
    }
}

/// Lithuania: 9 or 12 digits, two-pass weighted mod 11.
fn validate_lt(n: &str) -> ValidationResult {
    if !all_digits(n) {
        return not_numeric("VAT number");
    }
    if n.len() != 9 && n.len() != 12 {
        return length_failure("9 or 12", n.len());
    }
    let body = &n[..n.len() - 1];
    let check = digit_at(n, n.len() - 1);
    let first = mod11::weighted_sum(body, &[1, 2, 3, 4, 5, 6, 7, 8, 9])
        .expect("digits verified above")
        % 11;
    let expected = if first == 10 {
        let second = mod11::weighted_sum(body, &[3, 4, 5, 6, 7, 8, 9, 1, 2])
            .expect("digits verified above")
            % 11;
        second % 10
    } else {
        first
    };
    if check != expected {
        return ValidationResult::fail(
            ValidationErrorCode::InvalidCheckDigit,
            "check digit mismatch",
        );
    }
    ValidationResult::ok()
}

/// Luxembourg: 8 digits, the first 6 mod 89 must equal the last 2.
fn validate_lu(n: &str) -> ValidationResult {
    if n.len() != 8 {
        return length_failure("8", n.len());
    }
    if !all_digits(n) {
        return not_numeric("VAT number");
    }
    let body: u64 = n[..6].parse().expect("digits verified above");
    let check: u64 = n[6..].parse().expect("digits verified above");
    if body % 89 != check {
        return ValidationResult::fail(
            ValidationErrorCode::InvalidChecksum,
            "mod 89 check pair mismatch",
        );
    }
    ValidationResult::ok()
}

/// Latvia: 11 digits. Legal-entity numbers start 4-9; natural-person
/// numbers embed a birth date. No public checksum is applied here.
fn validate_lv(n: &str) -> ValidationResult {
    if n.len() != 11 {
        return length_failure("11", n.len());
    }
    if !all_digits(n) {
        return not_numeric("VAT number");
    }
    ValidationResult::ok()
}

/// Malta: 8 digits, last 2 = 37 − (weighted sum mod 37).
fn validate_mt(n: &str) -> ValidationResult {
    if n.len() != 8 {
        return length_failure("8", n.len());
    }
    if !all_digits(n) {
        return not_numeric("VAT number");
    }
    let sum = mod11::weighted_sum(&n[..6], &[3, 4, 6, 7, 8, 9]).expect("digits verified above");
    let check: u32 = n[6..].parse().expect("digits verified above");
    if check != 37 - sum % 37 {
        return ValidationResult::fail(
            ValidationErrorCode::InvalidChecksum,
            "mod 37 check pair mismatch",
        );
    }
    ValidationResult::ok()
}

/// Netherlands: 9 digits + `B` + 2-digit suffix. Accepts either the
/// classic weighted mod 11 over the 9 digits or the post-2020
/// sole-proprietor scheme, a mod 97 fold of the full `NL...` string.
fn validate_nl(n: &str) -> ValidationResult {
    if n.len() != 12 {
        return length_failure("12", n.len());
    }
    let bytes = n.as_bytes();
    if !all_digits(&n[..9]) || bytes[9] != b'B' || !all_digits(&n[10..]) {
        return ValidationResult::fail(
            ValidationErrorCode::InvalidFormat,
            "expected 9 digits, 'B', then 2 digits",
        );
    }
    let classic = {
        let sum = mod11::weighted_sum(&n[..8], &[9, 8, 7, 6, 5, 4, 3, 2])
            .expect("digits verified above");
        sum % 11 < 10 && sum % 11 == digit_at(n, 8)
    };
    let modern = mod97::fold_remainder(&format!("NL{n}")) == Some(1);
    if !classic && !modern {
        return ValidationResult::fail(
            ValidationErrorCode::InvalidChecksum,
            "neither the mod 11 nor the mod 97 scheme verifies",
        );
    }
    ValidationResult::ok()
}

/// Poland: 10 digits (the NIP), plain weighted mod 11 with remainder 10
/// forbidden.
fn validate_pl(n: &str) -> ValidationResult {
    if n.len() != 10 {
        return length_failure("10", n.len());
    }
    if !all_digits(n) {
        return not_numeric("VAT number");
    }
    match mod11::check_digit(&n[..9], &[6, 5, 7, 2, 3, 4, 5, 6, 7], RemainderRule::Plain) {
        None => ValidationResult::fail(
            ValidationErrorCode::InvalidChecksum,
            "remainder 10 has no valid check digit",
        ),
        Some(expected) if digit_at(n, 9) != expected => ValidationResult::fail(
            ValidationErrorCode::InvalidCheckDigit,
            "check digit mismatch",
        ),
        Some(_) => ValidationResult::ok(),
    }
}

/// Portugal: 9 digits (the NIF), weighted mod 11 with low remainders
/// folding to zero.
fn validate_pt(n: &str) -> ValidationResult {
    if n.len() != 9 {
        return length_failure("9", n.len());
    }
    if !all_digits(n) {
        return not_numeric("VAT number");
    }
    let expected = mod11::check_digit(
        &n[..8],
        &[9, 8, 7, 6, 5, 4, 3, 2],
        RemainderRule::ComplementHighToZero,
    )
    .expect("rule is total over digits");
    if digit_at(n, 8) != expected {
        return ValidationResult::fail(
            ValidationErrorCode::InvalidCheckDigit,
            "check digit mismatch",
        );
    }
    ValidationResult::ok()
}

/// Romania: 2-10 digits; the body is left-padded to 9 before the weighted
/// check, expected = (sum * 10) mod 11 mod 10.
fn validate_ro(n: &str) -> ValidationResult {
    if !all_digits(n) {
        return not_numeric("VAT number");
    }
    if n.len() < 2 || n.len() > 10 {
        return length_failure("2 to 10", n.len());
    }
    let body = &n[..n.len() - 1];
    let padded = format!("{body:0>9}");
    let sum = mod11::weighted_sum(&padded, &[7, 5, 3, 2, 1, 7, 5, 3, 2])
        .expect("digits verified above");
    if digit_at(n, n.len() - 1) != (sum * 10) % 11 % 10 {
        return ValidationResult::fail(
            ValidationErrorCode::InvalidCheckDigit,
            "check digit mismatch",
        );
    }
    ValidationResult::ok()
}

/// Sweden: 12 digits, the organisationsnummer Luhn check over the first
/// 10 and a `01` suffix.
fn validate_se(n: &str) -> ValidationResult {
    if n.len() != 12 {
        return length_failure("12", n.len());
    }
    if !all_digits(n) {
        return not_numeric("VAT number");
    }
    if !n.ends_with("01") {
        return ValidationResult::fail(
            ValidationErrorCode::InvalidFormat,
            "VAT suffix must be 01",
        );
    }
    if !luhn::is_valid(&n[..10], Direction::FromRight) {
        return ValidationResult::fail(
            ValidationErrorCode::InvalidChecksum,
            "Luhn checksum mismatch",
        );
    }
    ValidationResult::ok()
}

/// Slovenia: 8 digits, weighted mod 11 with remainder 1 forbidden.
fn validate_si(n: &str) -> ValidationResult {
    if n.len() != 8 {
        return length_failure("8", n.len());
    }
    if !all_digits(n) {
        return not_numeric("VAT number");
    }
    match mod11::check_digit(&n[..7], &[8, 7, 6, 5, 4, 3, 2], RemainderRule::Complement) {
        None => ValidationResult::fail(
            ValidationErrorCode::InvalidChecksum,
            "remainder 1 has no valid check digit",
        ),
        Some(expected) if digit_at(n, 7) != expected => ValidationResult::fail(
            ValidationErrorCode::InvalidCheckDigit,
            "check digit mismatch",
        ),
        Some(_) => ValidationResult::ok(),
    }
}

/// Slovakia: 10 digits divisible by 11, with positional constraints on the
/// first and third digits.
fn validate_sk(n: &str) -> ValidationResult {
    if n.len() != 10 {
        return length_failure("10", n.len());
    }
    if !all_digits(n) {
        return not_numeric("VAT number");
    }
    if digit_at(n, 0) == 0 {
        return ValidationResult::fail(
            ValidationErrorCode::InvalidFormat,
            "first digit must be 1-9",
        );
    }
    if !matches!(digit_at(n, 2), 2 | 3 | 4 | 7 | 8 | 9) {
        return ValidationResult::fail(
            ValidationErrorCode::InvalidFormat,
            "third digit must be one of 2, 3, 4, 7, 8, 9",
        );
    }
    let num: u64 = n.parse().expect("digits verified above");
    if num % 11 != 0 {
        return ValidationResult::fail(
            ValidationErrorCode::InvalidChecksum,
            "number not divisible by 11",
        );
    }
    ValidationResult::ok()
}
