//! National identity numbers.

use chrono::NaiveDate;

use crate::checksum::letters::{ES_DNI_LETTERS, check_letter, italian_check_char};
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

/// Belgian national number (rijksregisternummer): YYMMDD-SSS-CC.
///
/// The check pair is 97 minus the leading 9 digits mod 97 — computed over
/// the digits as printed for people born before 2000, and over the same
/// digits prefixed with "2" for people born in or after 2000. Both century
/// candidates are tried; the matching one must also encode a plausible
/// calendar date.
pub fn validate_be_national_number(value: &str) -> ValidationResult {
    let n = normalize(value);
    let n = strip_country_prefix(&n, "BE");
    if n.is_empty() {
        return empty_input();
    }
    if n.len() != 11 {
        return length_failure(11, n.len());
    }
    if !n.bytes().all(|b| b.is_ascii_digit()) {
        return ValidationResult::fail(
            ValidationErrorCode::InvalidFormat,
            "national number must be 11 digits",
        );
    }
    let base: u64 = n[..9].parse().expect("digits verified above");
    let check: u64 = n[9..].parse().expect("digits verified above");
    let mut checksum_century: Option<i32> = None;
    for (century, candidate) in [(1900, base), (2000, 2_000_000_000 + base)] {
        if 97 - (candidate % 97) == check {
            checksum_century = Some(century);
            break;
        }
    }
    let Some(century) = checksum_century else {
        return ValidationResult::fail(
            ValidationErrorCode::InvalidChecksum,
            "mod 97 check pair matches neither century candidate",
        );
    };
    let year = century + n[..2].parse::<i32>().expect("digits verified above");
    let month: u32 = n[2..4].parse().expect("digits verified above");
    let day: u32 = n[4..6].parse().expect("digits verified above");
    // Month 0 appears in historical numbers issued without a known birth
    // date; anything else must be a real calendar date.
    if month != 0 && NaiveDate::from_ymd_opt(year, month, day).is_none() {
        return ValidationResult::fail(
            ValidationErrorCode::InvalidFormat,
            format!("{year:04}-{month:02}-{day:02} is not a valid birth date"),
        );
    }
    ValidationResult::ok()
}

// Month letters admitted in a Codice Fiscale (A=Jan … T=Dec).
const CF_MONTH_LETTERS: &str = "ABCDEHLMPRST";

/// Italian Codice Fiscale (16 characters, trailing check letter).
pub fn validate_it_codice_fiscale(value: &str) -> ValidationResult {
    let n = normalize(value);
    if n.is_empty() {
        return empty_input();
    }
    if n.len() != 16 {
        return length_failure(16, n.len());
    }
    if !n.bytes().all(|b| b.is_ascii_alphanumeric()) {
        return ValidationResult::fail(
            ValidationErrorCode::InvalidFormat,
            "codice fiscale must be alphanumeric",
        );
    }
    if !n[..6].bytes().all(|b| b.is_ascii_uppercase()) {
        return ValidationResult::fail(
            ValidationErrorCode::InvalidFormat,
            "first 6 characters must be letters (surname and name codes)",
        );
    }
    let month = n.as_bytes()[8] as char;
    if !CF_MONTH_LETTERS.contains(month) {
        return ValidationResult::fail(
            ValidationErrorCode::InvalidFormat,
            format!("'{month}' is not a valid month letter"),
        );
    }
    let expected = match italian_check_char(&n[..15]) {
        Some(c) => c,
        None => {
            return ValidationResult::fail(
                ValidationErrorCode::InvalidFormat,
                "codice fiscale contains an unexpected character",
            );
        }
    };
    let actual = n.as_bytes()[15] as char;
    if actual != expected {
        return ValidationResult::fail(
            ValidationErrorCode::InvalidCheckLetter,
            format!("check letter mismatch: expected {expected}, got {actual}"),
        );
    }
    ValidationResult::ok()
}

/// Spanish DNI (8 digits + letter) or NIE (X/Y/Z + 7 digits + letter).
///
/// The check letter indexes the fixed 23-letter table by the number mod 23;
/// a NIE's leading letter contributes 0/1/2 as an extra leading digit.
pub fn validate_es_dni(value: &str) -> ValidationResult {
    let n = normalize(value);
    let n = strip_country_prefix(&n, "ES");
    if n.is_empty() {
        return empty_input();
    }
    if n.len() != 9 {
        return length_failure(9, n.len());
    }
    if !n.is_ascii() {
        return ValidationResult::fail(
            ValidationErrorCode::InvalidFormat,
            "DNI/NIE contains a non-ASCII character",
        );
    }
    let bytes = n.as_bytes();
    let digits: String = match bytes[0] {
        b'X' => format!("0{}", &n[1..8]),
        b'Y' => format!("1{}", &n[1..8]),
        b'Z' => format!("2{}", &n[1..8]),
        b'0'..=b'9' => n[..8].to_owned(),
        other => {
            return ValidationResult::fail(
                ValidationErrorCode::InvalidFormat,
                format!("'{}' is not a valid DNI/NIE prefix", other as char),
            );
        }
    };
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return ValidationResult::fail(
            ValidationErrorCode::InvalidFormat,
            "DNI/NIE body must be numeric",
        );
    }
    if !bytes[8].is_ascii_uppercase() {
        return ValidationResult::fail(
            ValidationErrorCode::InvalidFormat,
            "DNI/NIE must end with a check letter",
        );
    }
    let number: u32 = digits.parse().expect("digits verified above");
    let expected = check_letter(number % 23, ES_DNI_LETTERS);
    let actual = bytes[8] as char;
    if actual != expected {
        return ValidationResult::fail(
            ValidationErrorCode::InvalidCheckLetter,
            format!("check letter mismatch: expected {expected}, got {actual}"),
        );
    }
    ValidationResult::ok()
}

/// French NIR (sécurité sociale, 13 digits + 2-digit key).
///
/// Corsican departments print "2A"/"2B" in positions 6-7; they fold to
/// 19/18 before the mod 97 key computation.
pub fn validate_fr_nir(value: &str) -> ValidationResult {
    let n = normalize(value);
    let n = strip_country_prefix(&n, "FR");
    if n.is_empty() {
        return empty_input();
    }
    if n.len() != 15 {
        return length_failure(15, n.len());
    }
    if !n.is_ascii() {
        return ValidationResult::fail(
            ValidationErrorCode::InvalidFormat,
            "NIR contains a non-ASCII character",
        );
    }
    // Corsica substitution happens before any numeric interpretation.
    let folded = match &n[5..7] {
        "2A" => format!("{}19{}", &n[..5], &n[7..]),
        "2B" => format!("{}18{}", &n[..5], &n[7..]),
        _ => n.to_owned(),
    };
    if !folded.bytes().all(|b| b.is_ascii_digit()) {
        return ValidationResult::fail(
            ValidationErrorCode::InvalidFormat,
            "NIR must be numeric (aside from a Corsican 2A/2B department)",
        );
    }
    let number: u64 = folded[..13].parse().expect("digits verified above");
    let key: u64 = folded[13..].parse().expect("digits verified above");
    if 97 - (number % 97) != key {
        return ValidationResult::fail(
            ValidationErrorCode::InvalidChecksum,
            "NIR key mismatch",
        );
    }
    ValidationResult::ok()
}

/// Dutch BSN (9 digits, "elfproef" with a −1 weight on the final digit).
pub fn validate_nl_bsn(value: &str) -> ValidationResult {
    let n = normalize(value);
    let n = strip_country_prefix(&n, "NL");
    if n.is_empty() {
        return empty_input();
    }
    if n.len() != 9 {
        return length_failure(9, n.len());
    }
    if !n.bytes().all(|b| b.is_ascii_digit()) {
        return ValidationResult::fail(
            ValidationErrorCode::InvalidFormat,
            "BSN must be 9 digits",
        );
    }
    let sum: i32 = n
        .bytes()
        .enumerate()
        .map(|(i, b)| {
            let d = i32::from(b - b'0');
            let w = if i == 8 { -1 } else { 9 - i as i32 };
            d * w
        })
        .sum();
    if sum % 11 != 0 {
        return ValidationResult::fail(
            ValidationErrorCode::InvalidChecksum,
            "elfproef sum is not divisible by 11",
        );
    }
    ValidationResult::ok()
}

const NO_K1_WEIGHTS: [u32; 9] = [3, 7, 6, 1, 8, 9, 4, 5, 2];
const NO_K2_WEIGHTS: [u32; 10] = [5, 4, 3, 2, 7, 6, 5, 4, 3, 2];

/// Norwegian fødselsnummer (11 digits, two weighted mod 11 check digits).
///
/// Either check position can hit the forbidden remainder (no valid digit
/// exists); such numbers are rejected deterministically.
pub fn validate_no_fodselsnummer(value: &str) -> ValidationResult {
    let n = normalize(value);
    if n.is_empty() {
        return empty_input();
    }
    if n.len() != 11 {
        return length_failure(11, n.len());
    }
    if !n.bytes().all(|b| b.is_ascii_digit()) {
        return ValidationResult::fail(
            ValidationErrorCode::InvalidFormat,
            "fødselsnummer must be 11 digits",
        );
    }
    for (body, check_at, weights) in [
        (&n[..9], 9, &NO_K1_WEIGHTS[..]),
        (&n[..10], 10, &NO_K2_WEIGHTS[..]),
    ] {
        let sum = mod11::weighted_sum(body, weights).expect("digits verified above");
        let Some(expected) = mod11::RemainderRule::Complement.digit_for(sum % 11) else {
            return ValidationResult::fail(
                ValidationErrorCode::InvalidChecksum,
                "no valid check digit exists for this remainder",
            );
        };
        let actual = u32::from(n.as_bytes()[check_at] - b'0');
        if actual != expected {
            return ValidationResult::fail(
                ValidationErrorCode::InvalidCheckDigit,
                format!("check digit mismatch: expected {expected}, got {actual}"),
            );
        }
    }
    // D-numbers add 40 to the day of birth.
    let mut day: u32 = n[..2].parse().expect("digits verified above");
    if day > 40 {
        day -= 40;
    }
    let month: u32 = n[2..4].parse().expect("digits verified above");
    if !(1..=31).contains(&day) || !(1..=12).contains(&month) {
        return ValidationResult::fail(
            ValidationErrorCode::InvalidFormat,
            format!("{day:02}.{month:02} is not a plausible birth day/month"),
        );
    }
    ValidationResult::ok()
}

/// Swedish personnummer (10 digits, or 12 with a century prefix).
pub fn validate_se_personnummer(value: &str) -> ValidationResult {
    let n = normalize(value);
    if n.is_empty() {
        return empty_input();
    }
    if !n.is_ascii() {
        return ValidationResult::fail(
            ValidationErrorCode::InvalidFormat,
            "personnummer contains a non-ASCII character",
        );
    }
    let short = match n.len() {
        10 => n.as_str(),
        12 => &n[2..],
        other => return length_failure(10, other),
    };
    if !short.bytes().all(|b| b.is_ascii_digit()) {
        return ValidationResult::fail(
            ValidationErrorCode::InvalidFormat,
            "personnummer must be numeric",
        );
    }
    let month: u32 = short[2..4].parse().expect("digits verified above");
    // Coordination numbers add 60 to the day of birth.
    let mut day: u32 = short[4..6].parse().expect("digits verified above");
    if day > 60 {
        day -= 60;
    }
    if !(1..=12).contains(&month) || !(1..=31).contains(&day) {
        return ValidationResult::fail(
            ValidationErrorCode::InvalidFormat,
            format!("{month:02}-{day:02} is not a plausible birth month/day"),
        );
    }
    if !luhn::is_valid(short, Direction::FromRight) {
        return ValidationResult::fail(
            ValidationErrorCode::InvalidChecksum,
            "Luhn checksum mismatch",
        );
    }
    ValidationResult::ok()
}
