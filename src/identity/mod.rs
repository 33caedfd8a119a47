//! National ID and tax number validation.
//!
//! These are the genuinely irregular validators — date-aware check digits,
//! multi-candidate centuries, letter substitution — implemented by hand
//! against the same result contract, composing the shared checksum library.
//!
//! # Example
//!
//! ```rust
//! use finident::identity::*;
//!
//! assert!(validate_be_enterprise_number("0403.170.701").is_valid());
//! assert!(validate_es_dni("12345678Z").is_valid());
//! assert!(validate_fr_siren("443 061 841").is_valid());
//! ```

mod national;
mod tax;

pub use national::*;
pub use tax::*;

use serde::{Deserialize, Serialize};

use crate::core::{ValidationErrorCode, ValidationResult, normalize, strip_country_prefix};

/// A validated national ID in normalized form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NationalIdDetails {
    pub country_code: String,
    pub number: String,
}

/// Validate a national ID for a country; `UnsupportedCountry` when none is
/// registered.
pub fn validate_national_id(cc: &str, value: &str) -> ValidationResult {
    match cc.to_ascii_uppercase().as_str() {
        "BE" => validate_be_national_number(value),
        "ES" => validate_es_dni(value),
        "FR" => validate_fr_nir(value),
        "IT" => validate_it_codice_fiscale(value),
        "NL" => validate_nl_bsn(value),
        "NO" => validate_no_fodselsnummer(value),
        "SE" => validate_se_personnummer(value),
        cc => ValidationResult::fail(
            ValidationErrorCode::UnsupportedCountry,
            format!("no national ID validator registered for country '{cc}'"),
        ),
    }
}

/// Parse a national ID into normalized form; `None` if validation fails.
pub fn parse_national_id(cc: &str, value: &str) -> Option<NationalIdDetails> {
    let cc = cc.to_ascii_uppercase();
    if !validate_national_id(&cc, value).is_valid() {
        return None;
    }
    let normalized = normalize(value);
    let number = strip_country_prefix(&normalized, &cc).to_owned();
    Some(NationalIdDetails {
        country_code: cc,
        number,
    })
}

/// Validate a tax/company number for a country; `UnsupportedCountry` when
/// none is registered.
pub fn validate_tax_id(cc: &str, value: &str) -> ValidationResult {
    match cc.to_ascii_uppercase().as_str() {
        "BE" => validate_be_enterprise_number(value),
        "DE" => validate_de_steuer_id(value),
        "FR" => validate_fr_siren_or_siret(value),
        cc => ValidationResult::fail(
            ValidationErrorCode::UnsupportedCountry,
            format!("no tax ID validator registered for country '{cc}'"),
        ),
    }
}
