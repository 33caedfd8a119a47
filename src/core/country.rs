//! ISO 3166-1 alpha-2 country tables and region mapping.
//!
//! Regional grouping mirrors how IBAN and VAT validators are organized:
//! the global routers first resolve a country to its region, then consult
//! that region's dispatcher.

use serde::{Deserialize, Serialize};

/// Check whether `code` is a known ISO 3166-1 alpha-2 country code.
pub fn is_known_country_code(code: &str) -> bool {
    COUNTRY_CODES.binary_search(&code).is_ok()
}

/// Geographic region an identifier scheme is organized under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Region {
    Europe,
    MiddleEast,
    Africa,
    Americas,
    Asia,
}

/// Region of a country code, for the schemes this crate covers.
///
/// Only countries participating in a supported identifier scheme are
/// mapped; `None` means no regional dispatcher will claim the code.
pub fn region_of(cc: &str) -> Option<Region> {
    let region = match cc {
        // IBAN/VAT Europe (EU, EEA, micro-states, UK)
        "AD" | "AT" | "BE" | "BG" | "CH" | "CY" | "CZ" | "DE" | "DK" | "EE" | "EL" | "ES"
        | "FI" | "FO" | "FR" | "GB" | "GI" | "GR" | "HR" | "HU" | "IE" | "IS" | "IT" | "LI"
        | "LT" | "LU" | "LV" | "MC" | "MD" | "ME" | "MK" | "MT" | "NL" | "NO" | "PL" | "PT"
        | "RO" | "RS" | "SE" | "SI" | "SK" | "SM" | "UA" | "VA" | "XI" => Region::Europe,
        "AE" | "BH" | "IL" | "IQ" | "JO" | "KW" | "LB" | "PS" | "QA" | "SA" | "TR" | "YE" => {
            Region::MiddleEast
        }
        "DZ" | "EG" | "LY" | "MA" | "MR" | "MU" | "SC" | "ST" | "TN" => Region::Africa,
        "BR" | "CR" | "DO" | "GT" | "SV" | "US" | "VG" => Region::Americas,
        "AZ" | "GE" | "KZ" | "PK" | "TL" => Region::Asia,
        _ => return None,
    };
    Some(region)
}

/// Whether `cc` denotes an EU member state for VAT purposes.
///
/// Uses the VAT-area conventions: Greece appears as `EL`, Northern Ireland
/// as `XI` (goods-only post-Brexit, still in the EU VAT network).
pub fn is_eu_vat_country(cc: &str) -> bool {
    matches!(
        cc,
        "AT" | "BE"
            | "BG"
            | "CY"
            | "CZ"
            | "DE"
            | "DK"
            | "EE"
            | "EL"
            | "ES"
            | "FI"
            | "FR"
            | "HR"
            | "HU"
            | "IE"
            | "IT"
            | "LT"
            | "LU"
            | "LV"
            | "MT"
            | "NL"
            | "PL"
            | "PT"
            | "RO"
            | "SE"
            | "SI"
            | "SK"
            | "XI"
    )
}

/// Complete list of ISO 3166-1 alpha-2 country codes (249 entries).
/// Sorted for binary search.
static COUNTRY_CODES: &[&str] = &[
    "AD", "AE", "AF", "AG", "AI", "AL", "AM", "AO", "AQ", "AR", "AS", "AT", "AU", "AW", "AX", "AZ",
    "BA", "BB", "BD", "BE", "BF", "BG", "BH", "BI", "BJ", "BL", "BM", "BN", "BO", "BQ", "BR", "BS",
    "BT", "BV", "BW", "BY", "BZ", "CA", "CC", "CD", "CF", "CG", "CH", "CI", "CK", "CL", "CM", "CN",
    "CO", "CR", "CU", "CV", "CW", "CX", "CY", "CZ", "DE", "DJ", "DK", "DM", "DO", "DZ", "EC", "EE",
    "EG", "EH", "ER", "ES", "ET", "FI", "FJ", "FK", "FM", "FO", "FR", "GA", "GB", "GD", "GE", "GF",
    "GG", "GH", "GI", "GL", "GM", "GN", "GP", "GQ", "GR", "GS", "GT", "GU", "GW", "GY", "HK", "HM",
    "HN", "HR", "HT", "HU", "ID", "IE", "IL", "IM", "IN", "IO", "IQ", "IR", "IS", "IT", "JE", "JM",
    "JO", "JP", "KE", "KG", "KH", "KI", "KM", "KN", "KP", "KR", "KW", "KY", "KZ", "LA", "LB", "LC",
    "LI", "LK", "LR", "LS", "LT", "LU", "LV", "LY", "MA", "MC", "MD", "ME", "MF", "MG", "MH", "MK",
    "ML", "MM", "MN", "MO", "MP", "MQ", "MR", "MS", "MT", "MU", "MV", "MW", "MX", "MY", "MZ", "NA",
    "NC", "NE", "NF", "NG", "NI", "NL", "NO", "NP", "NR", "NU", "NZ", "OM", "PA", "PE", "PF", "PG",
    "PH", "PK", "PL", "PM", "PN", "PR", "PS", "PT", "PW", "PY", "QA", "RE", "RO", "RS", "RU", "RW",
    "SA", "SB", "SC", "SD", "SE", "SG", "SH", "SI", "SJ", "SK", "SL", "SM", "SN", "SO", "SR", "SS",
    "ST", "SV", "SX", "SY", "SZ", "TC", "TD", "TF", "TG", "TH", "TJ", "TK", "TL", "TM", "TN", "TO",
    "TR", "TT", "TV", "TW", "TZ", "UA", "UG", "UM", "US", "UY", "UZ", "VA", "VC", "VE", "VG", "VI",
    "VN", "VU", "WF", "WS", "YE", "YT", "ZA", "ZM", "ZW",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_countries() {
        assert!(is_known_country_code("DE"));
        assert!(is_known_country_code("BE"));
        assert!(is_known_country_code("SA"));
        assert!(is_known_country_code("BR"));
    }

    #[test]
    fn unknown_countries() {
        assert!(!is_known_country_code("XX"));
        assert!(!is_known_country_code(""));
        assert!(!is_known_country_code("DEU"));
        assert!(!is_known_country_code("de"));
    }

    #[test]
    fn list_is_sorted() {
        for window in COUNTRY_CODES.windows(2) {
            assert!(
                window[0] < window[1],
                "country codes not sorted: {} >= {}",
                window[0],
                window[1]
            );
        }
    }

    #[test]
    fn regions() {
        assert_eq!(region_of("BE"), Some(Region::Europe));
        assert_eq!(region_of("SA"), Some(Region::MiddleEast));
        assert_eq!(region_of("EG"), Some(Region::Africa));
        assert_eq!(region_of("BR"), Some(Region::Americas));
        assert_eq!(region_of("KZ"), Some(Region::Asia));
        assert_eq!(region_of("ZZ"), None);
    }

    #[test]
    fn eu_vat_quirks() {
        // VIES speaks EL, not GR; XI stayed in the VAT network, GB left.
        assert!(is_eu_vat_country("EL"));
        assert!(!is_eu_vat_country("GR"));
        assert!(is_eu_vat_country("XI"));
        assert!(!is_eu_vat_country("GB"));
    }
}
