//! Input normalization shared by every validator.
//!
//! Printed identifiers arrive with grouping whitespace, hyphens, dots and
//! assorted decoration ("BE 0403.170.701", "be68 5390 0754 7034",
//! "+++090/9337/55493+++"). All validators consume the normalized form.

/// Strip separators and upper-case an identifier.
///
/// Removes ASCII whitespace, hyphens, dots, slashes, plus signs and
/// apostrophes; upper-cases ASCII letters. Never fails; whitespace-only
/// input normalizes to the empty string, which every downstream validator
/// rejects with `InvalidInput`.
///
/// Idempotent: `normalize(normalize(s)) == normalize(s)`.
pub fn normalize(raw: &str) -> String {
    raw.chars()
        .filter(|c| !matches!(c, ' ' | '\t' | '\r' | '\n' | '-' | '.' | '/' | '+' | '\''))
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

/// Strip a leading country prefix (e.g. "BE", "NL") if present.
///
/// Some countries print national numbers with their ISO prefix even outside
/// VAT context. `cc` must be the 2-letter upper-case code; the input is
/// expected to already be normalized.
pub fn strip_country_prefix<'a>(normalized: &'a str, cc: &str) -> &'a str {
    normalized.strip_prefix(cc).unwrap_or(normalized)
}

/// Extract the 2-letter country prefix of a normalized identifier.
///
/// Returns `None` if the input is shorter than 2 characters or the prefix
/// is not two ASCII letters.
pub fn country_prefix(normalized: &str) -> Option<&str> {
    let prefix = normalized.get(..2)?;
    if prefix.bytes().all(|b| b.is_ascii_uppercase()) {
        Some(prefix)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_grouping() {
        assert_eq!(normalize("BE68 5390 0754 7034"), "BE68539007547034");
        assert_eq!(normalize("be-0403.170.701"), "BE0403170701");
        assert_eq!(normalize("+++090/9337/55493+++"), "090933755493");
    }

    #[test]
    fn whitespace_only_is_empty() {
        assert_eq!(normalize("   \t\n"), "");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn idempotent() {
        let once = normalize("ch93 0076 2011 6238 5295 7");
        assert_eq!(normalize(&once), once);
    }

    #[test]
    fn prefix_stripping() {
        assert_eq!(strip_country_prefix("BE0403170701", "BE"), "0403170701");
        assert_eq!(strip_country_prefix("0403170701", "BE"), "0403170701");
    }

    #[test]
    fn prefix_extraction() {
        assert_eq!(country_prefix("BE68539007547034"), Some("BE"));
        assert_eq!(country_prefix("68539007547034"), None);
        assert_eq!(country_prefix("B"), None);
    }
}
