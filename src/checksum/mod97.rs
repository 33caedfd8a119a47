//! ISO 7064 MOD 97-10, the IBAN envelope checksum.
//!
//! The letter-expanded digit string of a long IBAN exceeds 30 digits, far
//! past what a fixed-width integer holds, so the remainder is computed by
//! digit-streamed modular reduction instead of materializing the number.

/// MOD 97 remainder of an alphanumeric payload, letters mapped A=10..Z=35.
///
/// Returns `None` if the payload is empty or contains a character outside
/// `[0-9A-Z]`.
pub fn fold_remainder(payload: &str) -> Option<u32> {
    if payload.is_empty() {
        return None;
    }
    let mut acc: u32 = 0;
    for b in payload.bytes() {
        match b {
            b'0'..=b'9' => acc = (acc * 10 + u32::from(b - b'0')) % 97,
            b'A'..=b'Z' => {
                // Two-digit expansion, e.g. K=20 contributes two decimal digits.
                let v = u32::from(b - b'A') + 10;
                acc = (acc * 100 + v) % 97;
            }
            _ => return None,
        }
    }
    Some(acc)
}

/// MOD 97 remainder of a full IBAN (or RF creditor reference): the four
/// leading header characters are moved to the end before folding.
///
/// A valid IBAN has remainder exactly 1.
pub fn iban_remainder(value: &str) -> Option<u32> {
    if value.len() < 5 {
        return None;
    }
    let (head, body) = value.split_at(4);
    let mut acc: u32 = 0;
    for part in [body, head] {
        for b in part.bytes() {
            match b {
                b'0'..=b'9' => acc = (acc * 10 + u32::from(b - b'0')) % 97,
                b'A'..=b'Z' => {
                    let v = u32::from(b - b'A') + 10;
                    acc = (acc * 100 + v) % 97;
                }
                _ => return None,
            }
        }
    }
    Some(acc)
}

/// Derive the two check digits that make `cc` + digits + `bban` a valid
/// IBAN: `98 − remainder` with "00" as placeholder.
pub fn iban_check_digits(cc: &str, bban: &str) -> Option<u8> {
    if cc.len() != 2 || !cc.bytes().all(|b| b.is_ascii_uppercase()) {
        return None;
    }
    let mut candidate = String::with_capacity(4 + bban.len());
    candidate.push_str(cc);
    candidate.push_str("00");
    candidate.push_str(bban);
    let r = iban_remainder(&candidate)?;
    Some((98 - r) as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folds_digits() {
        // 5390075470 mod 97 = 34 (the Belgian BBAN seed vector)
        assert_eq!(fold_remainder("5390075470"), Some(34));
    }

    #[test]
    fn folds_letters() {
        // "BE" expands to 1114
        assert_eq!(fold_remainder("BE"), Some(1114 % 97));
    }

    #[test]
    fn rejects_junk() {
        assert_eq!(fold_remainder(""), None);
        assert_eq!(fold_remainder("53 90"), None);
        assert_eq!(fold_remainder("be68"), None);
    }

    #[test]
    fn valid_ibans_have_remainder_one() {
        assert_eq!(iban_remainder("BE68539007547034"), Some(1));
        assert_eq!(iban_remainder("DE89370400440532013000"), Some(1));
        assert_eq!(iban_remainder("GB29NWBK60161331926819"), Some(1));
    }

    #[test]
    fn derives_check_digits() {
        assert_eq!(iban_check_digits("BE", "539007547034"), Some(68));
        assert_eq!(iban_check_digits("DE", "370400440532013000"), Some(89));
    }

    #[test]
    fn derive_rejects_bad_country() {
        assert_eq!(iban_check_digits("be", "539007547034"), None);
        assert_eq!(iban_check_digits("BEL", "539007547034"), None);
    }
}
