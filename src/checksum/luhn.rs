//! Luhn checksum with an explicit indexing direction.
//!
//! The EU card/ID family doubles every second digit counting from the
//! right; the French SIREN/SIRET family indexes positions from the left.
//! The direction is a parameter, never assumed.

use serde::{Deserialize, Serialize};

/// Which end of the digit string position parity is counted from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Double the 2nd, 4th, … digit counting from the right (standard Luhn).
    FromRight,
    /// Double the 2nd, 4th, … digit counting from the left (SIREN/SIRET).
    FromLeft,
}

fn doubled(d: u32) -> u32 {
    let d2 = d * 2;
    if d2 > 9 { d2 - 9 } else { d2 }
}

/// Validate a digit string whose last digit is the Luhn check digit.
///
/// Returns `false` for empty input or any non-digit character.
pub fn is_valid(digits: &str, direction: Direction) -> bool {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }
    let sum: u32 = digits
        .bytes()
        .enumerate()
        .map(|(i, b)| {
            let d = u32::from(b - b'0');
            let double = match direction {
                Direction::FromRight => (digits.len() - 1 - i) % 2 == 1,
                Direction::FromLeft => i % 2 == 1,
            };
            if double { doubled(d) } else { d }
        })
        .sum();
    sum % 10 == 0
}

/// Compute the check digit to append to `body`.
pub fn check_digit(body: &str, direction: Direction) -> Option<u8> {
    if body.is_empty() || !body.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let sum: u32 = body
        .bytes()
        .enumerate()
        .map(|(i, b)| {
            let d = u32::from(b - b'0');
            // Parity as if the check digit were already appended.
            let double = match direction {
                Direction::FromRight => (body.len() - i) % 2 == 1,
                Direction::FromLeft => i % 2 == 1,
            };
            if double { doubled(d) } else { d }
        })
        .sum();
    Some(((10 - sum % 10) % 10) as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn card_number() {
        assert!(is_valid("79927398713", Direction::FromRight));
        assert!(!is_valid("79927398710", Direction::FromRight));
    }

    #[test]
    fn check_digit_round_trip() {
        let check = check_digit("7992739871", Direction::FromRight).unwrap();
        assert_eq!(check, 3);
        let full = format!("7992739871{check}");
        assert!(is_valid(&full, Direction::FromRight));
    }

    #[test]
    fn siren_google_france() {
        // SIREN 443 061 841 (odd length: both directions agree)
        assert!(is_valid("443061841", Direction::FromLeft));
        assert!(is_valid("443061841", Direction::FromRight));
        assert!(!is_valid("443061842", Direction::FromLeft));
    }

    #[test]
    fn siret_is_right_indexed() {
        // SIRET 443 061 841 00047 (even length: directions differ)
        assert!(is_valid("44306184100047", Direction::FromRight));
        assert!(!is_valid("44306184100047", Direction::FromLeft));
    }

    #[test]
    fn rejects_junk() {
        assert!(!is_valid("", Direction::FromRight));
        assert!(!is_valid("12a4", Direction::FromRight));
        assert_eq!(check_digit("", Direction::FromRight), None);
    }
}
