//! Letter-indexed check-character tables.
//!
//! A handful of national schemes close their checksum with a letter drawn
//! from a fixed alphabet: Spanish DNI/NIE, Irish VAT/PPSN, the Italian CIN
//! and Codice Fiscale, and the French RIB's base-36 letter folding.

/// Spanish DNI/NIE check-letter table (23 letters, remainder mod 23).
pub const ES_DNI_LETTERS: &str = "TRWAGMYFPDXBNJZSQVHLCKE";

/// Irish VAT/PPSN check-letter table: 'W' for remainder 0, then A–V.
pub const IE_CHECK_LETTERS: &str = "WABCDEFGHIJKLMNOPQRSTUV";

/// Index into `alphabet` by `value % alphabet.len()`.
///
/// `alphabet` must be non-empty ASCII.
pub fn check_letter(value: u32, alphabet: &str) -> char {
    debug_assert!(!alphabet.is_empty() && alphabet.is_ascii());
    let bytes = alphabet.as_bytes();
    bytes[(value as usize) % bytes.len()] as char
}

// Italian dual position-value tables over [0-9A-Z]. The even table is the
// plain ordinal; the odd table is the fixed permutation shared by the CIN
// and the Codice Fiscale check character.
const IT_ODD_DIGITS: [u32; 10] = [1, 0, 5, 7, 9, 13, 15, 17, 19, 21];
const IT_ODD_LETTERS: [u32; 26] = [
    1, 0, 5, 7, 9, 13, 15, 17, 19, 21, 2, 4, 18, 20, 11, 3, 6, 8, 12, 14, 16, 10, 22, 25, 24, 23,
];

fn it_even_value(b: u8) -> Option<u32> {
    match b {
        b'0'..=b'9' => Some(u32::from(b - b'0')),
        b'A'..=b'Z' => Some(u32::from(b - b'A')),
        _ => None,
    }
}

fn it_odd_value(b: u8) -> Option<u32> {
    match b {
        b'0'..=b'9' => Some(IT_ODD_DIGITS[(b - b'0') as usize]),
        b'A'..=b'Z' => Some(IT_ODD_LETTERS[(b - b'A') as usize]),
        _ => None,
    }
}

/// Italian check character over `body` (26-letter rotation, mod 26).
///
/// Characters at odd 1-indexed positions use the odd table, even positions
/// the even table. Used for both the CIN of an Italian BBAN (body = bank +
/// branch + account, 22 chars) and the Codice Fiscale (body = first 15
/// chars).
pub fn italian_check_char(body: &str) -> Option<char> {
    if body.is_empty() {
        return None;
    }
    let mut sum: u32 = 0;
    for (i, b) in body.bytes().enumerate() {
        // i is 0-indexed; position 1, 3, 5 … are the "odd" positions.
        sum += if i % 2 == 0 {
            it_odd_value(b)?
        } else {
            it_even_value(b)?
        };
    }
    Some((b'A' + (sum % 26) as u8) as char)
}

/// French RIB base-36 letter folding: A/J→1 … I/R→9, S→2 … Z→9.
///
/// Digits map to themselves; lowercase and non-alphanumerics are rejected
/// (inputs are normalized upstream).
pub fn rib_fold(c: char) -> Option<u32> {
    match c {
        '0'..='9' => Some(c as u32 - '0' as u32),
        'A'..='I' => Some(c as u32 - 'A' as u32 + 1),
        'J'..='R' => Some(c as u32 - 'J' as u32 + 1),
        'S'..='Z' => Some(c as u32 - 'S' as u32 + 2),
        _ => None,
    }
}
