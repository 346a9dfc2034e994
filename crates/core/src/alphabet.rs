//! The 26-letter alphabet shared by rotors, reflectors and the plugboard.
//!
//! All signal computation works on indices 0-25. Letter labels only appear
//! at the edges (configuration strings, displays, text in and out).

/// Number of symbols on every wheel, plug row and keyboard.
pub const ALPHABET_LEN: usize = 26;

/// Canonical labels, indexed by position.
pub const LABELS: [char; ALPHABET_LEN] = [
    'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R',
    'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z',
];

/// Index of an uppercase label, or `None` if `c` is not `'A'..='Z'`.
///
/// Callers that accept lowercase input fold case before calling this.
pub fn index_of(c: char) -> Option<usize> {
    if c.is_ascii_uppercase() {
        Some((c as u8 - b'A') as usize)
    } else {
        None
    }
}

/// Label for an index. Indices are always reduced mod 26 before reaching
/// here, so out-of-range input is a caller bug.
pub fn label_of(index: usize) -> char {
    LABELS[index % ALPHABET_LEN]
}

/// Map each char of `s` through [`index_of`], returning the first offender
/// on failure.
pub fn parse_symbols(s: &str) -> std::result::Result<Vec<usize>, char> {
    s.chars().map(|c| index_of(c).ok_or(c)).collect()
}

/// `(a + b) mod 26` on alphabet indices.
#[inline]
pub(crate) fn add(a: usize, b: usize) -> usize {
    (a + b) % ALPHABET_LEN
}

/// `(a - b) mod 26` on alphabet indices.
#[inline]
pub(crate) fn sub(a: usize, b: usize) -> usize {
    (a + ALPHABET_LEN - b % ALPHABET_LEN) % ALPHABET_LEN
}
