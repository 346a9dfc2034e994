//! The plugboard (Steckerbrett).
//!
//! The operator swaps letters before and after the rotor stack by plugging
//! cables between pairs of sockets. A cable swaps both directions, so if A is
//! connected to B, A crosses to B on the way in and B crosses back to A on the
//! way out. The board is therefore an involution: `signal(signal(n)) == n`.
//!
//! Ten cables were issued with each machine, so at most 10 pairs.
//!
//! # Key Sheet Notation
//!
//! ```text
//! Heer / Luftwaffe:  PO ML IU KJ NH YT GB VF RE DC
//! Kriegsmarine:      18/26 17/4 21/6 3/16 19/14 22/7 8/1 12/25 5/9 10/15
//! ```
//!
//! Kriegsmarine boards were numbered 1-26.

use crate::alphabet::{self, ALPHABET_LEN};
use crate::error::{PlugboardError, Result};

/// Number of cables supplied with a machine.
pub const MAX_PAIRS: usize = 10;

/// An immutable plugboard wiring.
///
/// # Invariants
/// - `wiring[wiring[i]] == i` for every `i`
/// - at most `MAX_PAIRS` indices are swapped pairs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plugboard {
    wiring: [usize; ALPHABET_LEN],
}

impl Plugboard {
    /// A board with no cables: every letter maps to itself.
    pub fn new() -> Self {
        let mut wiring = [0; ALPHABET_LEN];
        for (i, w) in wiring.iter_mut().enumerate() {
            *w = i;
        }
        Self { wiring }
    }

    /// Build a board from 0-based index pairs.
    ///
    /// # Errors
    /// - `PlugboardError::TooManyConnections` if more than 10 pairs
    /// - `PlugboardError::InvalidSymbol` if an index is not in 0-25
    /// - `PlugboardError::DuplicateConnection` if an index is used twice
    pub fn from_pairs(pairs: &[(usize, usize)]) -> Result<Self> {
        if pairs.len() > MAX_PAIRS {
            return Err(PlugboardError::TooManyConnections {
                count: pairs.len(),
                max: MAX_PAIRS,
            }
            .into());
        }

        let mut board = Self::new();
        let mut used = [false; ALPHABET_LEN];

        for &(m, n) in pairs {
            for path in [m, n] {
                if path >= ALPHABET_LEN {
                    return Err(PlugboardError::InvalidSymbol(path.to_string()).into());
                }
                if used[path] {
                    return Err(PlugboardError::DuplicateConnection(alphabet::label_of(path)).into());
                }
                used[path] = true;
            }

            board.wiring[m] = n;
            board.wiring[n] = m;
        }

        log::debug!("plugboard wired with {} cables", pairs.len());
        Ok(board)
    }

    /// Build a board from letter pairs.
    pub fn from_letter_pairs(pairs: &[(char, char)]) -> Result<Self> {
        let indices = pairs
            .iter()
            .map(|&(a, b)| -> Result<(usize, usize)> { Ok((letter_index(a)?, letter_index(b)?)) })
            .collect::<Result<Vec<_>>>()?;
        Self::from_pairs(&indices)
    }

    /// Build a board from a key sheet settings string.
    ///
    /// The notation is detected from the presence of a `/`. An empty or
    /// whitespace-only string yields a board with no cables.
    ///
    /// # Errors
    /// The same kinds as [`from_pairs`](Self::from_pairs); unparseable tokens
    /// surface as `PlugboardError::InvalidSymbol`.
    pub fn from_key_sheet(settings: &str) -> Result<Self> {
        let tokens: Vec<&str> = settings.split_whitespace().collect();

        let pairs = if settings.contains('/') {
            tokens
                .iter()
                .map(|token| parse_numeric_pair(token))
                .collect::<Result<Vec<_>>>()?
        } else {
            tokens
                .iter()
                .map(|token| parse_letter_pair(token))
                .collect::<Result<Vec<_>>>()?
        };

        Self::from_pairs(&pairs)
    }

    /// Wire number out for wire number `n` in, in either direction.
    pub fn signal(&self, n: usize) -> usize {
        self.wiring[n % ALPHABET_LEN]
    }

    /// Connected pairs as letters, lowest letter first, sorted.
    pub fn pairs(&self) -> Vec<(char, char)> {
        (0..ALPHABET_LEN)
            .filter(|&i| self.wiring[i] > i)
            .map(|i| (alphabet::label_of(i), alphabet::label_of(self.wiring[i])))
            .collect()
    }

    /// The board in Heer notation, e.g. `"AV BS CG"`.
    pub fn to_key_sheet(&self) -> String {
        self.pairs()
            .iter()
            .map(|&(a, b)| format!("{}{}", a, b))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Default for Plugboard {
    fn default() -> Self {
        Self::new()
    }
}

fn letter_index(c: char) -> Result<usize> {
    alphabet::index_of(c.to_ascii_uppercase())
        .ok_or_else(|| PlugboardError::InvalidSymbol(c.to_string()).into())
}

/// Parse `"AV"` into `(0, 21)`.
fn parse_letter_pair(token: &str) -> Result<(usize, usize)> {
    let invalid = || PlugboardError::InvalidSymbol(token.to_string());

    let mut chars = token.chars();
    match (chars.next(), chars.next(), chars.next()) {
        (Some(a), Some(b), None) => {
            let m = letter_index(a).map_err(|_| invalid())?;
            let n = letter_index(b).map_err(|_| invalid())?;
            Ok((m, n))
        }
        _ => Err(invalid().into()),
    }
}

/// Parse `"1/20"` into `(0, 19)`.
fn parse_numeric_pair(token: &str) -> Result<(usize, usize)> {
    let invalid = || PlugboardError::InvalidSymbol(token.to_string());

    let (m, n) = token.split_once('/').ok_or_else(invalid)?;
    let m: usize = m.parse().map_err(|_| invalid())?;
    let n: usize = n.parse().map_err(|_| invalid())?;

    if !(1..=ALPHABET_LEN).contains(&m) || !(1..=ALPHABET_LEN).contains(&n) {
        return Err(invalid().into());
    }

    Ok((m - 1, n - 1))
}
