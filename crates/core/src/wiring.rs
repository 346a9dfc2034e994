//! Fixed internal wiring of a rotor or reflector (the permutation unit).
//!
//! A wheel has 26 pins on its right (entry) side and 26 contacts on its left
//! side, numbered clockwise from 0 at the top. Each pin is wired to exactly
//! one contact, so the wiring is a permutation of `0..26`. We keep both
//! directions as lookup tables:
//!
//! - `forward[pin] = contact` for current entering from the right
//! - `backward[contact] = pin` for current returning from the left
//!
//! The ring setting (Ringstellung) is stored here because it is a property of
//! how the ring was clipped onto this wiring, but it never enters the lookup
//! itself. Rotation is folded in by [`Rotor`](crate::rotor::Rotor); a
//! reflector uses the tables directly.
//!
//! # Example
//! ```
//! use enigma_sim_core::wiring::Wiring;
//!
//! let wiring = Wiring::new("EKMFLGDQVZNTOWYHXUSPAIBRCJ", 0).unwrap();
//! assert_eq!(wiring.signal_in(0), 4); // A -> E
//! assert_eq!(wiring.signal_out(4), 0); // E -> A
//! ```

use crate::alphabet::{self, ALPHABET_LEN};
use crate::error::{Result, RotorError};

/// A validated, immutable wiring permutation with its ring offset.
///
/// # Invariants
/// - `forward` is a permutation of `0..26`
/// - `backward[forward[i]] == i` for every `i`
/// - `ring_offset < 26`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Wiring {
    forward: [usize; ALPHABET_LEN],
    backward: [usize; ALPHABET_LEN],
    ring_offset: usize,
}

impl Wiring {
    /// Build a wiring from its 26-letter substitution string.
    ///
    /// The string lists, for each entry pin A..Z in turn, the contact it is
    /// wired to; this is the notation used in the historical rotor tables.
    /// Lowercase letters are accepted.
    ///
    /// # Errors
    /// - `RotorError::InvalidWiring` if the string is not 26 letters with
    ///   each letter appearing exactly once
    /// - `RotorError::InvalidRingSetting` if `ring_offset >= 26`
    pub fn new(wiring: &str, ring_offset: usize) -> Result<Self> {
        let upper = wiring.to_ascii_uppercase();

        let invalid = |reason| RotorError::InvalidWiring {
            wiring: wiring.to_string(),
            reason,
        };

        if upper.chars().count() != ALPHABET_LEN {
            return Err(invalid("expected 26 letters").into());
        }

        let contacts = alphabet::parse_symbols(&upper).map_err(|_| invalid("non-letter symbol"))?;

        if ring_offset >= ALPHABET_LEN {
            return Err(RotorError::InvalidRingSetting(ring_offset.to_string()).into());
        }

        let mut forward = [0; ALPHABET_LEN];
        let mut backward = [0; ALPHABET_LEN];
        let mut seen = [false; ALPHABET_LEN];

        for (pin, &contact) in contacts.iter().enumerate() {
            if seen[contact] {
                return Err(invalid("letter repeated").into());
            }
            seen[contact] = true;
            forward[pin] = contact;
            backward[contact] = pin;
        }

        Ok(Self {
            forward,
            backward,
            ring_offset,
        })
    }

    /// Entry-to-exit substitution for an unrotated wheel.
    pub fn signal_in(&self, n: usize) -> usize {
        self.forward[n % ALPHABET_LEN]
    }

    /// Exit-to-entry substitution for an unrotated wheel.
    pub fn signal_out(&self, n: usize) -> usize {
        self.backward[n % ALPHABET_LEN]
    }

    /// Ring setting, 0 meaning "A" is fixed to pin 0.
    pub fn ring_offset(&self) -> usize {
        self.ring_offset
    }

    /// True if the wiring is its own inverse with no fixed points, which is
    /// what every reflector must be.
    pub fn is_reflective(&self) -> bool {
        (0..ALPHABET_LEN).all(|i| self.forward[i] != i && self.forward[self.forward[i]] == i)
    }

    /// The wiring rendered back to its substitution string.
    pub fn to_wiring_string(&self) -> String {
        self.forward.iter().map(|&c| alphabet::label_of(c)).collect()
    }
}
