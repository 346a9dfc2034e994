//! Rotors (Walzen): a wiring on a spindle, with a ring, a window and notches.
//!
//! Each rotor can sit in one of 26 positions on the spindle, with position 0
//! being the one where pin/contact 0 faces the operator window. Pressing a key
//! may turn the rotor one position towards the operator.
//!
//! The alphabet ring is clipped to the rotor body at an offset (the ring
//! setting). The letter shown in the window is therefore
//! `(position + ring_setting) mod 26`, and setting the window to a letter
//! puts the rotor at `(letter - ring_setting) mod 26`.
//!
//! Notches sit on the ring, so they are expressed as window letters: while a
//! notch letter is showing, the notch is over the pawl and the next key press
//! turns this rotor *and* its left neighbour. An empty notch set models a
//! wheel that never steps (Beta, Gamma, reflectors).
//!
//! # Example
//! ```
//! use enigma_sim_core::rotor::Rotor;
//!
//! let mut rotor = Rotor::new("I", "EKMFLGDQVZNTOWYHXUSPAIBRCJ", 0, Some("Q")).unwrap();
//! rotor.set_display('Q').unwrap();
//! assert!(rotor.notch_over_pawl());
//! rotor.rotate();
//! assert_eq!(rotor.display(), 'R');
//! ```

use crate::alphabet::{self, ALPHABET_LEN};
use crate::error::{Result, RotorError};
use crate::wiring::Wiring;

/// A rotor with its mechanical state.
///
/// # Invariants
/// - `position < 26`
/// - `display_map[p] == (p + ring_setting) % 26` for every position `p`
#[derive(Debug, Clone)]
pub struct Rotor {
    name: String,
    wiring: Wiring,
    /// Window letter index for each spindle position
    display_map: [usize; ALPHABET_LEN],
    /// `notches[label]` is true when that window letter has a notch
    notches: [bool; ALPHABET_LEN],
    position: usize,
    rotations: u64,
}

impl Rotor {
    /// Build a rotor and set its window to `A`.
    ///
    /// # Arguments
    /// - `name`: model name, e.g. `"I"` or `"Beta"` (informational only)
    /// - `wiring`: 26-letter substitution string
    /// - `ring_setting`: 0-25, 0 meaning `A` is fixed to pin 0
    /// - `stepping`: window letters at which a notch is over the pawl, e.g.
    ///   `"Q"` or `"ZM"`; `None` or `""` for a non-stepping wheel
    ///
    /// # Errors
    /// - `RotorError::InvalidWiring` / `InvalidRingSetting` from [`Wiring::new`]
    /// - `RotorError::InvalidNotch` if a notch is not a letter `A`-`Z`
    pub fn new(name: &str, wiring: &str, ring_setting: usize, stepping: Option<&str>) -> Result<Self> {
        let wiring = Wiring::new(wiring, ring_setting)?;

        let mut notches = [false; ALPHABET_LEN];
        for c in stepping.unwrap_or("").chars() {
            let label = alphabet::index_of(c.to_ascii_uppercase()).ok_or(RotorError::InvalidNotch(c))?;
            notches[label] = true;
        }

        let mut display_map = [0; ALPHABET_LEN];
        for (position, label) in display_map.iter_mut().enumerate() {
            *label = alphabet::add(position, ring_setting);
        }

        Ok(Self {
            name: name.to_string(),
            wiring,
            display_map,
            notches,
            // window shows 'A'
            position: alphabet::sub(0, ring_setting),
            rotations: 0,
        })
    }

    /// Model name this rotor was built as.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Ring setting (0-25).
    pub fn ring_setting(&self) -> usize {
        self.wiring.ring_offset()
    }

    /// Current spindle position (0-25).
    pub fn position(&self) -> usize {
        self.position
    }

    /// Rotations since the display was last set.
    pub fn rotation_count(&self) -> u64 {
        self.rotations
    }

    /// Window letters carrying a notch, in alphabet order.
    pub fn notches(&self) -> impl Iterator<Item = char> + '_ {
        self.notches
            .iter()
            .enumerate()
            .filter(|(_, has_notch)| **has_notch)
            .map(|(label, _)| alphabet::label_of(label))
    }

    /// True if this rotor has at least one notch, i.e. it can step.
    pub fn is_stepping(&self) -> bool {
        self.notches.iter().any(|&n| n)
    }

    /// Spin the rotor so that `label` shows in the window.
    ///
    /// Lowercase letters are accepted. Resets the rotation counter.
    ///
    /// # Errors
    /// Returns `RotorError::InvalidDisplay` if `label` is not a letter.
    pub fn set_display(&mut self, label: char) -> Result<()> {
        let index = alphabet::index_of(label.to_ascii_uppercase()).ok_or(RotorError::InvalidDisplay(label))?;
        self.position = alphabet::sub(index, self.ring_setting());
        self.rotations = 0;
        Ok(())
    }

    /// Letter currently showing in the operator window.
    pub fn display(&self) -> char {
        alphabet::label_of(self.display_map[self.position])
    }

    /// Signal entering from the right at position `n`; returns the exit
    /// position on the left.
    pub fn signal_in(&self, n: usize) -> usize {
        let pin = alphabet::add(n, self.position);
        let contact = self.wiring.signal_in(pin);
        alphabet::sub(contact, self.position)
    }

    /// Signal entering from the left at position `n`; returns the exit
    /// position on the right.
    pub fn signal_out(&self, n: usize) -> usize {
        let contact = alphabet::add(n, self.position);
        let pin = self.wiring.signal_out(contact);
        alphabet::sub(pin, self.position)
    }

    /// True if a notch is lined up with the pawl on the rotor's left side.
    pub fn notch_over_pawl(&self) -> bool {
        self.notches[self.display_map[self.position]]
    }

    /// Advance one position, as the pawls do on a key press.
    pub fn rotate(&mut self) {
        self.position = alphabet::add(self.position, 1);
        self.rotations += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet::LABELS;
    use crate::error::Error;

    const WIRING: &str = "EKMFLGDQVZNTOWYHXUSPAIBRCJ";

    #[test]
    fn test_bad_stepping() {
        for bad in ["0", "A0", "%", "A%14"] {
            assert!(
                matches!(
                    Rotor::new("I", WIRING, 0, Some(bad)),
                    Err(Error::Rotor(RotorError::InvalidNotch(_)))
                ),
                "accepted {:?}",
                bad
            );
        }
    }

    #[test]
    fn test_bad_display() {
        let mut rotor = Rotor::new("I", WIRING, 0, Some("Q")).unwrap();
        assert!(matches!(
            rotor.set_display('1'),
            Err(Error::Rotor(RotorError::InvalidDisplay('1')))
        ));
        // failed set leaves the rotor alone
        assert_eq!(rotor.display(), 'A');
    }

    #[test]
    fn test_display_for_every_ring_setting() {
        for ring in 0..ALPHABET_LEN {
            let mut rotor = Rotor::new("I", WIRING, ring, None).unwrap();
            assert_eq!(rotor.display(), 'A');
            for &s in LABELS.iter() {
                rotor.set_display(s).unwrap();
                assert_eq!(rotor.display(), s);
            }
        }
    }

    #[test]
    fn test_ring_setting_offsets_position() {
        let mut rotor = Rotor::new("I", WIRING, 1, None).unwrap();
        rotor.set_display('B').unwrap();
        assert_eq!(rotor.position(), 0);
        rotor.set_display('A').unwrap();
        assert_eq!(rotor.position(), 25);
    }

    #[test]
    fn test_wiring() {
        let rotor = Rotor::new("I", WIRING, 0, None).unwrap();

        for (i, c) in WIRING.chars().enumerate() {
            let expected = alphabet::index_of(c).unwrap();
            assert_eq!(rotor.signal_in(i), expected);
            assert_eq!(rotor.signal_out(expected), i);
        }
    }

    #[test]
    fn test_signal_round_trip_all_positions() {
        for ring in 0..ALPHABET_LEN {
            let mut rotor = Rotor::new("I", WIRING, ring, None).unwrap();
            for &s in LABELS.iter() {
                rotor.set_display(s).unwrap();
                for n in 0..ALPHABET_LEN {
                    assert_eq!(rotor.signal_out(rotor.signal_in(n)), n);
                }
            }
        }
    }

    #[test]
    fn test_rotated_signal() {
        // Position 1: input 0 hits pin 1 (B -> K), contact 10 maps back to 9.
        let mut rotor = Rotor::new("I", WIRING, 0, None).unwrap();
        rotor.rotate();
        assert_eq!(rotor.signal_in(0), 9);
        assert_eq!(rotor.signal_out(9), 0);
    }

    #[test]
    fn test_notch_and_rotation_count() {
        let mut rotor = Rotor::new("VI", "JPGVOUMFYQBENHZRDKASXLICTW", 5, Some("ZM")).unwrap();
        assert_eq!(rotor.notches().collect::<String>(), "MZ");
        assert!(rotor.is_stepping());

        rotor.set_display('L').unwrap();
        assert!(!rotor.notch_over_pawl());
        rotor.rotate();
        assert!(rotor.notch_over_pawl());
        assert_eq!(rotor.display(), 'M');

        for _ in 0..13 {
            rotor.rotate();
        }
        assert_eq!(rotor.display(), 'Z');
        assert!(rotor.notch_over_pawl());
        assert_eq!(rotor.rotation_count(), 14);

        rotor.rotate();
        assert_eq!(rotor.display(), 'A');

        rotor.set_display('C').unwrap();
        assert_eq!(rotor.rotation_count(), 0);
    }

    #[test]
    fn test_no_notches() {
        let mut rotor = Rotor::new("Beta", "LEYJVCNIXWPBQMDRTAKZGFUHOS", 0, None).unwrap();
        assert!(!rotor.is_stepping());
        for _ in 0..ALPHABET_LEN {
            assert!(!rotor.notch_over_pawl());
            rotor.rotate();
        }
    }
}
