//! The assembled machine: rotors, reflector and plugboard.
//!
//! # Signal Path
//!
//! ```text
//! key -> plugboard -> R1 -> R2 -> R3 [-> R4] -> reflector
//!                                                   |
//! lamp <- plugboard <- R1 <- R2 <- R3 [<- R4] <-----+
//! ```
//!
//! Every key press first steps the rotors (see [`stepping`](crate::stepping))
//! and only then sends current through the new positions. The entry wheel of
//! the military machines is a straight pass-through and is not modelled.
//!
//! Because the plugboard and reflector are involutions and each rotor's two
//! directions are inverses, enciphering and deciphering are the same
//! operation: reset the display to the same start and feed the ciphertext.
//!
//! # Example
//! ```
//! use enigma_sim_core::machine::{EnigmaMachine, SubstitutionPolicy};
//!
//! let mut machine = EnigmaMachine::from_key_sheet("I II III", "A A A", "B", "").unwrap();
//! machine.set_display("AAA").unwrap();
//! let ciphertext = machine.process_text("AAAAA", SubstitutionPolicy::Drop).unwrap();
//! assert_eq!(ciphertext, "BDZGO");
//! ```

use std::fmt;
use std::str::FromStr;
use unicode_segmentation::UnicodeSegmentation;

use crate::alphabet::{self, ALPHABET_LEN};
use crate::error::{Error, MachineError, Result, RotorError};
use crate::factory::{create_reflector, create_rotor};
use crate::plugboard::Plugboard;
use crate::rotor::Rotor;
use crate::stepping::{self, StepPlan};
use crate::wiring::Wiring;

/// Rotor counts a machine can be built with (3 for Heer/Luftwaffe/M3, 4 for M4).
pub const ROTOR_COUNTS: [usize; 2] = [3, 4];

/// Number of windows an operator watches for stepping feedback.
const STEPPING_WINDOWS: usize = 3;

/// Ring settings for a rotor set, stored 0-based.
///
/// Parses from space-separated tokens, either letters (`"A B C"`) or the
/// historical 1-based numbers (`"1 2 3"`), which may be mixed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RingSettings(Vec<usize>);

impl RingSettings {
    /// Ring settings from 0-based values.
    ///
    /// # Errors
    /// Returns `RotorError::InvalidRingSetting` if a value is 26 or more.
    pub fn from_values(values: &[usize]) -> Result<Self> {
        if let Some(bad) = values.iter().find(|&&v| v >= ALPHABET_LEN) {
            return Err(RotorError::InvalidRingSetting(bad.to_string()).into());
        }
        Ok(Self(values.to_vec()))
    }

    /// All rings at 0 for `count` rotors.
    pub fn zeroed(count: usize) -> Self {
        Self(vec![0; count])
    }

    pub fn values(&self) -> &[usize] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromStr for RingSettings {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        s.split_whitespace()
            .map(parse_ring_token)
            .collect::<Result<Vec<_>>>()
            .map(Self)
    }
}

impl fmt::Display for RingSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let labels: Vec<String> = self.0.iter().map(|&v| alphabet::label_of(v).to_string()).collect();
        write!(f, "{}", labels.join(" "))
    }
}

fn parse_ring_token(token: &str) -> Result<usize> {
    let invalid = || RotorError::InvalidRingSetting(token.to_string());

    let mut chars = token.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        if let Some(index) = alphabet::index_of(c.to_ascii_uppercase()) {
            return Ok(index);
        }
    }

    let number: usize = token.parse().map_err(|_| invalid())?;
    if !(1..=ALPHABET_LEN).contains(&number) {
        return Err(invalid().into());
    }
    Ok(number - 1)
}

/// A complete daily setting, as handed over by a key sheet or command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MachineConfig {
    /// Rotor model names, left to right
    pub rotors: Vec<String>,
    /// Ring settings, left to right; empty means all zero
    pub ring_settings: RingSettings,
    /// Reflector model name
    pub reflector: String,
    /// Plugboard settings in either key sheet notation
    pub plugboard: String,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            rotors: vec!["I".to_string(), "II".to_string(), "III".to_string()],
            ring_settings: RingSettings::default(),
            reflector: "B".to_string(),
            plugboard: String::new(),
        }
    }
}

impl MachineConfig {
    /// Build a machine from this configuration.
    pub fn build(&self) -> Result<EnigmaMachine> {
        if !ROTOR_COUNTS.contains(&self.rotors.len()) {
            return Err(MachineError::InvalidConfiguration(format!(
                "must supply 3 or 4 rotors, got {}",
                self.rotors.len()
            ))
            .into());
        }

        let rings = if self.ring_settings.is_empty() {
            RingSettings::zeroed(self.rotors.len())
        } else {
            self.ring_settings.clone()
        };

        if rings.len() != self.rotors.len() {
            return Err(MachineError::InvalidConfiguration(format!(
                "{} ring settings for {} rotors",
                rings.len(),
                self.rotors.len()
            ))
            .into());
        }

        let rotors = self
            .rotors
            .iter()
            .zip(rings.values())
            .map(|(name, &ring)| create_rotor(name, ring))
            .collect::<Result<Vec<_>>>()?;

        let reflector = create_reflector(&self.reflector)?;
        let plugboard = Plugboard::from_key_sheet(&self.plugboard)?;

        log::debug!(
            "building machine: rotors={:?} rings=[{}] reflector={} plugboard=[{}]",
            self.rotors,
            rings,
            self.reflector,
            plugboard.to_key_sheet()
        );

        EnigmaMachine::new(rotors, reflector, plugboard)
    }
}

/// What [`EnigmaMachine::process_text`] does with characters that aren't keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubstitutionPolicy {
    /// Key this letter instead (it steps the machine like any key press)
    Replace(char),
    /// Skip the character; the machine does not step
    Drop,
}

impl Default for SubstitutionPolicy {
    fn default() -> Self {
        SubstitutionPolicy::Replace('X')
    }
}

/// A configured Enigma machine.
///
/// # Thread Safety
/// Key presses mutate rotor positions. Separate machines are independent;
/// a shared machine must be serialized by the caller.
#[derive(Debug, Clone)]
pub struct EnigmaMachine {
    /// Left to right
    rotors: Vec<Rotor>,
    reflector: Wiring,
    plugboard: Plugboard,
}

impl EnigmaMachine {
    /// Assemble a machine from built parts.
    ///
    /// # Errors
    /// Returns `MachineError::InvalidConfiguration` unless there are 3 or 4 rotors.
    pub fn new(rotors: Vec<Rotor>, reflector: Wiring, plugboard: Plugboard) -> Result<Self> {
        if !ROTOR_COUNTS.contains(&rotors.len()) {
            return Err(MachineError::InvalidConfiguration(format!(
                "must supply 3 or 4 rotors, got {}",
                rotors.len()
            ))
            .into());
        }

        Ok(Self {
            rotors,
            reflector,
            plugboard,
        })
    }

    /// Build a machine from key sheet style strings.
    ///
    /// # Arguments
    /// - `rotors`: space-separated model names, left to right, e.g. `"II IV V"`
    /// - `ring_settings`: see [`RingSettings`]; empty for all zero
    /// - `reflector`: reflector model name, e.g. `"B"`
    /// - `plugboard`: plugboard settings in either notation; empty for none
    pub fn from_key_sheet(rotors: &str, ring_settings: &str, reflector: &str, plugboard: &str) -> Result<Self> {
        MachineConfig {
            rotors: rotors.split_whitespace().map(str::to_string).collect(),
            ring_settings: ring_settings.parse()?,
            reflector: reflector.to_string(),
            plugboard: plugboard.to_string(),
        }
        .build()
    }

    pub fn rotor_count(&self) -> usize {
        self.rotors.len()
    }

    /// Rotors, left to right.
    pub fn rotors(&self) -> &[Rotor] {
        &self.rotors
    }

    pub fn reflector(&self) -> &Wiring {
        &self.reflector
    }

    pub fn plugboard(&self) -> &Plugboard {
        &self.plugboard
    }

    /// Set every rotor window, left to right, e.g. `"VJNA"` on an M4.
    ///
    /// Resets all rotation counters. Nothing changes if any letter is bad.
    ///
    /// # Errors
    /// - `MachineError::InvalidDisplayLength` if the length isn't the rotor count
    /// - `RotorError::InvalidDisplay` if a character isn't a letter
    pub fn set_display(&mut self, value: &str) -> Result<()> {
        let labels: Vec<char> = value.chars().collect();
        if labels.len() != self.rotors.len() {
            return Err(MachineError::InvalidDisplayLength {
                display: value.to_string(),
                expected: self.rotors.len(),
                actual: labels.len(),
            }
            .into());
        }

        if let Some(&bad) = labels.iter().find(|c| alphabet::index_of(c.to_ascii_uppercase()).is_none()) {
            return Err(RotorError::InvalidDisplay(bad).into());
        }

        for (rotor, &label) in self.rotors.iter_mut().zip(&labels) {
            rotor.set_display(label)?;
        }
        Ok(())
    }

    /// The three rightmost windows, the ones that move.
    pub fn get_display(&self) -> String {
        let skip = self.rotors.len() - STEPPING_WINDOWS;
        self.rotors[skip..].iter().map(Rotor::display).collect()
    }

    /// Every window, left to right.
    pub fn full_display(&self) -> String {
        self.rotors.iter().map(Rotor::display).collect()
    }

    /// Step the rotors as one key press would, without sending current.
    pub fn step(&mut self) -> StepPlan {
        // rotor count is 3 or 4 by construction
        stepping::step(&mut self.rotors).unwrap_or(StepPlan {
            middle: false,
            left: false,
        })
    }

    /// Press a key: step the rotors, then return the lamp that lights.
    ///
    /// Lowercase letters are accepted.
    ///
    /// # Errors
    /// Returns `MachineError::IllegalKey` (without stepping) if `key` isn't a letter.
    pub fn key_press(&mut self, key: char) -> Result<char> {
        let input = alphabet::index_of(key.to_ascii_uppercase()).ok_or(MachineError::IllegalKey(key))?;

        self.step();
        let output = alphabet::label_of(self.electric_signal(input));

        log::trace!("key {} -> lamp {} at {}", key, output, self.full_display());
        Ok(output)
    }

    /// Run text through the machine, one key press per letter.
    ///
    /// Input is walked grapheme by grapheme and case-folded; output is
    /// uppercase. A grapheme is a key only if it is a single letter, so a
    /// letter carrying a combining mark is handled per `policy` like any
    /// other non-key.
    ///
    /// # Errors
    /// Returns `MachineError::IllegalKey` before processing anything if the
    /// replacement character is itself not a key.
    pub fn process_text(&mut self, text: &str, policy: SubstitutionPolicy) -> Result<String> {
        if let SubstitutionPolicy::Replace(c) = policy {
            if alphabet::index_of(c.to_ascii_uppercase()).is_none() {
                return Err(MachineError::IllegalKey(c).into());
            }
        }

        let mut output = String::with_capacity(text.len());
        for grapheme in text.graphemes(true) {
            let key = match single_key(grapheme) {
                Some(key) => key,
                None => match policy {
                    SubstitutionPolicy::Replace(replacement) => replacement,
                    SubstitutionPolicy::Drop => continue,
                },
            };
            output.push(self.key_press(key)?);
        }
        Ok(output)
    }

    /// Current through the machine at its present positions.
    fn electric_signal(&self, n: usize) -> usize {
        let mut pos = self.plugboard.signal(n);

        for rotor in self.rotors.iter().rev() {
            pos = rotor.signal_in(pos);
        }

        pos = self.reflector.signal_in(pos);

        for rotor in &self.rotors {
            pos = rotor.signal_out(pos);
        }

        self.plugboard.signal(pos)
    }
}

/// The key for `grapheme` if it is exactly one letter.
fn single_key(grapheme: &str) -> Option<char> {
    let mut chars = grapheme.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => {
            let key = c.to_ascii_uppercase();
            alphabet::index_of(key).map(|_| key)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_double_stepping() {
        let mut machine = EnigmaMachine::from_key_sheet("III II I", "", "B", "").unwrap();
        machine.set_display("KDO").unwrap();

        for expected in ["KDP", "KDQ", "KER", "LFS", "LFT", "LFU"] {
            machine.key_press('A').unwrap();
            assert_eq!(machine.get_display(), expected);
        }
    }

    #[test]
    fn test_simple_encrypt_decrypt() {
        let mut machine = EnigmaMachine::from_key_sheet("I II III", "", "B", "").unwrap();

        machine.set_display("AAA").unwrap();
        assert_eq!(machine.process_text("AAAAA", SubstitutionPolicy::Drop).unwrap(), "BDZGO");

        machine.set_display("AAA").unwrap();
        assert_eq!(machine.process_text("BDZGO", SubstitutionPolicy::Drop).unwrap(), "AAAAA");
    }

    #[test]
    fn test_rotor_count() {
        for rotors in ["I II", "I II III IV V"] {
            assert!(matches!(
                EnigmaMachine::from_key_sheet(rotors, "", "B", ""),
                Err(Error::Machine(MachineError::InvalidConfiguration(_)))
            ));
        }
    }

    #[test]
    fn test_ring_count_mismatch() {
        assert!(matches!(
            EnigmaMachine::from_key_sheet("I II III", "A B", "B", ""),
            Err(Error::Machine(MachineError::InvalidConfiguration(_)))
        ));
    }

    #[test]
    fn test_unknown_parts() {
        assert!(matches!(
            EnigmaMachine::from_key_sheet("I II IX", "", "B", ""),
            Err(Error::Machine(MachineError::UnknownRotor(_)))
        ));
        assert!(matches!(
            EnigmaMachine::from_key_sheet("I II III", "", "Z", ""),
            Err(Error::Machine(MachineError::UnknownReflector(_)))
        ));
    }

    #[test]
    fn test_ring_settings_parse() {
        let rings: RingSettings = "A b 26 1 Z 13".parse().unwrap();
        assert_eq!(rings.values(), &[0, 1, 25, 0, 25, 12]);
        assert_eq!(rings.to_string(), "A B Z A Z M");

        for bad in ["0", "27", "AB", "-1", "%"] {
            assert!(
                matches!(
                    bad.parse::<RingSettings>(),
                    Err(Error::Rotor(RotorError::InvalidRingSetting(_)))
                ),
                "{:?}",
                bad
            );
        }

        assert!(RingSettings::from_values(&[0, 25]).is_ok());
        assert!(RingSettings::from_values(&[26]).is_err());
    }

    #[test]
    fn test_set_display_validation() {
        let mut machine = MachineConfig::default().build().unwrap();
        machine.set_display("MCK").unwrap();

        assert!(matches!(
            machine.set_display("AB"),
            Err(Error::Machine(MachineError::InvalidDisplayLength { expected: 3, actual: 2, .. }))
        ));

        // bad last letter must not move the first two rotors
        assert!(matches!(
            machine.set_display("AB!"),
            Err(Error::Rotor(RotorError::InvalidDisplay('!')))
        ));
        assert_eq!(machine.full_display(), "MCK");
    }

    #[test]
    fn test_set_display_resets_counters() {
        let mut machine = MachineConfig::default().build().unwrap();
        machine.set_display("AAA").unwrap();
        machine.process_text("HELLO", SubstitutionPolicy::Drop).unwrap();
        assert_eq!(machine.rotors()[2].rotation_count(), 5);

        machine.set_display("aaa").unwrap();
        assert!(machine.rotors().iter().all(|r| r.rotation_count() == 0));
    }

    #[test]
    fn test_illegal_key_does_not_step() {
        let mut machine = MachineConfig::default().build().unwrap();
        machine.set_display("AAA").unwrap();

        assert_eq!(
            machine.key_press('1').unwrap_err(),
            Error::Machine(MachineError::IllegalKey('1'))
        );
        assert_eq!(machine.get_display(), "AAA");
    }

    #[test]
    fn test_lowercase_key() {
        let mut machine = MachineConfig::default().build().unwrap();
        machine.set_display("AAA").unwrap();
        assert_eq!(machine.key_press('a').unwrap(), 'B');
    }

    #[test]
    fn test_no_letter_maps_to_itself() {
        let mut machine = EnigmaMachine::from_key_sheet("II IV V", "2 21 12", "B", "AV BS CG DL FU HZ IN KM OW RX")
            .unwrap();
        machine.set_display("WXC").unwrap();
        let plaintext = "A".repeat(200);
        let ciphertext = machine.process_text(&plaintext, SubstitutionPolicy::Drop).unwrap();
        assert!(!ciphertext.contains('A'));
    }

    #[test]
    fn test_drop_policy() {
        let mut machine = MachineConfig::default().build().unwrap();
        machine.set_display("AAA").unwrap();
        let output = machine.process_text("a a-a.a\na", SubstitutionPolicy::Drop).unwrap();
        assert_eq!(output, "BDZGO");
        assert_eq!(machine.get_display(), "AAF");
    }

    #[test]
    fn test_replace_policy() {
        let mut with_spaces = MachineConfig::default().build().unwrap();
        with_spaces.set_display("AAA").unwrap();
        let replaced = with_spaces
            .process_text("AB CD", SubstitutionPolicy::Replace('X'))
            .unwrap();

        let mut explicit = MachineConfig::default().build().unwrap();
        explicit.set_display("AAA").unwrap();
        let keyed = explicit.process_text("ABXCD", SubstitutionPolicy::Drop).unwrap();

        assert_eq!(replaced, keyed);
        assert_eq!(replaced.len(), 5);
    }

    #[test]
    fn test_combining_mark_is_one_non_key() {
        let mut machine = MachineConfig::default().build().unwrap();
        machine.set_display("AAA").unwrap();
        assert_eq!(machine.process_text("e\u{301}", SubstitutionPolicy::Drop).unwrap(), "");
        assert_eq!(machine.get_display(), "AAA");

        let output = machine
            .process_text("ae\u{301}a", SubstitutionPolicy::Drop)
            .unwrap();
        assert_eq!(output, "BD");
        assert_eq!(machine.get_display(), "AAC");

        let mut replaced = MachineConfig::default().build().unwrap();
        replaced.set_display("AAA").unwrap();
        let output = replaced
            .process_text("e\u{301}", SubstitutionPolicy::Replace('X'))
            .unwrap();
        assert_eq!(replaced.get_display(), "AAB");

        let mut keyed = MachineConfig::default().build().unwrap();
        keyed.set_display("AAA").unwrap();
        assert_eq!(output, keyed.process_text("X", SubstitutionPolicy::Drop).unwrap());
    }

    #[test]
    fn test_replace_policy_must_be_a_key() {
        let mut machine = MachineConfig::default().build().unwrap();
        machine.set_display("AAA").unwrap();
        assert!(matches!(
            machine.process_text("AB CD", SubstitutionPolicy::Replace(' ')),
            Err(Error::Machine(MachineError::IllegalKey(' ')))
        ));
        assert_eq!(machine.get_display(), "AAA");
    }

    #[test]
    fn test_four_rotor_displays() {
        let mut machine = EnigmaMachine::from_key_sheet("Gamma VI VII VIII", "", "C-Thin", "").unwrap();
        machine.set_display("QZZZ").unwrap();
        assert_eq!(machine.rotor_count(), 4);
        assert_eq!(machine.get_display(), "ZZZ");
        assert_eq!(machine.full_display(), "QZZZ");

        machine.key_press('E').unwrap();
        // leftmost window never moves
        assert_eq!(machine.full_display(), "QAAA");
    }

    #[test]
    fn test_new_from_parts() {
        let rotors = vec![
            create_rotor("I", 0).unwrap(),
            create_rotor("II", 0).unwrap(),
            create_rotor("III", 0).unwrap(),
        ];
        let machine = EnigmaMachine::new(rotors, create_reflector("B").unwrap(), Plugboard::new()).unwrap();
        assert_eq!(machine.full_display(), "AAA");
        assert!(machine.reflector().is_reflective());
        assert!(machine.plugboard().pairs().is_empty());

        assert!(matches!(
            EnigmaMachine::new(Vec::new(), create_reflector("B").unwrap(), Plugboard::new()),
            Err(Error::Machine(MachineError::InvalidConfiguration(_)))
        ));
    }
}
