//! Random key sheet generation.
//!
//! Produces a month of daily settings in the format read by
//! [`key_file`](crate::key_file), reproducible from a seed.
//!
//! # Design
//!
//! Each day gets:
//! - three distinct rotors out of I-VIII (plus Beta or Gamma on the left
//!   for a 4-rotor sheet)
//! - random ring settings
//! - ten disjoint plugboard pairs
//! - reflector B or C (B-Thin or C-Thin for a 4-rotor sheet)

use crate::config::ConfigError;
use crate::key_file;
use enigma_sim_core::alphabet::LABELS;
use enigma_sim_core::plugboard::MAX_PAIRS;
use enigma_sim_core::{MachineConfig, RingSettings};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::io::Write;

/// Days on a monthly sheet.
pub const DAYS_PER_SHEET: u32 = 31;

const STEPPING_ROTORS: [&str; 8] = ["I", "II", "III", "IV", "V", "VI", "VII", "VIII"];
const GREEK_ROTORS: [&str; 2] = ["Beta", "Gamma"];

/// Generate one day's settings.
pub fn generate_settings(rng: &mut ChaCha8Rng, four_rotor: bool) -> enigma_sim_core::Result<MachineConfig> {
    let mut rotors: Vec<String> = STEPPING_ROTORS
        .choose_multiple(rng, 3)
        .map(|name| name.to_string())
        .collect();

    let reflector = if four_rotor {
        let greek = GREEK_ROTORS[rng.gen_range(0..GREEK_ROTORS.len())];
        rotors.insert(0, greek.to_string());
        if rng.gen() { "B-Thin" } else { "C-Thin" }
    } else if rng.gen() {
        "B"
    } else {
        "C"
    };

    let rings: Vec<usize> = (0..rotors.len()).map(|_| rng.gen_range(0..LABELS.len())).collect();

    let mut letters = LABELS;
    letters.shuffle(rng);
    let plugboard = letters[..MAX_PAIRS * 2]
        .chunks(2)
        .map(|pair| pair.iter().collect::<String>())
        .collect::<Vec<_>>()
        .join(" ");

    Ok(MachineConfig {
        rotors,
        ring_settings: RingSettings::from_values(&rings)?,
        reflector: reflector.to_string(),
        plugboard,
    })
}

/// Generate a full monthly key sheet.
///
/// # Arguments
/// - `seed`: random seed for determinism
/// - `four_rotor`: generate M4 settings instead of 3-rotor settings
///
/// # Returns
/// The sheet text, one line per day, with a header comment.
pub fn generate_key_sheet(seed: u64, four_rotor: bool) -> enigma_sim_core::Result<String> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut sheet = format!("# enigma-sim key sheet, seed {}\n", seed);

    for day in (1..=DAYS_PER_SHEET).rev() {
        let config = generate_settings(&mut rng, four_rotor)?;
        sheet.push_str(&key_file::format_line(day, &config));
        sheet.push('\n');
    }

    Ok(sheet)
}

/// Write a generated key sheet to a file.
pub fn write_key_sheet(path: &std::path::Path, seed: u64, four_rotor: bool) -> Result<(), ConfigError> {
    let sheet = generate_key_sheet(seed, four_rotor)?;
    let mut file = std::fs::File::create(path)?;
    file.write_all(sheet.as_bytes())?;
    Ok(())
}
