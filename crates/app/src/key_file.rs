//! Daily key sheet files.
//!
//! One line per day of the month, space-separated columns:
//!
//! ```text
//! # day  rotors        rings       plugboard (10 pairs)            reflector
//!   1    II IV V       B U L       AV BS CG DL FU HZ IN KM OW RX   B
//!   2    Beta II IV I  A A A V     1/20 2/12 4/6 7/10 8/13 ...     B-Thin
//! ```
//!
//! A 3-rotor line has 18 columns, a 4-rotor line 20. Ring settings may be
//! letters or 1-based numbers; plugboard pairs may use either notation.
//! Lines starting with `#` and blank lines are ignored. Lines may appear in
//! any order.

use enigma_sim_core::{MachineConfig, RingSettings};
use std::io::BufRead;
use thiserror::Error;

/// Columns on a line for a 3-rotor machine.
const COLUMNS_M3: usize = 18;

/// Columns on a line for a 4-rotor machine.
const COLUMNS_M4: usize = 20;

/// Plugboard pairs on every line.
const PLUGBOARD_COLUMNS: usize = 10;

/// Key file errors.
#[derive(Debug, Error)]
pub enum KeyFileError {
    /// Line doesn't have 18 or 20 columns
    #[error("invalid column count on line {line}: {count}")]
    InvalidColumnCount { line: usize, count: usize },

    /// First column isn't a day number 1-31
    #[error("invalid day on line {line}: {value:?}")]
    InvalidDay { line: usize, value: String },

    /// No line for the requested day
    #[error("no entry for day {0} found")]
    MissingDay(u32),

    /// Ring settings column failed to parse
    #[error("line {line}: {source}")]
    Settings {
        line: usize,
        source: enigma_sim_core::Error,
    },

    /// Reading the file failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Find and parse the settings for `day` (1-31).
///
/// # Errors
/// Column count and day number are validated on every non-comment line
/// up to the match, so a malformed line before the wanted day is reported.
pub fn get_daily_settings<R: BufRead>(reader: R, day: u32) -> Result<MachineConfig, KeyFileError> {
    for (n, line) in reader.lines().enumerate() {
        let line = line?;
        let line_no = n + 1;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let cols: Vec<&str> = line.split_whitespace().collect();
        let rotor_count = match cols.len() {
            COLUMNS_M3 => 3,
            COLUMNS_M4 => 4,
            count => return Err(KeyFileError::InvalidColumnCount { line: line_no, count }),
        };

        let day_num: u32 = cols[0]
            .parse()
            .ok()
            .filter(|d| (1..=31).contains(d))
            .ok_or_else(|| KeyFileError::InvalidDay {
                line: line_no,
                value: cols[0].to_string(),
            })?;

        if day_num != day {
            continue;
        }

        let rotors = &cols[1..1 + rotor_count];
        let rings = &cols[1 + rotor_count..1 + 2 * rotor_count];
        let plugboard = &cols[cols.len() - 1 - PLUGBOARD_COLUMNS..cols.len() - 1];
        let reflector = cols[cols.len() - 1];

        let ring_settings: RingSettings = rings
            .join(" ")
            .parse()
            .map_err(|source| KeyFileError::Settings { line: line_no, source })?;

        log::debug!("key sheet line {} matches day {}", line_no, day);

        return Ok(MachineConfig {
            rotors: rotors.iter().map(|s| s.to_string()).collect(),
            ring_settings,
            reflector: reflector.to_string(),
            plugboard: plugboard.join(" "),
        });
    }

    Err(KeyFileError::MissingDay(day))
}

/// Format one key sheet line from a configuration.
pub fn format_line(day: u32, config: &MachineConfig) -> String {
    format!(
        "{:>2} {} {} {} {}",
        day,
        config.rotors.join(" "),
        config.ring_settings,
        config.plugboard,
        config.reflector
    )
}
