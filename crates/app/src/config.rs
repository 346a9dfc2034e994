//! Configuration for the enigma-sim application.
//!
//! Handles parsing command-line arguments and filling in defaults.
//!
//! # Philosophy
//!
//! The tool should work with ZERO arguments: rotors I II III, rings AAA,
//! reflector B, no plugboard, start AAA, text from stdin. A key file supplies
//! the daily settings; explicit flags override individual columns of it.

use crate::key_file::{self, KeyFileError};
use enigma_sim_core::{MachineConfig, SubstitutionPolicy};
use std::path::PathBuf;
use thiserror::Error;

/// Application errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Bad or missing command-line argument
    #[error("{0}")]
    Usage(String),

    /// Key file couldn't be read or parsed
    #[error("key file error: {0}")]
    KeyFile(#[from] KeyFileError),

    /// Machine settings were rejected
    #[error(transparent)]
    Enigma(#[from] enigma_sim_core::Error),

    /// File I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Everything needed for one run.
#[derive(Debug, Clone)]
pub struct Config {
    // === Machine ===
    /// Resolved daily settings
    pub machine: MachineConfig,

    /// Starting display (None = all 'A')
    pub start: Option<String>,

    /// Treat the first rotor-count letters of the text as an encrypted message key
    pub message_key: bool,

    // === Text ===
    /// Text to process (None = read stdin)
    pub text: Option<String>,

    /// What to do with characters that aren't keys
    pub policy: SubstitutionPolicy,

    // === Key sheets ===
    /// Write a generated key sheet here instead of processing text
    pub generate_keys: Option<PathBuf>,

    /// Seed for key sheet generation
    pub seed: u64,

    /// Generate 4-rotor settings
    pub four_rotor: bool,

    // === Behavior ===
    /// Whether to print resolved configuration
    pub print_config: bool,
}

impl Config {
    /// Parse configuration from command-line arguments (without the program name).
    ///
    /// A `--key-file` is read here so that errors surface before any text
    /// is processed.
    pub fn from_args(args: &[String]) -> Result<Self, ConfigError> {
        let mut rotors: Option<String> = None;
        let mut rings: Option<String> = None;
        let mut reflector: Option<String> = None;
        let mut plugboard: Option<String> = None;
        let mut start: Option<String> = None;
        let mut key_file_path: Option<PathBuf> = None;
        let mut day: Option<u32> = None;
        let mut text: Option<String> = None;
        let mut replace_char: Option<char> = None;
        let mut drop_invalid = false;
        let mut message_key = false;
        let mut generate_keys: Option<PathBuf> = None;
        let mut seed: Option<u64> = None;
        let mut four_rotor = false;
        let mut print_config = false;

        let mut i = 0;
        while i < args.len() {
            match args[i].as_str() {
                "--rotors" | "-r" => rotors = Some(value(args, &mut i, "a rotor list")?),
                "--rings" | "-i" => rings = Some(value(args, &mut i, "ring settings")?),
                "--reflector" | "-u" => reflector = Some(value(args, &mut i, "a reflector name")?),
                "--plugboard" | "-p" => plugboard = Some(value(args, &mut i, "plugboard settings")?),
                "--start" | "-s" => start = Some(value(args, &mut i, "a start position")?),
                "--key-file" | "-f" => key_file_path = Some(PathBuf::from(value(args, &mut i, "a path")?)),
                "--day" | "-d" => {
                    let v = value(args, &mut i, "a number")?;
                    day = Some(v.parse().map_err(|_| usage(format!("invalid day: {}", v)))?);
                }
                "--text" | "-t" => text = Some(value(args, &mut i, "text")?),
                "--replace-char" => {
                    let v = value(args, &mut i, "a character")?;
                    let mut chars = v.chars();
                    replace_char = match (chars.next(), chars.next()) {
                        (Some(c), None) => Some(c),
                        _ => return Err(usage(format!("invalid replace char: {}", v))),
                    };
                }
                "--drop-invalid" => drop_invalid = true,
                "--message-key" => message_key = true,
                "--generate-keys" => generate_keys = Some(PathBuf::from(value(args, &mut i, "a path")?)),
                "--seed" => {
                    let v = value(args, &mut i, "a number")?;
                    seed = Some(v.parse().map_err(|_| usage(format!("invalid seed: {}", v)))?);
                }
                "--m4" => four_rotor = true,
                "--print-config" => print_config = true,
                "--help" | "-h" => {
                    print_help();
                    std::process::exit(0);
                }
                other => return Err(usage(format!("unknown argument: {}", other))),
            }
            i += 1;
        }

        if drop_invalid && replace_char.is_some() {
            return Err(usage("--drop-invalid and --replace-char are exclusive".to_string()));
        }

        let mut machine = match &key_file_path {
            Some(path) => {
                let day = day.unwrap_or_else(today);
                let file = std::fs::File::open(path)?;
                key_file::get_daily_settings(std::io::BufReader::new(file), day)?
            }
            None => MachineConfig::default(),
        };

        if let Some(rotors) = rotors {
            machine.rotors = rotors.split_whitespace().map(str::to_string).collect();
        }
        if let Some(rings) = rings {
            machine.ring_settings = rings.parse()?;
        }
        if let Some(reflector) = reflector {
            machine.reflector = reflector;
        }
        if let Some(plugboard) = plugboard {
            machine.plugboard = plugboard;
        }

        let policy = if drop_invalid {
            SubstitutionPolicy::Drop
        } else {
            replace_char.map_or_else(SubstitutionPolicy::default, SubstitutionPolicy::Replace)
        };

        Ok(Config {
            machine,
            start,
            message_key,
            text,
            policy,
            generate_keys,
            seed: seed.unwrap_or_else(time_seed),
            four_rotor,
            print_config,
        })
    }

    /// Print the configuration in human-readable form.
    pub fn print(&self) {
        println!("=== Configuration ===");
        println!("Rotors:        {}", self.machine.rotors.join(" "));
        println!("Ring settings: {}", self.machine.ring_settings);
        println!("Reflector:     {}", self.machine.reflector);
        println!("Plugboard:     {}", self.machine.plugboard);
        println!("Start:         {}", self.start.as_deref().unwrap_or("(all A)"));
        println!("Message key:   {}", self.message_key);
        println!("Invalid chars: {:?}", self.policy);
        println!();
    }
}

/// Take the value following flag `args[*i]`, advancing `i`.
fn value(args: &[String], i: &mut usize, what: &str) -> Result<String, ConfigError> {
    let flag = &args[*i];
    *i += 1;
    args.get(*i)
        .cloned()
        .ok_or_else(|| usage(format!("{} requires {}", flag, what)))
}

fn usage(message: String) -> ConfigError {
    ConfigError::Usage(message)
}

/// Day of the month, local time.
fn today() -> u32 {
    use chrono::Datelike;
    chrono::Local::now().day()
}

fn time_seed() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}

fn print_help() {
    println!("enigma-sim: Enigma machine simulation");
    println!();
    println!("USAGE:");
    println!("    enigma-sim [OPTIONS]");
    println!();
    println!("MACHINE:");
    println!("    -r, --rotors <LIST>       Rotors left to right (default: \"I II III\")");
    println!("    -i, --rings <LIST>        Ring settings, letters or 1-26 (default: all A)");
    println!("    -u, --reflector <NAME>    B, C, B-Thin or C-Thin (default: B)");
    println!("    -p, --plugboard <PAIRS>   \"AV BS ...\" or \"1/22 2/19 ...\" (default: none)");
    println!("    -s, --start <LETTERS>     Starting display (default: all A)");
    println!("    -f, --key-file <PATH>     Read daily settings from a key sheet");
    println!("    -d, --day <N>             Day to use from the key sheet (default: today)");
    println!("    --message-key             First 3/4 letters are the encrypted message key");
    println!();
    println!("TEXT:");
    println!("    -t, --text <TEXT>         Text to process (default: read stdin)");
    println!("    --replace-char <C>        Key C for characters that aren't letters (default: X)");
    println!("    --drop-invalid            Skip characters that aren't letters");
    println!();
    println!("KEY SHEETS:");
    println!("    --generate-keys <PATH>    Write a random monthly key sheet and exit");
    println!("    --seed <N>                Seed for --generate-keys (default: time based)");
    println!("    --m4                      Generate 4-rotor settings");
    println!();
    println!("    --print-config            Print resolved configuration");
    println!("    --help, -h                Print this help");
    println!();
    println!("EXAMPLES:");
    println!("    enigma-sim -t AAAAA                                         # BDZGO");
    println!("    enigma-sim -r \"II IV V\" -i \"2 21 12\" -p \"AV BS CG DL FU HZ IN KM OW RX\" \\");
    println!("               -s WXC --message-key -t KCHNIBLFMYMLLUFWCASCSSNVHAZ");
    println!("    enigma-sim --generate-keys keys.txt --seed 42");
    println!("    enigma-sim -f keys.txt -d 14 -s QWE < message.txt");
    println!();
}
