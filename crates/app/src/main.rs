//! enigma-sim: run text through a configured Enigma machine.
//!
//! Reads settings from flags and/or a key sheet, sets the start position,
//! and prints one output line per input line. The machine keeps stepping
//! across lines, as it would for one continuous message.

mod config;
mod key_file;
mod key_gen;

use config::{Config, ConfigError};
use enigma_sim_core::{EnigmaMachine, SubstitutionPolicy};
use std::io::Read;

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if let Err(e) = run(&args) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: &[String]) -> Result<(), ConfigError> {
    let config = Config::from_args(args)?;

    if let Some(path) = &config.generate_keys {
        key_gen::write_key_sheet(path, config.seed, config.four_rotor)?;
        println!("Wrote key sheet to {} (seed {})", path.display(), config.seed);
        return Ok(());
    }

    if config.print_config {
        config.print();
    }

    let mut machine = config.machine.build()?;
    let start = config
        .start
        .clone()
        .unwrap_or_else(|| "A".repeat(machine.rotor_count()));
    machine.set_display(&start)?;

    let text = match &config.text {
        Some(text) => text.clone(),
        None => {
            let mut input = String::new();
            std::io::stdin().read_to_string(&mut input)?;
            input
        }
    };

    for line in process(&mut machine, &text, &config)? {
        println!("{}", line);
    }

    log::info!(
        "finished at display {} ({} rotations of the fast rotor)",
        machine.full_display(),
        machine.rotors().last().map_or(0, |r| r.rotation_count())
    );
    Ok(())
}

/// Process every line of `text`, handling the message key first if asked to.
fn process(machine: &mut EnigmaMachine, text: &str, config: &Config) -> Result<Vec<String>, ConfigError> {
    let body = if config.message_key {
        apply_message_key(machine, text)?
    } else {
        text
    };

    body.lines()
        .map(|line| -> Result<String, ConfigError> { Ok(machine.process_text(line, config.policy)?) })
        .collect()
}

/// Decrypt the leading indicator letters at the current position, then move
/// the rotors to the message key. Returns the text after the indicator.
fn apply_message_key<'a>(machine: &mut EnigmaMachine, text: &'a str) -> Result<&'a str, ConfigError> {
    let needed = machine.rotor_count();
    let mut indicator = String::with_capacity(needed);
    let mut rest = "";

    for (idx, c) in text.char_indices() {
        if indicator.len() == needed {
            rest = &text[idx..];
            break;
        }
        if c.is_ascii_alphabetic() {
            indicator.push(c);
        }
    }

    if indicator.len() < needed {
        return Err(ConfigError::Usage(format!(
            "text is too short for a {}-letter message key",
            needed
        )));
    }

    let message_key = machine.process_text(&indicator, SubstitutionPolicy::Drop)?;
    machine.set_display(&message_key)?;
    log::info!("indicator {} -> message key {}", indicator, message_key);

    Ok(rest)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(args: &[&str]) -> Config {
        let args: Vec<String> = args.iter().map(|s| s.to_string()).collect();
        Config::from_args(&args).unwrap()
    }

    #[test]
    fn test_message_key_dropping_spaces() {
        let config = config(&["-r", "II IV V", "-i", "2 21 12", "-p", "AV BS CG DL FU HZ IN KM OW RX"]);
        let mut machine = config.machine.build().unwrap();
        machine.set_display("WXC").unwrap();

        let config = Config {
            message_key: true,
            policy: SubstitutionPolicy::Drop,
            ..config
        };
        let output = process(&mut machine, "KCH\nNIBLF MYMLL UFWCA\nSCSSN VHAZ", &config).unwrap();
        assert_eq!(output, vec!["", "THEXRUSSIANSXAR", "EXCOMINGX"]);
    }

    #[test]
    fn test_message_key_too_short() {
        let config = Config {
            message_key: true,
            ..config(&[])
        };
        let mut machine = config.machine.build().unwrap();
        assert!(matches!(
            process(&mut machine, "K-C", &config),
            Err(ConfigError::Usage(_))
        ));
    }

    #[test]
    fn test_lines_share_machine_state() {
        let config = config(&["--drop-invalid"]);
        let mut machine = config.machine.build().unwrap();
        machine.set_display("AAA").unwrap();

        let output = process(&mut machine, "AA\nAAA", &config).unwrap();
        assert_eq!(output, vec!["BD", "ZGO"]);
    }
}
