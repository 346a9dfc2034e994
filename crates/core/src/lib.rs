//! enigma-sim-core: a historically accurate Enigma rotor machine simulation
//!
//! This library models the electro-mechanical signal path of the Enigma
//! machines used by the Heer, Luftwaffe and Kriegsmarine (M3 and M4):
//! - Rotor wiring, ring settings and notches
//! - Ratchet and pawl stepping, including the middle-rotor double step
//! - Reflectors and the plugboard
//!
//! # Architecture
//!
//! Components, leaf to root:
//! - `alphabet`: the 26-letter alphabet and index helpers
//! - `wiring`: fixed permutation of a rotor or reflector
//! - `rotor`: wiring plus position, ring and notches
//! - `data` / `factory`: the registry of historical wheels
//! - `plugboard`: symmetric letter swaps
//! - `stepping`: which rotors turn on a key press
//! - `machine`: everything assembled, plus text processing
//!
//! # Design Principles
//!
//! - **No panics**: all validation errors are structured and returned
//! - **Construct or fail**: nothing is mutated by a call that fails
//! - **Fixed tables**: every lookup is a 26-entry array built once
//!
//! # Example
//! ```
//! use enigma_sim_core::{EnigmaMachine, SubstitutionPolicy};
//!
//! let mut machine = EnigmaMachine::from_key_sheet(
//!     "II IV V",
//!     "2 21 12",
//!     "B",
//!     "AV BS CG DL FU HZ IN KM OW RX",
//! )
//! .unwrap();
//!
//! machine.set_display("WXC").unwrap();
//! let message_key = machine.process_text("KCH", SubstitutionPolicy::Drop).unwrap();
//!
//! machine.set_display(&message_key).unwrap();
//! let plaintext = machine
//!     .process_text("NIBLFMYMLLUFWCASCSSNVHAZ", SubstitutionPolicy::Drop)
//!     .unwrap();
//! assert_eq!(plaintext, "THEXRUSSIANSXAREXCOMINGX");
//! ```

pub mod alphabet;
pub mod data;
pub mod error;
pub mod factory;
pub mod machine;
pub mod plugboard;
pub mod rotor;
pub mod stepping;
pub mod wiring;

// Re-export commonly used types
pub use error::{Error, Result};
pub use machine::{EnigmaMachine, MachineConfig, RingSettings, SubstitutionPolicy};
pub use plugboard::Plugboard;
pub use rotor::Rotor;
