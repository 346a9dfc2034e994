//! Error types for the enigma-sim system.
//!
//! Every failure is a validation failure detected at construction or at the
//! point of the offending call. Nothing is retried internally and no state is
//! mutated before validation succeeds.

use thiserror::Error;

/// Top-level error type for all operations in the core library.
///
/// Each variant corresponds to a specific failure domain:
/// - Rotor: wiring, ring setting, notch or display problems
/// - Plugboard: cable configuration problems
/// - Machine: registry lookups, rotor count, display length, illegal keys
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Rotor or reflector construction/state error
    #[error("rotor error: {0}")]
    Rotor(#[from] RotorError),

    /// Plugboard configuration error
    #[error("plugboard error: {0}")]
    Plugboard(#[from] PlugboardError),

    /// Machine configuration or input error
    #[error("machine error: {0}")]
    Machine(#[from] MachineError),
}

/// Rotor and permutation unit errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RotorError {
    /// Wiring is not a permutation of the 26 letters
    #[error("invalid wiring {wiring:?}: {reason}")]
    InvalidWiring {
        wiring: String,
        reason: &'static str,
    },

    /// Ring setting outside 0-25 (or an unparseable ring setting token)
    #[error("invalid ring setting: {0}")]
    InvalidRingSetting(String),

    /// Notch label is not a letter of the alphabet
    #[error("invalid notch position: {0:?}")]
    InvalidNotch(char),

    /// Display value is not a letter of the alphabet
    #[error("invalid display value: {0:?}")]
    InvalidDisplay(char),
}

/// Plugboard errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlugboardError {
    /// A plug appears in more than one cable
    #[error("duplicate connection: {0}")]
    DuplicateConnection(char),

    /// More cables than a machine was issued with
    #[error("too many connections: {count} pairs, max {max}")]
    TooManyConnections { count: usize, max: usize },

    /// A pair references a plug outside the alphabet, or cannot be parsed
    #[error("invalid plugboard symbol: {0:?}")]
    InvalidSymbol(String),
}

/// Machine-level errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MachineError {
    /// Rotor count not in {3, 4}, or mismatched setting counts
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Rotor name not found in the registry
    #[error("unknown rotor type: {0}")]
    UnknownRotor(String),

    /// Reflector name not found in the registry
    #[error("unknown reflector type: {0}")]
    UnknownReflector(String),

    /// Display string length doesn't match rotor count
    #[error("display {display:?} has {actual} letters, machine has {expected} rotors")]
    InvalidDisplayLength {
        display: String,
        expected: usize,
        actual: usize,
    },

    /// Key pressed that is not on the keyboard
    #[error("illegal key: {0:?}")]
    IllegalKey(char),
}

/// Type alias for Result with our Error type
pub type Result<T> = std::result::Result<T, Error>;
