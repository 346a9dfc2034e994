//! Build rotors and reflectors by model name from the registry in [`data`](crate::data).

use crate::data;
use crate::error::{MachineError, Result};
use crate::rotor::Rotor;
use crate::wiring::Wiring;

/// Create a rotor of the given model with a ring setting (0-25).
///
/// # Errors
/// - `MachineError::UnknownRotor` if the model isn't registered
/// - `RotorError::InvalidRingSetting` if `ring_setting >= 26`
pub fn create_rotor(model: &str, ring_setting: usize) -> Result<Rotor> {
    let spec = data::rotor_spec(model).ok_or_else(|| MachineError::UnknownRotor(model.to_string()))?;
    let rotor = Rotor::new(spec.name, spec.wiring, ring_setting, spec.stepping)?;
    log::debug!("created rotor {} with ring setting {}", spec.name, ring_setting);
    Ok(rotor)
}

/// Create a reflector of the given model.
///
/// # Errors
/// Returns `MachineError::UnknownReflector` if the model isn't registered.
pub fn create_reflector(model: &str) -> Result<Wiring> {
    let spec =
        data::reflector_spec(model).ok_or_else(|| MachineError::UnknownReflector(model.to_string()))?;
    Wiring::new(spec.wiring, 0)
}
