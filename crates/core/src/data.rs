//! Wiring tables for every rotor and reflector we simulate.
//!
//! Rotors I-V were used by the Heer, Luftwaffe and Kriegsmarine. The
//! Kriegsmarine added VI-VIII for the M3 and Beta/Gamma for the M4, where they
//! sat in the leftmost slot next to a thin reflector and never turned.
//!
//! Heer, Luftwaffe and Kriegsmarine M3 machines used reflectors B and C; the
//! M4 used B-Thin and C-Thin.
//!
//! The tables must match the historical wirings letter for letter; a single
//! transposition breaks interoperability with real traffic.

/// Registry entry for a rotor model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotorSpec {
    pub name: &'static str,
    pub wiring: &'static str,
    /// Window letters with a notch; `None` for non-stepping wheels
    pub stepping: Option<&'static str>,
}

/// Registry entry for a reflector (Umkehrwalze).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReflectorSpec {
    pub name: &'static str,
    pub wiring: &'static str,
}

pub static ROTORS: &[RotorSpec] = &[
    RotorSpec {
        name: "I",
        wiring: "EKMFLGDQVZNTOWYHXUSPAIBRCJ",
        stepping: Some("Q"),
    },
    RotorSpec {
        name: "II",
        wiring: "AJDKSIRUXBLHWTMCQGZNPYFVOE",
        stepping: Some("E"),
    },
    RotorSpec {
        name: "III",
        wiring: "BDFHJLCPRTXVZNYEIWGAKMUSQO",
        stepping: Some("V"),
    },
    RotorSpec {
        name: "IV",
        wiring: "ESOVPZJAYQUIRHXLNFTGKDCMWB",
        stepping: Some("J"),
    },
    RotorSpec {
        name: "V",
        wiring: "VZBRGITYUPSDNHLXAWMJQOFECK",
        stepping: Some("Z"),
    },
    RotorSpec {
        name: "VI",
        wiring: "JPGVOUMFYQBENHZRDKASXLICTW",
        stepping: Some("ZM"),
    },
    RotorSpec {
        name: "VII",
        wiring: "NZJHGRCXMYSWBOUFAIVLPEKQDT",
        stepping: Some("ZM"),
    },
    RotorSpec {
        name: "VIII",
        wiring: "FKQHTLXOCBJSPDZRAMEWNIUYGV",
        stepping: Some("ZM"),
    },
    RotorSpec {
        name: "Beta",
        wiring: "LEYJVCNIXWPBQMDRTAKZGFUHOS",
        stepping: None,
    },
    RotorSpec {
        name: "Gamma",
        wiring: "FSOKANUERHMBTIYCWLQPZXVGJD",
        stepping: None,
    },
];

pub static REFLECTORS: &[ReflectorSpec] = &[
    ReflectorSpec {
        name: "B",
        wiring: "YRUHQSLDPXNGOKMIEBFZCWVJAT",
    },
    ReflectorSpec {
        name: "C",
        wiring: "FVPJIAOYEDRZXWGCTKUQSBNMHL",
    },
    ReflectorSpec {
        name: "B-Thin",
        wiring: "ENKQAUYWJICOPBLMDXZVFTHRGS",
    },
    ReflectorSpec {
        name: "C-Thin",
        wiring: "RDOBJNTKVEHMLFCWZAXGYIPSUQ",
    },
];

/// Look up a rotor model by its exact name.
pub fn rotor_spec(name: &str) -> Option<&'static RotorSpec> {
    ROTORS.iter().find(|spec| spec.name == name)
}

/// Look up a reflector model by its exact name.
pub fn reflector_spec(name: &str) -> Option<&'static ReflectorSpec> {
    REFLECTORS.iter().find(|spec| spec.name == name)
}
