//! Ratchet and pawl stepping, including the middle-rotor double step.
//!
//! Only the three rightmost rotors have pawls. On every key press, before any
//! current flows:
//!
//! 1. the rightmost rotor (R1) always turns;
//! 2. the middle rotor (R2) turns if R1's notch is over its pawl, or if R2's
//!    own notch is over the pawl to its left (the double step);
//! 3. the third rotor (R3) turns if R2's notch is over its pawl.
//!
//! Both notch checks are taken from the positions *before* this key press
//! moves anything. A fourth (leftmost) rotor on an M4 never turns.
//!
//! # Example
//! ```text
//! III II I at KDO:  KDP  KDQ  KER  LFS  LFT  LFU
//!                             ^    ^
//!                 R2 reaches E (notch)  R2 steps again, R3 steps too
//! ```

use crate::rotor::Rotor;

/// Which rotors turn on one key press, decided from a pre-rotation snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepPlan {
    pub middle: bool,
    pub left: bool,
}

impl StepPlan {
    /// Decide the step from the rightmost and middle rotors as they are now.
    pub fn from_rotors(right: &Rotor, middle: &Rotor) -> Self {
        Self {
            middle: right.notch_over_pawl() || middle.notch_over_pawl(),
            left: middle.notch_over_pawl(),
        }
    }
}

/// Step the rotor stack for one key press.
///
/// `rotors` is ordered left to right; only the last three take part. Returns
/// the plan that was applied. Stacks with fewer than three rotors are never
/// built by [`EnigmaMachine`](crate::machine::EnigmaMachine), and are left
/// untouched here.
pub fn step(rotors: &mut [Rotor]) -> Option<StepPlan> {
    let n = rotors.len();
    if n < 3 {
        return None;
    }

    let (right, middle) = (&rotors[n - 1], &rotors[n - 2]);
    let plan = StepPlan::from_rotors(right, middle);

    rotors[n - 1].rotate();
    if plan.middle {
        rotors[n - 2].rotate();
    }
    if plan.left {
        rotors[n - 3].rotate();
    }

    Some(plan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory::create_rotor;

    fn stack(names: &[&str], display: &str) -> Vec<Rotor> {
        names
            .iter()
            .zip(display.chars())
            .map(|(name, c)| {
                let mut rotor = create_rotor(name, 0).unwrap();
                rotor.set_display(c).unwrap();
                rotor
            })
            .collect()
    }

    fn display(rotors: &[Rotor]) -> String {
        rotors.iter().map(Rotor::display).collect()
    }

    #[test]
    fn test_double_step() {
        let mut rotors = stack(&["III", "II", "I"], "KDO");

        for expected in ["KDP", "KDQ", "KER", "LFS", "LFT", "LFU"] {
            step(&mut rotors).unwrap();
            assert_eq!(display(&rotors), expected);
        }
    }

    #[test]
    fn test_plan_uses_snapshot() {
        // R1 at Q (notch), R2 at E (notch): both decisions come from before
        // anything moves, so R2 and R3 turn exactly once.
        let mut rotors = stack(&["III", "II", "I"], "AEQ");
        let plan = step(&mut rotors).unwrap();
        assert_eq!(plan, StepPlan { middle: true, left: true });
        assert_eq!(display(&rotors), "BFR");
    }

    #[test]
    fn test_right_rotor_only() {
        let mut rotors = stack(&["I", "II", "III"], "AAA");
        let plan = step(&mut rotors).unwrap();
        assert_eq!(plan, StepPlan { middle: false, left: false });
        assert_eq!(display(&rotors), "AAB");
    }

    #[test]
    fn test_fourth_rotor_never_turns() {
        let mut rotors = stack(&["Beta", "I", "II", "III"], "AZDV");
        // V kicks II to E, then II double steps and kicks I past its wrap
        for _ in 0..3 {
            step(&mut rotors).unwrap();
        }
        assert_eq!(rotors[0].display(), 'A');
        assert_eq!(rotors[0].rotation_count(), 0);
        assert_eq!(display(&rotors), "AAFY");
    }

    #[test]
    fn test_two_notch_rotor_kicks_twice_per_revolution() {
        let mut rotors = stack(&["I", "II", "VI"], "AAA");
        for _ in 0..26 {
            step(&mut rotors).unwrap();
        }
        // VI notches at M and Z
        assert_eq!(rotors[1].rotation_count(), 2);
    }

    #[test]
    fn test_short_stack_is_ignored() {
        let mut rotors = stack(&["I", "II"], "AA");
        assert!(step(&mut rotors).is_none());
        assert_eq!(display(&rotors), "AA");
    }
}
