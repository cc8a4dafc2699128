//! Planner-owned kinematic state (§3, §4.2).
//!
//! `KinematicState` is the buffer handed to the MPC solver every tick. It is
//! exclusively owned by the planner — no other component reads or writes it
//! (§5 "Shared resources") — so it is a plain owned value, not a pointer into
//! solver memory; the solver boundary itself lives behind the `MpcSolver`
//! trait in [`crate::collab`].

/// Kinematic bicycle-model state fed to the MPC solver.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct KinematicState {
    /// Longitudinal distance travelled within the planning horizon [m].
    pub x: f64,
    /// Lateral offset from the reference path [m].
    pub y: f64,
    /// Heading error [rad].
    pub psi: f64,
    /// Road-wheel steer angle [rad].
    pub delta: f64,
}

impl KinematicState {
    /// The zero state, used to (re)seed the solver on `init` (§4.5).
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        psi: 0.0,
        delta: 0.0,
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_is_default() {
        assert_eq!(KinematicState::default(), KinematicState::ZERO);
    }
}
