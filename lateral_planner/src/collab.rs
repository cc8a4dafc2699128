//! External-collaborator trait boundaries (§6.2–§6.4, §9).
//!
//! The MPC solver, the lane-line fusion module, and the vehicle kinematic
//! model are explicitly out of scope (§1) — real implementations are
//! numeric black boxes maintained elsewhere. This module defines the
//! narrowest possible interface to each, per the design note in §9:
//! "isolate behind a trait/interface exposing exactly `init` and `run`".
//!
//! The planner holds one instance of each collaborator as a generic, owned
//! field (§9.1) — no `dyn Trait`, no shared/aliased pointers into solver
//! memory; each collaborator is exclusively owned for the planner's whole
//! lifetime (§5 "Shared resources").

use planner_common::consts::MpcCostLat;
use planner_common::messages::{ModelMsg, Poly3};

use crate::kinematics::KinematicState;

/// Raw MPC solver output for one tick (§6.2).
///
/// `delta` must have at least 2 samples (the driver reads `delta[1]`, one
/// step ahead of the seed state) and `rate` at least 1.
#[derive(Debug, Clone, PartialEq)]
pub struct MpcSolution {
    /// Longitudinal-distance horizon.
    pub x: Vec<f64>,
    /// Lateral-offset horizon.
    pub y: Vec<f64>,
    /// Heading horizon.
    pub psi: Vec<f64>,
    /// Steer-angle horizon (radians).
    pub delta: Vec<f64>,
    /// Steer-rate horizon (radians/s).
    pub rate: Vec<f64>,
    /// Solver cost at convergence (or divergence, if `> MPC_COST_INVALID_THRESHOLD`).
    pub cost: f64,
}

impl MpcSolution {
    /// A solution horizon of `len` samples, all zeroed — the minimum
    /// horizon length the driver requires is 2, but callers may size it to
    /// match their solver's actual prediction horizon.
    pub fn zeroed(len: usize) -> Self {
        let len = len.max(2);
        Self {
            x: vec![0.0; len],
            y: vec![0.0; len],
            psi: vec![0.0; len],
            delta: vec![0.0; len],
            rate: vec![0.0; len.max(1)],
            cost: 0.0,
        }
    }

    /// True if any sample in the `delta` horizon is NaN (§4.5 step 3).
    #[inline]
    pub fn has_nan_delta(&self) -> bool {
        self.delta.iter().any(|v| v.is_nan())
    }
}

/// The model-predictive control solver (§6.2).
pub trait MpcSolver {
    /// Re-initialise internal solver state with the given cost weights.
    /// Idempotent — called at construction and after every NaN recovery.
    fn init(&mut self, cost: MpcCostLat, steer_rate_cost: f64);

    /// Run one solve, filling `out` with the resulting horizons.
    #[allow(clippy::too_many_arguments)]
    fn run(
        &mut self,
        state: &KinematicState,
        out: &mut MpcSolution,
        l_poly: Poly3,
        r_poly: Poly3,
        d_poly: Poly3,
        l_prob: f64,
        r_prob: f64,
        curvature_factor: f64,
        v_ego_mpc: f64,
        lane_width: f64,
    );
}

/// The lane-line fusion collaborator (§6.3).
pub trait LaneLineSource {
    /// Refresh `l_poly`/`r_poly`/probabilities from a fresh perception message.
    fn parse_model(&mut self, model: &ModelMsg);

    /// Recompute the fused driving-policy polynomial from the current lane
    /// lines and ego speed. Called after any lane-change attenuation so the
    /// attenuated probabilities are reflected in `d_poly` (§4.4).
    fn update_d_poly(&mut self, v_ego: f64);

    /// Left lane-line polynomial.
    fn l_poly(&self) -> Poly3;
    /// Right lane-line polynomial.
    fn r_poly(&self) -> Poly3;
    /// Fused driving-policy polynomial.
    fn d_poly(&self) -> Poly3;
    /// Left lane-line probability.
    fn l_prob(&self) -> f64;
    /// Right lane-line probability.
    fn r_prob(&self) -> f64;
    /// Overwrite the left lane-line probability (lane-change attenuation, §4.4).
    fn set_l_prob(&mut self, value: f64);
    /// Overwrite the right lane-line probability (lane-change attenuation, §4.4).
    fn set_r_prob(&mut self, value: f64);
    /// Perception-estimated probability the left lane is mid lane-change.
    fn l_lane_change_prob(&self) -> f64;
    /// Perception-estimated probability the right lane is mid lane-change.
    fn r_lane_change_prob(&self) -> f64;
    /// Estimated lane width [m].
    fn lane_width(&self) -> f64;
}

/// The vehicle kinematic model collaborator (§6.4).
pub trait VehicleModel {
    /// Update internal kinematic parameters from live estimates.
    /// Both inputs are already floored to `LIVE_PARAM_FLOOR` by the caller.
    fn update_params(&mut self, stiffness_factor: f64, steer_ratio: f64);

    /// Speed-dependent curvature factor for the bicycle-model linearization.
    fn curvature_factor(&self, v_ego: f64) -> f64;

    /// Effective steer ratio (`sR`).
    fn steer_ratio(&self) -> f64;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zeroed_enforces_minimum_horizon() {
        let sol = MpcSolution::zeroed(0);
        assert!(sol.delta.len() >= 2);
        assert!(sol.rate.len() >= 1);
    }

    #[test]
    fn has_nan_delta_detects_nan() {
        let mut sol = MpcSolution::zeroed(3);
        assert!(!sol.has_nan_delta());
        sol.delta[1] = f64::NAN;
        assert!(sol.has_nan_delta());
    }
}
