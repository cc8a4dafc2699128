//! Minimal reference implementations of the [`crate::collab`] traits.
//!
//! These are deterministic stand-ins, not production solvers — the real MPC
//! solver, lane-line fusion stack, and vehicle model are out of scope (§1)
//! and maintained elsewhere. `main.rs` and the integration tests wire the
//! planner up against these so the crate is runnable end to end without an
//! external optimizer dependency.

use planner_common::consts::MpcCostLat;
use planner_common::messages::{ModelMsg, Poly3};

use crate::collab::{LaneLineSource, MpcSolution, MpcSolver, VehicleModel};
use crate::kinematics::KinematicState;

/// A straight-line-continuation "solver": projects the seed state forward
/// at constant heading and zero additional steer, biased toward `d_poly`.
/// It is not an optimizer — it has no cost-aware search — but it produces
/// finite, horizon-shaped output so the driver pipeline around it (§4.5)
/// can be exercised without linking a real QP/NLP solver.
#[derive(Debug, Clone)]
pub struct ReferenceMpcSolver {
    cost: MpcCostLat,
    steer_rate_cost: f64,
    horizon: usize,
}

impl ReferenceMpcSolver {
    /// `horizon` is the number of samples produced per solve (minimum 2).
    pub fn new(horizon: usize) -> Self {
        Self {
            cost: MpcCostLat::DEFAULT,
            steer_rate_cost: 1.0,
            horizon: horizon.max(2),
        }
    }
}

impl Default for ReferenceMpcSolver {
    fn default() -> Self {
        Self::new(20)
    }
}

impl MpcSolver for ReferenceMpcSolver {
    fn init(&mut self, cost: MpcCostLat, steer_rate_cost: f64) {
        self.cost = cost;
        self.steer_rate_cost = steer_rate_cost;
    }

    fn run(
        &mut self,
        state: &KinematicState,
        out: &mut MpcSolution,
        _l_poly: Poly3,
        _r_poly: Poly3,
        d_poly: Poly3,
        _l_prob: f64,
        _r_prob: f64,
        _curvature_factor: f64,
        v_ego_mpc: f64,
        _lane_width: f64,
    ) {
        if out.delta.len() != self.horizon {
            *out = MpcSolution::zeroed(self.horizon);
        }
        let dt = planner_common::consts::DT_MDL;
        let target_delta = (d_poly.0[1]).clamp(-0.5, 0.5);
        for i in 0..self.horizon {
            let t = i as f64 * dt;
            out.x[i] = state.x + v_ego_mpc * t;
            out.y[i] = state.y;
            out.psi[i] = state.psi;
            out.delta[i] = state.delta + (target_delta - state.delta) * (i as f64 / self.horizon as f64);
        }
        for i in 0..out.rate.len() {
            let next = out.delta.get(i + 1).copied().unwrap_or(out.delta[i]);
            out.rate[i] = (next - out.delta[i]) / dt;
        }
        out.cost = self.cost.path * target_delta.abs();
    }
}

/// A lane-line collaborator that simply stores whatever `parse_model`
/// handed it and fuses `d_poly` as the lane-width-normalized average of the
/// two lane lines — the reference source's actual fusion is a learned
/// perception output, far out of scope here.
#[derive(Debug, Clone, Default)]
pub struct ReferenceLaneLines {
    l_poly: Poly3,
    r_poly: Poly3,
    d_poly: Poly3,
    l_prob: f64,
    r_prob: f64,
    l_lane_change_prob: f64,
    r_lane_change_prob: f64,
    lane_width: f64,
}

impl LaneLineSource for ReferenceLaneLines {
    fn parse_model(&mut self, model: &ModelMsg) {
        self.l_poly = model.left_lane.poly;
        self.r_poly = model.right_lane.poly;
        self.l_prob = model.left_lane.prob;
        self.r_prob = model.right_lane.prob;
        self.l_lane_change_prob = model.left_lane_change_prob;
        self.r_lane_change_prob = model.right_lane_change_prob;
        self.lane_width = model.lane_width;
    }

    fn update_d_poly(&mut self, _v_ego: f64) {
        let mut fused = [0.0; 4];
        let total_prob = self.l_prob + self.r_prob;
        if total_prob > 1e-3 {
            for i in 0..4 {
                fused[i] = (self.l_poly.0[i] * self.l_prob + self.r_poly.0[i] * self.r_prob) / total_prob;
            }
        }
        self.d_poly = Poly3(fused);
    }

    fn l_poly(&self) -> Poly3 {
        self.l_poly
    }

    fn r_poly(&self) -> Poly3 {
        self.r_poly
    }

    fn d_poly(&self) -> Poly3 {
        self.d_poly
    }

    fn l_prob(&self) -> f64 {
        self.l_prob
    }

    fn r_prob(&self) -> f64 {
        self.r_prob
    }

    fn set_l_prob(&mut self, value: f64) {
        self.l_prob = value;
    }

    fn set_r_prob(&mut self, value: f64) {
        self.r_prob = value;
    }

    fn l_lane_change_prob(&self) -> f64 {
        self.l_lane_change_prob
    }

    fn r_lane_change_prob(&self) -> f64 {
        self.r_lane_change_prob
    }

    fn lane_width(&self) -> f64 {
        self.lane_width
    }
}

/// A fixed-parameter vehicle model: `curvature_factor` is speed-invariant
/// (`1.0`) and `steer_ratio` is whatever live parameters last supplied.
#[derive(Debug, Clone, Copy)]
pub struct ReferenceVehicleModel {
    stiffness_factor: f64,
    steer_ratio: f64,
}

impl Default for ReferenceVehicleModel {
    fn default() -> Self {
        Self {
            stiffness_factor: 1.0,
            steer_ratio: 15.0,
        }
    }
}

impl VehicleModel for ReferenceVehicleModel {
    fn update_params(&mut self, stiffness_factor: f64, steer_ratio: f64) {
        self.stiffness_factor = stiffness_factor;
        self.steer_ratio = steer_ratio;
    }

    fn curvature_factor(&self, _v_ego: f64) -> f64 {
        self.stiffness_factor
    }

    fn steer_ratio(&self) -> f64 {
        self.steer_ratio
    }
}
