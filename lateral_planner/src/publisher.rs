//! Publisher (§4.7).
//!
//! Assembles the per-tick `PathPlan` (and, when requested, `LiveMpc`) from
//! the planner's internal state. Pure assembly — no side effects, no
//! access to the message bus itself (the bus adapter is an out-of-scope
//! external collaborator, §1).

use planner_common::messages::{LiveMpc, PathPlan, Poly3, UpstreamLiveness};
use planner_common::state::{Desire, LaneChangeDirection, LaneChangeState};

use crate::collab::MpcSolution;

/// Everything the publisher needs to assemble one tick's `PathPlan`.
#[derive(Debug, Clone, Copy)]
pub struct PathPlanFields {
    /// Estimated lane width [m].
    pub lane_width: f64,
    /// Fused driving-policy polynomial.
    pub d_poly: Poly3,
    /// Left lane-line polynomial.
    pub l_poly: Poly3,
    /// Left lane-line probability (post attenuation).
    pub l_prob: f64,
    /// Right lane-line polynomial.
    pub r_poly: Poly3,
    /// Right lane-line probability (post attenuation).
    pub r_prob: f64,
    /// Desired steering-wheel angle [deg], post authority limiter.
    pub angle_steers: f64,
    /// Desired steering rate [deg/s].
    pub rate_steers: f64,
    /// Steering angle offset passed through from `liveParameters` [deg].
    pub angle_offset: f64,
    /// Whether the MPC solution is currently trustworthy.
    pub mpc_solution_valid: bool,
    /// Whether `liveParameters` was valid this tick.
    pub params_valid: bool,
    /// Declarative lane-change intent.
    pub desire: Desire,
    /// Lane-change state machine state.
    pub lane_change_state: LaneChangeState,
    /// Lane-change state machine direction.
    pub lane_change_direction: LaneChangeDirection,
    /// Upstream service liveness this tick.
    pub liveness: UpstreamLiveness,
}

/// Assemble the `pathPlan` message for this tick (§4.7).
pub fn build_path_plan(fields: PathPlanFields) -> PathPlan {
    PathPlan {
        lane_width: fields.lane_width,
        d_poly: fields.d_poly,
        l_poly: fields.l_poly,
        l_prob: fields.l_prob,
        r_poly: fields.r_poly,
        r_prob: fields.r_prob,
        angle_steers: fields.angle_steers,
        rate_steers: fields.rate_steers,
        angle_offset: fields.angle_offset,
        mpc_solution_valid: fields.mpc_solution_valid,
        params_valid: fields.params_valid,
        desire: fields.desire,
        lane_change_state: fields.lane_change_state,
        lane_change_direction: fields.lane_change_direction,
        valid: fields.liveness.all_alive_and_valid(),
    }
}

/// Assemble the optional `liveMpc` debug message from a raw solver solution.
pub fn build_live_mpc(solution: &MpcSolution) -> LiveMpc {
    LiveMpc {
        x: solution.x.clone(),
        y: solution.y.clone(),
        psi: solution.psi.clone(),
        delta: solution.delta.clone(),
        cost: solution.cost,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_requires_all_upstream_alive() {
        let fields = PathPlanFields {
            lane_width: 3.7,
            d_poly: Poly3::ZERO,
            l_poly: Poly3::ZERO,
            l_prob: 1.0,
            r_poly: Poly3::ZERO,
            r_prob: 1.0,
            angle_steers: 0.0,
            rate_steers: 0.0,
            angle_offset: 0.0,
            mpc_solution_valid: true,
            params_valid: true,
            desire: Desire::None,
            lane_change_state: LaneChangeState::Off,
            lane_change_direction: LaneChangeDirection::None,
            liveness: UpstreamLiveness {
                car_state: true,
                controls_state: true,
                live_parameters: true,
                model: false,
            },
        };
        let plan = build_path_plan(fields);
        assert!(!plan.valid);
    }

    #[test]
    fn live_mpc_mirrors_solution() {
        let solution = MpcSolution::zeroed(4);
        let live = build_live_mpc(&solution);
        assert_eq!(live.delta.len(), 4);
        assert_eq!(live.cost, 0.0);
    }
}
