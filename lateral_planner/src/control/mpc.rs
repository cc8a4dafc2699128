//! MPC driver (§4.5).
//!
//! Marshals planner state into the [`crate::collab::MpcSolver`] collaborator,
//! detects infeasible solutions (NaN horizons or runaway cost), and recovers
//! by reinitialising the solver and shadowing the driver's measured angle —
//! mirroring the reference control unit's `RecoveryManager::tick()` sequencing
//! for a numerically unhealthy control loop, adapted to a stateless-per-tick
//! recovery rather than a multi-step recovery ladder.

use planner_common::consts::{
    MpcCostLat, DT_MDL, MPC_COST_INVALID_THRESHOLD, MPC_MIN_V_EGO, NAN_WARNING_RATE_LIMIT_S,
    SOLUTION_INVALID_LIMIT,
};
use planner_common::messages::Poly3;

use crate::collab::{MpcSolution, MpcSolver};
use crate::error::PlannerError;
use crate::kinematics::KinematicState;

/// Per-tick inputs to the MPC driver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MpcDriverInput {
    /// Ego speed [m/s], pre-floor.
    pub v_ego: f64,
    /// Measured steering-wheel angle [deg].
    pub angle_steers: f64,
    /// Steering angle offset [deg].
    pub angle_offset: f64,
    /// Effective steer ratio.
    pub steer_ratio: f64,
    /// Kinematic-model curvature factor.
    pub curvature_factor: f64,
    /// Driver-assist engagement flag.
    pub active: bool,
    /// Left lane-line polynomial.
    pub l_poly: Poly3,
    /// Right lane-line polynomial.
    pub r_poly: Poly3,
    /// Fused driving-policy polynomial.
    pub d_poly: Poly3,
    /// Left lane-line probability (post attenuation).
    pub l_prob: f64,
    /// Right lane-line probability (post attenuation).
    pub r_prob: f64,
    /// Estimated lane width [m].
    pub lane_width: f64,
}

/// Result of one MPC driver tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MpcDriverOutput {
    /// Desired steering-wheel angle [deg], pre authority-limiter.
    pub angle_steers_des_mpc_deg: f64,
    /// Desired steering rate [deg/s].
    pub rate_steers_des_deg: f64,
    /// Whether the solution is currently trustworthy (§4.5 step 8).
    pub mpc_solution_valid: bool,
    /// Diagnostics-only classification of anything unusual this tick.
    pub error: Option<PlannerError>,
}

/// The MPC driver (§4.5), generic over the solver collaborator.
#[derive(Debug, Clone)]
pub struct MpcDriver<S: MpcSolver> {
    solver: S,
    cost: MpcCostLat,
    steer_rate_cost: f64,
    cur_state: KinematicState,
    solution: MpcSolution,
    solution_invalid_cnt: u32,
    sim_time: f64,
    last_nan_warning_t: f64,
}

impl<S: MpcSolver> MpcDriver<S> {
    /// Construct a driver and run the solver's initial `init()` (§4.5 "Setup").
    pub fn new(mut solver: S, cost: MpcCostLat, steer_rate_cost: f64, horizon: usize) -> Self {
        solver.init(cost, steer_rate_cost);
        Self {
            solver,
            cost,
            steer_rate_cost,
            cur_state: KinematicState::ZERO,
            solution: MpcSolution::zeroed(horizon),
            solution_invalid_cnt: 0,
            sim_time: 0.0,
            last_nan_warning_t: f64::NEG_INFINITY,
        }
    }

    /// Current commanded actuator state, mutated at the end of each tick.
    pub fn cur_state(&self) -> KinematicState {
        self.cur_state
    }

    /// Seed the kinematic state prior to a solve (§4.2 delay compensation
    /// writes `x`/`psi`; `delta`/`y` carry over from the previous tick).
    pub fn seed_state(&mut self, state: KinematicState) {
        self.cur_state = state;
    }

    /// Consecutive invalid-solution count.
    pub fn solution_invalid_cnt(&self) -> u32 {
        self.solution_invalid_cnt
    }

    /// The solver's last-computed solution, for the debug-only `liveMpc`
    /// publication (§4.7, §6.5).
    pub fn solution(&self) -> &MpcSolution {
        &self.solution
    }

    /// Run one MPC driver tick (§4.5 steps 1-8).
    pub fn run(&mut self, input: &MpcDriverInput) -> MpcDriverOutput {
        self.sim_time += DT_MDL;

        let v_ego_mpc = input.v_ego.max(MPC_MIN_V_EGO);

        self.solver.run(
            &self.cur_state,
            &mut self.solution,
            input.l_poly,
            input.r_poly,
            input.d_poly,
            input.l_prob,
            input.r_prob,
            input.curvature_factor,
            v_ego_mpc,
            input.lane_width,
        );

        let mpc_nans = self.solution.has_nan_delta();
        let driver_shadow_delta =
            (input.angle_steers - input.angle_offset).to_radians() / input.steer_ratio;

        let (delta_desired, rate_steers_des_deg) = if mpc_nans {
            (driver_shadow_delta, 0.0)
        } else if input.active {
            let delta_desired = self.solution.delta[1];
            let rate_desired = (self.solution.rate[0] * input.steer_ratio).to_degrees();
            (delta_desired, rate_desired)
        } else {
            (driver_shadow_delta, 0.0)
        };

        self.cur_state.delta = delta_desired;
        let angle_steers_des_mpc_deg =
            (delta_desired * input.steer_ratio).to_degrees() + input.angle_offset;

        let mut error = None;

        if mpc_nans {
            self.solver.init(self.cost, self.steer_rate_cost);
            self.cur_state = KinematicState::ZERO;
            self.cur_state.delta = driver_shadow_delta;
            if self.sim_time - self.last_nan_warning_t >= NAN_WARNING_RATE_LIMIT_S {
                tracing::warn!(cost = self.solution.cost, "mpc solver returned NaN, reinitialised");
                self.last_nan_warning_t = self.sim_time;
            }
            error = Some(PlannerError::SolverNan);
        }

        if mpc_nans || self.solution.cost > MPC_COST_INVALID_THRESHOLD {
            self.solution_invalid_cnt += 1;
            if !mpc_nans {
                error = Some(PlannerError::SolverHighCost {
                    cost: self.solution.cost,
                });
            }
        } else {
            self.solution_invalid_cnt = 0;
        }

        let mpc_solution_valid = self.solution_invalid_cnt < SOLUTION_INVALID_LIMIT;
        if !mpc_solution_valid && error.is_none() {
            error = Some(PlannerError::SolutionPersistentlyInvalid {
                consecutive: self.solution_invalid_cnt,
            });
        }

        MpcDriverOutput {
            angle_steers_des_mpc_deg,
            rate_steers_des_deg,
            mpc_solution_valid,
            error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::ReferenceMpcSolver;

    fn default_input() -> MpcDriverInput {
        MpcDriverInput {
            v_ego: 20.0,
            angle_steers: 0.0,
            angle_offset: 0.0,
            steer_ratio: 15.0,
            curvature_factor: 1.0,
            active: true,
            l_poly: Poly3::ZERO,
            r_poly: Poly3::ZERO,
            d_poly: Poly3::ZERO,
            l_prob: 1.0,
            r_prob: 1.0,
            lane_width: 3.7,
        }
    }

    #[test]
    fn disengaged_shadows_driver_angle() {
        let mut driver = MpcDriver::new(ReferenceMpcSolver::new(10), MpcCostLat::DEFAULT, 1.0, 10);
        let input = MpcDriverInput {
            active: false,
            angle_steers: 7.5,
            angle_offset: 0.5,
            ..default_input()
        };
        let out = driver.run(&input);
        let expected = 7.5 - 0.5;
        assert!((out.angle_steers_des_mpc_deg - expected).abs() < 1e-6);
        assert_eq!(out.rate_steers_des_deg, 0.0);
    }

    #[test]
    fn persistent_invalid_flips_validity_after_three() {
        struct NanSolver;
        impl MpcSolver for NanSolver {
            fn init(&mut self, _cost: MpcCostLat, _steer_rate_cost: f64) {}
            fn run(
                &mut self,
                _state: &KinematicState,
                out: &mut MpcSolution,
                _l: Poly3,
                _r: Poly3,
                _d: Poly3,
                _lp: f64,
                _rp: f64,
                _cf: f64,
                _v: f64,
                _lw: f64,
            ) {
                out.delta[1] = f64::NAN;
            }
        }

        let mut driver = MpcDriver::new(NanSolver, MpcCostLat::DEFAULT, 1.0, 5);
        let input = default_input();

        let first = driver.run(&input);
        assert!(first.mpc_solution_valid);
        let second = driver.run(&input);
        assert!(second.mpc_solution_valid);
        let third = driver.run(&input);
        assert!(!third.mpc_solution_valid);
        assert_eq!(driver.solution_invalid_cnt(), 3);
    }

    #[test]
    fn good_solution_resets_invalid_count() {
        struct FlakySolver {
            tick: u32,
        }
        impl MpcSolver for FlakySolver {
            fn init(&mut self, _cost: MpcCostLat, _steer_rate_cost: f64) {}
            fn run(
                &mut self,
                _state: &KinematicState,
                out: &mut MpcSolution,
                _l: Poly3,
                _r: Poly3,
                _d: Poly3,
                _lp: f64,
                _rp: f64,
                _cf: f64,
                _v: f64,
                _lw: f64,
            ) {
                self.tick += 1;
                if self.tick <= 2 {
                    out.delta[1] = f64::NAN;
                } else {
                    out.delta[1] = 0.01;
                    out.rate[0] = 0.0;
                }
            }
        }

        let mut driver =
            MpcDriver::new(FlakySolver { tick: 0 }, MpcCostLat::DEFAULT, 1.0, 5);
        let input = default_input();
        driver.run(&input);
        driver.run(&input);
        let third = driver.run(&input);
        assert!(third.mpc_solution_valid);
        assert_eq!(driver.solution_invalid_cnt(), 0);
    }
}
