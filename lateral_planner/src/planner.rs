//! Top-level per-tick orchestrator (§5, §9.1).
//!
//! `LateralPlanner` ties the lane-change state machine, the lane-line
//! attenuation step, delay compensation, the MPC driver, the authority
//! limiter, and the publisher into the single `update()` call the host
//! loop drives once per `DT_MDL` period. Generic over its three
//! collaborators rather than `dyn Trait` (§9.1): the planner owns exactly
//! one of each for its whole lifetime, so static dispatch is free and the
//! hot tick path stays monomorphized.

use planner_common::config::LogLevel;
use planner_common::consts::LIVE_PARAM_FLOOR;
use planner_common::messages::{
    CarState, ControlsState, LiveMpc, LiveParameters, ModelMsg, PathPlan, UpstreamLiveness,
};
use planner_common::state::{LaneChangeDirection, LaneChangeState};

use crate::collab::{LaneLineSource, MpcSolver, VehicleModel};
use crate::config::PlannerConfig;
use crate::control::{apply_authority_limit, AuthorityInput, MpcDriver, MpcDriverInput};
use crate::delay::compensate_for_delay;
use crate::error::PlannerError;
use crate::publisher::{build_live_mpc, build_path_plan, PathPlanFields};
use crate::state::{FsmInputs, LaneChangeFsm};

/// Everything the planner reads from the message bus on one tick (§6.1).
#[derive(Debug, Clone, Copy)]
pub struct PlannerInputs {
    /// `carState`.
    pub car_state: CarState,
    /// `controlsState`.
    pub controls_state: ControlsState,
    /// `liveParameters`.
    pub live_parameters: LiveParameters,
    /// `model`, opaque to the planner core.
    pub model: ModelMsg,
    /// Upstream service liveness, used only for the published `valid` bit.
    pub liveness: UpstreamLiveness,
}

/// The lateral path planner (§2).
pub struct LateralPlanner<S: MpcSolver, L: LaneLineSource, V: VehicleModel> {
    fsm: LaneChangeFsm,
    lanes: L,
    vehicle: V,
    mpc: MpcDriver<S>,
    steer_actuator_delay: f64,
    angle_steers_des_mpc: f64,
    angle_steers_des_prev: f64,
    debug_mpc: bool,
    live_mpc: Option<LiveMpc>,
}

impl<S: MpcSolver, L: LaneLineSource, V: VehicleModel> LateralPlanner<S, L, V> {
    /// Construct a planner from its collaborators and configuration.
    pub fn new(solver: S, lanes: L, vehicle: V, config: &PlannerConfig, mpc_horizon: usize) -> Self {
        Self {
            fsm: LaneChangeFsm::new(config.lane_change_enabled, config.lane_change_auto_delay),
            lanes,
            vehicle,
            mpc: MpcDriver::new(
                solver,
                planner_common::consts::MpcCostLat::DEFAULT,
                config.steer_rate_cost,
                mpc_horizon,
            ),
            steer_actuator_delay: config.steer_actuator_delay,
            angle_steers_des_mpc: 0.0,
            angle_steers_des_prev: 0.0,
            debug_mpc: config.shared.log_level == LogLevel::Debug,
            live_mpc: None,
        }
    }

    /// Current lane-change state, for diagnostics/logging.
    pub fn lane_change_state(&self) -> LaneChangeState {
        self.fsm.state()
    }

    /// Current lane-change direction, for diagnostics/logging.
    pub fn lane_change_direction(&self) -> LaneChangeDirection {
        self.fsm.direction()
    }

    /// This tick's pre-authority-limiter MPC angle [deg].
    pub fn angle_steers_des_mpc(&self) -> f64 {
        self.angle_steers_des_mpc
    }

    /// Previous tick's pre-authority-limiter MPC angle [deg].
    pub fn angle_steers_des_prev(&self) -> f64 {
        self.angle_steers_des_prev
    }

    /// This tick's `liveMpc` debug message, if `shared.log_level` is
    /// `Debug` (§4.7, §6.5). `None` otherwise — never computed or
    /// published when debug logging isn't enabled.
    pub fn live_mpc(&self) -> Option<&LiveMpc> {
        self.live_mpc.as_ref()
    }

    /// Run one tick, returning the published `PathPlan`. Never fails (§7):
    /// any solver or liveness trouble is folded into the plan's own
    /// `mpcSolutionValid`/`valid` fields rather than surfaced as an error.
    pub fn update(&mut self, inputs: &PlannerInputs) -> PathPlan {
        self.update_checked(inputs).0
    }

    /// Run one tick and also return a diagnostics-only error classification
    /// (§7.1) — used by tests and logging callers that want to branch on
    /// solver health without re-deriving it from the published plan.
    pub fn update_checked(&mut self, inputs: &PlannerInputs) -> (PathPlan, Option<PlannerError>) {
        let v_ego = inputs.car_state.v_ego;

        self.lanes.parse_model(&inputs.model);

        let lane_change_prob = self.lanes.l_lane_change_prob() + self.lanes.r_lane_change_prob();

        let fsm_inputs = FsmInputs {
            v_ego,
            left_blinker: inputs.car_state.left_blinker,
            right_blinker: inputs.car_state.right_blinker,
            left_blindspot: inputs.car_state.left_blindspot,
            right_blindspot: inputs.car_state.right_blindspot,
            steering_torque: inputs.car_state.steering_torque,
            steering_pressed: inputs.car_state.steering_pressed,
            controls_active: inputs.controls_state.active,
            lane_change_prob,
        };
        let prev_lane_change_state = self.fsm.state();
        let fsm_out = self.fsm.update(&fsm_inputs);

        if fsm_out.desire != planner_common::state::Desire::None {
            let attenuated_l = self.lanes.l_prob() * fsm_out.ll_prob;
            let attenuated_r = self.lanes.r_prob() * fsm_out.ll_prob;
            self.lanes.set_l_prob(attenuated_l);
            self.lanes.set_r_prob(attenuated_r);
            tracing::debug!(
                ll_prob = fsm_out.ll_prob,
                state = ?fsm_out.state,
                "attenuating lane-line probability during lane change"
            );
        }
        self.lanes.update_d_poly(v_ego);

        let stiffness_factor = inputs.live_parameters.stiffness_factor.max(LIVE_PARAM_FLOOR);
        let steer_ratio = inputs.live_parameters.steer_ratio.max(LIVE_PARAM_FLOOR);
        self.vehicle.update_params(stiffness_factor, steer_ratio);
        let curvature_factor = self.vehicle.curvature_factor(v_ego);
        let steer_ratio = self.vehicle.steer_ratio();

        let mut state = self.mpc.cur_state();
        let angle_corrected = inputs.car_state.steering_angle - inputs.live_parameters.angle_offset;
        compensate_for_delay(
            &mut state,
            v_ego,
            angle_corrected,
            curvature_factor,
            steer_ratio,
            self.steer_actuator_delay,
        );
        self.mpc.seed_state(state);

        let mpc_input = MpcDriverInput {
            v_ego,
            angle_steers: inputs.car_state.steering_angle,
            angle_offset: inputs.live_parameters.angle_offset,
            steer_ratio,
            curvature_factor,
            active: inputs.controls_state.active,
            l_poly: self.lanes.l_poly(),
            r_poly: self.lanes.r_poly(),
            d_poly: self.lanes.d_poly(),
            l_prob: self.lanes.l_prob(),
            r_prob: self.lanes.r_prob(),
            lane_width: self.lanes.lane_width(),
        };
        let mpc_out = self.mpc.run(&mpc_input);

        self.live_mpc = if self.debug_mpc {
            Some(build_live_mpc(self.mpc.solution()))
        } else {
            None
        };

        self.angle_steers_des_prev = self.angle_steers_des_mpc;
        self.angle_steers_des_mpc = mpc_out.angle_steers_des_mpc_deg;

        let authority_input = AuthorityInput {
            steering_pressed: inputs.car_state.steering_pressed,
            steering_torque: inputs.car_state.steering_torque,
            v_ego,
            angle_steers: inputs.car_state.steering_angle,
        };
        let angle_steers = apply_authority_limit(mpc_out.angle_steers_des_mpc_deg, &authority_input);

        if fsm_out.state != prev_lane_change_state {
            tracing::info!(from = ?prev_lane_change_state, to = ?fsm_out.state, "lane change state transition");
        }

        let plan = build_path_plan(PathPlanFields {
            lane_width: self.lanes.lane_width(),
            d_poly: self.lanes.d_poly(),
            l_poly: self.lanes.l_poly(),
            l_prob: self.lanes.l_prob(),
            r_poly: self.lanes.r_poly(),
            r_prob: self.lanes.r_prob(),
            angle_steers,
            rate_steers: mpc_out.rate_steers_des_deg,
            angle_offset: inputs.live_parameters.angle_offset,
            mpc_solution_valid: mpc_out.mpc_solution_valid,
            params_valid: inputs.live_parameters.valid,
            desire: fsm_out.desire,
            lane_change_state: fsm_out.state,
            lane_change_direction: fsm_out.direction,
            liveness: inputs.liveness,
        });

        (plan, mpc_out.error)
    }
}
