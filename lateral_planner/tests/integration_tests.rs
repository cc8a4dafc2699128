//! End-to-end scenarios (§8) driven through the public `LateralPlanner` API.

use lateral_planner::collab::{MpcSolution, MpcSolver};
use lateral_planner::config::PlannerConfig;
use lateral_planner::planner::{LateralPlanner, PlannerInputs};
use lateral_planner::reference::{ReferenceLaneLines, ReferenceMpcSolver, ReferenceVehicleModel};
use planner_common::config::{LogLevel, SharedConfig};
use planner_common::consts::MpcCostLat;
use planner_common::messages::{
    CarState, ControlsState, LanePrediction, LiveParameters, ModelMsg, Poly3, UpstreamLiveness,
};
use planner_common::state::{Desire, LaneChangeState};

fn config_with(auto_delay: f64) -> PlannerConfig {
    PlannerConfig {
        shared: SharedConfig {
            log_level: LogLevel::Info,
            service_name: "lateral_planner".to_string(),
        },
        lane_change_enabled: true,
        lane_change_auto_delay: auto_delay,
        steer_actuator_delay: 0.2,
        steer_rate_cost: 1.0,
    }
}

fn default_model() -> ModelMsg {
    ModelMsg {
        left_lane: LanePrediction {
            poly: Poly3([1.85, 0.0, 0.0, 0.0]),
            prob: 1.0,
        },
        right_lane: LanePrediction {
            poly: Poly3([-1.85, 0.0, 0.0, 0.0]),
            prob: 1.0,
        },
        left_lane_change_prob: 0.0,
        right_lane_change_prob: 0.0,
        lane_width: 3.7,
    }
}

fn base_inputs(v_ego_kph: f64) -> PlannerInputs {
    PlannerInputs {
        car_state: CarState {
            v_ego: v_ego_kph / 3.6,
            steering_angle: 0.0,
            steering_torque: 0,
            steering_pressed: false,
            left_blinker: false,
            right_blinker: false,
            left_blindspot: false,
            right_blindspot: false,
        },
        controls_state: ControlsState { active: true },
        live_parameters: LiveParameters {
            angle_offset: 0.0,
            stiffness_factor: 1.0,
            steer_ratio: 15.0,
            valid: true,
        },
        model: default_model(),
        liveness: UpstreamLiveness {
            car_state: true,
            controls_state: true,
            live_parameters: true,
            model: true,
        },
    }
}

fn new_planner(auto_delay: f64) -> LateralPlanner<ReferenceMpcSolver, ReferenceLaneLines, ReferenceVehicleModel> {
    LateralPlanner::new(
        ReferenceMpcSolver::new(10),
        ReferenceLaneLines::default(),
        ReferenceVehicleModel::default(),
        &config_with(auto_delay),
        10,
    )
}

#[test]
fn scenario_1_below_speed_blinker_stays_off() {
    let mut planner = new_planner(2.0);
    let mut inputs = base_inputs(40.0);
    inputs.car_state.left_blinker = true;

    let plan = planner.update(&inputs);
    assert_eq!(plan.lane_change_state, LaneChangeState::Off);
    assert_eq!(plan.desire, Desire::None);
}

#[test]
fn scenario_2_auto_start_runs_through_full_cycle() {
    let mut planner = new_planner(2.0);
    let mut inputs = base_inputs(80.0);
    inputs.car_state.left_blinker = true;

    let mut plan = planner.update(&inputs);
    assert_eq!(plan.lane_change_state, LaneChangeState::PreLaneChange);

    for _ in 0..60 {
        plan = planner.update(&inputs);
        if plan.lane_change_state != LaneChangeState::PreLaneChange {
            break;
        }
    }
    assert_eq!(plan.lane_change_state, LaneChangeState::Starting);

    for _ in 0..60 {
        plan = planner.update(&inputs);
        if plan.lane_change_state != LaneChangeState::Starting {
            break;
        }
    }
    assert_eq!(plan.lane_change_state, LaneChangeState::Finishing);

    for _ in 0..30 {
        plan = planner.update(&inputs);
        if plan.lane_change_state != LaneChangeState::Finishing {
            break;
        }
    }
    assert_eq!(plan.lane_change_state, LaneChangeState::Done);
    assert_eq!(plan.desire, Desire::LaneChangeLeft);

    inputs.car_state.left_blinker = false;
    let plan = planner.update(&inputs);
    assert_eq!(plan.lane_change_state, LaneChangeState::Off);
}

#[test]
fn scenario_3_blindspot_blocks_start() {
    let mut planner = new_planner(0.0);
    let mut inputs = base_inputs(70.0);
    inputs.car_state.right_blinker = true;
    inputs.car_state.right_blindspot = true;
    inputs.car_state.steering_pressed = true;
    inputs.car_state.steering_torque = -200;

    for _ in 0..30 {
        let plan = planner.update(&inputs);
        assert_eq!(plan.lane_change_state, LaneChangeState::PreLaneChange);
    }
}

#[test]
fn scenario_4_driver_fight_clamps_to_five_degrees() {
    struct LeftDesireSolver;
    impl MpcSolver for LeftDesireSolver {
        fn init(&mut self, _cost: MpcCostLat, _steer_rate_cost: f64) {}
        fn run(
            &mut self,
            state: &lateral_planner::kinematics::KinematicState,
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
            // Desire +10 deg at steer_ratio 15 -> delta = rad(10)/15.
            let target = 10f64.to_radians() / 15.0;
            out.delta[0] = state.delta;
            out.delta[1] = target;
            out.rate[0] = 0.0;
            out.cost = 0.0;
        }
    }

    let mut planner = LateralPlanner::new(
        LeftDesireSolver,
        ReferenceLaneLines::default(),
        ReferenceVehicleModel::default(),
        &config_with(0.0),
        2,
    );
    let mut inputs = base_inputs(40.0);
    inputs.car_state.steering_pressed = true;
    inputs.car_state.steering_torque = -450;
    inputs.car_state.steering_angle = 0.0;

    let plan = planner.update(&inputs);
    assert!((plan.angle_steers - 5.0).abs() < 1e-6);
}

#[test]
fn scenario_5_low_speed_clamps_to_one_degree() {
    struct LeftDesireSolver;
    impl MpcSolver for LeftDesireSolver {
        fn init(&mut self, _cost: MpcCostLat, _steer_rate_cost: f64) {}
        fn run(
            &mut self,
            state: &lateral_planner::kinematics::KinematicState,
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
            let target = 10f64.to_radians() / 15.0;
            out.delta[0] = state.delta;
            out.delta[1] = target;
            out.rate[0] = 0.0;
            out.cost = 0.0;
        }
    }

    let mut planner = LateralPlanner::new(
        LeftDesireSolver,
        ReferenceLaneLines::default(),
        ReferenceVehicleModel::default(),
        &config_with(0.0),
        2,
    );
    let mut inputs = base_inputs(5.0);
    // The authority limiter's low-speed regime converts to km/h with the
    // same 3.61 factor as the lane-line fader, not the usual 3.6 — land
    // exactly on the 5 km/h breakpoint under that conversion.
    inputs.car_state.v_ego = 5.0 / 3.61;
    inputs.car_state.steering_pressed = false;
    inputs.car_state.steering_angle = 0.0;

    let plan = planner.update(&inputs);
    assert!((plan.angle_steers - 1.0).abs() < 1e-6);
}

#[test]
fn scenario_6_solver_nan_recovery() {
    struct NanThenGoodSolver {
        tick: u32,
    }
    impl MpcSolver for NanThenGoodSolver {
        fn init(&mut self, _cost: MpcCostLat, _steer_rate_cost: f64) {}
        fn run(
            &mut self,
            _state: &lateral_planner::kinematics::KinematicState,
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
            if self.tick <= 3 {
                out.delta[1] = f64::NAN;
            } else {
                out.delta[1] = 0.0;
                out.rate[0] = 0.0;
                out.cost = 0.0;
            }
        }
    }

    let mut planner = LateralPlanner::new(
        NanThenGoodSolver { tick: 0 },
        ReferenceLaneLines::default(),
        ReferenceVehicleModel::default(),
        &config_with(0.0),
        2,
    );
    let inputs = base_inputs(40.0);

    let (plan1, err1) = planner.update_checked(&inputs);
    assert!(plan1.mpc_solution_valid);
    assert!(err1.is_some());

    let (plan2, _) = planner.update_checked(&inputs);
    assert!(plan2.mpc_solution_valid);

    let (plan3, _) = planner.update_checked(&inputs);
    assert!(!plan3.mpc_solution_valid);

    let (plan4, err4) = planner.update_checked(&inputs);
    assert!(plan4.mpc_solution_valid);
    assert!(err4.is_none());
}

#[test]
fn scenario_7_live_mpc_published_only_in_debug() {
    let mut quiet_config = config_with(0.0);
    quiet_config.shared.log_level = LogLevel::Info;
    let mut quiet_planner = LateralPlanner::new(
        ReferenceMpcSolver::new(10),
        ReferenceLaneLines::default(),
        ReferenceVehicleModel::default(),
        &quiet_config,
        10,
    );
    let inputs = base_inputs(40.0);
    quiet_planner.update(&inputs);
    assert!(quiet_planner.live_mpc().is_none());

    let mut debug_config = config_with(0.0);
    debug_config.shared.log_level = LogLevel::Debug;
    let mut debug_planner = LateralPlanner::new(
        ReferenceMpcSolver::new(10),
        ReferenceLaneLines::default(),
        ReferenceVehicleModel::default(),
        &debug_config,
        10,
    );
    debug_planner.update(&inputs);
    let live_mpc = debug_planner
        .live_mpc()
        .expect("liveMpc should publish when log_level is Debug");
    assert_eq!(live_mpc.delta.len(), 10);
}
