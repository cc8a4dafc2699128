//! Lane-change state machine (§4.3).
//!
//! Mirrors the reference control unit's `MachineStateMachine` pattern — a
//! tagged state, an explicit per-tick input struct, and a single
//! `update()` entry point driving a transition table — rather than
//! scattering `if/else` chains over raw booleans through the planner.

use planner_common::state::{desire_for, Desire, LaneChangeDirection, LaneChangeState};

use super::fade;
use planner_common::consts::{DT_MDL, LANE_CHANGE_SPEED_MIN, LANE_CHANGE_TIME_MAX};

/// Per-tick inputs to the lane-change state machine (§4.3).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FsmInputs {
    /// Ego speed [m/s].
    pub v_ego: f64,
    /// Left turn signal active.
    pub left_blinker: bool,
    /// Right turn signal active.
    pub right_blinker: bool,
    /// Left blindspot sensor asserted.
    pub left_blindspot: bool,
    /// Right blindspot sensor asserted.
    pub right_blindspot: bool,
    /// Measured driver steering torque.
    pub steering_torque: i32,
    /// Whether the driver is pressing on the wheel.
    pub steering_pressed: bool,
    /// Driver-assist engagement flag.
    pub controls_active: bool,
    /// `l_lane_change_prob + r_lane_change_prob` from perception.
    pub lane_change_prob: f64,
}

/// Per-tick outputs of the lane-change state machine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FsmOutputs {
    /// Current state.
    pub state: LaneChangeState,
    /// Latched direction.
    pub direction: LaneChangeDirection,
    /// Current lane-line influence multiplier.
    pub ll_prob: f64,
    /// Declarative intent for this tick.
    pub desire: Desire,
}

/// The lane-change state machine (§3, §4.3).
#[derive(Debug, Clone)]
pub struct LaneChangeFsm {
    state: LaneChangeState,
    direction: LaneChangeDirection,
    run_timer: f64,
    wait_timer: f64,
    ll_prob: f64,
    prev_one_blinker: bool,
    lane_change_enabled: bool,
    lane_change_auto_delay: f64,
}

impl LaneChangeFsm {
    /// Construct a new machine in `Off`, with the given configuration
    /// cached for the lifetime of the planner (§5 "Shared resources").
    pub fn new(lane_change_enabled: bool, lane_change_auto_delay: f64) -> Self {
        Self {
            state: LaneChangeState::Off,
            direction: LaneChangeDirection::None,
            run_timer: 0.0,
            wait_timer: 0.0,
            ll_prob: 1.0,
            prev_one_blinker: false,
            lane_change_enabled,
            lane_change_auto_delay,
        }
    }

    /// Current state.
    pub fn state(&self) -> LaneChangeState {
        self.state
    }

    /// Latched direction.
    pub fn direction(&self) -> LaneChangeDirection {
        self.direction
    }

    /// Current lane-line influence multiplier.
    pub fn ll_prob(&self) -> f64 {
        self.ll_prob
    }

    /// Seconds elapsed in a non-idle lane-change state.
    pub fn run_timer(&self) -> f64 {
        self.run_timer
    }

    fn enter_off(&mut self) {
        self.state = LaneChangeState::Off;
        self.direction = LaneChangeDirection::None;
        self.ll_prob = 1.0;
    }

    /// Advance the machine by one `DT_MDL` tick.
    pub fn update(&mut self, inputs: &FsmInputs) -> FsmOutputs {
        let one_blinker = inputs.left_blinker ^ inputs.right_blinker;
        let below_min_speed = inputs.v_ego < LANE_CHANGE_SPEED_MIN;

        // Direction latch: left-then-right if/elif, preserved literally
        // per the open question in SPEC_FULL.md §9 — whichever blinker is
        // currently on wins; if neither is on, the prior direction holds.
        if inputs.left_blinker {
            self.direction = LaneChangeDirection::Left;
        } else if inputs.right_blinker {
            self.direction = LaneChangeDirection::Right;
        }

        let override_active = !inputs.controls_active
            || self.run_timer > LANE_CHANGE_TIME_MAX
            || !one_blinker
            || !self.lane_change_enabled;

        if override_active {
            self.enter_off();
        } else {
            let torque_applied = inputs.steering_pressed
                && ((self.direction == LaneChangeDirection::Left && inputs.steering_torque > 0)
                    || (self.direction == LaneChangeDirection::Right && inputs.steering_torque < 0));
            let blindspot_detected = (self.direction == LaneChangeDirection::Left
                && inputs.left_blindspot)
                || (self.direction == LaneChangeDirection::Right && inputs.right_blindspot);

            match self.state {
                LaneChangeState::Off => {
                    if one_blinker && !self.prev_one_blinker && !below_min_speed {
                        self.state = LaneChangeState::PreLaneChange;
                        self.ll_prob = 1.0;
                        self.wait_timer = 0.0;
                    }
                }
                LaneChangeState::PreLaneChange => {
                    self.wait_timer += DT_MDL;
                    if !one_blinker || below_min_speed {
                        self.enter_off();
                    } else if !blindspot_detected
                        && (torque_applied
                            || (self.lane_change_auto_delay > 0.0
                                && self.wait_timer > self.lane_change_auto_delay))
                    {
                        self.state = LaneChangeState::Starting;
                    }
                }
                LaneChangeState::Starting => {
                    if inputs.lane_change_prob < 0.02 && self.ll_prob < 0.01 {
                        self.state = LaneChangeState::Finishing;
                    }
                }
                LaneChangeState::Finishing => {
                    if one_blinker && self.ll_prob > 0.99 {
                        self.state = LaneChangeState::Done;
                    }
                }
                LaneChangeState::Done => {
                    if !one_blinker {
                        self.enter_off();
                    }
                }
            }
        }

        match self.state {
            LaneChangeState::Starting => {
                self.ll_prob = fade::decay(self.ll_prob, inputs.v_ego);
            }
            LaneChangeState::Finishing => {
                self.ll_prob = fade::fade_in(self.ll_prob);
            }
            LaneChangeState::Off | LaneChangeState::PreLaneChange | LaneChangeState::Done => {}
        }

        self.run_timer = if self.state.is_idle() {
            0.0
        } else {
            self.run_timer + DT_MDL
        };
        self.prev_one_blinker = one_blinker;

        FsmOutputs {
            state: self.state,
            direction: self.direction,
            ll_prob: self.ll_prob,
            desire: desire_for(self.direction, self.state),
        }
    }
}
