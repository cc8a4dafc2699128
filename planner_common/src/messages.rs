//! Bus message DTOs consumed and published by the lateral planner (§6).
//!
//! These are plain `serde`-derived structs, not the zero-copy `repr(C)`
//! segment payloads the reference control unit uses for its hard-real-time
//! shared-memory transport — the message bus here is an out-of-scope
//! external collaborator (§1), so the wire representation is left to
//! whatever bus adapter the host process wires up.

use serde::{Deserialize, Serialize};

use crate::state::{Desire, LaneChangeDirection, LaneChangeState};

/// A cubic polynomial `c0 + c1*x + c2*x^2 + c3*x^3` in vehicle-frame
/// coordinates (d-poly / l-poly / r-poly, per the glossary).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Poly3(pub [f64; 4]);

impl Poly3 {
    /// The zero polynomial.
    pub const ZERO: Self = Self([0.0; 4]);
}

impl Default for Poly3 {
    fn default() -> Self {
        Self::ZERO
    }
}

/// `carState` input (§6.1).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CarState {
    /// Ego speed [m/s].
    pub v_ego: f64,
    /// Measured steering-wheel angle [deg].
    pub steering_angle: f64,
    /// Measured driver steering torque, saturated to roughly ±450.
    pub steering_torque: i32,
    /// Whether the driver is pressing on the wheel.
    pub steering_pressed: bool,
    /// Left turn signal active.
    pub left_blinker: bool,
    /// Right turn signal active.
    pub right_blinker: bool,
    /// Left blindspot sensor asserted.
    pub left_blindspot: bool,
    /// Right blindspot sensor asserted.
    pub right_blindspot: bool,
}

/// `controlsState` input (§6.1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlsState {
    /// Driver-assist engagement flag.
    pub active: bool,
}

/// `liveParameters` input (§6.1).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LiveParameters {
    /// Steering angle offset (mechanical zero-point bias) [deg].
    pub angle_offset: f64,
    /// Estimated tire/suspension stiffness factor (floored to 0.1 before use).
    pub stiffness_factor: f64,
    /// Estimated steer ratio (floored to 0.1 before use).
    pub steer_ratio: f64,
    /// Whether the estimate is currently trustworthy.
    pub valid: bool,
}

/// One lane/path prediction out of the perception model (§6.3).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LanePrediction {
    /// Predicted polynomial.
    pub poly: Poly3,
    /// Detection probability in `[0, 1]`.
    pub prob: f64,
}

impl Default for LanePrediction {
    fn default() -> Self {
        Self {
            poly: Poly3::ZERO,
            prob: 0.0,
        }
    }
}

/// `model` input (§6.1) — opaque to the planner core, consumed only by the
/// lane-line collaborator's `parse_model`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelMsg {
    /// Left lane-line prediction.
    pub left_lane: LanePrediction,
    /// Right lane-line prediction.
    pub right_lane: LanePrediction,
    /// Probability the left lane is mid lane-change (perception-estimated).
    pub left_lane_change_prob: f64,
    /// Probability the right lane is mid lane-change (perception-estimated).
    pub right_lane_change_prob: f64,
    /// Estimated lane width [m].
    pub lane_width: f64,
}

impl Default for ModelMsg {
    fn default() -> Self {
        Self {
            left_lane: LanePrediction::default(),
            right_lane: LanePrediction::default(),
            left_lane_change_prob: 0.0,
            right_lane_change_prob: 0.0,
            lane_width: 3.7,
        }
    }
}

/// Per-tick upstream service liveness, used to compute `PathPlan::valid` (§4.7).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UpstreamLiveness {
    /// `carState` alive and within its staleness budget.
    pub car_state: bool,
    /// `controlsState` alive and within its staleness budget.
    pub controls_state: bool,
    /// `liveParameters` alive, within budget, and semantically valid.
    pub live_parameters: bool,
    /// `model` alive and within its staleness budget.
    pub model: bool,
}

impl UpstreamLiveness {
    /// All services alive and valid — all four flags set.
    #[inline]
    pub const fn all_alive_and_valid(&self) -> bool {
        self.car_state && self.controls_state && self.live_parameters && self.model
    }
}

/// `pathPlan` output (§4.7, §6.5) — published every tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PathPlan {
    /// Estimated lane width [m].
    pub lane_width: f64,
    /// Fused driving-policy path polynomial.
    pub d_poly: Poly3,
    /// Left lane-line polynomial.
    pub l_poly: Poly3,
    /// Left lane-line probability (post lane-change attenuation).
    pub l_prob: f64,
    /// Right lane-line polynomial.
    pub r_poly: Poly3,
    /// Right lane-line probability (post lane-change attenuation).
    pub r_prob: f64,
    /// Desired steering-wheel angle [deg].
    pub angle_steers: f64,
    /// Desired steering rate [deg/s].
    pub rate_steers: f64,
    /// Steering angle offset passed through from `liveParameters` [deg].
    pub angle_offset: f64,
    /// Whether the MPC solution is currently trustworthy (§4.5 step 8).
    pub mpc_solution_valid: bool,
    /// Whether `liveParameters` was valid this tick.
    pub params_valid: bool,
    /// Declarative lane-change intent.
    pub desire: Desire,
    /// Lane-change state machine state.
    pub lane_change_state: LaneChangeState,
    /// Lane-change state machine direction.
    pub lane_change_direction: LaneChangeDirection,
    /// All upstream services alive and valid this tick (§4.7).
    pub valid: bool,
}

/// `liveMpc` output (§6.5) — published only when debug logging is enabled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiveMpc {
    /// Solver longitudinal-distance horizon.
    pub x: Vec<f64>,
    /// Solver lateral-offset horizon.
    pub y: Vec<f64>,
    /// Solver heading horizon.
    pub psi: Vec<f64>,
    /// Solver steer-angle horizon.
    pub delta: Vec<f64>,
    /// Solver cost at convergence (or divergence).
    pub cost: f64,
}
