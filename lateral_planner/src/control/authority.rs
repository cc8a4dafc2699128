//! Steering-authority limiter (§4.6).
//!
//! Reshapes the MPC's desired angle against two mutually exclusive
//! regimes: the driver actively fighting the wheel, or — absent that — a
//! tightened window at low speed. Both regimes bottom out in
//! [`crate::limiter::limit_ctrl`], mirroring the reference control unit's
//! `compute_control_output` clamp-pipeline (`clamped = filtered.clamp(...)`).
//! The low-speed regime's km/h conversion is [`crate::speed::v_kph`], the
//! same one the lane-line fader uses — the reference source computes
//! `v_ego_kph` once per tick and reuses it for both (§9 open question).

use crate::interp::interp;
use crate::limiter::limit_ctrl;
use crate::speed::v_kph;

/// Driver-torque fight-back window breakpoints [Nm] -> [deg].
const TORQUE_XP: [f64; 3] = [-450.0, 0.0, 450.0];
const TORQUE_FP: [f64; 3] = [5.0, 0.0, 5.0];

/// Low-speed authority window breakpoints [km/h] -> [deg].
const LOW_SPEED_XP: [f64; 3] = [5.0, 15.0, 30.0];
const LOW_SPEED_FP: [f64; 3] = [1.0, 3.0, 5.0];

/// km/h below which the low-speed authority regime applies.
const LOW_SPEED_CUTOFF_KPH: f64 = 30.0;

/// Per-tick inputs to the authority limiter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AuthorityInput {
    /// Whether the driver is pressing on the wheel.
    pub steering_pressed: bool,
    /// Measured driver steering torque.
    pub steering_torque: i32,
    /// Ego speed [m/s].
    pub v_ego: f64,
    /// Measured steering-wheel angle [deg] — the clamp's offset in both regimes.
    pub angle_steers: f64,
}

/// Apply the authority limiter to the MPC's pre-limit desired angle `org` [deg].
pub fn apply_authority_limit(org: f64, input: &AuthorityInput) -> f64 {
    if input.steering_pressed {
        let limit = interp(input.steering_torque as f64, &TORQUE_XP, &TORQUE_FP);
        let delta_steer = org - input.angle_steers;
        let driver_pulling_right = input.steering_torque < 0;
        let driver_pulling_left = input.steering_torque > 0;
        if (driver_pulling_right && delta_steer > 0.0) || (driver_pulling_left && delta_steer < 0.0)
        {
            limit_ctrl(org, limit, input.angle_steers)
        } else {
            org
        }
    } else {
        let v_kph = v_kph(input.v_ego);
        if v_kph < LOW_SPEED_CUTOFF_KPH {
            let limit = interp(v_kph, &LOW_SPEED_XP, &LOW_SPEED_FP);
            limit_ctrl(org, limit, input.angle_steers)
        } else {
            org
        }
    }
}
