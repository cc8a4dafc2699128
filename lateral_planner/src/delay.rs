//! Actuator-delay compensation (§4.2).
//!
//! Advances the kinematic state by the actuator-delay seconds so the
//! solver's initial condition reflects where the vehicle will actually be
//! once a commanded steer angle takes effect, rather than where it is now.

use crate::kinematics::KinematicState;

/// Advance `state` by `delay` seconds of constant-speed, constant-steer
/// motion, per the bicycle-model linearization (§4.2).
///
/// `angle_deg` is the measured steering angle already corrected for the
/// live offset (`steeringAngle - angleOffset`). `state.y` and `state.delta`
/// are left untouched: `delta` seeds the solver's initial actuator
/// position, and `y` is assumed zero in the vehicle frame.
pub fn compensate_for_delay(
    state: &mut KinematicState,
    v_ego: f64,
    angle_deg: f64,
    curvature_factor: f64,
    steer_ratio: f64,
    delay: f64,
) {
    let angle_rad = angle_deg.to_radians();
    state.x = v_ego * delay;
    state.psi = v_ego * curvature_factor * angle_rad / steer_ratio * delay;
}
