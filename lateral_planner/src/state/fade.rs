//! Lane-line-probability fader (§4.3 "Lane-line-probability fader").
//!
//! During `Starting` the lane lines' influence on the fused path is faded
//! out at a speed-dependent rate; during `Finishing` it fades back in over
//! a fixed one second. The speed conversion feeding the rate table is
//! [`crate::speed::v_kph`], shared with the steering-authority limiter's
//! low-speed regime — see the open question in `SPEC_FULL.md` §9.

use planner_common::consts::DT_MDL;

use crate::interp::interp;
use crate::speed::v_kph;

/// Speed breakpoints for the fade-out rate table [km/h].
const FADE_SPEED_KPH: [f64; 4] = [40.0, 60.0, 70.0, 80.0];

/// Fade-out rate at each breakpoint [1/s].
const FADE_RATE: [f64; 4] = [0.5, 1.0, 1.5, 2.0];

/// Speed-dependent fade-out rate for the current ego speed [1/s].
#[inline]
pub fn fade_rate(v_ego: f64) -> f64 {
    interp(v_kph(v_ego), &FADE_SPEED_KPH, &FADE_RATE)
}

/// One `Starting`-state fade-out step: `max(0, ll_prob - rate * DT_MDL)`.
#[inline]
pub fn decay(ll_prob: f64, v_ego: f64) -> f64 {
    (ll_prob - fade_rate(v_ego) * DT_MDL).max(0.0)
}

/// One `Finishing`-state fade-in step: `min(1, ll_prob + DT_MDL)`.
#[inline]
pub fn fade_in(ll_prob: f64) -> f64 {
    (ll_prob + DT_MDL).min(1.0)
}
