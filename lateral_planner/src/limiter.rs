//! Symmetric-window clamp (§4.1).
//!
//! Total order, no side effects. Shared by the steering-authority limiter
//! (§4.6) for both the driver-torque and low-speed regimes.

/// Clamp `value` into `[offset - limit, offset + limit]`.
///
/// `limit` is expected non-negative; a negative `limit` simply swaps the
/// bounds, which `f64::clamp`-style min/max logic below handles without a
/// panic (unlike `f64::clamp`, which requires `min <= max`).
#[inline]
pub fn limit_ctrl(value: f64, limit: f64, offset: f64) -> f64 {
    let upper = offset + limit;
    let lower = offset - limit;
    if value > upper {
        upper
    } else if value < lower {
        lower
    } else {
        value
    }
}
