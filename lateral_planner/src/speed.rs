//! Shared ego-speed-to-km/h conversion (§9 open question).
//!
//! The reference source computes a single `v_ego_kph` per tick using a
//! `3.61` factor (not `3.6`) and reuses that same value both for the
//! lane-line fade-rate table and the low-speed steering-authority window.
//! Both callers share this conversion rather than each rolling their own,
//! so the two stay bit-for-bit identical the way the source has them.

/// The reference source's km/h conversion factor. Not `planner_common`'s
/// `KPH_TO_MS` reciprocal (`3.6`) — preserved bit-for-bit.
pub(crate) const KPH_FADE_FACTOR: f64 = 3.61;

/// Ego speed in km/h, reference-source convention.
#[inline]
pub(crate) fn v_kph(v_ego: f64) -> f64 {
    v_ego * KPH_FADE_FACTOR
}
