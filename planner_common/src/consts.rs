//! System-wide constants for the lateral planner workspace.
//!
//! Single source of truth for timing and cost-weight constants. Imported by
//! both `planner_common` message consumers and the `lateral_planner` core —
//! no duplication permitted.

/// Model-frame tick period [s] (nominal 20 Hz).
pub const DT_MDL: f64 = 0.05;

/// Minimum ego speed to *enter* a lane change [m/s] (60 km/h).
///
/// The source value is `60 * KPH_TO_MS`; kept as a literal so the constant
/// is usable in `const` contexts without a runtime multiply.
pub const LANE_CHANGE_SPEED_MIN: f64 = 60.0 * KPH_TO_MS;

/// Hard cutoff on time spent in a non-idle lane-change state [s].
pub const LANE_CHANGE_TIME_MAX: f64 = 10.0;

/// km/h → m/s conversion factor.
pub const KPH_TO_MS: f64 = 1.0 / 3.6;

/// MPC lateral cost weights handed to the solver at `init`.
///
/// Immutable for the lifetime of a planner instance — re-tuning requires a
/// new construction, matching the reference control unit's treatment of
/// cost parameters as load-once configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MpcCostLat {
    /// Weight on deviation from the fused driving-policy path.
    pub path: f64,
    /// Weight on deviation from the lane lines.
    pub lane: f64,
    /// Weight on heading error.
    pub heading: f64,
}

impl MpcCostLat {
    /// Default cost weights, matching the reference lateral MPC tune.
    pub const DEFAULT: Self = Self {
        path: 1.0,
        lane: 3.0,
        heading: 4.0,
    };
}

impl Default for MpcCostLat {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Solver cost above which a solution is considered infeasible (§4.5/§7).
pub const MPC_COST_INVALID_THRESHOLD: f64 = 20_000.0;

/// Consecutive invalid solutions before `mpcSolutionValid` goes false.
pub const SOLUTION_INVALID_LIMIT: u32 = 3;

/// Minimum rate-limit gap between solver-NaN warnings [s].
pub const NAN_WARNING_RATE_LIMIT_S: f64 = 5.0;

/// Floor applied to `v_ego` before handing it to the MPC solver [m/s].
pub const MPC_MIN_V_EGO: f64 = 5.0;

/// Floor applied to `stiffnessFactor` / `steerRatio` from live parameters.
pub const LIVE_PARAM_FLOOR: f64 = 0.1;
