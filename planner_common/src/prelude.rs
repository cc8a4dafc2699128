//! Prelude module for common re-exports.
//!
//! ```rust
//! use planner_common::prelude::*;
//! ```

// ─── Logging / Configuration ────────────────────────────────────────
pub use crate::config::{ConfigError, ConfigLoader, LogLevel, SharedConfig};

// ─── System Constants ───────────────────────────────────────────────
pub use crate::consts::{
    DT_MDL, LANE_CHANGE_SPEED_MIN, LANE_CHANGE_TIME_MAX, MpcCostLat,
};

// ─── State ───────────────────────────────────────────────────────────
pub use crate::state::{Desire, LaneChangeDirection, LaneChangeState, desire_for};

// ─── Messages ────────────────────────────────────────────────────────
pub use crate::messages::{
    CarState, ControlsState, LanePrediction, LiveMpc, LiveParameters, ModelMsg, PathPlan, Poly3,
    UpstreamLiveness,
};
