//! Diagnostics-only error classification (§7.1).
//!
//! The planner never returns `Err` from its hot-path `update()` — per §7
//! "the planner never throws to callers; it always publishes a tick" — so
//! this enum is not a `Result` payload for the tick loop. It is surfaced
//! alongside the normal `PathPlan` from `update_checked()` (tests and
//! logging callers that want to branch on solver health without
//! re-deriving it from the published message).

use thiserror::Error;

/// A recoverable, tick-scoped condition noticed during an MPC driver run.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum PlannerError {
    /// The solver returned a NaN in its `delta` horizon; the solver has
    /// been reinitialised and the planner fell back to shadowing the
    /// driver's measured angle for this tick.
    #[error("mpc solver returned NaN delta, reinitialised")]
    SolverNan,

    /// The solver converged to a solution whose cost exceeds the
    /// infeasibility threshold.
    #[error("mpc solver cost {cost} exceeds the infeasibility threshold")]
    SolverHighCost {
        /// The offending cost value.
        cost: f64,
    },

    /// `solution_invalid_cnt` has reached the limit; `mpcSolutionValid`
    /// is published as `false` this tick.
    #[error("mpc solution invalid for {consecutive} consecutive ticks")]
    SolutionPersistentlyInvalid {
        /// Consecutive invalid-solution count.
        consecutive: u32,
    },
}
