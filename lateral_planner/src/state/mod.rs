//! Lane-change state machine module (§4.3).

pub mod fade;
pub mod fsm;

pub use fsm::{FsmInputs, FsmOutputs, LaneChangeFsm};
