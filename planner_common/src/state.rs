//! Lane-change state machine enums (§3, §4.3).
//!
//! All enums use `#[repr(u8)]` for a compact, stable wire representation on
//! the published `PathPlan` message, mirroring the reference control unit's
//! treatment of its own `MachineState`/`SafetyState` enums.

use serde::{Deserialize, Serialize};
use static_assertions::const_assert_eq;

/// Lane-change state machine state (§4.3).
///
/// Only one `LaneChangeState` is active at any time. `Off` is the initial
/// and the global-override target state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum LaneChangeState {
    /// No lane change in progress.
    Off = 0,
    /// Blinker on, waiting for torque/auto-delay/blindspot clearance.
    PreLaneChange = 1,
    /// Lane lines fading out, driving-policy path takes over.
    Starting = 2,
    /// Lane lines fading back in.
    Finishing = 3,
    /// Lane change complete, holding desire until blinker cancelled.
    Done = 4,
}

impl LaneChangeState {
    /// Convert from raw `u8`. Returns `None` for invalid values.
    #[inline]
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Off),
            1 => Some(Self::PreLaneChange),
            2 => Some(Self::Starting),
            3 => Some(Self::Finishing),
            4 => Some(Self::Done),
            _ => None,
        }
    }

    /// True for `Off` and `PreLaneChange` — the two states in which the
    /// run timer is held at zero (invariant 2, §3).
    #[inline]
    pub const fn is_idle(&self) -> bool {
        matches!(self, Self::Off | Self::PreLaneChange)
    }
}

impl Default for LaneChangeState {
    fn default() -> Self {
        Self::Off
    }
}

/// Latched lane-change direction (§4.3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum LaneChangeDirection {
    /// No direction latched.
    None = 0,
    /// Left lane change.
    Left = 1,
    /// Right lane change.
    Right = 2,
}

impl Default for LaneChangeDirection {
    fn default() -> Self {
        Self::None
    }
}

/// Declarative intent published to downstream consumers (§4.3, §4.7).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Desire {
    /// No active desire.
    None = 0,
    /// Lane change to the left in progress.
    LaneChangeLeft = 1,
    /// Lane change to the right in progress.
    LaneChangeRight = 2,
}

impl Default for Desire {
    fn default() -> Self {
        Self::None
    }
}

// Wire-stable single-byte representation for all three enums published on
// `PathPlan` — checked at compile time rather than assumed.
const_assert_eq!(std::mem::size_of::<LaneChangeState>(), 1);
const_assert_eq!(std::mem::size_of::<LaneChangeDirection>(), 1);
const_assert_eq!(std::mem::size_of::<Desire>(), 1);

/// Look up the desire for a given `(direction, state)` pair (§4.3 desire table).
///
/// Direction `None` always yields `Desire::None`. Otherwise `Off`/`PreLaneChange`
/// yield `Desire::None`; `Starting`/`Finishing`/`Done` yield the directional desire.
#[inline]
pub const fn desire_for(direction: LaneChangeDirection, state: LaneChangeState) -> Desire {
    match direction {
        LaneChangeDirection::None => Desire::None,
        LaneChangeDirection::Left => match state {
            LaneChangeState::Off | LaneChangeState::PreLaneChange => Desire::None,
            LaneChangeState::Starting | LaneChangeState::Finishing | LaneChangeState::Done => {
                Desire::LaneChangeLeft
            }
        },
        LaneChangeDirection::Right => match state {
            LaneChangeState::Off | LaneChangeState::PreLaneChange => Desire::None,
            LaneChangeState::Starting | LaneChangeState::Finishing | LaneChangeState::Done => {
                Desire::LaneChangeRight
            }
        },
    }
}
