//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Aircraft lifecycle status.
///
/// `Flying -> Approaching -> Landed`, with `Crashed` reachable from either
/// non-terminal state. Nothing leaves `Landed` or `Crashed`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlightStatus {
    #[default]
    Flying,
    Approaching,
    Landed,
    Crashed,
}

impl FlightStatus {
    /// `Landed` or `Crashed`.
    pub fn is_terminal(self) -> bool {
        matches!(self, FlightStatus::Landed | FlightStatus::Crashed)
    }

    pub fn is_active(self) -> bool {
        !self.is_terminal()
    }
}

/// Session phase (top-level state).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    #[default]
    Active,
    Paused,
}

/// Canvas edge an aircraft may enter from. The right edge borders the
/// airport and is never used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpawnEdge {
    Top,
    Bottom,
    Left,
}

impl SpawnEdge {
    pub const ALL: [SpawnEdge; 3] = [SpawnEdge::Top, SpawnEdge::Bottom, SpawnEdge::Left];
}

/// Why a directive did not change the aircraft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    /// Heading is owned by centerline auto-correction once approaching.
    Approaching,
    /// Approach requested outside the approach corridor.
    OutsideApproachCorridor,
    /// Approach requested for an aircraft already approaching.
    AlreadyApproaching,
    /// Aircraft has landed or crashed.
    Terminal,
    /// Every tested heading is forecast to collide.
    NoSafeHeading,
    /// The airport-avoidance divert is itself forecast to collide.
    UnsafeDivert,
    /// Heading or speed value is not a finite number.
    InvalidValue,
}
