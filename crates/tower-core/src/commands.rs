//! Directives issued by a controlling policy and session-level commands.
//!
//! Session commands are queued and processed at the next tick boundary.
//! Directives may also be applied immediately through the engine.

use serde::{Deserialize, Serialize};

use crate::enums::RejectReason;
use crate::types::AircraftId;

/// A single instruction for one aircraft.
///
/// Wire form: `{"action":"turn","value":270}`, `{"action":"hold"}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum Directive {
    /// Turn to an absolute heading (degrees, any real value; normalized on use).
    Turn { value: f64 },
    /// Set speed (clamped into the valid range).
    Speed { value: f64 },
    /// Declare final approach. Only effective inside the approach corridor.
    Approach,
    /// Turn away from the runway and slow down.
    Hold,
}

/// A directive addressed to an aircraft, as submitted in a policy batch.
///
/// Wire form: `{"aircraft_id":3,"action":"speed","value":0.4}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AircraftDirective {
    pub aircraft_id: AircraftId,
    #[serde(flatten)]
    pub directive: Directive,
}

impl AircraftDirective {
    pub fn new(aircraft_id: AircraftId, directive: Directive) -> Self {
        Self {
            aircraft_id,
            directive,
        }
    }
}

/// Result of validating and applying a directive. None of these are errors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CommandOutcome {
    /// Applied as requested.
    Applied,
    /// Requested heading was forecast to collide; a nearby safe heading was used.
    HeadingSubstituted { requested: f64, assigned: f64 },
    /// Heading would have entered the airport zone; turned away instead.
    DivertedFromAirport { requested: f64, assigned: f64 },
    /// Speed was outside the valid range and was clamped.
    SpeedClamped { requested: f64, assigned: f64 },
    /// Hold issued on a course into the airport zone: immediate turn away.
    EmergencyHold { heading: f64, speed: f64 },
    /// Aircraft left unchanged.
    Rejected { reason: RejectReason },
}

impl CommandOutcome {
    pub fn is_rejected(&self) -> bool {
        matches!(self, CommandOutcome::Rejected { .. })
    }
}

/// Session-level commands, processed at the next tick boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SessionCommand {
    /// Freeze the session. Ticks still drain commands but move nothing.
    Pause,
    Resume,
    /// Rebuild the roster and counters from scratch.
    Reset,
    /// Change canvas size and recompute airport geometry.
    Resize { width: f64, height: f64 },
    /// Set the global speed multiplier (clamped to [0, MAX_SPEED_MULTIPLIER]).
    SetSpeedMultiplier { multiplier: f64 },
    /// Spawn one aircraft now, regardless of schedule.
    Spawn,
    /// Apply a directive against the roster at processing time.
    Direct {
        aircraft_id: AircraftId,
        directive: Directive,
    },
}

impl From<AircraftDirective> for SessionCommand {
    fn from(d: AircraftDirective) -> Self {
        SessionCommand::Direct {
            aircraft_id: d.aircraft_id,
            directive: d.directive,
        }
    }
}
