//! Events emitted by the simulation for observers (renderers, telemetry).

use serde::{Deserialize, Serialize};

use crate::commands::{CommandOutcome, Directive};
use crate::enums::SpawnEdge;
use crate::types::{AircraftId, Position};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimEvent {
    /// New aircraft entered the canvas. `clear` is false when the factory
    /// exhausted its attempts and used its best unsafe placement.
    Spawned {
        aircraft_id: AircraftId,
        callsign: String,
        position: Position,
        edge: SpawnEdge,
        clear: bool,
    },
    /// Two aircraft came within collision distance. Both crashed.
    Collision {
        a: AircraftId,
        b: AircraftId,
        position: Position,
    },
    /// A flying aircraft entered the airport zone without approach clearance.
    Incursion {
        aircraft_id: AircraftId,
        position: Position,
    },
    Landed {
        aircraft_id: AircraftId,
        callsign: String,
    },
    DirectiveResolved {
        aircraft_id: AircraftId,
        directive: Directive,
        outcome: CommandOutcome,
    },
    /// A queued directive targeted an aircraft that no longer exists.
    UnknownAircraft { aircraft_id: AircraftId },
    Paused,
    Resumed,
    Reset,
    Resized { width: f64, height: f64 },
}
