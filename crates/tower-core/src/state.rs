//! Session snapshot: the complete read-only state exposed to observers each tick.

use serde::{Deserialize, Serialize};

use crate::enums::{FlightStatus, SessionPhase};
use crate::events::SimEvent;
use crate::types::{AircraftId, CanvasSize, Color, Position, SimTime};

/// Complete session state broadcast after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub time: SimTime,
    pub phase: SessionPhase,
    pub canvas: CanvasSize,
    pub speed_multiplier: f64,
    pub aircraft: Vec<AircraftView>,
    pub airport: AirportView,
    pub counters: CountersView,
    /// Events produced since the previous snapshot.
    pub events: Vec<SimEvent>,
}

/// One aircraft as seen by a renderer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AircraftView {
    pub id: AircraftId,
    pub callsign: String,
    pub color: Color,
    pub position: Position,
    /// Degrees in [0, 360).
    pub heading: f64,
    pub speed: f64,
    pub status: FlightStatus,
    /// Position history for trail dots (newest first).
    pub history: Vec<Position>,
}

/// Airport geometry for display.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AirportView {
    pub position: Position,
    pub runway_start: Position,
    pub runway_end: Position,
    pub runway_width: f64,
    pub runway_length: f64,
    /// The single valid landing heading.
    pub runway_heading: f64,
    /// Far end of the approach corridor.
    pub approach_entry: Position,
    pub approach_width: f64,
}

/// Session counters.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CountersView {
    pub elapsed_secs: f64,
    pub landings: u32,
    pub collisions: u32,
    pub active_aircraft: u32,
}
