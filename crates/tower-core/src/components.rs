//! ECS components for hecs entities.
//!
//! Components are plain data structs with no behavior.
//! Game logic lives in systems, not components.

use serde::{Deserialize, Serialize};

use crate::types::{AircraftId, Color, Position};

/// Immutable identity assigned by the factory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightIdentity {
    pub id: AircraftId,
    /// Airline prefix plus three digits, e.g. `DAL417`.
    pub callsign: String,
    pub color: Color,
}

/// Heading and speed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Kinematics {
    /// Degrees in [0, 360). 0 = +x, increasing clockwise on screen.
    pub heading: f64,
    /// Distance per simulation tick at speed multiplier 1.0.
    pub speed: f64,
}

/// History of positions for trail rendering.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PositionHistory {
    /// Recent positions (newest first), up to MAX_HISTORY_DOTS.
    pub positions: Vec<Position>,
}
