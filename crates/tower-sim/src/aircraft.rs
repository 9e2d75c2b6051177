//! Aircraft value type and its mapping onto ECS components.
//!
//! Systems work on components directly. Directive validation and
//! forecasting work on `Aircraft` values gathered from the world, so they
//! stay pure functions over plain data.

use hecs::{Entity, World};
use serde::{Deserialize, Serialize};

use tower_core::components::{FlightIdentity, Kinematics, PositionHistory};
use tower_core::enums::FlightStatus;
use tower_core::types::{AircraftId, Color, Position};

/// One aircraft's full state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Aircraft {
    pub id: AircraftId,
    pub callsign: String,
    pub color: Color,
    pub position: Position,
    /// Degrees in [0, 360).
    pub heading: f64,
    pub speed: f64,
    pub status: FlightStatus,
}

impl Aircraft {
    /// Neither landed nor crashed.
    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }

    fn from_components(
        identity: &FlightIdentity,
        position: &Position,
        kinematics: &Kinematics,
        status: &FlightStatus,
    ) -> Self {
        Self {
            id: identity.id,
            callsign: identity.callsign.clone(),
            color: identity.color,
            position: *position,
            heading: kinematics.heading,
            speed: kinematics.speed,
            status: *status,
        }
    }
}

/// Spawn an aircraft entity with its full component bundle.
pub fn spawn(world: &mut World, aircraft: &Aircraft) -> Entity {
    world.spawn((
        FlightIdentity {
            id: aircraft.id,
            callsign: aircraft.callsign.clone(),
            color: aircraft.color,
        },
        aircraft.position,
        Kinematics {
            heading: aircraft.heading,
            speed: aircraft.speed,
        },
        aircraft.status,
        PositionHistory::default(),
    ))
}

/// All aircraft in the world, ordered by id.
pub fn roster(world: &World) -> Vec<Aircraft> {
    let mut all: Vec<Aircraft> = world
        .query::<(&FlightIdentity, &Position, &Kinematics, &FlightStatus)>()
        .iter()
        .map(|(_, (identity, pos, kin, status))| {
            Aircraft::from_components(identity, pos, kin, status)
        })
        .collect();
    all.sort_by_key(|a| a.id);
    all
}

/// Look up an aircraft and its entity by id.
pub fn find(world: &World, id: AircraftId) -> Option<(Entity, Aircraft)> {
    world
        .query::<(&FlightIdentity, &Position, &Kinematics, &FlightStatus)>()
        .iter()
        .find(|(_, (identity, _, _, _))| identity.id == id)
        .map(|(entity, (identity, pos, kin, status))| {
            (entity, Aircraft::from_components(identity, pos, kin, status))
        })
}

/// Write the mutable parts of an aircraft back to its entity.
/// Identity is immutable and left untouched.
pub fn write_back(world: &mut World, entity: Entity, aircraft: &Aircraft) {
    if let Ok((pos, kin, status)) =
        world.query_one_mut::<(&mut Position, &mut Kinematics, &mut FlightStatus)>(entity)
    {
        *pos = aircraft.position;
        kin.heading = aircraft.heading;
        kin.speed = aircraft.speed;
        *status = aircraft.status;
    }
}

/// Number of aircraft that are neither landed nor crashed.
pub fn active_count(world: &World) -> u32 {
    world
        .query::<&FlightStatus>()
        .iter()
        .filter(|(_, status)| status.is_active())
        .count() as u32
}

/// Terminal transition: status set, speed frozen at zero.
pub fn freeze(status: &mut FlightStatus, kinematics: &mut Kinematics, terminal: FlightStatus) {
    *status = terminal;
    kinematics.speed = 0.0;
}
