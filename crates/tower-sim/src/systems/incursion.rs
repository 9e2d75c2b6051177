//! Unauthorized airport-zone incursion.

use hecs::World;
use tracing::warn;

use tower_airspace::Airport;
use tower_core::components::{FlightIdentity, Kinematics};
use tower_core::config::FlightRules;
use tower_core::enums::FlightStatus;
use tower_core::events::SimEvent;
use tower_core::types::{CanvasSize, Position};

use crate::aircraft::freeze;

/// Crash every `Flying` aircraft inside the airport zone. Approaching
/// aircraft are cleared and exempt. Returns the number of incursions.
pub fn run(
    world: &mut World,
    airport: &Airport,
    rules: &FlightRules,
    canvas: CanvasSize,
    events: &mut Vec<SimEvent>,
) -> u32 {
    let mut count = 0;
    for (_entity, (identity, pos, kin, status)) in world.query_mut::<(
        &FlightIdentity,
        &Position,
        &mut Kinematics,
        &mut FlightStatus,
    )>() {
        if *status != FlightStatus::Flying || !airport.is_over_airport(pos, rules, canvas) {
            continue;
        }
        warn!(aircraft = %identity.id, callsign = %identity.callsign, "airport zone incursion");
        freeze(status, kin, FlightStatus::Crashed);
        events.push(SimEvent::Incursion {
            aircraft_id: identity.id,
            position: *pos,
        });
        count += 1;
    }
    count
}
