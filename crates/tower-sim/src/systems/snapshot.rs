//! Snapshot system: queries the ECS world and builds a complete SessionSnapshot.
//!
//! Read-only; it never modifies the world.

use hecs::World;

use tower_core::components::{FlightIdentity, Kinematics, PositionHistory};
use tower_core::enums::{FlightStatus, SessionPhase};
use tower_core::events::SimEvent;
use tower_core::state::{AircraftView, AirportView, CountersView, SessionSnapshot};
use tower_core::types::{CanvasSize, Position, SimTime};

/// Session-level values that live outside the world.
#[derive(Debug, Clone, Copy)]
pub struct SessionInfo {
    pub time: SimTime,
    pub phase: SessionPhase,
    pub canvas: CanvasSize,
    pub speed_multiplier: f64,
    pub landings: u32,
    pub collisions: u32,
}

/// Build a complete SessionSnapshot from the current world state.
pub fn build_snapshot(
    world: &World,
    info: &SessionInfo,
    airport: AirportView,
    events: Vec<SimEvent>,
) -> SessionSnapshot {
    let aircraft = build_aircraft(world);
    let active_aircraft = aircraft.iter().filter(|a| a.status.is_active()).count() as u32;

    SessionSnapshot {
        time: info.time,
        phase: info.phase,
        canvas: info.canvas,
        speed_multiplier: info.speed_multiplier,
        aircraft,
        airport,
        counters: CountersView {
            elapsed_secs: info.time.elapsed_secs,
            landings: info.landings,
            collisions: info.collisions,
            active_aircraft,
        },
        events,
    }
}

/// Build AircraftView list ordered by id.
fn build_aircraft(world: &World) -> Vec<AircraftView> {
    let mut views: Vec<AircraftView> = world
        .query::<(
            &FlightIdentity,
            &Position,
            &Kinematics,
            &FlightStatus,
            &PositionHistory,
        )>()
        .iter()
        .map(|(_, (identity, pos, kin, status, history))| AircraftView {
            id: identity.id,
            callsign: identity.callsign.clone(),
            color: identity.color,
            position: *pos,
            heading: kin.heading,
            speed: kin.speed,
            status: *status,
            history: history.positions.clone(),
        })
        .collect();
    views.sort_by_key(|v| v.id);
    views
}
