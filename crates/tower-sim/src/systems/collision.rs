//! Pairwise collision detection.
//!
//! Every unordered pair of aircraft that were active when the scan began is
//! tested once. A pair closer than the collision threshold crashes both and
//! counts as one collision, even if either aircraft already crashed against
//! a different partner this tick.

use hecs::{Entity, World};
use tracing::warn;

use tower_airspace::geometry::wrapped_distance;
use tower_core::components::{FlightIdentity, Kinematics};
use tower_core::enums::FlightStatus;
use tower_core::events::SimEvent;
use tower_core::types::{AircraftId, CanvasSize, Position};

use crate::aircraft::freeze;

/// True when two positions are closer than `threshold` on the torus.
/// Symmetric in its two position arguments.
pub fn in_collision(a: &Position, b: &Position, threshold: f64, canvas: CanvasSize) -> bool {
    wrapped_distance(a, b, canvas) < threshold
}

/// Crash colliding pairs. Returns the number of collisions found.
pub fn run(
    world: &mut World,
    canvas: CanvasSize,
    threshold: f64,
    events: &mut Vec<SimEvent>,
) -> u32 {
    let mut active: Vec<(Entity, AircraftId, Position)> = world
        .query::<(&FlightIdentity, &Position, &FlightStatus)>()
        .iter()
        .filter(|(_, (_, _, status))| status.is_active())
        .map(|(entity, (identity, pos, _))| (entity, identity.id, *pos))
        .collect();
    active.sort_by_key(|(_, id, _)| *id);

    let mut crashed: Vec<Entity> = Vec::new();
    let mut count = 0;
    for (i, (entity_a, id_a, pos_a)) in active.iter().enumerate() {
        for (entity_b, id_b, pos_b) in &active[i + 1..] {
            if !in_collision(pos_a, pos_b, threshold, canvas) {
                continue;
            }
            warn!(a = %id_a, b = %id_b, x = pos_a.x, y = pos_a.y, "mid-air collision");
            events.push(SimEvent::Collision {
                a: *id_a,
                b: *id_b,
                position: *pos_a,
            });
            crashed.push(*entity_a);
            crashed.push(*entity_b);
            count += 1;
        }
    }

    for entity in crashed {
        if let Ok((status, kin)) = world.query_one_mut::<(&mut FlightStatus, &mut Kinematics)>(entity)
        {
            freeze(status, kin, FlightStatus::Crashed);
        }
    }
    count
}

#[cfg(test)]
mod tests {
    use tower_core::types::Color;

    use super::*;

    fn spawn(world: &mut World, id: u32, x: f64, y: f64) -> Entity {
        world.spawn((
            FlightIdentity {
                id: AircraftId(id),
                callsign: format!("AFR{id:03}"),
                color: Color::default(),
            },
            Position::new(x, y),
            Kinematics {
                heading: 0.0,
                speed: 0.4,
            },
            FlightStatus::Flying,
        ))
    }

    #[test]
    fn test_symmetric() {
        let canvas = CanvasSize::new(1200.0, 800.0);
        let a = Position::new(5.0, 400.0);
        let b = Position::new(1190.0, 410.0);
        assert!(in_collision(&a, &b, 30.0, canvas));
        assert_eq!(
            in_collision(&a, &b, 30.0, canvas),
            in_collision(&b, &a, 30.0, canvas)
        );
    }

    #[test]
    fn test_three_way_counts_each_pair() {
        let mut world = World::new();
        spawn(&mut world, 0, 100.0, 100.0);
        spawn(&mut world, 1, 110.0, 100.0);
        spawn(&mut world, 2, 120.0, 100.0);
        spawn(&mut world, 3, 500.0, 500.0);

        let mut events = Vec::new();
        let n = run(&mut world, CanvasSize::new(1200.0, 800.0), 30.0, &mut events);
        assert_eq!(n, 3);
        assert_eq!(events.len(), 3);

        let crashed = world
            .query::<&FlightStatus>()
            .iter()
            .filter(|(_, s)| **s == FlightStatus::Crashed)
            .count();
        assert_eq!(crashed, 3);
    }

    #[test]
    fn test_terminal_aircraft_ignored() {
        let mut world = World::new();
        spawn(&mut world, 0, 100.0, 100.0);
        let wreck = spawn(&mut world, 1, 110.0, 100.0);
        *world.get::<&mut FlightStatus>(wreck).unwrap() = FlightStatus::Crashed;

        let mut events = Vec::new();
        assert_eq!(run(&mut world, CanvasSize::new(1200.0, 800.0), 30.0, &mut events), 0);
    }
}
