//! Cleanup system: removes landed aircraft.
//!
//! Crashed aircraft stay in the world, frozen, until the session resets.

use hecs::{Entity, World};

use tower_core::enums::FlightStatus;

/// Despawn every `Landed` aircraft. Returns how many were removed.
/// Uses a pre-allocated buffer to avoid per-tick allocation.
pub fn run(world: &mut World, despawn_buffer: &mut Vec<Entity>) -> usize {
    despawn_buffer.clear();

    for (entity, status) in world.query_mut::<&FlightStatus>() {
        if *status == FlightStatus::Landed {
            despawn_buffer.push(entity);
        }
    }

    let removed = despawn_buffer.len();
    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
    removed
}
