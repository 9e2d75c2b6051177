//! Traffic spawning system: keeps the active aircraft count inside the
//! configured band.

use hecs::World;
use rand_chacha::ChaCha8Rng;
use tracing::{info, warn};

use tower_core::events::SimEvent;

use crate::aircraft::active_count;
use crate::world_setup::{spawn_aircraft, SpawnContext, SpawnPlan};

/// Interval timer for scheduled spawns.
#[derive(Debug, Clone, Default)]
pub struct SpawnSchedule {
    /// Seconds since the last spawn.
    pub since_last_secs: f64,
}

impl SpawnSchedule {
    pub fn reset(&mut self) {
        self.since_last_secs = 0.0;
    }
}

/// Spawn at most one aircraft: immediately when below `min_active`, or
/// once the interval has elapsed while below `max_active`. An overdue spawn
/// waits for a free slot rather than being dropped.
pub fn run(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    ctx: &SpawnContext<'_>,
    schedule: &mut SpawnSchedule,
    next_id: &mut u32,
    dt: f64,
    events: &mut Vec<SimEvent>,
) -> Option<SpawnPlan> {
    schedule.since_last_secs += dt;

    let active = active_count(world);
    let traffic = ctx.traffic;
    let starved = active < traffic.min_active;
    let due =
        schedule.since_last_secs >= traffic.spawn_interval_secs && active < traffic.max_active;
    if !starved && !due {
        return None;
    }

    let plan = spawn_aircraft(world, rng, ctx, next_id);
    schedule.reset();
    record_spawn(&plan, events);
    Some(plan)
}

/// Log a spawn and queue its event.
pub fn record_spawn(plan: &SpawnPlan, events: &mut Vec<SimEvent>) {
    let a = &plan.aircraft;
    if plan.clear {
        info!(aircraft = %a.id, callsign = %a.callsign, edge = ?plan.edge, "aircraft spawned");
    } else {
        warn!(
            aircraft = %a.id,
            callsign = %a.callsign,
            edge = ?plan.edge,
            "spawn constraints exhausted, using best placement"
        );
    }
    events.push(SimEvent::Spawned {
        aircraft_id: a.id,
        callsign: a.callsign.clone(),
        position: a.position,
        edge: plan.edge,
        clear: plan.clear,
    });
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;

    use tower_airspace::Airport;
    use tower_core::config::TrafficConfig;
    use tower_core::types::CanvasSize;

    use super::*;

    #[test]
    fn test_spawns_when_starved_then_on_interval() {
        let canvas = CanvasSize::default();
        let airport = Airport::for_canvas(canvas);
        let traffic = TrafficConfig {
            min_active: 1,
            max_active: 2,
            spawn_interval_secs: 1.0,
            ..TrafficConfig::default()
        };
        let ctx = SpawnContext {
            canvas,
            airport: &airport,
            traffic: &traffic,
        };
        let mut world = World::new();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut schedule = SpawnSchedule::default();
        let mut next_id = 0;
        let mut events = Vec::new();

        let mut step = |world: &mut World, dt: f64| {
            run(world, &mut rng, &ctx, &mut schedule, &mut next_id, dt, &mut events).is_some()
        };

        // Empty world: immediate spawn.
        assert!(step(&mut world, 0.1));
        // At min, interval not yet elapsed.
        assert!(!step(&mut world, 0.5));
        // Interval elapsed.
        assert!(step(&mut world, 0.6));
        // At max: overdue but no slot.
        assert!(!step(&mut world, 5.0));

        assert_eq!(next_id, 2);
        assert_eq!(active_count(&world), 2);
        assert_eq!(events.len(), 2);
    }
}
