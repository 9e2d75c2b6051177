//! Kinematic integration system.
//!
//! Approaching aircraft steer toward the runway centerline first, then
//! every active aircraft advances along its heading and wraps at the
//! canvas edges. Also records position history for trail rendering.

use hecs::World;

use tower_airspace::geometry::{
    angle_difference, move_position, normalize_angle, wrap_position, wrapped_heading_to,
};
use tower_airspace::Airport;
use tower_core::components::{Kinematics, PositionHistory};
use tower_core::config::FlightRules;
use tower_core::constants::{HISTORY_DOT_INTERVAL, MAX_HISTORY_DOTS, TICK_RATE};
use tower_core::enums::FlightStatus;
use tower_core::types::{CanvasSize, Position};

/// Per-step movement inputs.
#[derive(Debug, Clone, Copy)]
pub struct MovementParams<'a> {
    pub airport: &'a Airport,
    pub rules: &'a FlightRules,
    pub canvas: CanvasSize,
    pub speed_multiplier: f64,
    pub dt: f64,
}

/// Run heading correction and integration for all non-terminal aircraft.
pub fn run(world: &mut World, params: &MovementParams<'_>) {
    let scale = params.speed_multiplier * params.dt * TICK_RATE as f64;

    for (_entity, (pos, kin, status)) in
        world.query_mut::<(&mut Position, &mut Kinematics, &FlightStatus)>()
    {
        if status.is_terminal() {
            continue;
        }
        if *status == FlightStatus::Approaching {
            kin.heading = centerline_correction(
                pos,
                kin.heading,
                params.airport,
                params.rules,
                params.canvas,
            );
        }
        *pos = wrap_position(
            &move_position(pos, kin.heading, kin.speed * scale),
            params.canvas,
        );
    }
}

/// Heading after one tick of steering toward a point on the extended
/// centerline `approach_lookahead` ahead. The change never exceeds
/// `approach_max_correction_per_tick`.
pub fn centerline_correction(
    pos: &Position,
    heading: f64,
    airport: &Airport,
    rules: &FlightRules,
    canvas: CanvasSize,
) -> f64 {
    let local = airport.to_local(pos, canvas);
    let target = move_position(
        &airport.runway_start,
        airport.runway_heading(),
        local.along + rules.approach_lookahead,
    );
    let desired = wrapped_heading_to(pos, &target, canvas);
    let limit = rules.approach_max_correction_per_tick;
    let step = angle_difference(heading, desired).clamp(-limit, limit);
    normalize_angle(heading + step)
}

/// Record a trail dot every HISTORY_DOT_INTERVAL ticks for active aircraft.
pub fn update_history(world: &mut World, current_tick: u64) {
    if current_tick == 0 || current_tick % HISTORY_DOT_INTERVAL != 0 {
        return;
    }

    for (_entity, (pos, status, history)) in
        world.query_mut::<(&Position, &FlightStatus, &mut PositionHistory)>()
    {
        if status.is_terminal() {
            continue;
        }
        history.positions.insert(0, *pos);
        history.positions.truncate(MAX_HISTORY_DOTS);
    }
}
