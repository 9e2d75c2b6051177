//! Entity factory: places new aircraft on the canvas edges.
//!
//! Placement is best-effort. Each attempt picks an edge and a point along
//! it and checks separation from active traffic and distance from the
//! airport. When every attempt fails the least-bad candidate is used, so
//! a spawn never blocks or fails; the stepper catches any resulting conflict.

use hecs::World;
use rand::seq::SliceRandom;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use tower_airspace::geometry::{heading_to, normalize_angle, wrapped_distance};
use tower_airspace::Airport;
use tower_core::config::TrafficConfig;
use tower_core::constants::{AIRCRAFT_PALETTE, CALLSIGN_PREFIXES};
use tower_core::enums::{FlightStatus, SpawnEdge};
use tower_core::types::{AircraftId, CanvasSize, Color, Position};

use crate::aircraft::{self, Aircraft};

/// Everything the factory reads besides the RNG and existing traffic.
#[derive(Debug, Clone, Copy)]
pub struct SpawnContext<'a> {
    pub canvas: CanvasSize,
    pub airport: &'a Airport,
    pub traffic: &'a TrafficConfig,
}

/// A factory result: the new aircraft plus how it was placed.
#[derive(Debug, Clone)]
pub struct SpawnPlan {
    pub aircraft: Aircraft,
    pub edge: SpawnEdge,
    /// False if every attempt violated a constraint and the best one was used anyway.
    pub clear: bool,
}

/// Build a new aircraft for `id`. Never fails.
pub fn create_aircraft(
    rng: &mut ChaCha8Rng,
    ctx: &SpawnContext,
    existing: &[Aircraft],
    id: AircraftId,
) -> SpawnPlan {
    let traffic = ctx.traffic;
    let attempts = traffic.spawn_max_attempts.max(1);

    // (edge, position, worst constraint margin); margin >= 0 means clear
    let mut best: Option<(SpawnEdge, Position, f64)> = None;
    for _ in 0..attempts {
        let edge = *SpawnEdge::ALL.choose(rng).unwrap_or(&SpawnEdge::Left);
        let position = point_on_edge(rng, edge, ctx.canvas, traffic.spawn_edge_margin);

        let separation = existing
            .iter()
            .filter(|a| a.is_active())
            .map(|a| wrapped_distance(&position, &a.position, ctx.canvas))
            .fold(f64::INFINITY, f64::min);
        let airport_distance = wrapped_distance(&position, &ctx.airport.position, ctx.canvas);
        let margin = (separation - traffic.spawn_min_separation)
            .min(airport_distance - traffic.spawn_min_airport_distance);

        if margin >= 0.0 {
            best = Some((edge, position, margin));
            break;
        }
        if best.map_or(true, |(_, _, m)| margin > m) {
            best = Some((edge, position, margin));
        }
    }

    let (edge, position, margin) =
        best.unwrap_or((SpawnEdge::Left, Position::new(0.0, ctx.canvas.height / 2.0), 0.0));

    // Direct bearing, not wrapped: a new aircraft always heads into the canvas.
    let jitter = traffic.spawn_heading_jitter.abs();
    let heading = normalize_angle(
        heading_to(&position, &ctx.airport.position) + rng.gen_range(-jitter..=jitter),
    );
    let speed_max = traffic.spawn_speed_max.max(traffic.spawn_speed_min);
    let speed = rng.gen_range(traffic.spawn_speed_min..=speed_max);

    SpawnPlan {
        aircraft: Aircraft {
            id,
            callsign: random_callsign(rng),
            color: palette_color(id),
            position,
            heading,
            speed,
            status: FlightStatus::Flying,
        },
        edge,
        clear: margin >= 0.0,
    }
}

/// Create an aircraft against the world's current traffic and spawn it.
/// Consumes one id from `next_id`.
pub fn spawn_aircraft(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    ctx: &SpawnContext,
    next_id: &mut u32,
) -> SpawnPlan {
    let existing = aircraft::roster(world);
    let id = AircraftId(*next_id);
    *next_id += 1;

    let plan = create_aircraft(rng, ctx, &existing, id);
    aircraft::spawn(world, &plan.aircraft);
    plan
}

/// Palette entry for a creation counter value.
pub fn palette_color(id: AircraftId) -> Color {
    AIRCRAFT_PALETTE[id.0 as usize % AIRCRAFT_PALETTE.len()]
}

fn random_callsign(rng: &mut ChaCha8Rng) -> String {
    let prefix = CALLSIGN_PREFIXES.choose(rng).copied().unwrap_or("TWR");
    format!("{}{}", prefix, rng.gen_range(100..=999))
}

/// Random point along an edge, kept `margin` away from the corners.
fn point_on_edge(rng: &mut ChaCha8Rng, edge: SpawnEdge, canvas: CanvasSize, margin: f64) -> Position {
    match edge {
        SpawnEdge::Top => Position::new(span(rng, canvas.width, margin), 0.0),
        SpawnEdge::Bottom => Position::new(span(rng, canvas.width, margin), canvas.height),
        SpawnEdge::Left => Position::new(0.0, span(rng, canvas.height, margin)),
    }
}

fn span(rng: &mut ChaCha8Rng, extent: f64, margin: f64) -> f64 {
    let lo = margin.clamp(0.0, extent / 2.0);
    let hi = extent - lo;
    rng.gen_range(lo..=hi)
}
