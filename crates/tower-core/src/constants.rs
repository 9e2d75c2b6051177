//! Simulation constants and tuning parameters.
//!
//! Distances are canvas units; speeds are canvas units per tick at a
//! speed multiplier of 1.0. Most of these seed the `Default` impls in
//! `config` and can be overridden per session.

use crate::types::Color;

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 60;

/// Seconds per tick.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

// --- Canvas ---

pub const DEFAULT_CANVAS_WIDTH: f64 = 1200.0;
pub const DEFAULT_CANVAS_HEIGHT: f64 = 800.0;

// --- Airport ---

/// Runway center as a fraction of canvas width.
pub const AIRPORT_X_FRACTION: f64 = 0.75;

/// Runway center as a fraction of canvas height.
pub const AIRPORT_Y_FRACTION: f64 = 0.5;

pub const RUNWAY_LENGTH: f64 = 200.0;
pub const RUNWAY_WIDTH: f64 = 40.0;

/// The single valid landing heading (degrees).
pub const RUNWAY_HEADING: f64 = 0.0;

// --- Zones ---

/// Extra runway length past the end that still counts as "on runway",
/// so aircraft rolling slightly past the threshold still land.
pub const RUNWAY_OVERSHOOT_EXTENSION: f64 = 30.0;

/// Padding around the runway rectangle that forms the airport exclusion zone.
pub const AIRPORT_ZONE_MARGIN: f64 = 40.0;

/// Distance behind the runway start where the approach corridor begins.
pub const APPROACH_ZONE_LENGTH: f64 = 300.0;

/// Approach corridor width as a multiple of runway width.
pub const APPROACH_WIDTH_MULTIPLIER: f64 = 2.0;

// --- Separation ---

/// Actual collision distance.
pub const COLLISION_THRESHOLD: f64 = 30.0;

/// Forecast separation minimum, larger than COLLISION_THRESHOLD for reaction margin.
pub const FORECAST_SEPARATION: f64 = 45.0;

/// Forecast sampling interval (seconds).
pub const FORECAST_STEP_SECS: f64 = 1.0 / 12.0;

/// Collision forecast horizon (seconds).
pub const FORECAST_HORIZON_SECS: f64 = 8.0;

/// Airport-zone entry forecast horizon (seconds).
pub const ZONE_FORECAST_HORIZON_SECS: f64 = 4.0;

/// Ordered heading offsets tried when a requested heading is unsafe.
pub const AVOIDANCE_OFFSETS: [f64; 11] = [
    30.0, -30.0, 60.0, -60.0, 90.0, -90.0, 120.0, -120.0, 150.0, -150.0, 180.0,
];

// --- Speed ---

pub const MIN_SPEED: f64 = 0.15;
pub const MAX_SPEED: f64 = 0.8;

/// Speed ceiling applied when cleared for approach.
pub const APPROACH_SPEED_CEILING: f64 = 0.3;

// --- Landing ---

/// Landing requires speed strictly below this.
pub const LANDING_SPEED_THRESHOLD: f64 = 0.35;

/// Landing requires heading within this many degrees of the runway heading.
pub const LANDING_HEADING_TOLERANCE: f64 = 15.0;

// --- Approach auto-correction ---

/// Maximum heading change per tick while approaching (degrees).
pub const APPROACH_MAX_CORRECTION_PER_TICK: f64 = 2.0;

/// Distance ahead along the centerline that the correction steers toward.
pub const APPROACH_LOOKAHEAD: f64 = 80.0;

// --- Hold ---

/// Maximum heading change per hold directive (degrees).
pub const HOLD_TURN_STEP: f64 = 30.0;

pub const HOLD_SPEED_FACTOR: f64 = 0.8;

/// Speed factor when hold is issued on a collision course with the airport.
pub const HOLD_EMERGENCY_SPEED_FACTOR: f64 = 0.5;

// --- Spawning ---

pub const SPAWN_MAX_ATTEMPTS: u32 = 10;

/// Minimum distance from any active aircraft at spawn.
pub const SPAWN_MIN_SEPARATION: f64 = 100.0;

/// Minimum distance from the airport center at spawn.
pub const SPAWN_MIN_AIRPORT_DISTANCE: f64 = 250.0;

/// Margin kept from canvas corners when picking a point along an edge.
pub const SPAWN_EDGE_MARGIN: f64 = 50.0;

pub const SPAWN_SPEED_MIN: f64 = 0.3;
pub const SPAWN_SPEED_MAX: f64 = 0.5;

/// Random spread around the heading toward the airport (degrees, each side).
pub const SPAWN_HEADING_JITTER: f64 = 20.0;

pub const CALLSIGN_PREFIXES: [&str; 8] = ["AAL", "UAL", "DAL", "SWA", "JBU", "BAW", "AFR", "DLH"];

pub const AIRCRAFT_PALETTE: [Color; 8] = [
    Color::rgb(0xe6, 0x19, 0x4b),
    Color::rgb(0x3c, 0xb4, 0x4b),
    Color::rgb(0xff, 0xe1, 0x19),
    Color::rgb(0x43, 0x63, 0xd8),
    Color::rgb(0xf5, 0x82, 0x31),
    Color::rgb(0x91, 0x1e, 0xb4),
    Color::rgb(0x46, 0xf0, 0xf0),
    Color::rgb(0xf0, 0x32, 0xe6),
];

// --- Traffic ---

pub const INITIAL_AIRCRAFT: u32 = 3;
pub const MIN_ACTIVE_AIRCRAFT: u32 = 2;
pub const MAX_ACTIVE_AIRCRAFT: u32 = 6;

/// Seconds between scheduled spawns while below the maximum.
pub const SPAWN_INTERVAL_SECS: f64 = 20.0;

/// Upper bound for the global speed multiplier.
pub const MAX_SPEED_MULTIPLIER: f64 = 4.0;

// --- Display ---

/// Maximum number of position history dots per aircraft.
pub const MAX_HISTORY_DOTS: usize = 12;

/// History dot interval in ticks (one dot every N ticks).
pub const HISTORY_DOT_INTERVAL: u64 = 30;
