//! Per-session configuration.
//!
//! Every field defaults to the matching value in `constants`, and every
//! struct deserializes with missing fields filled from those defaults, so a
//! settings file only needs to name what it overrides.

use serde::{Deserialize, Serialize};

use crate::constants::*;

/// Thresholds and toggles for zone geometry, directive validation,
/// forecasting, and landing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlightRules {
    // --- Zones ---
    pub runway_overshoot_extension: f64,
    pub airport_zone_margin: f64,
    pub approach_zone_length: f64,
    pub approach_width_multiplier: f64,

    // --- Separation and forecasting ---
    pub collision_threshold: f64,
    pub forecast_separation: f64,
    pub forecast_step_secs: f64,
    pub forecast_horizon_secs: f64,
    pub zone_forecast_horizon_secs: f64,
    pub avoidance_offsets: Vec<f64>,
    /// Validate turns against forecast collisions.
    pub avoid_collisions: bool,
    /// Validate turns and holds against forecast airport-zone entry.
    pub avoid_airport_zone: bool,

    // --- Speed ---
    pub min_speed: f64,
    pub max_speed: f64,
    pub approach_speed_ceiling: f64,

    // --- Landing ---
    pub landing_speed_threshold: f64,
    pub landing_heading_tolerance: f64,
    pub approach_max_correction_per_tick: f64,
    pub approach_lookahead: f64,

    // --- Hold ---
    pub hold_turn_step: f64,
    pub hold_speed_factor: f64,
    pub hold_emergency_speed_factor: f64,
}

impl Default for FlightRules {
    fn default() -> Self {
        Self {
            runway_overshoot_extension: RUNWAY_OVERSHOOT_EXTENSION,
            airport_zone_margin: AIRPORT_ZONE_MARGIN,
            approach_zone_length: APPROACH_ZONE_LENGTH,
            approach_width_multiplier: APPROACH_WIDTH_MULTIPLIER,
            collision_threshold: COLLISION_THRESHOLD,
            forecast_separation: FORECAST_SEPARATION,
            forecast_step_secs: FORECAST_STEP_SECS,
            forecast_horizon_secs: FORECAST_HORIZON_SECS,
            zone_forecast_horizon_secs: ZONE_FORECAST_HORIZON_SECS,
            avoidance_offsets: AVOIDANCE_OFFSETS.to_vec(),
            avoid_collisions: true,
            avoid_airport_zone: true,
            min_speed: MIN_SPEED,
            max_speed: MAX_SPEED,
            approach_speed_ceiling: APPROACH_SPEED_CEILING,
            landing_speed_threshold: LANDING_SPEED_THRESHOLD,
            landing_heading_tolerance: LANDING_HEADING_TOLERANCE,
            approach_max_correction_per_tick: APPROACH_MAX_CORRECTION_PER_TICK,
            approach_lookahead: APPROACH_LOOKAHEAD,
            hold_turn_step: HOLD_TURN_STEP,
            hold_speed_factor: HOLD_SPEED_FACTOR,
            hold_emergency_speed_factor: HOLD_EMERGENCY_SPEED_FACTOR,
        }
    }
}

impl FlightRules {
    /// Clamp a requested speed into the valid range. A misconfigured range
    /// (min above max) resolves to `max_speed`.
    pub fn clamp_speed(&self, speed: f64) -> f64 {
        speed.max(self.min_speed).min(self.max_speed)
    }
}

/// Spawn placement and population bounds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrafficConfig {
    /// Aircraft spawned at session start.
    pub initial_aircraft: u32,
    /// Below this, a spawn happens immediately.
    pub min_active: u32,
    /// At or above this, scheduled spawns are skipped.
    pub max_active: u32,
    pub spawn_interval_secs: f64,
    pub spawn_max_attempts: u32,
    pub spawn_min_separation: f64,
    pub spawn_min_airport_distance: f64,
    pub spawn_edge_margin: f64,
    pub spawn_speed_min: f64,
    pub spawn_speed_max: f64,
    pub spawn_heading_jitter: f64,
}

impl Default for TrafficConfig {
    fn default() -> Self {
        Self {
            initial_aircraft: INITIAL_AIRCRAFT,
            min_active: MIN_ACTIVE_AIRCRAFT,
            max_active: MAX_ACTIVE_AIRCRAFT,
            spawn_interval_secs: SPAWN_INTERVAL_SECS,
            spawn_max_attempts: SPAWN_MAX_ATTEMPTS,
            spawn_min_separation: SPAWN_MIN_SEPARATION,
            spawn_min_airport_distance: SPAWN_MIN_AIRPORT_DISTANCE,
            spawn_edge_margin: SPAWN_EDGE_MARGIN,
            spawn_speed_min: SPAWN_SPEED_MIN,
            spawn_speed_max: SPAWN_SPEED_MAX,
            spawn_heading_jitter: SPAWN_HEADING_JITTER,
        }
    }
}
