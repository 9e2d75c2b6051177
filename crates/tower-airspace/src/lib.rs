//! Airspace geometry for TOWER.
//!
//! Pure math with no world access: angle and toroidal distance helpers,
//! runway-local projection, and the runway / approach corridor / airport
//! zone containment tests built on it.

pub use tower_core as core;

pub mod geometry;
pub mod runway;

// Re-export key types for convenience.
pub use geometry::{
    angle_difference, distance, heading_to, move_position, normalize_angle, to_runway_local,
    wrap_position, wrapped_delta, wrapped_distance, wrapped_heading_to, wrapped_runway_local,
    RunwayLocal,
};
pub use runway::{is_in_approach_zone, is_on_runway, is_over_airport, Airport};
