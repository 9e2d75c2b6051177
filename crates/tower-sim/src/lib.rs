//! Simulation engine for TOWER.
//!
//! Owns the hecs ECS world, spawns traffic, validates and applies
//! directives, steps aircraft every tick, and produces `SessionSnapshot`s
//! for observers. Completely headless.

pub mod aircraft;
pub mod directives;
pub mod engine;
pub mod error;
pub mod forecast;
pub mod navigation;
pub mod systems;
pub mod world_setup;

pub use tower_airspace as airspace;
pub use tower_core as core;

pub use aircraft::Aircraft;
pub use engine::{SessionCounters, SimConfig, SimulationEngine};
pub use error::{Result, SimError};
