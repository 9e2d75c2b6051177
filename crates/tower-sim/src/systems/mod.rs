//! ECS systems that operate on the simulation world each tick.
//!
//! Systems are plain functions over `&mut World` (or `&World` when
//! read-only). They own no state; counters and events are passed in.

pub mod cleanup;
pub mod collision;
pub mod incursion;
pub mod landing;
pub mod movement;
pub mod snapshot;
pub mod traffic_spawner;
