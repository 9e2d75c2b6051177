//! TOWER headless host.
//!
//! Runs the simulation on a fixed-rate game-loop thread, accepts session
//! commands and directive batches over a channel, and publishes snapshots
//! to observers and shared state.

pub mod control;
pub mod error;
pub mod game_loop;
pub mod observer;
pub mod settings;
pub mod state;

pub use tower_core as core;

pub use error::{AppError, Result};
pub use settings::{LoopSettings, Settings};

#[cfg(test)]
mod tests;
