//! TOML settings for the headless host.
//!
//! Every table and field is optional; anything missing falls back to the
//! simulation defaults.
//!
//! ```toml
//! [simulation]
//! seed = 7
//! speed_multiplier = 1.5
//!
//! [simulation.traffic]
//! max_active = 8
//!
//! [game_loop]
//! realtime = false
//! max_ticks = 36000
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use tower_core::constants::TICK_RATE;
use tower_sim::SimConfig;

use crate::error::Result;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub simulation: SimConfig,
    pub game_loop: LoopSettings,
}

/// How the game-loop thread paces and ends a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoopSettings {
    /// Sleep between ticks to hold TICK_RATE. When false, ticks run back to back.
    pub realtime: bool,
    /// Stop after this many ticks. `None` runs until shutdown.
    pub max_ticks: Option<u64>,
    /// Ticks between progress log lines. 0 disables them.
    pub log_every_ticks: u64,
}

impl Default for LoopSettings {
    fn default() -> Self {
        Self {
            realtime: true,
            max_ticks: Some(60 * TICK_RATE as u64),
            log_every_ticks: 5 * TICK_RATE as u64,
        }
    }
}

impl Settings {
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }
}
