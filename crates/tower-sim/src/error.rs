use thiserror::Error;

use tower_core::types::AircraftId;

/// Caller misuse. In-simulation outcomes (rejections, crashes) are never errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    #[error("Aircraft not found: {0}")]
    UnknownAircraft(AircraftId),

    #[error("Invalid canvas size: {width} x {height}")]
    InvalidCanvas { width: f64, height: f64 },
}

pub type Result<T> = std::result::Result<T, SimError>;
