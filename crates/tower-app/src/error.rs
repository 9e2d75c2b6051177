use thiserror::Error;

use tower_sim::SimError;

/// Host-level failures. Simulation outcomes never surface here.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Settings parse error: {0}")]
    Settings(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Simulation error: {0}")]
    Sim(#[from] SimError),

    #[error("Simulation already running")]
    AlreadyRunning,

    #[error("Simulation not started")]
    NotRunning,

    #[error("Game loop channel closed")]
    ChannelClosed,

    #[error("Shared state lock poisoned")]
    StatePoisoned,

    #[error("Game loop thread panicked")]
    LoopPanicked,
}

pub type Result<T> = std::result::Result<T, AppError>;
