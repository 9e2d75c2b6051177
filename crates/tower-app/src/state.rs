//! Application state shared between the control surface and the game loop thread.

use std::sync::atomic::AtomicBool;
use std::sync::mpsc;
use std::sync::{Arc, Mutex};

use tower_core::commands::{AircraftDirective, SessionCommand};
use tower_core::state::SessionSnapshot;

/// Messages sent to the game loop thread.
#[derive(Debug)]
pub enum LoopCommand {
    /// Queued on the engine and processed at the next tick boundary.
    Session(SessionCommand),
    /// A policy batch, applied in order as soon as it is received.
    Directives(Vec<AircraftDirective>),
    /// Shut down the game loop thread gracefully.
    Shutdown,
}

/// Shared host state.
///
/// - `mpsc::Sender` is wrapped in `Mutex` (Sender is Send but not Sync)
/// - `Mutex<Option<...>>` holds state that does not exist before start
/// - `Arc<Mutex<...>>` shares the latest snapshot with the loop thread
/// - `running` is set on start and cleared by the loop thread when it exits
pub struct AppState {
    /// `None` until the loop is started.
    pub command_tx: Mutex<Option<mpsc::Sender<LoopCommand>>>,
    /// Updated by the game loop thread after each tick.
    pub latest_snapshot: Arc<Mutex<Option<SessionSnapshot>>>,
    pub running: Arc<AtomicBool>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            command_tx: Mutex::new(None),
            latest_snapshot: Arc::new(Mutex::new(None)),
            running: Arc::new(AtomicBool::new(false)),
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }
}
