//! Control surface for the host: start the loop, send commands, poll state.
//!
//! These bridge caller requests to the game loop thread via channels.

use std::sync::atomic::Ordering;
use std::thread::JoinHandle;

use tower_core::commands::{AircraftDirective, SessionCommand};
use tower_core::state::SessionSnapshot;

use crate::error::{AppError, Result};
use crate::game_loop::{self, LoopSummary};
use crate::observer::SnapshotSink;
use crate::settings::Settings;
use crate::state::{AppState, LoopCommand};

/// Start the simulation. Fails if a loop is still running; a loop that
/// stopped on its own (tick limit, disconnect) may be replaced.
pub fn start_simulation(
    state: &AppState,
    settings: &Settings,
    sink: Box<dyn SnapshotSink>,
) -> Result<JoinHandle<LoopSummary>> {
    let mut tx_lock = state.command_tx.lock().map_err(|_| AppError::StatePoisoned)?;
    if state
        .running
        .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
        .is_err()
    {
        return Err(AppError::AlreadyRunning);
    }

    let spawned = game_loop::spawn_game_loop(
        settings.simulation.clone(),
        settings.game_loop.clone(),
        state.latest_snapshot.clone(),
        state.running.clone(),
        sink,
    );
    let (cmd_tx, handle) = match spawned {
        Ok(spawned) => spawned,
        Err(e) => {
            state.running.store(false, Ordering::SeqCst);
            return Err(e);
        }
    };
    *tx_lock = Some(cmd_tx);

    Ok(handle)
}

/// Queue a session command for the next tick.
pub fn send_command(state: &AppState, command: SessionCommand) -> Result<()> {
    send(state, LoopCommand::Session(command))
}

/// Submit a policy batch, applied in order on receipt.
pub fn send_directives(state: &AppState, batch: Vec<AircraftDirective>) -> Result<()> {
    send(state, LoopCommand::Directives(batch))
}

/// Ask the loop to stop and forget its channel. A loop that already
/// stopped on its own is not an error.
pub fn shutdown(state: &AppState) -> Result<()> {
    match send(state, LoopCommand::Shutdown) {
        Ok(()) | Err(AppError::ChannelClosed) => {}
        Err(e) => return Err(e),
    }
    *state.command_tx.lock().map_err(|_| AppError::StatePoisoned)? = None;
    state.running.store(false, Ordering::SeqCst);
    Ok(())
}

/// Get the latest snapshot synchronously (for polling / initial state).
pub fn get_snapshot(state: &AppState) -> Result<Option<SessionSnapshot>> {
    let lock = state
        .latest_snapshot
        .lock()
        .map_err(|_| AppError::StatePoisoned)?;
    Ok(lock.clone())
}

fn send(state: &AppState, command: LoopCommand) -> Result<()> {
    let mut tx_lock = state.command_tx.lock().map_err(|_| AppError::StatePoisoned)?;
    let Some(tx) = tx_lock.as_ref() else {
        return Err(AppError::NotRunning);
    };
    if tx.send(command).is_err() {
        // The loop exited; drop the dead channel so the next send reports NotRunning.
        *tx_lock = None;
        return Err(AppError::ChannelClosed);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use tower_core::commands::Directive;
    use tower_core::types::AircraftId;

    use super::*;
    use crate::observer::Sinks;
    use crate::settings::LoopSettings;

    fn fast_settings() -> Settings {
        Settings {
            game_loop: LoopSettings {
                realtime: false,
                max_ticks: None,
                log_every_ticks: 0,
            },
            ..Settings::default()
        }
    }

    #[test]
    fn test_send_before_start_fails() {
        let state = AppState::new();
        assert!(matches!(
            send_command(&state, SessionCommand::Pause),
            Err(AppError::NotRunning)
        ));
        assert!(get_snapshot(&state).unwrap().is_none());
    }

    #[test]
    fn test_start_send_shutdown() {
        let state = AppState::new();
        let handle =
            start_simulation(&state, &fast_settings(), Box::new(Sinks::default())).unwrap();
        assert!(matches!(
            start_simulation(&state, &fast_settings(), Box::new(Sinks::default())),
            Err(AppError::AlreadyRunning)
        ));

        send_directives(
            &state,
            vec![AircraftDirective::new(AircraftId(0), Directive::Hold)],
        )
        .unwrap();
        send_command(&state, SessionCommand::SetSpeedMultiplier { multiplier: 2.0 }).unwrap();
        shutdown(&state).unwrap();

        let summary = handle.join().unwrap();
        assert!(summary.ticks > 0);
        assert!(matches!(
            send_command(&state, SessionCommand::Resume),
            Err(AppError::NotRunning)
        ));
    }

    #[test]
    fn test_restart_after_loop_stops_on_its_own() {
        let state = AppState::new();
        let limited = Settings {
            game_loop: LoopSettings {
                realtime: false,
                max_ticks: Some(30),
                log_every_ticks: 0,
            },
            ..Settings::default()
        };

        let handle = start_simulation(&state, &limited, Box::new(Sinks::default())).unwrap();
        assert_eq!(handle.join().unwrap().ticks, 30);
        assert!(!state.running.load(Ordering::SeqCst));

        assert!(matches!(
            send_command(&state, SessionCommand::Pause),
            Err(AppError::ChannelClosed)
        ));
        assert!(matches!(
            send_command(&state, SessionCommand::Pause),
            Err(AppError::NotRunning)
        ));

        let handle = start_simulation(&state, &limited, Box::new(Sinks::default())).unwrap();
        assert_eq!(handle.join().unwrap().ticks, 30);
        shutdown(&state).unwrap();
        assert!(!state.running.load(Ordering::SeqCst));
    }
}
