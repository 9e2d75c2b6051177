//! Game loop thread: runs the simulation engine at TICK_RATE and publishes snapshots.
//!
//! The engine is built before the thread starts so configuration errors
//! surface to the caller. Commands arrive via `mpsc` channel. Snapshots go
//! to the observer sink and into shared state for synchronous polling.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::{debug, info, warn};

use tower_core::constants::TICK_RATE;
use tower_core::state::{CountersView, SessionSnapshot};
use tower_sim::{SimConfig, SimulationEngine};

use crate::error::Result;
use crate::observer::SnapshotSink;
use crate::settings::LoopSettings;
use crate::state::LoopCommand;

/// Nominal duration of one tick.
pub const TICK_DURATION: Duration = Duration::from_nanos(1_000_000_000 / TICK_RATE as u64);

/// What a finished run reports.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LoopSummary {
    pub ticks: u64,
    pub counters: CountersView,
}

/// Spawns the game loop in a new thread.
///
/// Returns the command sender and a handle that yields the run summary.
/// `running` is cleared when the loop exits, however it stops.
pub fn spawn_game_loop(
    config: SimConfig,
    settings: LoopSettings,
    latest_snapshot: Arc<Mutex<Option<SessionSnapshot>>>,
    running: Arc<AtomicBool>,
    sink: Box<dyn SnapshotSink>,
) -> Result<(mpsc::Sender<LoopCommand>, JoinHandle<LoopSummary>)> {
    let engine = SimulationEngine::new(config)?;
    let (cmd_tx, cmd_rx) = mpsc::channel::<LoopCommand>();

    let handle = std::thread::Builder::new()
        .name("tower-game-loop".into())
        .spawn(move || {
            let summary = run_game_loop(engine, cmd_rx, &settings, &latest_snapshot, sink);
            running.store(false, Ordering::SeqCst);
            summary
        })?;

    Ok((cmd_tx, handle))
}

/// The game loop. Runs until Shutdown, channel disconnect, or `max_ticks`.
fn run_game_loop(
    mut engine: SimulationEngine,
    cmd_rx: mpsc::Receiver<LoopCommand>,
    settings: &LoopSettings,
    latest_snapshot: &Mutex<Option<SessionSnapshot>>,
    mut sink: Box<dyn SnapshotSink>,
) -> LoopSummary {
    let mut summary = LoopSummary::default();
    let mut next_tick_time = Instant::now();
    info!(realtime = settings.realtime, max_ticks = ?settings.max_ticks, "game loop started");

    loop {
        // 1. Drain all pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(LoopCommand::Session(cmd)) => engine.queue_command(cmd),
                Ok(LoopCommand::Directives(batch)) => {
                    for (directive, result) in batch.iter().zip(engine.apply_batch(&batch)) {
                        if let Err(e) = result {
                            warn!(aircraft = %directive.aircraft_id, error = %e, "directive dropped");
                        }
                    }
                }
                Ok(LoopCommand::Shutdown) => return finish(summary),
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => return finish(summary),
            }
        }

        // 2. Advance one tick (engine handles pause semantics internally)
        let snapshot = engine.tick();
        summary.ticks += 1;
        summary.counters = snapshot.counters.clone();

        // 3. Hand the snapshot to observers
        sink.observe(&snapshot);

        // 4. Store latest snapshot for synchronous polling
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot);
        }

        if settings.max_ticks.is_some_and(|max| summary.ticks >= max) {
            return finish(summary);
        }

        // 5. Sleep until next tick
        if !settings.realtime {
            continue;
        }
        next_tick_time += TICK_DURATION;
        let now = Instant::now();
        if next_tick_time > now {
            std::thread::sleep(next_tick_time - now);
        } else if now - next_tick_time > TICK_DURATION * 2 {
            // Too far behind, resync instead of catching up
            debug!("game loop behind schedule, resyncing");
            next_tick_time = now;
        }
    }
}

fn finish(summary: LoopSummary) -> LoopSummary {
    info!(
        ticks = summary.ticks,
        landings = summary.counters.landings,
        collisions = summary.counters.collisions,
        "game loop stopped"
    );
    summary
}
