//! Snapshot observers. The simulation never depends on one being attached.

use std::io::Write;

use tracing::{info, warn};

use tower_core::events::SimEvent;
use tower_core::state::SessionSnapshot;

/// Receives every snapshot the game loop produces.
pub trait SnapshotSink: Send {
    fn observe(&mut self, snapshot: &SessionSnapshot);
}

/// Periodic progress lines through `tracing`.
pub struct LogSink {
    every_ticks: u64,
}

impl LogSink {
    /// `every_ticks == 0` logs nothing.
    pub fn new(every_ticks: u64) -> Self {
        Self { every_ticks }
    }
}

impl SnapshotSink for LogSink {
    fn observe(&mut self, snapshot: &SessionSnapshot) {
        for event in &snapshot.events {
            match event {
                SimEvent::Paused => info!(tick = snapshot.time.tick, "paused"),
                SimEvent::Resumed => info!(tick = snapshot.time.tick, "resumed"),
                SimEvent::Reset => info!("reset"),
                _ => {}
            }
        }

        let tick = snapshot.time.tick;
        if self.every_ticks == 0 || tick == 0 || tick % self.every_ticks != 0 {
            return;
        }
        let c = &snapshot.counters;
        info!(
            tick,
            elapsed_secs = c.elapsed_secs,
            active = c.active_aircraft,
            landings = c.landings,
            collisions = c.collisions,
            "progress"
        );
    }
}

/// Writes each snapshot as one JSON line.
pub struct JsonLinesSink<W: Write + Send> {
    out: W,
    failed: bool,
}

impl<W: Write + Send> JsonLinesSink<W> {
    pub fn new(out: W) -> Self {
        Self { out, failed: false }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write + Send> SnapshotSink for JsonLinesSink<W> {
    fn observe(&mut self, snapshot: &SessionSnapshot) {
        if self.failed {
            return;
        }
        let written = serde_json::to_writer(&mut self.out, snapshot)
            .map_err(std::io::Error::from)
            .and_then(|()| self.out.write_all(b"\n"));
        if let Err(e) = written {
            warn!(error = %e, "snapshot output failed");
            self.failed = true;
        }
    }
}

/// Fan a snapshot out to several sinks.
#[derive(Default)]
pub struct Sinks(pub Vec<Box<dyn SnapshotSink>>);

impl SnapshotSink for Sinks {
    fn observe(&mut self, snapshot: &SessionSnapshot) {
        for sink in &mut self.0 {
            sink.observe(snapshot);
        }
    }
}

#[cfg(test)]
mod tests {
    use tower_sim::{SimConfig, SimulationEngine};

    use super::*;

    #[test]
    fn test_json_lines_one_per_snapshot() {
        let mut engine = SimulationEngine::new(SimConfig::default()).unwrap();
        let mut sink = JsonLinesSink::new(Vec::new());
        for _ in 0..3 {
            sink.observe(&engine.tick());
        }
        let text = String::from_utf8(sink.into_inner()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        let last: SessionSnapshot = serde_json::from_str(lines[2]).unwrap();
        assert_eq!(last.time.tick, 3);
    }
}
