//! Simulation engine: owns one air traffic session.
//!
//! `SimulationEngine` owns the hecs ECS world, processes session commands,
//! applies directives, runs all systems, and produces `SessionSnapshot`s.
//! Completely headless, enabling deterministic testing.

use std::collections::VecDeque;

use hecs::World;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use tower_airspace::geometry::wrap_position;
use tower_airspace::Airport;
use tower_core::commands::{AircraftDirective, CommandOutcome, Directive, SessionCommand};
use tower_core::config::{FlightRules, TrafficConfig};
use tower_core::constants::{DT, MAX_SPEED_MULTIPLIER};
use tower_core::enums::SessionPhase;
use tower_core::events::SimEvent;
use tower_core::state::SessionSnapshot;
use tower_core::types::{AircraftId, CanvasSize, Position, SimTime};

use crate::aircraft::{self, Aircraft};
use crate::directives;
use crate::error::{Result, SimError};
use crate::forecast::Forecaster;
use crate::navigation::{self, NavigationFacts};
use crate::systems;
use crate::systems::movement::MovementParams;
use crate::systems::snapshot::SessionInfo;
use crate::systems::traffic_spawner::SpawnSchedule;
use crate::world_setup::{self, SpawnContext};

/// Configuration for starting a new session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same session.
    pub seed: u64,
    pub canvas: CanvasSize,
    /// Global speed multiplier (1.0 = normal).
    pub speed_multiplier: f64,
    pub traffic: TrafficConfig,
    pub rules: FlightRules,
    /// Fixed airport layout. `None` uses the default layout for the canvas,
    /// rebuilt on every resize.
    pub airport: Option<Airport>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            canvas: CanvasSize::default(),
            speed_multiplier: 1.0,
            traffic: TrafficConfig::default(),
            rules: FlightRules::default(),
            airport: None,
        }
    }
}

/// Session-wide tallies. Reset with the session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionCounters {
    pub landings: u32,
    /// Mid-air collisions plus airport-zone incursions.
    pub collisions: u32,
}

/// The simulation engine. Owns the ECS world and all session state.
pub struct SimulationEngine {
    world: World,
    time: SimTime,
    phase: SessionPhase,
    canvas: CanvasSize,
    airport: Airport,
    fixed_airport: bool,
    speed_multiplier: f64,
    seed: u64,
    rules: FlightRules,
    traffic: TrafficConfig,
    rng: ChaCha8Rng,
    next_aircraft_id: u32,
    counters: SessionCounters,
    schedule: SpawnSchedule,
    command_queue: VecDeque<SessionCommand>,
    despawn_buffer: Vec<hecs::Entity>,
    events: Vec<SimEvent>,
}

impl SimulationEngine {
    /// Create a session and populate its initial traffic.
    pub fn new(config: SimConfig) -> Result<Self> {
        let canvas = validate_canvas(config.canvas.width, config.canvas.height)?;
        let fixed_airport = config.airport.is_some();
        let airport = config
            .airport
            .unwrap_or_else(|| Airport::for_canvas(canvas));
        let mut engine = Self {
            world: World::new(),
            time: SimTime::default(),
            phase: SessionPhase::default(),
            canvas,
            airport,
            fixed_airport,
            speed_multiplier: clamp_multiplier(config.speed_multiplier).unwrap_or(1.0),
            seed: config.seed,
            rules: config.rules,
            traffic: config.traffic,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            next_aircraft_id: 0,
            counters: SessionCounters::default(),
            schedule: SpawnSchedule::default(),
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            events: Vec::new(),
        };
        engine.populate();
        info!(
            seed = engine.seed,
            width = canvas.width,
            height = canvas.height,
            aircraft = engine.traffic.initial_aircraft,
            "session started"
        );
        Ok(engine)
    }

    /// Queue a session command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: SessionCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = SessionCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the session by one fixed tick and return the resulting snapshot.
    pub fn tick(&mut self) -> SessionSnapshot {
        self.step(DT)
    }

    /// Advance the session by `dt` seconds. Queued commands are always
    /// processed; systems and the clock only run while active.
    pub fn step(&mut self, dt: f64) -> SessionSnapshot {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        self.process_commands();

        if self.phase == SessionPhase::Active {
            self.run_systems(dt);
            self.time.advance(dt);
        }

        let events = std::mem::take(&mut self.events);
        self.build_snapshot(events)
    }

    /// Current state without advancing or draining pending events.
    pub fn snapshot(&self) -> SessionSnapshot {
        self.build_snapshot(self.events.clone())
    }

    /// Validate and apply a directive against the live roster right now.
    pub fn apply_directive(
        &mut self,
        aircraft_id: AircraftId,
        directive: &Directive,
    ) -> Result<CommandOutcome> {
        let (entity, target) = aircraft::find(&self.world, aircraft_id)
            .ok_or(SimError::UnknownAircraft(aircraft_id))?;
        let traffic = aircraft::roster(&self.world);
        let forecaster = Forecaster::new(&self.rules, self.canvas, self.speed_multiplier);
        let resolution =
            directives::apply_directive(&target, directive, &self.airport, &traffic, &forecaster);

        aircraft::write_back(&mut self.world, entity, &resolution.aircraft);
        debug!(
            aircraft = %aircraft_id,
            directive = ?directive,
            outcome = ?resolution.outcome,
            "directive resolved"
        );
        self.events.push(SimEvent::DirectiveResolved {
            aircraft_id,
            directive: *directive,
            outcome: resolution.outcome,
        });
        Ok(resolution.outcome)
    }

    /// Apply a batch one directive at a time, in order. Each directive sees
    /// the roster as left by the ones before it.
    pub fn apply_batch(&mut self, batch: &[AircraftDirective]) -> Vec<Result<CommandOutcome>> {
        batch
            .iter()
            .map(|d| self.apply_directive(d.aircraft_id, &d.directive))
            .collect()
    }

    /// Spawn one aircraft through the factory.
    pub fn spawn_aircraft(&mut self) -> AircraftId {
        let ctx = SpawnContext {
            canvas: self.canvas,
            airport: &self.airport,
            traffic: &self.traffic,
        };
        let plan = world_setup::spawn_aircraft(
            &mut self.world,
            &mut self.rng,
            &ctx,
            &mut self.next_aircraft_id,
        );
        systems::traffic_spawner::record_spawn(&plan, &mut self.events);
        plan.aircraft.id
    }

    /// Place a fully specified aircraft. Its id is replaced with the next
    /// session id, which is returned.
    pub fn insert_aircraft(&mut self, mut aircraft: Aircraft) -> AircraftId {
        aircraft.id = AircraftId(self.next_aircraft_id);
        self.next_aircraft_id += 1;
        aircraft.position = wrap_position(&aircraft.position, self.canvas);
        aircraft::spawn(&mut self.world, &aircraft);
        aircraft.id
    }

    /// All aircraft, including crashed ones, ordered by id.
    pub fn aircraft(&self) -> Vec<Aircraft> {
        aircraft::roster(&self.world)
    }

    pub fn get_aircraft(&self, aircraft_id: AircraftId) -> Result<Aircraft> {
        aircraft::find(&self.world, aircraft_id)
            .map(|(_, a)| a)
            .ok_or(SimError::UnknownAircraft(aircraft_id))
    }

    /// Navigation facts for one aircraft, derived from live state.
    pub fn navigation_facts(&self, aircraft_id: AircraftId) -> Result<NavigationFacts> {
        let target = self.get_aircraft(aircraft_id)?;
        let traffic = self.aircraft();
        Ok(navigation::facts_for(
            &target,
            &traffic,
            &self.airport,
            &self.rules,
            self.canvas,
        ))
    }

    /// Navigation facts for every active aircraft.
    pub fn navigation_picture(&self) -> Vec<NavigationFacts> {
        navigation::picture(&self.aircraft(), &self.airport, &self.rules, self.canvas)
    }

    /// Change the canvas and wrap every aircraft onto the new extent. The
    /// default airport layout is rebuilt for it; a fixed layout is kept.
    pub fn resize(&mut self, width: f64, height: f64) -> Result<()> {
        let canvas = validate_canvas(width, height)?;
        self.canvas = canvas;
        if !self.fixed_airport {
            self.airport = Airport::for_canvas(canvas);
        }
        for (_entity, pos) in self.world.query_mut::<&mut Position>() {
            *pos = wrap_position(pos, canvas);
        }
        info!(width, height, "canvas resized");
        self.events.push(SimEvent::Resized { width, height });
        Ok(())
    }

    /// Rebuild the session from its seed: empty world, zeroed counters and
    /// ids, fresh initial traffic, active phase.
    pub fn reset(&mut self) {
        self.world.clear();
        self.rng = ChaCha8Rng::seed_from_u64(self.seed);
        self.time = SimTime::default();
        self.phase = SessionPhase::Active;
        self.next_aircraft_id = 0;
        self.counters = SessionCounters::default();
        self.schedule.reset();
        self.events.clear();
        self.events.push(SimEvent::Reset);
        self.populate();
        info!(seed = self.seed, "session reset");
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn canvas(&self) -> CanvasSize {
        self.canvas
    }

    pub fn airport(&self) -> &Airport {
        &self.airport
    }

    pub fn rules(&self) -> &FlightRules {
        &self.rules
    }

    pub fn speed_multiplier(&self) -> f64 {
        self.speed_multiplier
    }

    pub fn counters(&self) -> SessionCounters {
        self.counters
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    fn populate(&mut self) {
        for _ in 0..self.traffic.initial_aircraft {
            self.spawn_aircraft();
        }
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single session command.
    fn handle_command(&mut self, command: SessionCommand) {
        match command {
            SessionCommand::Pause => {
                if self.phase == SessionPhase::Active {
                    self.phase = SessionPhase::Paused;
                    self.events.push(SimEvent::Paused);
                }
            }
            SessionCommand::Resume => {
                if self.phase == SessionPhase::Paused {
                    self.phase = SessionPhase::Active;
                    self.events.push(SimEvent::Resumed);
                }
            }
            SessionCommand::Reset => self.reset(),
            SessionCommand::Resize { width, height } => {
                if let Err(e) = self.resize(width, height) {
                    warn!(error = %e, "resize ignored");
                }
            }
            SessionCommand::SetSpeedMultiplier { multiplier } => {
                match clamp_multiplier(multiplier) {
                    Some(m) => self.speed_multiplier = m,
                    None => warn!(multiplier, "speed multiplier ignored"),
                }
            }
            SessionCommand::Spawn => {
                self.spawn_aircraft();
            }
            SessionCommand::Direct {
                aircraft_id,
                directive,
            } => {
                if let Err(e) = self.apply_directive(aircraft_id, &directive) {
                    warn!(error = %e, "directive dropped");
                    self.events.push(SimEvent::UnknownAircraft { aircraft_id });
                }
            }
        }
    }

    /// Run all systems in order.
    fn run_systems(&mut self, dt: f64) {
        // 1. Centerline correction + movement
        systems::movement::run(
            &mut self.world,
            &MovementParams {
                airport: &self.airport,
                rules: &self.rules,
                canvas: self.canvas,
                speed_multiplier: self.speed_multiplier,
                dt,
            },
        );
        // 2. Position history
        systems::movement::update_history(&mut self.world, self.time.tick);
        // 3. Mid-air collisions
        self.counters.collisions += systems::collision::run(
            &mut self.world,
            self.canvas,
            self.rules.collision_threshold,
            &mut self.events,
        );
        // 4. Airport-zone incursions
        self.counters.collisions += systems::incursion::run(
            &mut self.world,
            &self.airport,
            &self.rules,
            self.canvas,
            &mut self.events,
        );
        // 5. Landings
        self.counters.landings += systems::landing::run(
            &mut self.world,
            &self.airport,
            &self.rules,
            self.canvas,
            &mut self.events,
        );
        // 6. Cleanup (landed)
        systems::cleanup::run(&mut self.world, &mut self.despawn_buffer);
        // 7. Traffic spawning
        let ctx = SpawnContext {
            canvas: self.canvas,
            airport: &self.airport,
            traffic: &self.traffic,
        };
        systems::traffic_spawner::run(
            &mut self.world,
            &mut self.rng,
            &ctx,
            &mut self.schedule,
            &mut self.next_aircraft_id,
            dt,
            &mut self.events,
        );
    }

    fn build_snapshot(&self, events: Vec<SimEvent>) -> SessionSnapshot {
        systems::snapshot::build_snapshot(
            &self.world,
            &SessionInfo {
                time: self.time,
                phase: self.phase,
                canvas: self.canvas,
                speed_multiplier: self.speed_multiplier,
                landings: self.counters.landings,
                collisions: self.counters.collisions,
            },
            self.airport.view(&self.rules),
            events,
        )
    }
}

fn validate_canvas(width: f64, height: f64) -> Result<CanvasSize> {
    let canvas = CanvasSize::new(width, height);
    if canvas.is_valid() {
        Ok(canvas)
    } else {
        Err(SimError::InvalidCanvas { width, height })
    }
}

fn clamp_multiplier(multiplier: f64) -> Option<f64> {
    multiplier
        .is_finite()
        .then(|| multiplier.clamp(0.0, MAX_SPEED_MULTIPLIER))
}
