//! Tests for settings loading and an end-to-end headless run.

use tower_core::constants::TICK_RATE;

use crate::control;
use crate::error::AppError;
use crate::observer::Sinks;
use crate::settings::{LoopSettings, Settings};
use crate::state::AppState;

#[test]
fn test_empty_settings_use_defaults() {
    let settings = Settings::from_toml_str("").unwrap();
    assert_eq!(settings.simulation.seed, 42);
    assert_eq!(settings.game_loop, LoopSettings::default());
    assert!(settings.game_loop.realtime);
}

#[test]
fn test_partial_settings_override() {
    let settings = Settings::from_toml_str(
        r#"
        [simulation]
        seed = 7
        speed_multiplier = 1.5

        [simulation.canvas]
        width = 800.0
        height = 600.0

        [simulation.rules]
        collision_threshold = 25.0

        [simulation.traffic]
        max_active = 8

        [game_loop]
        realtime = false
        max_ticks = 600
        "#,
    )
    .unwrap();

    let sim = &settings.simulation;
    assert_eq!(sim.seed, 7);
    assert_eq!(sim.speed_multiplier, 1.5);
    assert_eq!(sim.canvas.width, 800.0);
    assert_eq!(sim.rules.collision_threshold, 25.0);
    assert_eq!(sim.rules.forecast_separation, 45.0);
    assert_eq!(sim.traffic.max_active, 8);
    assert_eq!(sim.traffic.min_active, 2);
    assert!(sim.airport.is_none());
    assert!(!settings.game_loop.realtime);
    assert_eq!(settings.game_loop.max_ticks, Some(600));
    assert_eq!(settings.game_loop.log_every_ticks, 5 * TICK_RATE as u64);
}

#[test]
fn test_malformed_settings_rejected() {
    let result = Settings::from_toml_str("[simulation]\nseed = \"seven\"");
    assert!(matches!(result, Err(AppError::Settings(_))));
}

#[test]
fn test_missing_settings_file() {
    let result = Settings::load(std::path::Path::new("/nonexistent/tower.toml"));
    assert!(matches!(result, Err(AppError::Io(_))));
}

#[test]
fn test_headless_run_summary() {
    let mut settings = Settings::default();
    settings.simulation.seed = 5;
    settings.game_loop = LoopSettings {
        realtime: false,
        max_ticks: Some(10 * TICK_RATE as u64),
        log_every_ticks: 0,
    };

    let state = AppState::new();
    let handle = control::start_simulation(&state, &settings, Box::new(Sinks::default())).unwrap();
    let summary = handle.join().unwrap();

    assert_eq!(summary.ticks, 600);
    assert!((summary.counters.elapsed_secs - 10.0).abs() < 1e-6);

    let json = serde_json::to_string(&summary).unwrap();
    assert!(json.contains("\"landings\""));
    assert!(json.contains("\"collisions\""));

    let snap = control::get_snapshot(&state).unwrap().unwrap();
    assert_eq!(snap.time.tick, 600);
}
