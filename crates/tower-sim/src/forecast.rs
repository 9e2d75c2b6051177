//! Predictive safety forecaster.
//!
//! Forward-simulates a candidate heading at fixed sample intervals and
//! checks each sample for loss of separation with other traffic (which is
//! assumed to hold its current heading and speed) or for entry into the
//! airport zone. Runs once per directive, not per tick.

use tower_airspace::geometry::{
    move_position, normalize_angle, wrap_position, wrapped_distance, wrapped_heading_to,
};
use tower_airspace::Airport;
use tower_core::config::FlightRules;
use tower_core::constants::TICK_RATE;
use tower_core::types::{AircraftId, CanvasSize, Position};

use crate::aircraft::Aircraft;

/// First predicted loss of separation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PredictedConflict {
    pub with: AircraftId,
    /// Seconds from now.
    pub eta_secs: f64,
    /// Where the forecast aircraft would be.
    pub point: Position,
}

/// First predicted airport-zone sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PredictedIncursion {
    pub eta_secs: f64,
    pub point: Position,
}

/// Forecast parameters for the current session state.
#[derive(Debug, Clone, Copy)]
pub struct Forecaster<'a> {
    pub rules: &'a FlightRules,
    pub canvas: CanvasSize,
    pub speed_multiplier: f64,
}

impl<'a> Forecaster<'a> {
    pub fn new(rules: &'a FlightRules, canvas: CanvasSize, speed_multiplier: f64) -> Self {
        Self {
            rules,
            canvas,
            speed_multiplier,
        }
    }

    /// Predict whether flying `heading` loses separation with any other
    /// active aircraft within the collision horizon.
    pub fn predict_collision(
        &self,
        aircraft: &Aircraft,
        heading: f64,
        traffic: &[Aircraft],
    ) -> Option<PredictedConflict> {
        let others: Vec<&Aircraft> = traffic
            .iter()
            .filter(|o| o.id != aircraft.id && o.is_active())
            .collect();
        if others.is_empty() {
            return None;
        }

        for t in self.sample_times(self.rules.forecast_horizon_secs) {
            let own = self.project(&aircraft.position, heading, aircraft.speed, t);
            for other in &others {
                let theirs = self.project(&other.position, other.heading, other.speed, t);
                if wrapped_distance(&own, &theirs, self.canvas) < self.rules.forecast_separation {
                    return Some(PredictedConflict {
                        with: other.id,
                        eta_secs: t,
                        point: own,
                    });
                }
            }
        }
        None
    }

    /// The requested heading if it is clear, otherwise the first clear
    /// heading from the ordered avoidance offsets. `None` if all conflict.
    pub fn find_safe_heading(
        &self,
        aircraft: &Aircraft,
        requested: f64,
        traffic: &[Aircraft],
    ) -> Option<f64> {
        std::iter::once(0.0)
            .chain(self.rules.avoidance_offsets.iter().copied())
            .map(|offset| normalize_angle(requested + offset))
            .find(|&heading| self.predict_collision(aircraft, heading, traffic).is_none())
    }

    /// Predict whether flying `heading` enters the airport zone within the
    /// zone horizon.
    pub fn predict_airport_zone_entry(
        &self,
        aircraft: &Aircraft,
        heading: f64,
        airport: &Airport,
    ) -> Option<PredictedIncursion> {
        self.sample_times(self.rules.zone_forecast_horizon_secs)
            .map(|t| (t, self.project(&aircraft.position, heading, aircraft.speed, t)))
            .find(|(_, point)| airport.is_over_airport(point, self.rules, self.canvas))
            .map(|(eta_secs, point)| PredictedIncursion { eta_secs, point })
    }

    /// Heading pointing straight away from the runway center. Falls back to
    /// the reciprocal of the runway heading if that still enters the zone.
    pub fn find_heading_away_from_airport(&self, aircraft: &Aircraft, airport: &Airport) -> f64 {
        let away = wrapped_heading_to(&airport.runway_center(), &aircraft.position, self.canvas);
        if self
            .predict_airport_zone_entry(aircraft, away, airport)
            .is_none()
        {
            away
        } else {
            normalize_angle(airport.runway_heading() + 180.0)
        }
    }

    /// Position after `secs` on a fixed heading and speed, wrapped onto the canvas.
    pub fn project(&self, from: &Position, heading: f64, speed: f64, secs: f64) -> Position {
        let travelled = speed * self.speed_multiplier * TICK_RATE as f64 * secs;
        wrap_position(&move_position(from, heading, travelled), self.canvas)
    }

    fn sample_times(&self, horizon_secs: f64) -> impl Iterator<Item = f64> {
        let step = self.rules.forecast_step_secs;
        let samples = if step > 0.0 && horizon_secs > 0.0 {
            (horizon_secs / step).round() as u32
        } else {
            0
        };
        (1..=samples).map(move |i| i as f64 * step)
    }
}

#[cfg(test)]
mod tests {
    use tower_core::enums::FlightStatus;
    use tower_core::types::Color;

    use super::*;

    fn plane(id: u32, x: f64, y: f64, heading: f64, speed: f64) -> Aircraft {
        Aircraft {
            id: AircraftId(id),
            callsign: format!("BAW{}", 100 + id),
            color: Color::default(),
            position: Position::new(x, y),
            heading,
            speed,
            status: FlightStatus::Flying,
        }
    }

    fn scenario_airport() -> Airport {
        Airport::new(Position::new(400.0, 300.0), Position::new(600.0, 300.0), 40.0)
    }

    #[test]
    fn test_head_on_conflict_detected() {
        let rules = FlightRules::default();
        let f = Forecaster::new(&rules, CanvasSize::new(1200.0, 800.0), 1.0);
        let a = plane(0, 100.0, 600.0, 0.0, 0.5);
        let b = plane(1, 300.0, 600.0, 180.0, 0.5);

        // Closing at 60 units/s from 200 apart: below 45 within ~2.6 s.
        let conflict = f.predict_collision(&a, 0.0, &[a.clone(), b.clone()]).unwrap();
        assert_eq!(conflict.with, AircraftId(1));
        assert!(conflict.eta_secs > 2.0 && conflict.eta_secs < 3.0);

        // Turning away clears it.
        assert!(f.predict_collision(&a, 180.0, &[a.clone(), b]).is_none());
    }

    #[test]
    fn test_conflict_across_canvas_edge() {
        let rules = FlightRules::default();
        let f = Forecaster::new(&rules, CanvasSize::new(1200.0, 800.0), 1.0);
        // 100 apart through the left/right edge, converging.
        let a = plane(0, 50.0, 600.0, 180.0, 0.5);
        let b = plane(1, 1150.0, 600.0, 0.0, 0.5);
        assert!(f.predict_collision(&a, 180.0, &[a.clone(), b]).is_some());
    }

    #[test]
    fn test_terminal_traffic_ignored() {
        let rules = FlightRules::default();
        let f = Forecaster::new(&rules, CanvasSize::new(1200.0, 800.0), 1.0);
        let a = plane(0, 100.0, 600.0, 0.0, 0.5);
        let mut wreck = plane(1, 120.0, 600.0, 0.0, 0.0);
        wreck.status = FlightStatus::Crashed;
        assert!(f.predict_collision(&a, 0.0, &[a.clone(), wreck]).is_none());
    }

    #[test]
    fn test_find_safe_heading_prefers_request_then_offsets() {
        let rules = FlightRules::default();
        let f = Forecaster::new(&rules, CanvasSize::new(1200.0, 800.0), 1.0);
        let a = plane(0, 100.0, 600.0, 90.0, 0.5);
        let lone = [a.clone()];
        assert_eq!(f.find_safe_heading(&a, 45.0, &lone), Some(45.0));

        // Parked traffic dead ahead on heading 0.
        let blocker = plane(1, 200.0, 600.0, 0.0, 0.0);
        let safe = f.find_safe_heading(&a, 0.0, &[a.clone(), blocker]).unwrap();
        assert_ne!(safe, 0.0);
        assert!(rules
            .avoidance_offsets
            .iter()
            .any(|o| normalize_angle(*o) == safe));
    }

    #[test]
    fn test_zone_entry_prediction() {
        let rules = FlightRules::default();
        let f = Forecaster::new(&rules, CanvasSize::new(1200.0, 800.0), 1.0);
        let airport = scenario_airport();

        // 100 units above the runway heading straight down at 30 units/s.
        let a = plane(0, 500.0, 200.0, 90.0, 0.5);
        let entry = f.predict_airport_zone_entry(&a, 90.0, &airport).unwrap();
        // Zone edge is at y = 300 - 20 - 40 = 240, i.e. 40 units away.
        assert!(entry.eta_secs > 1.2 && entry.eta_secs < 1.5);
        assert!(f.predict_airport_zone_entry(&a, 270.0, &airport).is_none());
    }

    #[test]
    fn test_heading_away_from_airport() {
        let rules = FlightRules::default();
        let f = Forecaster::new(&rules, CanvasSize::new(1200.0, 800.0), 1.0);
        let airport = scenario_airport();
        let a = plane(0, 500.0, 200.0, 90.0, 0.5);
        let away = f.find_heading_away_from_airport(&a, &airport);
        assert!((away - 270.0).abs() < 1e-9);
    }

    #[test]
    fn test_heading_away_from_airport_across_edge() {
        let rules = FlightRules::default();
        let f = Forecaster::new(&rules, CanvasSize::new(800.0, 300.0), 1.0);
        // Runway end on the right edge; the aircraft sits just past it, wrapped.
        let airport = Airport::new(Position::new(600.0, 150.0), Position::new(800.0, 150.0), 40.0);
        let a = plane(0, 60.0, 150.0, 90.0, 0.5);
        let away = f.find_heading_away_from_airport(&a, &airport);
        assert!(away.abs() < 1e-9);
        assert!(f.predict_airport_zone_entry(&a, away, &airport).is_none());
    }

    #[test]
    fn test_zero_speed_multiplier_freezes_forecast() {
        let rules = FlightRules::default();
        let f = Forecaster::new(&rules, CanvasSize::new(1200.0, 800.0), 0.0);
        let a = plane(0, 100.0, 100.0, 0.0, 0.8);
        let p = f.project(&a.position, 0.0, a.speed, 8.0);
        assert_eq!(p, a.position);
    }
}
