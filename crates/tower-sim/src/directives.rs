//! Directive validation and application.
//!
//! `apply_directive` is a pure function of one aircraft, the airport, and
//! the current traffic picture. It never mutates anything but the returned
//! copy, and it never fails: every refusal is a `CommandOutcome::Rejected`.

use tower_airspace::geometry::{angle_difference, normalize_angle};
use tower_airspace::Airport;
use tower_core::commands::{CommandOutcome, Directive};
use tower_core::enums::{FlightStatus, RejectReason};

use crate::aircraft::Aircraft;
use crate::forecast::Forecaster;

/// The updated aircraft and what happened to the directive.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub aircraft: Aircraft,
    pub outcome: CommandOutcome,
}

impl Resolution {
    fn changed(aircraft: Aircraft, outcome: CommandOutcome) -> Self {
        Self { aircraft, outcome }
    }

    fn rejected(aircraft: &Aircraft, reason: RejectReason) -> Self {
        Self {
            aircraft: aircraft.clone(),
            outcome: CommandOutcome::Rejected { reason },
        }
    }
}

/// Validate `directive` against live state and return the resulting aircraft.
///
/// `traffic` is the full roster at application time; the target itself may
/// appear in it and is skipped by the forecaster.
pub fn apply_directive(
    aircraft: &Aircraft,
    directive: &Directive,
    airport: &Airport,
    traffic: &[Aircraft],
    forecaster: &Forecaster<'_>,
) -> Resolution {
    if aircraft.status.is_terminal() {
        return Resolution::rejected(aircraft, RejectReason::Terminal);
    }

    match *directive {
        Directive::Turn { value } => turn(aircraft, value, airport, traffic, forecaster),
        Directive::Speed { value } => speed(aircraft, value, forecaster),
        Directive::Approach => approach(aircraft, airport, forecaster),
        Directive::Hold => hold(aircraft, airport, forecaster),
    }
}

fn turn(
    aircraft: &Aircraft,
    value: f64,
    airport: &Airport,
    traffic: &[Aircraft],
    forecaster: &Forecaster<'_>,
) -> Resolution {
    if !value.is_finite() {
        return Resolution::rejected(aircraft, RejectReason::InvalidValue);
    }
    if aircraft.status == FlightStatus::Approaching {
        return Resolution::rejected(aircraft, RejectReason::Approaching);
    }

    let rules = forecaster.rules;
    let requested = normalize_angle(value);
    let heading = if rules.avoid_collisions {
        match forecaster.find_safe_heading(aircraft, requested, traffic) {
            Some(h) => h,
            None => return Resolution::rejected(aircraft, RejectReason::NoSafeHeading),
        }
    } else {
        requested
    };

    let mut updated = aircraft.clone();
    let enters_zone = rules.avoid_airport_zone
        && aircraft.status == FlightStatus::Flying
        && forecaster
            .predict_airport_zone_entry(aircraft, heading, airport)
            .is_some();

    if enters_zone {
        let away = forecaster.find_heading_away_from_airport(aircraft, airport);
        if rules.avoid_collisions
            && forecaster
                .predict_collision(aircraft, away, traffic)
                .is_some()
        {
            return Resolution::rejected(aircraft, RejectReason::UnsafeDivert);
        }
        updated.heading = away;
        return Resolution::changed(
            updated,
            CommandOutcome::DivertedFromAirport {
                requested,
                assigned: away,
            },
        );
    }

    updated.heading = heading;
    let outcome = if heading == requested {
        CommandOutcome::Applied
    } else {
        CommandOutcome::HeadingSubstituted {
            requested,
            assigned: heading,
        }
    };
    Resolution::changed(updated, outcome)
}

fn speed(aircraft: &Aircraft, value: f64, forecaster: &Forecaster<'_>) -> Resolution {
    if value.is_nan() {
        return Resolution::rejected(aircraft, RejectReason::InvalidValue);
    }

    let rules = forecaster.rules;
    let mut assigned = rules.clamp_speed(value);
    if aircraft.status == FlightStatus::Approaching {
        assigned = assigned.min(rules.approach_speed_ceiling);
    }

    let mut updated = aircraft.clone();
    updated.speed = assigned;
    let outcome = if assigned == value {
        CommandOutcome::Applied
    } else {
        CommandOutcome::SpeedClamped {
            requested: value,
            assigned,
        }
    };
    Resolution::changed(updated, outcome)
}

fn approach(aircraft: &Aircraft, airport: &Airport, forecaster: &Forecaster<'_>) -> Resolution {
    if aircraft.status == FlightStatus::Approaching {
        return Resolution::rejected(aircraft, RejectReason::AlreadyApproaching);
    }

    let rules = forecaster.rules;
    if !airport.is_in_approach_zone(&aircraft.position, rules, forecaster.canvas) {
        return Resolution::rejected(aircraft, RejectReason::OutsideApproachCorridor);
    }

    let mut updated = aircraft.clone();
    updated.status = FlightStatus::Approaching;
    updated.speed = updated.speed.min(rules.approach_speed_ceiling);
    Resolution::changed(updated, CommandOutcome::Applied)
}

fn hold(aircraft: &Aircraft, airport: &Airport, forecaster: &Forecaster<'_>) -> Resolution {
    if aircraft.status == FlightStatus::Approaching {
        return Resolution::rejected(aircraft, RejectReason::Approaching);
    }

    let rules = forecaster.rules;
    let mut updated = aircraft.clone();

    let urgent = rules.avoid_airport_zone
        && forecaster
            .predict_airport_zone_entry(aircraft, aircraft.heading, airport)
            .is_some();

    if urgent {
        updated.heading = forecaster.find_heading_away_from_airport(aircraft, airport);
        updated.speed = (aircraft.speed * rules.hold_emergency_speed_factor).max(rules.min_speed);
        return Resolution::changed(
            updated.clone(),
            CommandOutcome::EmergencyHold {
                heading: updated.heading,
                speed: updated.speed,
            },
        );
    }

    let holding_heading = normalize_angle(airport.runway_heading() + 180.0);
    let step = angle_difference(aircraft.heading, holding_heading)
        .clamp(-rules.hold_turn_step, rules.hold_turn_step);
    updated.heading = normalize_angle(aircraft.heading + step);
    updated.speed = (aircraft.speed * rules.hold_speed_factor).max(rules.min_speed);
    Resolution::changed(updated, CommandOutcome::Applied)
}

#[cfg(test)]
mod tests {
    use tower_core::config::FlightRules;
    use tower_core::types::{AircraftId, CanvasSize, Color, Position};

    use super::*;

    fn plane(id: u32, x: f64, y: f64, heading: f64, speed: f64) -> Aircraft {
        Aircraft {
            id: AircraftId(id),
            callsign: format!("DAL{}", 300 + id),
            color: Color::default(),
            position: Position::new(x, y),
            heading,
            speed,
            status: FlightStatus::Flying,
        }
    }

    fn airport() -> Airport {
        Airport::new(Position::new(400.0, 300.0), Position::new(600.0, 300.0), 40.0)
    }

    fn canvas() -> CanvasSize {
        CanvasSize::new(1200.0, 800.0)
    }

    #[test]
    fn test_clear_turn_applied() {
        let rules = FlightRules::default();
        let f = Forecaster::new(&rules, canvas(), 1.0);
        let a = plane(0, 100.0, 700.0, 0.0, 0.4);
        let r = apply_directive(&a, &Directive::Turn { value: -90.0 }, &airport(), &[a.clone()], &f);
        assert_eq!(r.outcome, CommandOutcome::Applied);
        assert_eq!(r.aircraft.heading, 270.0);
    }

    #[test]
    fn test_turn_rejected_when_approaching() {
        let rules = FlightRules::default();
        let f = Forecaster::new(&rules, canvas(), 1.0);
        let mut a = plane(0, 300.0, 300.0, 0.0, 0.3);
        a.status = FlightStatus::Approaching;
        let r = apply_directive(&a, &Directive::Turn { value: 90.0 }, &airport(), &[a.clone()], &f);
        assert_eq!(
            r.outcome,
            CommandOutcome::Rejected {
                reason: RejectReason::Approaching
            }
        );
        assert_eq!(r.aircraft, a);
    }

    #[test]
    fn test_turn_substitutes_safe_heading() {
        let rules = FlightRules::default();
        let f = Forecaster::new(&rules, canvas(), 1.0);
        let a = plane(0, 100.0, 600.0, 90.0, 0.5);
        let blocker = plane(1, 200.0, 600.0, 0.0, 0.0);
        let traffic = [a.clone(), blocker];
        let r = apply_directive(&a, &Directive::Turn { value: 0.0 }, &airport(), &traffic, &f);
        assert_eq!(
            r.outcome,
            CommandOutcome::HeadingSubstituted {
                requested: 0.0,
                assigned: 30.0
            }
        );
        assert_eq!(r.aircraft.heading, 30.0);
    }

    #[test]
    fn test_turn_rejected_when_surrounded() {
        let rules = FlightRules::default();
        let f = Forecaster::new(&rules, canvas(), 1.0);
        let a = plane(0, 200.0, 600.0, 45.0, 0.5);
        let mut traffic = vec![a.clone()];
        for i in 0..12 {
            let bearing = (i as f64 * 30.0).to_radians();
            traffic.push(plane(
                i + 1,
                200.0 + 40.0 * bearing.cos(),
                600.0 + 40.0 * bearing.sin(),
                0.0,
                0.0,
            ));
        }
        let r = apply_directive(&a, &Directive::Turn { value: 180.0 }, &airport(), &traffic, &f);
        assert_eq!(
            r.outcome,
            CommandOutcome::Rejected {
                reason: RejectReason::NoSafeHeading
            }
        );
        assert_eq!(r.aircraft.heading, 45.0);
    }

    #[test]
    fn test_turn_into_airport_zone_diverted() {
        let rules = FlightRules::default();
        let f = Forecaster::new(&rules, canvas(), 1.0);
        // Above the runway, asked to point straight down at it.
        let a = plane(0, 500.0, 200.0, 270.0, 0.5);
        let r = apply_directive(&a, &Directive::Turn { value: 90.0 }, &airport(), &[a.clone()], &f);
        match r.outcome {
            CommandOutcome::DivertedFromAirport {
                requested,
                assigned,
            } => {
                assert_eq!(requested, 90.0);
                assert!((assigned - 270.0).abs() < 1e-9);
            }
            other => panic!("expected divert, got {other:?}"),
        }
    }

    #[test]
    fn test_zone_avoidance_can_be_disabled() {
        let rules = FlightRules {
            avoid_airport_zone: false,
            ..FlightRules::default()
        };
        let f = Forecaster::new(&rules, canvas(), 1.0);
        let a = plane(0, 500.0, 200.0, 270.0, 0.5);
        let r = apply_directive(&a, &Directive::Turn { value: 90.0 }, &airport(), &[a.clone()], &f);
        assert_eq!(r.outcome, CommandOutcome::Applied);
        assert_eq!(r.aircraft.heading, 90.0);
    }

    #[test]
    fn test_non_finite_turn_rejected() {
        let rules = FlightRules::default();
        let f = Forecaster::new(&rules, canvas(), 1.0);
        let a = plane(0, 100.0, 700.0, 0.0, 0.4);
        let r = apply_directive(
            &a,
            &Directive::Turn { value: f64::NAN },
            &airport(),
            &[a.clone()],
            &f,
        );
        assert!(r.outcome.is_rejected());
        assert_eq!(r.aircraft, a);
    }

    #[test]
    fn test_speed_clamped_into_range() {
        let rules = FlightRules::default();
        let f = Forecaster::new(&rules, canvas(), 1.0);
        let a = plane(0, 100.0, 700.0, 0.0, 0.4);

        let fast = apply_directive(&a, &Directive::Speed { value: 5.0 }, &airport(), &[], &f);
        assert_eq!(fast.aircraft.speed, rules.max_speed);
        assert!(matches!(fast.outcome, CommandOutcome::SpeedClamped { .. }));

        let slow = apply_directive(&a, &Directive::Speed { value: -1.0 }, &airport(), &[], &f);
        assert_eq!(slow.aircraft.speed, rules.min_speed);

        let ok = apply_directive(&a, &Directive::Speed { value: 0.5 }, &airport(), &[], &f);
        assert_eq!(ok.outcome, CommandOutcome::Applied);
        assert_eq!(ok.aircraft.speed, 0.5);
    }

    #[test]
    fn test_approaching_speed_capped_at_ceiling() {
        let rules = FlightRules::default();
        let f = Forecaster::new(&rules, canvas(), 1.0);
        let mut a = plane(0, 300.0, 300.0, 0.0, 0.25);
        a.status = FlightStatus::Approaching;
        let r = apply_directive(&a, &Directive::Speed { value: 0.7 }, &airport(), &[], &f);
        assert_eq!(r.aircraft.speed, rules.approach_speed_ceiling);
    }

    #[test]
    fn test_approach_inside_corridor() {
        let rules = FlightRules::default();
        let f = Forecaster::new(&rules, canvas(), 1.0);
        let a = plane(0, 250.0, 310.0, 0.0, 0.5);
        let r = apply_directive(&a, &Directive::Approach, &airport(), &[], &f);
        assert_eq!(r.outcome, CommandOutcome::Applied);
        assert_eq!(r.aircraft.status, FlightStatus::Approaching);
        assert_eq!(r.aircraft.speed, rules.approach_speed_ceiling);

        let again = apply_directive(&r.aircraft, &Directive::Approach, &airport(), &[], &f);
        assert_eq!(
            again.outcome,
            CommandOutcome::Rejected {
                reason: RejectReason::AlreadyApproaching
            }
        );
    }

    #[test]
    fn test_approach_outside_corridor_is_noop() {
        let rules = FlightRules::default();
        let f = Forecaster::new(&rules, canvas(), 1.0);
        let a = plane(0, 250.0, 500.0, 0.0, 0.5);
        let r = apply_directive(&a, &Directive::Approach, &airport(), &[], &f);
        assert_eq!(
            r.outcome,
            CommandOutcome::Rejected {
                reason: RejectReason::OutsideApproachCorridor
            }
        );
        assert_eq!(r.aircraft, a);
    }

    #[test]
    fn test_gradual_hold() {
        let rules = FlightRules::default();
        let f = Forecaster::new(&rules, canvas(), 1.0);
        // Far from the airport, heading north; holding heading is 180.
        let a = plane(0, 100.0, 700.0, 270.0, 0.5);
        let r = apply_directive(&a, &Directive::Hold, &airport(), &[], &f);
        assert_eq!(r.outcome, CommandOutcome::Applied);
        assert!((r.aircraft.heading - 240.0).abs() < 1e-9);
        assert!((r.aircraft.speed - 0.4).abs() < 1e-9);

        let slow = plane(1, 100.0, 700.0, 180.0, 0.16);
        let r = apply_directive(&slow, &Directive::Hold, &airport(), &[], &f);
        assert_eq!(r.aircraft.heading, 180.0);
        assert_eq!(r.aircraft.speed, rules.min_speed);
    }

    #[test]
    fn test_emergency_hold_turns_away() {
        let rules = FlightRules::default();
        let f = Forecaster::new(&rules, canvas(), 1.0);
        let a = plane(0, 500.0, 200.0, 90.0, 0.6);
        let r = apply_directive(&a, &Directive::Hold, &airport(), &[], &f);
        assert!(matches!(r.outcome, CommandOutcome::EmergencyHold { .. }));
        assert!((r.aircraft.heading - 270.0).abs() < 1e-9);
        assert!((r.aircraft.speed - 0.3).abs() < 1e-9);
    }

    #[test]
    fn test_terminal_aircraft_rejects_everything() {
        let rules = FlightRules::default();
        let f = Forecaster::new(&rules, canvas(), 1.0);
        let mut a = plane(0, 100.0, 700.0, 0.0, 0.0);
        a.status = FlightStatus::Crashed;
        for d in [
            Directive::Turn { value: 90.0 },
            Directive::Speed { value: 0.5 },
            Directive::Approach,
            Directive::Hold,
        ] {
            let r = apply_directive(&a, &d, &airport(), &[], &f);
            assert_eq!(
                r.outcome,
                CommandOutcome::Rejected {
                    reason: RejectReason::Terminal
                }
            );
            assert_eq!(r.aircraft, a);
        }
    }
}
