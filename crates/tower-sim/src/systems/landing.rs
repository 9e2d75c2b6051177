//! Landing detection.

use hecs::World;
use tracing::info;

use tower_airspace::geometry::angle_difference;
use tower_airspace::Airport;
use tower_core::components::{FlightIdentity, Kinematics};
use tower_core::config::FlightRules;
use tower_core::enums::FlightStatus;
use tower_core::events::SimEvent;
use tower_core::types::{CanvasSize, Position};

use crate::aircraft::freeze;

/// An approaching aircraft lands when it is on the runway (overshoot
/// allowed), aligned with the runway heading, and slow enough.
pub fn is_landing(
    pos: &Position,
    kinematics: &Kinematics,
    airport: &Airport,
    rules: &FlightRules,
    canvas: CanvasSize,
) -> bool {
    airport.is_on_runway(pos, rules, canvas, true)
        && angle_difference(kinematics.heading, airport.runway_heading()).abs()
            <= rules.landing_heading_tolerance
        && kinematics.speed < rules.landing_speed_threshold
}

/// Transition qualifying aircraft to `Landed`. Returns the number landed.
pub fn run(
    world: &mut World,
    airport: &Airport,
    rules: &FlightRules,
    canvas: CanvasSize,
    events: &mut Vec<SimEvent>,
) -> u32 {
    let mut count = 0;
    for (_entity, (identity, pos, kin, status)) in world.query_mut::<(
        &FlightIdentity,
        &Position,
        &mut Kinematics,
        &mut FlightStatus,
    )>() {
        if *status != FlightStatus::Approaching || !is_landing(pos, kin, airport, rules, canvas) {
            continue;
        }
        info!(aircraft = %identity.id, callsign = %identity.callsign, "landed");
        freeze(status, kin, FlightStatus::Landed);
        events.push(SimEvent::Landed {
            aircraft_id: identity.id,
            callsign: identity.callsign.clone(),
        });
        count += 1;
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;

    const CANVAS: CanvasSize = CanvasSize {
        width: 1200.0,
        height: 800.0,
    };

    fn airport() -> Airport {
        Airport::new(Position::new(400.0, 300.0), Position::new(600.0, 300.0), 40.0)
    }

    #[test]
    fn test_landing_window() {
        let rules = FlightRules::default();
        let kin = |heading, speed| Kinematics { heading, speed };
        let on = Position::new(500.0, 305.0);

        assert!(is_landing(&on, &kin(0.0, 0.3), &airport(), &rules, CANVAS));
        assert!(is_landing(&on, &kin(350.0, 0.3), &airport(), &rules, CANVAS));
        // Misaligned.
        assert!(!is_landing(&on, &kin(20.0, 0.3), &airport(), &rules, CANVAS));
        // Reverse direction is never valid.
        assert!(!is_landing(&on, &kin(180.0, 0.3), &airport(), &rules, CANVAS));
        // Too fast.
        assert!(!is_landing(&on, &kin(0.0, 0.5), &airport(), &rules, CANVAS));
        // Overshoot allowance past the far end.
        assert!(is_landing(&Position::new(625.0, 300.0), &kin(0.0, 0.2), &airport(), &rules, CANVAS));
        assert!(!is_landing(&Position::new(640.0, 300.0), &kin(0.0, 0.2), &airport(), &rules, CANVAS));
    }
}
