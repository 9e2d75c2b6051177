//! Navigation picture for an external controlling policy.
//!
//! Derived from live state on every request; nothing here is cached, so a
//! policy that acts on stale facts is still validated against the current
//! roster when its directives land.

use serde::{Deserialize, Serialize};

use tower_airspace::geometry::{angle_difference, wrapped_distance, wrapped_heading_to};
use tower_airspace::Airport;
use tower_core::config::FlightRules;
use tower_core::enums::FlightStatus;
use tower_core::types::{AircraftId, CanvasSize};

use crate::aircraft::Aircraft;

/// Per-aircraft derived navigation data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavigationFacts {
    pub aircraft_id: AircraftId,
    pub status: FlightStatus,
    /// Wrapped distance to the runway threshold.
    pub distance_to_runway: f64,
    /// Wrapped bearing to the runway threshold.
    pub heading_to_runway: f64,
    /// Signed degrees from the current heading to the runway heading.
    pub runway_heading_error: f64,
    pub in_approach_corridor: bool,
    pub over_airport: bool,
    /// Closest other active aircraft, if any.
    pub nearest_traffic: Option<NearestTraffic>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NearestTraffic {
    pub aircraft_id: AircraftId,
    pub distance: f64,
}

/// Facts for one aircraft against the given roster.
pub fn facts_for(
    aircraft: &Aircraft,
    traffic: &[Aircraft],
    airport: &Airport,
    rules: &FlightRules,
    canvas: CanvasSize,
) -> NavigationFacts {
    let nearest_traffic = traffic
        .iter()
        .filter(|o| o.id != aircraft.id && o.is_active())
        .map(|o| NearestTraffic {
            aircraft_id: o.id,
            distance: wrapped_distance(&aircraft.position, &o.position, canvas),
        })
        .min_by(|a, b| a.distance.total_cmp(&b.distance));

    NavigationFacts {
        aircraft_id: aircraft.id,
        status: aircraft.status,
        distance_to_runway: wrapped_distance(&aircraft.position, &airport.runway_start, canvas),
        heading_to_runway: wrapped_heading_to(&aircraft.position, &airport.runway_start, canvas),
        runway_heading_error: angle_difference(aircraft.heading, airport.runway_heading()),
        in_approach_corridor: airport.is_in_approach_zone(&aircraft.position, rules, canvas),
        over_airport: airport.is_over_airport(&aircraft.position, rules, canvas),
        nearest_traffic,
    }
}

/// Facts for every active aircraft in the roster, ordered by id.
pub fn picture(
    traffic: &[Aircraft],
    airport: &Airport,
    rules: &FlightRules,
    canvas: CanvasSize,
) -> Vec<NavigationFacts> {
    traffic
        .iter()
        .filter(|a| a.is_active())
        .map(|a| facts_for(a, traffic, airport, rules, canvas))
        .collect()
}
