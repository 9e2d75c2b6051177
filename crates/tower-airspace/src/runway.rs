//! Airport geometry and zone classification.
//!
//! All three zones are rectangles tested in runway-local coordinates, so
//! they stay consistent with each other for any runway orientation. The
//! offset from the threshold wraps, so a zone crossing a canvas edge
//! continues on the opposite side:
//!
//! - runway: `along ∈ [0, length (+ overshoot)]`, `|across| ≤ width / 2`
//! - airport zone: the runway rectangle padded by a margin on every side
//! - approach corridor: `along ∈ [-approach_length, 0]`,
//!   `|across| ≤ width × multiplier / 2`

use serde::{Deserialize, Serialize};

use tower_core::config::FlightRules;
use tower_core::constants::*;
use tower_core::state::AirportView;
use tower_core::types::{CanvasSize, Position};

use crate::geometry::{distance, heading_to, move_position, wrapped_runway_local, RunwayLocal};

/// Single-runway airport. Fixed for a session; rebuilt only on canvas resize.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Airport {
    /// Visual center.
    pub position: Position,
    /// Landing threshold. Aircraft touch down moving from start toward end.
    pub runway_start: Position,
    pub runway_end: Position,
    pub runway_width: f64,
}

impl Airport {
    /// Airport centered between the runway endpoints.
    pub fn new(runway_start: Position, runway_end: Position, runway_width: f64) -> Self {
        Self {
            position: runway_start.midpoint(&runway_end),
            runway_start,
            runway_end,
            runway_width,
        }
    }

    /// Default layout for a canvas: runway right of center, landing heading
    /// RUNWAY_HEADING, so arriving traffic comes from the left.
    pub fn for_canvas(canvas: CanvasSize) -> Self {
        let center = Position::new(
            canvas.width * AIRPORT_X_FRACTION,
            canvas.height * AIRPORT_Y_FRACTION,
        );
        let half = RUNWAY_LENGTH / 2.0;
        let start = move_position(&center, RUNWAY_HEADING + 180.0, half);
        let end = move_position(&center, RUNWAY_HEADING, half);
        Self::new(start, end, RUNWAY_WIDTH)
    }

    pub fn runway_length(&self) -> f64 {
        distance(&self.runway_start, &self.runway_end)
    }

    /// The single valid landing heading (start -> end).
    pub fn runway_heading(&self) -> f64 {
        heading_to(&self.runway_start, &self.runway_end)
    }

    pub fn runway_center(&self) -> Position {
        self.runway_start.midpoint(&self.runway_end)
    }

    /// Project a point into runway-local coordinates, measured from the
    /// threshold along the shorter way around the canvas.
    pub fn to_local(&self, point: &Position, canvas: CanvasSize) -> RunwayLocal {
        wrapped_runway_local(point, &self.runway_start, self.runway_heading(), canvas)
    }

    /// On the runway rectangle, optionally extended past the end by the
    /// overshoot allowance.
    pub fn is_on_runway(
        &self,
        pos: &Position,
        rules: &FlightRules,
        canvas: CanvasSize,
        extended: bool,
    ) -> bool {
        let extension = if extended {
            rules.runway_overshoot_extension
        } else {
            0.0
        };
        is_on_runway(
            pos,
            &self.runway_start,
            &self.runway_end,
            self.runway_width,
            extension,
            canvas,
        )
    }

    /// Inside the airport exclusion zone.
    pub fn is_over_airport(&self, pos: &Position, rules: &FlightRules, canvas: CanvasSize) -> bool {
        is_over_airport(
            pos,
            &self.runway_start,
            &self.runway_end,
            self.runway_width,
            rules.airport_zone_margin,
            canvas,
        )
    }

    /// Inside the approach corridor behind the threshold.
    pub fn is_in_approach_zone(
        &self,
        pos: &Position,
        rules: &FlightRules,
        canvas: CanvasSize,
    ) -> bool {
        is_in_approach_zone(
            pos,
            &self.runway_start,
            &self.runway_end,
            self.runway_width,
            rules.approach_zone_length,
            rules.approach_width_multiplier,
            canvas,
        )
    }

    /// Far end of the approach corridor.
    pub fn approach_entry(&self, rules: &FlightRules) -> Position {
        move_position(
            &self.runway_start,
            self.runway_heading() + 180.0,
            rules.approach_zone_length,
        )
    }

    pub fn approach_width(&self, rules: &FlightRules) -> f64 {
        self.runway_width * rules.approach_width_multiplier
    }

    pub fn view(&self, rules: &FlightRules) -> AirportView {
        AirportView {
            position: self.position,
            runway_start: self.runway_start,
            runway_end: self.runway_end,
            runway_width: self.runway_width,
            runway_length: self.runway_length(),
            runway_heading: self.runway_heading(),
            approach_entry: self.approach_entry(rules),
            approach_width: self.approach_width(rules),
        }
    }
}

/// Point lies on the runway rectangle, optionally extended past the end.
pub fn is_on_runway(
    pos: &Position,
    runway_start: &Position,
    runway_end: &Position,
    width: f64,
    extension: f64,
    canvas: CanvasSize,
) -> bool {
    let angle = heading_to(runway_start, runway_end);
    let local = wrapped_runway_local(pos, runway_start, angle, canvas);
    let length = distance(runway_start, runway_end);
    (0.0..=length + extension).contains(&local.along) && local.across.abs() <= width / 2.0
}

/// Point lies in the runway rectangle padded by `margin` on all sides.
pub fn is_over_airport(
    pos: &Position,
    runway_start: &Position,
    runway_end: &Position,
    width: f64,
    margin: f64,
    canvas: CanvasSize,
) -> bool {
    let angle = heading_to(runway_start, runway_end);
    let local = wrapped_runway_local(pos, runway_start, angle, canvas);
    let length = distance(runway_start, runway_end);
    (-margin..=length + margin).contains(&local.along)
        && local.across.abs() <= width / 2.0 + margin
}

/// Point lies in the corridor running `approach_length` back from the
/// threshold, `width × width_multiplier` wide.
pub fn is_in_approach_zone(
    pos: &Position,
    runway_start: &Position,
    runway_end: &Position,
    width: f64,
    approach_length: f64,
    width_multiplier: f64,
    canvas: CanvasSize,
) -> bool {
    let angle = heading_to(runway_start, runway_end);
    let local = wrapped_runway_local(pos, runway_start, angle, canvas);
    (-approach_length..=0.0).contains(&local.along)
        && local.across.abs() <= width * width_multiplier / 2.0
}
