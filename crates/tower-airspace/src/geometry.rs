//! Geometry kernel.
//!
//! Headings are degrees with 0 along +x, increasing clockwise on a y-down
//! canvas, so moving along heading θ adds `(cos θ, sin θ)`. The canvas is a
//! torus: any distance or bearing between two points takes the shorter way
//! around each axis.

use glam::DVec2;

use tower_core::types::{CanvasSize, Position};

/// Normalize an angle into [0, 360).
pub fn normalize_angle(degrees: f64) -> f64 {
    let a = degrees.rem_euclid(360.0);
    // rem_euclid can round tiny negatives up to exactly 360.0
    if a >= 360.0 {
        0.0
    } else {
        a
    }
}

/// Signed shortest rotation from `from` to `to`, in [-180, 180].
pub fn angle_difference(from: f64, to: f64) -> f64 {
    let d = normalize_angle(to - from);
    if d > 180.0 {
        d - 360.0
    } else {
        d
    }
}

/// Euclidean distance, ignoring wrap-around.
pub fn distance(a: &Position, b: &Position) -> f64 {
    (b.x - a.x).hypot(b.y - a.y)
}

/// Per-axis delta from `from` to `to` along the shorter wrap-around path.
pub fn wrapped_delta(from: &Position, to: &Position, canvas: CanvasSize) -> (f64, f64) {
    (
        wrap_axis(to.x - from.x, canvas.width),
        wrap_axis(to.y - from.y, canvas.height),
    )
}

fn wrap_axis(delta: f64, extent: f64) -> f64 {
    let half = extent / 2.0;
    if delta > half {
        delta - extent
    } else if delta < -half {
        delta + extent
    } else {
        delta
    }
}

/// Distance along the shorter wrap-around path. Never exceeds `distance`.
pub fn wrapped_distance(a: &Position, b: &Position, canvas: CanvasSize) -> f64 {
    let (dx, dy) = wrapped_delta(a, b, canvas);
    dx.hypot(dy)
}

/// Heading from `from` toward `to`, ignoring wrap-around.
pub fn heading_to(from: &Position, to: &Position) -> f64 {
    normalize_angle((to.y - from.y).atan2(to.x - from.x).to_degrees())
}

/// Heading from `from` toward `to` along the shorter wrap-around path.
pub fn wrapped_heading_to(from: &Position, to: &Position, canvas: CanvasSize) -> f64 {
    let (dx, dy) = wrapped_delta(from, to, canvas);
    normalize_angle(dy.atan2(dx).to_degrees())
}

/// Advance `distance` units along `heading`. No wrapping.
pub fn move_position(pos: &Position, heading: f64, distance: f64) -> Position {
    let (sin, cos) = heading.to_radians().sin_cos();
    Position::new(pos.x + distance * cos, pos.y + distance * sin)
}

/// Bring a position back onto the canvas, re-entering from the opposite edge.
pub fn wrap_position(pos: &Position, canvas: CanvasSize) -> Position {
    Position::new(
        wrap_coordinate(pos.x, canvas.width),
        wrap_coordinate(pos.y, canvas.height),
    )
}

fn wrap_coordinate(v: f64, extent: f64) -> f64 {
    let w = v.rem_euclid(extent);
    if w >= extent {
        0.0
    } else {
        w
    }
}

/// A point in runway-aligned coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunwayLocal {
    /// Distance along the runway from its start (negative = behind the threshold).
    pub along: f64,
    /// Signed perpendicular offset from the centerline (positive = right of track).
    pub across: f64,
}

/// Project `point` into the frame whose origin is `runway_start` and whose
/// +along axis points along `runway_angle` (degrees).
pub fn to_runway_local(point: &Position, runway_start: &Position, runway_angle: f64) -> RunwayLocal {
    rotate_into_runway(DVec2::from(*point) - DVec2::from(*runway_start), runway_angle)
}

/// Same frame as `to_runway_local`, but the offset from `runway_start`
/// takes the shorter way around the canvas.
pub fn wrapped_runway_local(
    point: &Position,
    runway_start: &Position,
    runway_angle: f64,
    canvas: CanvasSize,
) -> RunwayLocal {
    let (dx, dy) = wrapped_delta(runway_start, point, canvas);
    rotate_into_runway(DVec2::new(dx, dy), runway_angle)
}

fn rotate_into_runway(offset: DVec2, runway_angle: f64) -> RunwayLocal {
    let local = DVec2::from_angle(-runway_angle.to_radians()).rotate(offset);
    RunwayLocal {
        along: local.x,
        across: local.y,
    }
}
