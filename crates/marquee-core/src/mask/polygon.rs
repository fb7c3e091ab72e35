//! Point-in-polygon testing and polygon bounds.

use super::MIN_POLYGON_POINTS;
use crate::{Bounds, Point};

/// Test whether `(x, y)` lies inside `polygon` by ray casting.
///
/// Each edge whose endpoints straddle the horizontal line through the point
/// (`(yi > y) != (yj > y)`) and whose crossing lies to the right of the point
/// flips the result. The half-open straddle test makes left and top edges
/// inclusive and right and bottom edges exclusive, so the square
/// `(0,0)-(10,0)-(10,10)-(0,10)` contains `[0, 10) x [0, 10)`.
///
/// Polygons with fewer than 3 vertices contain nothing.
pub fn is_point_in_polygon(x: f64, y: f64, polygon: &[Point]) -> bool {
    if polygon.len() < MIN_POLYGON_POINTS {
        return false;
    }

    let mut inside = false;
    let mut j = polygon.len() - 1;

    for i in 0..polygon.len() {
        let (pi, pj) = (polygon[i], polygon[j]);

        if (pi.y > y) != (pj.y > y) && x < (pj.x - pi.x) * (y - pi.y) / (pj.y - pi.y) + pi.x {
            inside = !inside;
        }

        j = i;
    }

    inside
}

/// Real-valued extents `(min_x, min_y, max_x, max_y)` of a shifted polygon.
///
/// Returns `None` for polygons too short to enclose an area.
pub(crate) fn extents(polygon: &[Point], offset_x: f64, offset_y: f64) -> Option<[f64; 4]> {
    if polygon.len() < MIN_POLYGON_POINTS {
        return None;
    }

    let init = [f64::INFINITY, f64::INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY];
    let ext = polygon.iter().fold(init, |[min_x, min_y, max_x, max_y], p| {
        let (x, y) = (p.x + offset_x, p.y + offset_y);
        [min_x.min(x), min_y.min(y), max_x.max(x), max_y.max(y)]
    });

    Some(ext)
}

/// Compute the integer bounds of `polygon` shifted by `(offset_x, offset_y)`.
///
/// The origin is floored and the size is `ceil(max - min)`. Polygons with
/// fewer than 3 vertices yield zero-sized bounds at the origin.
pub fn compute_bounds(polygon: &[Point], offset_x: f64, offset_y: f64) -> Bounds {
    match extents(polygon, offset_x, offset_y) {
        Some([min_x, min_y, max_x, max_y]) => Bounds::from_extents(min_x, min_y, max_x, max_y),
        None => Bounds::default(),
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
