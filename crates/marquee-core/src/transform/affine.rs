//! Pivot-centred scale and rotation.
//!
//! For a pivot `c`, scale `(sx, sy)` and angle θ, the forward transform is:
//! ```text
//! x' = ((x - cx) * sx) * cos(θ) - ((y - cy) * sy) * sin(θ) + cx
//! y' = ((x - cx) * sx) * sin(θ) + ((y - cy) * sy) * cos(θ) + cy
//! ```
//! and the inverse first rotates by `-θ`, then divides by the scale.

use serde::{Deserialize, Serialize};

use crate::{Bounds, Point};

/// Smallest scale magnitude accepted; smaller values are clamped to it.
pub const MIN_SCALE: f64 = 1e-4;

/// Corner coordinates this close to an integer are snapped before rounding,
/// so quarter turns do not grow the bounds by a pixel of trig noise.
const SNAP_EPSILON: f64 = 1e-9;

/// Per-axis scale factor. Negative values mirror along that axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Scale {
    pub x: f64,
    pub y: f64,
}

impl Default for Scale {
    fn default() -> Self {
        Self { x: 1.0, y: 1.0 }
    }
}

impl Scale {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn uniform(s: f64) -> Self {
        Self { x: s, y: s }
    }

    /// Replace near-zero (or NaN) components with `±MIN_SCALE`.
    pub fn clamped(self) -> Self {
        Self {
            x: clamp_component(self.x),
            y: clamp_component(self.y),
        }
    }
}

#[inline]
fn clamp_component(s: f64) -> f64 {
    if s.abs() >= MIN_SCALE {
        s
    } else if s < 0.0 {
        -MIN_SCALE
    } else {
        MIN_SCALE
    }
}

/// A scale followed by a rotation, both about `center`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AffineTransform {
    /// Pivot in canvas coordinates
    pub center: Point,
    /// Scale applied before rotation
    pub scale: Scale,
    /// Rotation in radians
    pub rotation: f64,
}

impl AffineTransform {
    pub fn new(center: Point, scale: Scale, rotation: f64) -> Self {
        Self {
            center,
            scale,
            rotation,
        }
    }

    /// The transform that leaves every point in place.
    pub fn identity(center: Point) -> Self {
        Self::new(center, Scale::default(), 0.0)
    }

    /// Check if the transform maps every point to itself.
    pub fn is_identity(&self) -> bool {
        self.scale == Scale::default() && self.rotation == 0.0
    }

    /// Map a point forward: scale, then rotate about the pivot.
    pub fn forward(&self, p: Point) -> Point {
        let scale = self.scale.clamped();
        let (sin, cos) = self.rotation.sin_cos();

        let sx = (p.x - self.center.x) * scale.x;
        let sy = (p.y - self.center.y) * scale.y;

        Point::new(
            sx * cos - sy * sin + self.center.x,
            sx * sin + sy * cos + self.center.y,
        )
    }

    /// Output-to-input mapping for this transform.
    pub fn inverse(&self) -> impl Fn(f64, f64) -> Point {
        inverse_transform(self.center, self.scale, self.rotation)
    }
}

/// Build the output-to-input coordinate mapping.
///
/// The returned closure subtracts the pivot, rotates by `-rotation`, divides by
/// the (clamped) scale and adds the pivot back. Trigonometry and reciprocals are
/// computed once here rather than per pixel.
pub fn inverse_transform(center: Point, scale: Scale, rotation: f64) -> impl Fn(f64, f64) -> Point {
    let scale = scale.clamped();
    let (sin, cos) = (-rotation).sin_cos();
    let inv_sx = 1.0 / scale.x;
    let inv_sy = 1.0 / scale.y;

    move |x, y| {
        let dx = x - center.x;
        let dy = y - center.y;

        let rx = dx * cos - dy * sin;
        let ry = dx * sin + dy * cos;

        Point::new(rx * inv_sx + center.x, ry * inv_sy + center.y)
    }
}

#[inline]
fn snap(v: f64) -> f64 {
    let r = v.round();
    if (v - r).abs() < SNAP_EPSILON {
        r
    } else {
        v
    }
}

/// Compute the canvas bounds of `original_bounds` after `transform`.
///
/// The four corners are mapped forward and the axis-aligned box around them is
/// floored/ceiled to whole pixels. An identity transform returns the input
/// unchanged.
pub fn transformed_bounds(original_bounds: &Bounds, transform: &AffineTransform) -> Bounds {
    // Fast path: nothing moves
    if transform.is_identity() {
        return *original_bounds;
    }

    let init = [f64::INFINITY, f64::INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY];
    let [min_x, min_y, max_x, max_y] = original_bounds
        .corners()
        .iter()
        .map(|&corner| transform.forward(corner))
        .fold(init, |[min_x, min_y, max_x, max_y], p| {
            [min_x.min(p.x), min_y.min(p.y), max_x.max(p.x), max_y.max(p.y)]
        });

    Bounds {
        x: snap(min_x).floor() as i32,
        y: snap(min_y).floor() as i32,
        width: snap(max_x - min_x).ceil().max(0.0) as u32,
        height: snap(max_y - min_y).ceil().max(0.0) as u32,
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
