//! Marquee Core - Selection and transform pixel engine
//!
//! This crate provides the pixel-level machinery behind selection and
//! free-transform tools: polygon masking, affine resampling at two quality
//! levels, and a bridge that runs either job inline or on a background thread.
//!
//! # Coordinate System
//!
//! - Canvas coordinates are real-valued, origin at the top-left corner
//! - Pixel `(x, y)` of a buffer placed at `Bounds { x: bx, y: by, .. }` sits at
//!   canvas coordinate `(bx + x, by + y)`
//! - Rotation angles are in radians

pub mod bridge;
pub mod buffer;
pub mod cache;
pub mod mask;
pub mod transform;

pub use bridge::{
    BridgeConfig, Dispatch, ExecutionBridge, ExecutionError, ExecutionMode, ExecutionPreference,
    Job,
};
pub use buffer::{PixelBuffer, PixelBufferError};
pub use cache::SnapshotCache;
pub use mask::{apply_mask, compute_bounds, is_point_in_polygon, MaskParams, SelectionShape};
pub use transform::{
    transform_image, transformed_bounds, AffineTransform, ResampleMethod, Scale, TransformJob,
    TransformMode, TransformOutput, TransformState,
};

use serde::{Deserialize, Serialize};

/// A real-valued 2D coordinate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Integer-aligned axis-aligned rectangle on the canvas.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Bounds {
    /// Left edge (canvas pixels)
    pub x: i32,
    /// Top edge (canvas pixels)
    pub y: i32,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl Bounds {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Build bounds from real extents.
    ///
    /// The origin is floored and the size is the ceiling of `max - min`, so
    /// `from_extents(0.5, 0.5, 10.5, 4.5)` is `{ x: 0, y: 0, width: 10, height: 4 }`.
    pub fn from_extents(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            x: min_x.floor() as i32,
            y: min_y.floor() as i32,
            width: (max_x - min_x).ceil().max(0.0) as u32,
            height: (max_y - min_y).ceil().max(0.0) as u32,
        }
    }

    /// Center of the rectangle in canvas coordinates.
    pub fn center(&self) -> Point {
        Point::new(
            self.x as f64 + self.width as f64 / 2.0,
            self.y as f64 + self.height as f64 / 2.0,
        )
    }

    /// The four corners, clockwise from the top-left.
    pub fn corners(&self) -> [Point; 4] {
        let (x0, y0) = (self.x as f64, self.y as f64);
        let (x1, y1) = (x0 + self.width as f64, y0 + self.height as f64);
        [
            Point::new(x0, y0),
            Point::new(x1, y0),
            Point::new(x1, y1),
            Point::new(x0, y1),
        ]
    }

    /// Check if the rectangle covers no pixels
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}
