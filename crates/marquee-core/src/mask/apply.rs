//! Alpha masking of a pixel buffer against a polygon
//!
//! The buffer covers a window of the canvas whose top-left pixel sits at
//! `(bounds_x, bounds_y)`. The polygon was authored in canvas space before
//! the selection was dragged by `(offset_x, offset_y)`, so each pixel is
//! shifted back by the drag offset before it is tested.

use super::polygon::{extents, is_point_in_polygon};
use crate::buffer::{PixelBuffer, CHANNELS};
use crate::Point;

/// Inputs for [`apply_mask`].
///
/// The source buffer is owned by the params so the job can move across a
/// thread boundary without copying pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct MaskParams {
    /// Pixels to mask; width and height come from the buffer
    pub source: PixelBuffer,
    /// Canvas X of the buffer's left column
    pub bounds_x: f64,
    /// Canvas Y of the buffer's top row
    pub bounds_y: f64,
    /// Current horizontal drag offset of the selection
    pub offset_x: f64,
    /// Current vertical drag offset of the selection
    pub offset_y: f64,
    /// Selection outline in canvas coordinates
    pub polygon: Vec<Point>,
}

impl MaskParams {
    /// Create params for a buffer at the canvas origin with no drag offset.
    pub fn new(source: PixelBuffer, polygon: Vec<Point>) -> Self {
        Self {
            source,
            bounds_x: 0.0,
            bounds_y: 0.0,
            offset_x: 0.0,
            offset_y: 0.0,
            polygon,
        }
    }

    /// Place the buffer's top-left pixel at `(x, y)` on the canvas.
    pub fn with_origin(mut self, x: f64, y: f64) -> Self {
        self.bounds_x = x;
        self.bounds_y = y;
        self
    }

    /// Set the drag offset of the selection outline.
    pub fn with_offset(mut self, x: f64, y: f64) -> Self {
        self.offset_x = x;
        self.offset_y = y;
        self
    }

    /// Convert flattened `[x0, y0, x1, y1, ...]` pairs into points.
    ///
    /// A trailing unpaired value is ignored.
    pub fn flat_points(flat: &[f64]) -> Vec<Point> {
        flat.chunks_exact(2)
            .map(|pair| Point::new(pair[0], pair[1]))
            .collect()
    }
}

/// Clear the alpha of every pixel outside the polygon.
///
/// Pixel `(lx, ly)` is tested at canvas point
/// `(bounds_x + lx - offset_x, bounds_y + ly - offset_y)`. Colour channels are
/// never modified. A polygon with fewer than 3 vertices leaves the buffer
/// untouched.
///
/// # Performance
/// - Whole rows above or below the polygon are cleared without edge tests
/// - O(pixels × vertices) for rows that intersect the polygon
pub fn apply_mask(params: MaskParams) -> PixelBuffer {
    let MaskParams {
        mut source,
        bounds_x,
        bounds_y,
        offset_x,
        offset_y,
        polygon,
    } = params;

    // Degenerate outline: nothing to constrain
    let Some([_, min_y, _, max_y]) = extents(&polygon, 0.0, 0.0) else {
        return source;
    };

    let width = source.width() as usize;
    if width == 0 {
        return source;
    }

    for (ly, row) in source
        .data_mut()
        .chunks_exact_mut(width * CHANNELS)
        .enumerate()
    {
        let cy = bounds_y + ly as f64 - offset_y;

        // No edge straddles this row, so every pixel in it is outside
        if cy < min_y || cy >= max_y {
            for px in row.chunks_exact_mut(CHANNELS) {
                px[3] = 0;
            }
            continue;
        }

        for (lx, px) in row.chunks_exact_mut(CHANNELS).enumerate() {
            let cx = bounds_x + lx as f64 - offset_x;
            if !is_point_in_polygon(cx, cy, &polygon) {
                px[3] = 0;
            }
        }
    }

    source
}


// ============================================================================
// Property-Based Tests
// ============================================================================
