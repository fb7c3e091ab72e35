//! Selection shapes
//!
//! A selection is either a rectangular marquee or a free-form lasso. Both
//! reduce to a polygon for masking, so the rest of the engine only deals in
//! vertex lists.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use super::apply::MaskParams;
use super::polygon::{compute_bounds, is_point_in_polygon};
use super::MIN_POLYGON_POINTS;
use crate::buffer::PixelBuffer;
use crate::{Bounds, Point};

/// The outline of an active selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SelectionShape {
    /// Axis-aligned rectangular marquee
    Rectangle { bounds: Bounds },
    /// Free-form polygon in canvas coordinates
    Lasso { points: Vec<Point> },
}

impl SelectionShape {
    /// Rectangle selection covering `bounds`.
    pub fn rectangle(bounds: Bounds) -> Self {
        SelectionShape::Rectangle { bounds }
    }

    /// Lasso selection through `points`.
    pub fn lasso(points: Vec<Point>) -> Self {
        SelectionShape::Lasso { points }
    }

    /// The outline as a vertex list. Rectangles yield their four corners.
    pub fn polygon(&self) -> Cow<'_, [Point]> {
        match self {
            SelectionShape::Rectangle { bounds } => Cow::Owned(bounds.corners().to_vec()),
            SelectionShape::Lasso { points } => Cow::Borrowed(points),
        }
    }

    /// Check if the outline has too few vertices to be a polygon.
    ///
    /// Only lassos with fewer than 3 points are degenerate, and masking with
    /// one changes nothing. An empty rectangle is still a four-corner outline:
    /// it selects no pixels, so masking with it clears every alpha.
    pub fn is_degenerate(&self) -> bool {
        match self {
            SelectionShape::Rectangle { .. } => false,
            SelectionShape::Lasso { points } => points.len() < MIN_POLYGON_POINTS,
        }
    }

    /// Check if a canvas point is inside the selection.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        is_point_in_polygon(x, y, &self.polygon())
    }

    /// Integer bounds of the outline after a drag of `(offset_x, offset_y)`.
    ///
    /// Degenerate lassos yield zero-sized bounds at the origin.
    pub fn bounds(&self, offset_x: f64, offset_y: f64) -> Bounds {
        compute_bounds(&self.polygon(), offset_x, offset_y)
    }

    /// Build masking params for a buffer placed at `(bounds_x, bounds_y)`.
    ///
    /// Degenerate shapes produce an empty polygon so masking is a no-op.
    pub fn mask_params(
        &self,
        source: PixelBuffer,
        bounds_x: f64,
        bounds_y: f64,
        offset_x: f64,
        offset_y: f64,
    ) -> MaskParams {
        let polygon = if self.is_degenerate() {
            Vec::new()
        } else {
            self.polygon().into_owned()
        };

        MaskParams::new(source, polygon)
            .with_origin(bounds_x, bounds_y)
            .with_offset(offset_x, offset_y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mask::apply_mask;

    #[test]
    fn test_rectangle_polygon() {
        let shape = SelectionShape::rectangle(Bounds::new(2, 3, 4, 5));
        let poly = shape.polygon();
        assert_eq!(poly.len(), 4);
        assert_eq!(poly[0], Point::new(2.0, 3.0));
        assert_eq!(poly[2], Point::new(6.0, 8.0));
    }

    #[test]
    fn test_rectangle_contains() {
        let shape = SelectionShape::rectangle(Bounds::new(0, 0, 10, 10));
        assert!(shape.contains(5.0, 5.0));
        assert!(shape.contains(0.0, 0.0));
        assert!(!shape.contains(10.0, 5.0));
    }

    #[test]
    fn test_lasso_degenerate() {
        assert!(SelectionShape::lasso(vec![]).is_degenerate());
        let segment = vec![Point::new(0.0, 0.0), Point::new(1.0, 1.0)];
        assert!(SelectionShape::lasso(segment).is_degenerate());
        assert!(!SelectionShape::lasso(vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(0.0, 1.0),
        ])
        .is_degenerate());
    }

    #[test]
    fn test_rectangle_bounds_offset() {
        let shape = SelectionShape::rectangle(Bounds::new(2, 3, 4, 5));
        assert_eq!(shape.bounds(1.0, -2.0), Bounds::new(3, 1, 4, 5));
    }

    #[test]
    fn test_lasso_bounds() {
        let shape = SelectionShape::lasso(vec![
            Point::new(0.5, 0.5),
            Point::new(4.0, 1.0),
            Point::new(2.0, 3.5),
        ]);
        assert_eq!(shape.bounds(0.0, 0.0), Bounds::new(0, 0, 4, 3));
    }

    #[test]
    fn test_degenerate_shape_mask_no_change() {
        let source = PixelBuffer::from_raw(2, 2, vec![50; 16]).unwrap();
        let shape = SelectionShape::lasso(vec![Point::new(0.0, 0.0)]);

        let result = apply_mask(shape.mask_params(source.clone(), 0.0, 0.0, 0.0, 0.0));
        assert_eq!(result, source);
    }

    #[test]
    fn test_rectangle_mask() {
        let source = PixelBuffer::from_raw(3, 1, vec![255; 12]).unwrap();
        let shape = SelectionShape::rectangle(Bounds::new(1, 0, 1, 1));

        let result = apply_mask(shape.mask_params(source, 0.0, 0.0, 0.0, 0.0));
        assert_eq!(result.pixel(0, 0)[3], 0);
        assert_eq!(result.pixel(1, 0)[3], 255);
        assert_eq!(result.pixel(2, 0)[3], 0);
    }

    #[test]
    fn test_empty_rectangle_masks_everything() {
        let shape = SelectionShape::rectangle(Bounds::new(1, 1, 0, 0));
        assert!(!shape.is_degenerate());
        assert_eq!(shape.bounds(0.0, 0.0), Bounds::new(1, 1, 0, 0));

        let source = PixelBuffer::from_raw(3, 3, vec![255; 36]).unwrap();
        let result = apply_mask(shape.mask_params(source, 0.0, 0.0, 0.0, 0.0));
        for y in 0..3 {
            for x in 0..3 {
                assert_eq!(result.pixel(x, y), [255, 255, 255, 0]);
            }
        }
    }

    #[test]
    fn test_zero_width_rectangle_masks_everything() {
        let shape = SelectionShape::rectangle(Bounds::new(1, 0, 0, 2));
        let source = PixelBuffer::from_raw(3, 2, vec![255; 24]).unwrap();

        let result = apply_mask(shape.mask_params(source, 0.0, 0.0, 0.0, 0.0));
        assert!(result.data().chunks_exact(4).all(|px| px[3] == 0));
    }
}
