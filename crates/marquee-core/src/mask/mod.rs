//! Selection masks for region-restricted pixel operations
//!
//! This module clears the alpha channel of every pixel that falls outside a
//! selection outline, leaving colour channels untouched.
//!
//! ## Shape Types
//!
//! - **Rectangle**: an axis-aligned marquee, masked through its four corners
//! - **Lasso**: a free-form polygon traced by the pointer
//!
//! ## Algorithm
//!
//! Membership is decided by ray casting: a horizontal ray from the test point
//! crosses the outline an odd number of times exactly when the point is inside.
//! A shape with fewer than 3 vertices constrains nothing, so masking with it
//! returns the buffer unchanged.

pub mod apply;
pub mod polygon;
pub mod shape;

pub use apply::{apply_mask, MaskParams};
pub use polygon::{compute_bounds, is_point_in_polygon};
pub use shape::SelectionShape;

/// Minimum vertex count for a polygon to enclose any area.
pub const MIN_POLYGON_POINTS: usize = 3;
