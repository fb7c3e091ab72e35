//! Affine transformation of pixel buffers: scale and rotation about a pivot.
//!
//! This module backs the free-transform, scale and rotate tools. A gesture
//! starts a [`TransformState`] holding an immutable snapshot of the selected
//! pixels; every drag event derives a new state, previews are rendered with
//! bilinear sampling and the commit is rendered once with bicubic sampling.
//!
//! # Transform Order
//!
//! The forward mapping applied to canvas points is:
//! 1. Translate so the pivot is at the origin
//! 2. Scale per axis
//! 3. Rotate
//! 4. Translate back
//!
//! Rendering walks the output pixels and uses the inverse mapping (unrotate,
//! then unscale) to find where each one comes from in the source.
//!
//! # Coordinate System
//!
//! - Rotation angles are in radians; positive turns clockwise on a y-down canvas
//! - Pivot and bounds are in canvas coordinates
//! - Source buffers are addressed relative to their original bounds

mod affine;
mod engine;
mod resample;
mod state;

pub use affine::{inverse_transform, transformed_bounds, AffineTransform, Scale, MIN_SCALE};
pub use engine::{transform_image, TransformJob, TransformOutput};
pub use resample::{bicubic, bilinear, cubic_weight, ResampleMethod};
pub use state::{TransformMode, TransformState};
