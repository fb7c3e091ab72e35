//! Interactive transform gestures.
//!
//! A [`TransformState`] lives from the moment a transform handle is grabbed
//! until the result is committed or cancelled. Each pointer move derives a new
//! state from the previous one; the pixel snapshot is shared between them and
//! never modified, so repeated updates never accumulate resampling error.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::affine::{transformed_bounds, AffineTransform, Scale};
use super::engine::{transform_image, TransformJob, TransformOutput};
use super::resample::ResampleMethod;
use crate::buffer::{PixelBuffer, PixelBufferError};
use crate::{Bounds, Point};

/// Which handle drives the gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransformMode {
    /// Corner handles scale, the outer ring rotates
    #[default]
    FreeTransform,
    /// Scale only; rotation updates are ignored
    Scale,
    /// Rotate only; scale updates are ignored
    Rotate,
}

impl TransformMode {
    fn allows_scale(self) -> bool {
        matches!(self, TransformMode::FreeTransform | TransformMode::Scale)
    }

    fn allows_rotation(self) -> bool {
        matches!(self, TransformMode::FreeTransform | TransformMode::Rotate)
    }
}

/// State of an in-progress transform gesture.
#[derive(Debug, Clone)]
pub struct TransformState {
    mode: TransformMode,
    transform: AffineTransform,
    original_bounds: Bounds,
    original_buffer: Option<Arc<PixelBuffer>>,
}

impl TransformState {
    /// Start a gesture on the pixels at `original_bounds`.
    ///
    /// The pivot is the centre of `original_bounds` and stays fixed for the
    /// lifetime of the state. `original_buffer` is `None` when the selection
    /// has no pixels to move (only the outline is transformed).
    pub fn begin(
        mode: TransformMode,
        original_bounds: Bounds,
        original_buffer: Option<PixelBuffer>,
    ) -> Self {
        Self {
            mode,
            transform: AffineTransform::identity(original_bounds.center()),
            original_bounds,
            original_buffer: original_buffer.map(Arc::new),
        }
    }

    pub fn mode(&self) -> TransformMode {
        self.mode
    }

    pub fn transform(&self) -> &AffineTransform {
        &self.transform
    }

    pub fn center(&self) -> Point {
        self.transform.center
    }

    pub fn scale(&self) -> Scale {
        self.transform.scale
    }

    pub fn rotation(&self) -> f64 {
        self.transform.rotation
    }

    pub fn original_bounds(&self) -> Bounds {
        self.original_bounds
    }

    /// The pixel snapshot taken when the gesture began.
    pub fn original_buffer(&self) -> Option<&PixelBuffer> {
        self.original_buffer.as_deref()
    }

    /// Check if the current transform leaves the pixels in place.
    pub fn is_identity(&self) -> bool {
        self.transform.is_identity()
    }

    /// Replace the scale outright.
    pub fn with_scale(&self, scale: Scale) -> Self {
        if !self.mode.allows_scale() {
            return self.clone();
        }
        let mut next = self.clone();
        next.transform.scale = scale.clamped();
        next
    }

    /// Replace the rotation outright.
    pub fn with_rotation(&self, rotation: f64) -> Self {
        if !self.mode.allows_rotation() {
            return self.clone();
        }
        let mut next = self.clone();
        next.transform.rotation = rotation;
        next
    }

    /// Compose a scale delta from a handle drag (multiplicative).
    pub fn with_scale_delta(&self, dx: f64, dy: f64) -> Self {
        let current = self.transform.scale;
        self.with_scale(Scale::new(current.x * dx, current.y * dy))
    }

    /// Compose a rotation delta from a handle drag (additive).
    pub fn with_rotation_delta(&self, delta: f64) -> Self {
        self.with_rotation(self.transform.rotation + delta)
    }

    /// Canvas bounds the transformed pixels will occupy.
    pub fn bounds(&self) -> Bounds {
        transformed_bounds(&self.original_bounds, &self.transform)
    }

    /// Render a fast bilinear preview of the current transform.
    pub fn preview(&self) -> Result<Option<TransformOutput>, PixelBufferError> {
        self.render(ResampleMethod::Bilinear)
    }

    /// Render with an explicit method without ending the gesture.
    ///
    /// `Ok(None)` when the gesture carries no pixels.
    pub fn render(
        &self,
        method: ResampleMethod,
    ) -> Result<Option<TransformOutput>, PixelBufferError> {
        let Some(source) = self.original_buffer.as_deref() else {
            return Ok(None);
        };
        transform_image(source, &self.transform, self.original_bounds, method).map(Some)
    }

    /// End the gesture, rendering the final pixels with bicubic sampling.
    ///
    /// The snapshot is released once rendering completes.
    pub fn commit(self) -> Result<Option<TransformOutput>, PixelBufferError> {
        self.render(ResampleMethod::Bicubic)
    }

    /// End the gesture without rendering, returning where the pixels were.
    pub fn cancel(self) -> Bounds {
        self.original_bounds
    }

    /// Package the gesture as a job for the execution bridge.
    ///
    /// The snapshot is moved out when this is the last state referencing it,
    /// and copied otherwise.
    pub fn into_job(self, method: ResampleMethod) -> Option<TransformJob> {
        let snapshot = self.original_buffer?;
        let source = Arc::try_unwrap(snapshot).unwrap_or_else(|shared| (*shared).clone());

        Some(TransformJob {
            source,
            transform: self.transform,
            original_bounds: self.original_bounds,
            method,
        })
    }
}
