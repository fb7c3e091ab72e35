//! Rendering a transformed buffer by inverse mapping.
//!
//! For each pixel of the output image we find the source position it comes
//! from and sample there, so every output pixel is written exactly once and
//! no holes appear when scaling up.

use super::affine::{transformed_bounds, AffineTransform};
use super::resample::ResampleMethod;
use crate::buffer::{PixelBuffer, PixelBufferError, CHANNELS};
use crate::Bounds;

/// Offset from a pixel's top-left corner to its centre. Pixel `i` covers
/// `[i, i + 1)` and is sampled at its centre, so sampler coordinate `i`
/// corresponds to canvas position `i + 0.5`.
const PIXEL_CENTER: f64 = 0.5;

/// A rendered transform: the new pixels and where they sit on the canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct TransformOutput {
    pub buffer: PixelBuffer,
    pub bounds: Bounds,
}

/// Everything needed to render one transform, owned so it can be moved to a
/// background worker.
#[derive(Debug, Clone, PartialEq)]
pub struct TransformJob {
    /// Pixels being transformed, addressed relative to `original_bounds`
    pub source: PixelBuffer,
    pub transform: AffineTransform,
    /// Canvas placement of `source` before the transform
    pub original_bounds: Bounds,
    pub method: ResampleMethod,
}

impl TransformJob {
    /// Render the job.
    pub fn run(self) -> Result<TransformOutput, PixelBufferError> {
        transform_image(
            &self.source,
            &self.transform,
            self.original_bounds,
            self.method,
        )
    }
}

/// Apply `transform` to `source`, producing a new buffer sized to the
/// transformed bounds.
///
/// # Arguments
///
/// * `source` - Pixels placed at `original_bounds` on the canvas
/// * `transform` - Scale and rotation about the pivot
/// * `original_bounds` - Canvas placement of `source` before the transform
/// * `method` - Bilinear for previews, bicubic for commits
///
/// # Returns
///
/// The output buffer (transparent where nothing maps) and its canvas bounds.
/// Identical inputs always give byte-identical output.
///
/// # Errors
///
/// Fails when the transformed bounds need more memory than can be
/// allocated, e.g. after an extreme scale. The source is left untouched.
pub fn transform_image(
    source: &PixelBuffer,
    transform: &AffineTransform,
    original_bounds: Bounds,
    method: ResampleMethod,
) -> Result<TransformOutput, PixelBufferError> {
    let bounds = transformed_bounds(&original_bounds, transform);
    let mut output = PixelBuffer::try_transparent(bounds.width, bounds.height)?;

    if bounds.is_empty() || source.is_empty() {
        return Ok(TransformOutput {
            buffer: output,
            bounds,
        });
    }

    let inverse = transform.inverse();

    let (src_w, src_h) = (source.width() as f64, source.height() as f64);
    let (origin_x, origin_y) = (original_bounds.x as f64, original_bounds.y as f64);
    let row_len = bounds.width as usize * CHANNELS;

    for (out_y, row) in output.data_mut().chunks_exact_mut(row_len).enumerate() {
        let canvas_y = bounds.y as f64 + out_y as f64 + PIXEL_CENTER;

        for (out_x, px) in row.chunks_exact_mut(CHANNELS).enumerate() {
            let canvas_x = bounds.x as f64 + out_x as f64 + PIXEL_CENTER;

            // Where this pixel centre was before the transform, buffer-local
            let src = inverse(canvas_x, canvas_y);
            let local_x = src.x - origin_x;
            let local_y = src.y - origin_y;

            // Only pixels whose centre lands on the source footprint are drawn
            if (0.0..src_w).contains(&local_x) && (0.0..src_h).contains(&local_y) {
                let sample = method.sample(source, local_x - PIXEL_CENTER, local_y - PIXEL_CENTER);
                px.copy_from_slice(&sample);
            }
        }
    }

    Ok(TransformOutput {
        buffer: output,
        bounds,
    })
}
