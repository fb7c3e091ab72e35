//! WASM bindings for free-transform rendering.
//!
//! This module provides JavaScript bindings for scaling and rotating selected
//! pixels about a pivot, enabling both the live preview and the final commit.

use crate::types::{JsBounds, JsPixelBuffer};
use marquee_core::transform::{
    transformed_bounds as core_transformed_bounds, AffineTransform, ResampleMethod, Scale,
    TransformJob,
};
use marquee_core::{Bounds, ExecutionBridge, ExecutionError, Point};
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

/// JavaScript-compatible transform parameters.
///
/// Omitted fields default to the identity; an omitted pivot defaults to the
/// centre of the original bounds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct JsTransform {
    /// Pivot X in canvas coordinates
    pub center_x: Option<f64>,
    /// Pivot Y in canvas coordinates
    pub center_y: Option<f64>,
    pub scale_x: f64,
    pub scale_y: f64,
    /// Rotation in radians
    pub rotation: f64,
}

impl Default for JsTransform {
    fn default() -> Self {
        Self {
            center_x: None,
            center_y: None,
            scale_x: 1.0,
            scale_y: 1.0,
            rotation: 0.0,
        }
    }
}

impl JsTransform {
    fn to_affine(&self, original_bounds: Bounds) -> AffineTransform {
        let pivot = original_bounds.center();
        AffineTransform::new(
            Point::new(
                self.center_x.unwrap_or(pivot.x),
                self.center_y.unwrap_or(pivot.y),
            ),
            Scale::new(self.scale_x, self.scale_y),
            self.rotation,
        )
    }
}

fn parse_transform(value: JsValue) -> Result<JsTransform, JsValue> {
    serde_wasm_bindgen::from_value(value)
        .map_err(|e| JsValue::from_str(&format!("Invalid transform: {}", e)))
}

/// Result of a transform render: the new pixels and where they sit.
#[wasm_bindgen]
pub struct JsTransformResult {
    image: JsPixelBuffer,
    bounds: JsBounds,
}

#[wasm_bindgen]
impl JsTransformResult {
    /// The transformed pixels (another handle to the same WASM memory).
    pub fn image(&self) -> JsPixelBuffer {
        self.image.clone()
    }

    /// Canvas placement of the transformed pixels.
    #[wasm_bindgen(getter)]
    pub fn bounds(&self) -> JsBounds {
        self.bounds
    }
}

/// Canvas bounds of `original_bounds` after applying a transform.
///
/// # Example (TypeScript)
///
/// ```typescript
/// const box = transformed_bounds(new JsBounds(0, 0, 100, 100), { scale_x: 2, scale_y: 2 });
/// // box.x === -50, box.width === 200
/// ```
#[wasm_bindgen]
pub fn transformed_bounds(
    original_bounds: &JsBounds,
    transform: JsValue,
) -> Result<JsBounds, JsValue> {
    let transform = parse_transform(transform)?;
    Ok(bounds_for(*original_bounds, &transform))
}

fn bounds_for(original_bounds: JsBounds, transform: &JsTransform) -> JsBounds {
    let original: Bounds = original_bounds.into();
    core_transformed_bounds(&original, &transform.to_affine(original)).into()
}

/// Render a transformed copy of `image`.
///
/// # Arguments
///
/// * `image` - Pixels placed at `original_bounds` on the canvas
/// * `original_bounds` - Where `image` sat before the transform
/// * `transform` - JavaScript object with the JsTransform structure
/// * `high_quality` - Bicubic sampling (commit) instead of bilinear (preview)
///
/// # Example (TypeScript)
///
/// ```typescript
/// // Live preview while dragging a handle
/// const preview = transform_image(pixels, bounds, { rotation: angle }, false);
///
/// // Final render on release
/// const result = transform_image(pixels, bounds, { rotation: angle }, true);
/// ctx.putImageData(toImageData(result.image()), result.bounds.x, result.bounds.y);
/// ```
#[wasm_bindgen]
pub fn transform_image(
    image: &JsPixelBuffer,
    original_bounds: &JsBounds,
    transform: JsValue,
    high_quality: bool,
) -> Result<JsTransformResult, JsValue> {
    let transform = parse_transform(transform)?;
    render(image, *original_bounds, &transform, high_quality)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

fn render(
    image: &JsPixelBuffer,
    original_bounds: JsBounds,
    transform: &JsTransform,
    high_quality: bool,
) -> Result<JsTransformResult, ExecutionError> {
    let original: Bounds = original_bounds.into();
    let method = if high_quality {
        ResampleMethod::Bicubic
    } else {
        ResampleMethod::Bilinear
    };

    let job = TransformJob {
        source: image.to_buffer(),
        transform: transform.to_affine(original),
        original_bounds: original,
        method,
    };

    let output = ExecutionBridge::default().dispatch(job).wait()?;
    Ok(JsTransformResult {
        image: JsPixelBuffer::from_buffer(output.buffer),
        bounds: output.bounds.into(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Create a simple test image.
    fn test_image(width: u32, height: u32) -> JsPixelBuffer {
        let pixels: Vec<u8> = (0..width * height)
            .flat_map(|i| [(i % 256) as u8, (i * 3 % 256) as u8, 40, 255])
            .collect();
        JsPixelBuffer::try_new(width, height, pixels).unwrap()
    }

    #[test]
    fn test_js_transform_default_is_identity() {
        let t = JsTransform::default();
        let affine = t.to_affine(Bounds::new(0, 0, 10, 20));
        assert!(affine.is_identity());
        assert_eq!(affine.center, Point::new(5.0, 10.0));
    }

    #[test]
    fn test_explicit_pivot() {
        let t = JsTransform {
            center_x: Some(1.0),
            center_y: Some(2.0),
            ..Default::default()
        };
        assert_eq!(t.to_affine(Bounds::new(0, 0, 10, 10)).center, Point::new(1.0, 2.0));
    }

    #[test]
    fn test_bounds_for_scale_up() {
        let t = JsTransform {
            scale_x: 2.0,
            scale_y: 2.0,
            ..Default::default()
        };
        let bounds = bounds_for(JsBounds::new(0, 0, 100, 100), &t);
        assert_eq!(bounds, JsBounds::new(-50, -50, 200, 200));
    }

    #[test]
    fn test_bounds_for_quarter_turn() {
        let t = JsTransform {
            rotation: std::f64::consts::FRAC_PI_2,
            ..Default::default()
        };
        let bounds = bounds_for(JsBounds::new(0, 0, 100, 50), &t);
        assert_eq!(bounds.width(), 50);
        assert_eq!(bounds.height(), 100);
    }

    #[test]
    fn test_render_identity_no_change() {
        let img = test_image(8, 6);
        let bounds = JsBounds::new(3, 4, 8, 6);
        let result = render(&img, bounds, &JsTransform::default(), true).unwrap();
        assert_eq!(result.bounds(), JsBounds::new(3, 4, 8, 6));
        assert_eq!(result.image().pixels(), img.pixels());
    }

    #[test]
    fn test_render_bilinear_vs_bicubic() {
        let img = test_image(10, 10);
        let t = JsTransform {
            rotation: 0.3,
            scale_x: 1.5,
            ..Default::default()
        };
        let bounds = JsBounds::new(0, 0, 10, 10);
        let preview = render(&img, bounds, &t, false).unwrap();
        let commit = render(&img, bounds, &t, true).unwrap();

        // Same placement regardless of filter
        assert_eq!(preview.bounds(), commit.bounds());
        assert_eq!(preview.image().width(), commit.image().width());
    }

    #[test]
    fn test_render_huge_scale_is_an_error() {
        let img = test_image(100, 100);
        let t = JsTransform {
            scale_x: 1e5,
            scale_y: 1e5,
            ..Default::default()
        };
        let err = render(&img, JsBounds::new(0, 0, 100, 100), &t, false).err().unwrap();
        assert!(matches!(err, ExecutionError::Allocation(_)));
    }

    #[test]
    fn test_render_zero_scale_does_not_fail() {
        let img = test_image(4, 4);
        let t = JsTransform {
            scale_x: 0.0,
            ..Default::default()
        };
        let result = render(&img, JsBounds::new(0, 0, 4, 4), &t, false).unwrap();
        assert!(result.bounds().width() <= 1);
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_transformed_bounds_from_js_object() {
        let t = serde_wasm_bindgen::to_value(&JsTransform {
            scale_x: 2.0,
            scale_y: 2.0,
            ..Default::default()
        })
        .unwrap();
        let bounds = transformed_bounds(&JsBounds::new(0, 0, 100, 100), t).unwrap();
        assert_eq!(bounds, JsBounds::new(-50, -50, 200, 200));
    }

    #[wasm_bindgen_test]
    fn test_transform_image_empty_object_is_identity() {
        let img = JsPixelBuffer::try_new(2, 2, (0..16).collect()).unwrap();
        let result =
            transform_image(&img, &JsBounds::new(0, 0, 2, 2), js_sys::Object::new().into(), false)
                .unwrap();
        assert_eq!(result.image().pixels(), img.pixels());
    }

    #[wasm_bindgen_test]
    fn test_transform_image_invalid_params() {
        let img = JsPixelBuffer::transparent(2, 2).unwrap();
        let bounds = JsBounds::new(0, 0, 2, 2);
        let err = transform_image(&img, &bounds, JsValue::from_str("spin"), false).unwrap_err();
        assert!(err.as_string().unwrap_or_default().contains("Invalid transform"));
    }
}
