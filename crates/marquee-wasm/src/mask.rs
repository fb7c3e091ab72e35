//! Selection mask WASM bindings.
//!
//! This module provides JavaScript bindings for polygon selections: clipping a
//! pixel buffer to a lasso or rectangle outline, hit-testing points, and
//! measuring an outline's bounds.

use crate::types::{JsBounds, JsPixelBuffer};
use marquee_core::mask::{
    apply_mask as core_apply_mask, compute_bounds as core_compute_bounds,
    is_point_in_polygon as core_is_point_in_polygon, MaskParams,
};
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

/// JavaScript-compatible mask parameters.
///
/// Passed from TypeScript as a plain object via serde_wasm_bindgen. Missing
/// fields default to zero (or an empty outline, which leaves the image
/// untouched).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct JsMaskParams {
    /// Canvas X of the buffer's top-left pixel
    pub bounds_x: f64,
    /// Canvas Y of the buffer's top-left pixel
    pub bounds_y: f64,
    /// Translation applied to the outline
    pub offset_x: f64,
    pub offset_y: f64,
    /// Outline vertices as a flat `[x0, y0, x1, y1, ...]` array
    pub polygon_points: Vec<f64>,
}

impl JsMaskParams {
    fn into_params(self, source: marquee_core::PixelBuffer) -> MaskParams {
        MaskParams::new(source, MaskParams::flat_points(&self.polygon_points))
            .with_origin(self.bounds_x, self.bounds_y)
            .with_offset(self.offset_x, self.offset_y)
    }
}

/// Make every pixel outside a selection outline transparent.
///
/// # Arguments
/// * `image` - The pixels under the selection
/// * `params` - JavaScript object with the JsMaskParams structure
///
/// # Returns
/// A new JsPixelBuffer, transparent outside the outline
///
/// # Example (TypeScript)
/// ```typescript
/// const masked = apply_mask(layerPixels, {
///   bounds_x: 10, bounds_y: 20,
///   offset_x: 0, offset_y: 0,
///   polygon_points: [10, 20, 60, 20, 35, 70],
/// });
/// ```
#[wasm_bindgen]
pub fn apply_mask(image: &JsPixelBuffer, params: JsValue) -> Result<JsPixelBuffer, JsValue> {
    let params: JsMaskParams = serde_wasm_bindgen::from_value(params)
        .map_err(|e| JsValue::from_str(&format!("Invalid mask params: {}", e)))?;

    Ok(mask_buffer(image, params))
}

fn mask_buffer(image: &JsPixelBuffer, params: JsMaskParams) -> JsPixelBuffer {
    JsPixelBuffer::from_buffer(core_apply_mask(params.into_params(image.to_buffer())))
}

/// Test whether a canvas point lies inside an outline.
///
/// `polygon_points` is a flat `[x0, y0, x1, y1, ...]` array; outlines with
/// fewer than three vertices contain nothing.
#[wasm_bindgen]
pub fn is_point_in_polygon(x: f64, y: f64, polygon_points: &[f64]) -> bool {
    core_is_point_in_polygon(x, y, &MaskParams::flat_points(polygon_points))
}

/// Integer bounds of an outline after translating it by the offset.
///
/// Returns a zero rectangle for an empty outline.
#[wasm_bindgen]
pub fn compute_bounds(polygon_points: &[f64], offset_x: f64, offset_y: f64) -> JsBounds {
    core_compute_bounds(&MaskParams::flat_points(polygon_points), offset_x, offset_y).into()
}
