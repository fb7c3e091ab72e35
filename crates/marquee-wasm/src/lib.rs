//! Marquee WASM - WebAssembly bindings for Marquee
//!
//! This crate provides WASM bindings to expose the marquee-core selection and
//! transform engine to JavaScript/TypeScript applications.
//!
//! # Module Structure
//!
//! - `types` - WASM-compatible wrapper types for pixel buffers and bounds
//! - `mask` - Polygon masking, hit-testing and outline bounds
//! - `transform` - Free-transform rendering and bounds
//! - `cache` - Version-keyed layer snapshot cache
//!
//! # Usage
//!
//! ```typescript
//! import init, { apply_mask, JsPixelBuffer } from '@marquee/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! const data = ctx.getImageData(x, y, w, h);
//! const image = new JsPixelBuffer(w, h, data.data);
//! const masked = apply_mask(image, { bounds_x: x, bounds_y: y, polygon_points: outline });
//! ```

use log::LevelFilter;
use marquee_core::{ExecutionMode, ExecutionPreference};
use wasm_bindgen::prelude::*;

mod cache;
mod logging;
mod mask;
mod transform;
mod types;

// Re-export public types
pub use cache::JsSnapshotCache;
pub use mask::{apply_mask, compute_bounds, is_point_in_polygon, JsMaskParams};
pub use transform::{transform_image, transformed_bounds, JsTransform, JsTransformResult};
pub use types::{JsBounds, JsPixelBuffer};

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    logging::install(LevelFilter::Info);
    log::info!("marquee-wasm {} ready", version());
}

/// Change the console log level ("off", "error", "warn", "info", "debug", "trace").
///
/// Returns false for an unknown level name.
#[wasm_bindgen]
pub fn set_log_level(level: &str) -> bool {
    match logging::parse_level(level) {
        Some(filter) => {
            log::set_max_level(filter);
            true
        }
        None => false,
    }
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Where transform jobs run on this platform ("inline" or "background").
#[wasm_bindgen]
pub fn execution_mode() -> String {
    match ExecutionPreference::Auto.resolve() {
        ExecutionMode::Inline => "inline".to_string(),
        ExecutionMode::Background => "background".to_string(),
    }
}
