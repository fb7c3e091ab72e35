//! WASM-compatible wrapper types for pixel data and bounds.
//!
//! This module provides JavaScript-friendly types that wrap the core Marquee types,
//! handling the conversion between Rust and JavaScript data representations.

use std::sync::Arc;

use marquee_core::{Bounds, PixelBuffer, PixelBufferError};
use wasm_bindgen::prelude::*;

/// An RGBA pixel buffer wrapper for JavaScript.
///
/// # Memory Management
///
/// The pixel data is stored in WASM memory. When you call `pixels()`, a copy is made
/// to JavaScript memory as a `Uint8Array`. Keep buffers in WASM memory between
/// operations and only extract pixels when they need to reach a canvas.
///
/// Handles handed out by the snapshot cache share one copy of the pixels;
/// the memory is released when the last handle is freed.
///
/// The `free()` method can be called to explicitly release WASM memory, but this is
/// optional as wasm-bindgen's finalizer will handle cleanup automatically.
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct JsPixelBuffer {
    inner: Arc<PixelBuffer>,
}

#[wasm_bindgen]
impl JsPixelBuffer {
    /// Create a pixel buffer from dimensions and RGBA data.
    ///
    /// # Arguments
    /// * `width` - Buffer width in pixels
    /// * `height` - Buffer height in pixels
    /// * `pixels` - RGBA pixel data (4 bytes per pixel, row-major order),
    ///   e.g. `ImageData.data`
    ///
    /// Throws if the data length is not `width * height * 4`.
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<JsPixelBuffer, JsValue> {
        Self::try_new(width, height, pixels).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Create a fully transparent buffer.
    ///
    /// Throws if the buffer is too large to allocate.
    pub fn transparent(width: u32, height: u32) -> Result<JsPixelBuffer, JsValue> {
        PixelBuffer::try_transparent(width, height)
            .map(Self::from_buffer)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Get the buffer width in pixels
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.inner.width()
    }

    /// Get the buffer height in pixels
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.inner.height()
    }

    /// Get the number of bytes in the pixel buffer (width * height * 4)
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.inner.byte_size()
    }

    /// Returns RGBA pixel data as Uint8Array.
    ///
    /// Note: This creates a copy of the pixel data.
    pub fn pixels(&self) -> Vec<u8> {
        self.inner.data().to_vec()
    }

    /// Explicitly free WASM memory.
    ///
    /// This is optional - wasm-bindgen's finalizer will handle cleanup automatically.
    pub fn free(self) {}
}

impl JsPixelBuffer {
    pub(crate) fn try_new(
        width: u32,
        height: u32,
        pixels: Vec<u8>,
    ) -> Result<Self, PixelBufferError> {
        PixelBuffer::from_raw(width, height, pixels).map(Self::from_buffer)
    }

    pub(crate) fn from_buffer(inner: PixelBuffer) -> Self {
        Self::from_shared(Arc::new(inner))
    }

    pub(crate) fn from_shared(inner: Arc<PixelBuffer>) -> Self {
        Self { inner }
    }

    /// Another handle to the same pixels, without copying.
    pub(crate) fn shared(&self) -> Arc<PixelBuffer> {
        Arc::clone(&self.inner)
    }

    pub(crate) fn as_buffer(&self) -> &PixelBuffer {
        &self.inner
    }

    /// Copy out the core buffer so it can be moved into a job.
    pub(crate) fn to_buffer(&self) -> PixelBuffer {
        (*self.inner).clone()
    }
}

/// Integer canvas rectangle for JavaScript.
#[wasm_bindgen]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JsBounds {
    x: i32,
    y: i32,
    width: u32,
    height: u32,
}

#[wasm_bindgen]
impl JsBounds {
    #[wasm_bindgen(constructor)]
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> JsBounds {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[wasm_bindgen(getter)]
    pub fn x(&self) -> i32 {
        self.x
    }

    #[wasm_bindgen(getter)]
    pub fn y(&self) -> i32 {
        self.y
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }
}

impl From<Bounds> for JsBounds {
    fn from(b: Bounds) -> Self {
        Self::new(b.x, b.y, b.width, b.height)
    }
}

impl From<JsBounds> for Bounds {
    fn from(b: JsBounds) -> Self {
        Bounds::new(b.x, b.y, b.width, b.height)
    }
}
