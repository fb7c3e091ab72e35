//! RGBA pixel buffers.
//!
//! A [`PixelBuffer`] is the unit of ownership that moves between the caller,
//! the pure engine functions and the background worker. It is never shared:
//! operations consume a buffer and hand back a new (or reused) one.

use thiserror::Error;

/// Bytes per pixel (R, G, B, A).
pub const CHANNELS: usize = 4;

/// Error types for buffer construction from raw data.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PixelBufferError {
    /// The byte length does not match `width * height * 4`.
    #[error("Pixel data length {actual} does not match {width}x{height} RGBA ({expected} bytes)")]
    LengthMismatch {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },

    /// The dimensions describe more bytes than the address space holds.
    #[error("Buffer dimensions {0}x{1} are too large")]
    TooLarge(u32, u32),

    /// The allocator refused the pixel storage.
    #[error("Could not allocate {bytes} bytes for a {width}x{height} buffer")]
    AllocationFailed { width: u32, height: u32, bytes: usize },
}

/// Byte length of a `width x height` RGBA buffer, if it fits in `usize`.
fn byte_len(width: u32, height: u32) -> Result<usize, PixelBufferError> {
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(CHANNELS))
        .ok_or(PixelBufferError::TooLarge(width, height))
}

/// An RGBA8 image in row-major order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Create a fully transparent buffer.
    pub fn transparent(width: u32, height: u32) -> Self {
        let len = width as usize * height as usize * CHANNELS;
        Self {
            width,
            height,
            data: vec![0u8; len],
        }
    }

    /// Create a fully transparent buffer, reporting oversized or
    /// unallocatable dimensions instead of aborting.
    ///
    /// Output sizes driven by user gestures go through here: a large drag
    /// scale can ask for far more memory than the host has.
    pub fn try_transparent(width: u32, height: u32) -> Result<Self, PixelBufferError> {
        let bytes = byte_len(width, height)?;

        let mut data = Vec::new();
        data.try_reserve_exact(bytes)
            .map_err(|_| PixelBufferError::AllocationFailed {
                width,
                height,
                bytes,
            })?;
        data.resize(bytes, 0);

        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Wrap existing RGBA data, validating its length.
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Result<Self, PixelBufferError> {
        let expected = byte_len(width, height)?;

        if data.len() != expected {
            return Err(PixelBufferError::LengthMismatch {
                width,
                height,
                expected,
                actual: data.len(),
            });
        }

        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGBA bytes.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Mutable raw RGBA bytes.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Release the raw RGBA bytes without copying.
    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    /// Get the total number of pixels.
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Get the size of the pixel buffer in bytes.
    pub fn byte_size(&self) -> usize {
        self.data.len()
    }

    /// Check if this buffer holds no pixels.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * CHANNELS
    }

    /// Read a pixel. Panics if `(x, y)` is outside the buffer.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = self.index(x, y);
        [self.data[i], self.data[i + 1], self.data[i + 2], self.data[i + 3]]
    }

    /// Read a pixel at signed coordinates; anything outside is transparent black.
    #[inline]
    pub fn pixel_or_transparent(&self, x: i64, y: i64) -> [u8; 4] {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return [0, 0, 0, 0];
        }
        self.pixel(x as u32, y as u32)
    }

    /// Write a pixel. Panics if `(x, y)` is outside the buffer.
    #[inline]
    pub fn put_pixel(&mut self, x: u32, y: u32, rgba: [u8; 4]) {
        let i = self.index(x, y);
        self.data[i..i + CHANNELS].copy_from_slice(&rgba);
    }

    /// Convert to an `image::RgbaImage` without copying the pixel data.
    pub fn into_rgba_image(self) -> Option<image::RgbaImage> {
        image::RgbaImage::from_raw(self.width, self.height, self.data)
    }
}

impl From<image::RgbaImage> for PixelBuffer {
    fn from(img: image::RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            data: img.into_raw(),
        }
    }
}
