//! Pixel sampling at fractional coordinates.
//!
//! Two methods are provided:
//! - **Bilinear**: 2x2 neighbourhood, cheap enough for live previews
//! - **Bicubic**: 4x4 Catmull-Rom neighbourhood, used once at commit
//!
//! Neighbours outside the buffer read as transparent black. Near the edges
//! of an upscaled image this fades the border to transparent instead of
//! smearing the outermost pixels outwards.

use serde::{Deserialize, Serialize};

use crate::buffer::PixelBuffer;

/// Resampling method for transform rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResampleMethod {
    /// Fast bilinear interpolation - good for preview rendering.
    #[default]
    Bilinear,
    /// Catmull-Rom bicubic interpolation - good for the final commit.
    Bicubic,
}

impl ResampleMethod {
    /// Sample `buffer` at `(x, y)` with this method.
    #[inline]
    pub fn sample(self, buffer: &PixelBuffer, x: f64, y: f64) -> [u8; 4] {
        match self {
            ResampleMethod::Bilinear => bilinear(buffer, x, y),
            ResampleMethod::Bicubic => bicubic(buffer, x, y),
        }
    }
}

/// Get a pixel as [f64; 4], transparent black outside the buffer.
#[inline]
fn get_pixel_f64(buffer: &PixelBuffer, px: i64, py: i64) -> [f64; 4] {
    let p = buffer.pixel_or_transparent(px, py);
    [p[0] as f64, p[1] as f64, p[2] as f64, p[3] as f64]
}

/// Round to the nearest integer and clamp into a channel.
#[inline]
fn to_channel(v: f64) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}

/// Sample a pixel using bilinear interpolation.
///
/// The top-left neighbour is `(floor(x), floor(y))`; the four neighbours are
/// weighted by the fractional parts along each axis independently. At integer
/// coordinates the source pixel is returned exactly.
pub fn bilinear(buffer: &PixelBuffer, x: f64, y: f64) -> [u8; 4] {
    let x0 = x.floor();
    let y0 = y.floor();

    // Fractional distances
    let fx = x - x0;
    let fy = y - y0;

    let (x0, y0) = (x0 as i64, y0 as i64);
    let p00 = get_pixel_f64(buffer, x0, y0);
    let p10 = get_pixel_f64(buffer, x0 + 1, y0);
    let p01 = get_pixel_f64(buffer, x0, y0 + 1);
    let p11 = get_pixel_f64(buffer, x0 + 1, y0 + 1);

    let mut result = [0u8; 4];
    for i in 0..4 {
        let v = p00[i] * (1.0 - fx) * (1.0 - fy)
            + p10[i] * fx * (1.0 - fy)
            + p01[i] * (1.0 - fx) * fy
            + p11[i] * fx * fy;
        result[i] = to_channel(v);
    }

    result
}

/// Catmull-Rom cubic convolution kernel (a = -0.5).
///
/// ```text
/// W(t) = 1.5|t|³ - 2.5|t|² + 1           for |t| <= 1
/// W(t) = -0.5|t|³ + 2.5|t|² - 4|t| + 2   for 1 < |t| <= 2
/// W(t) = 0                               otherwise
/// ```
#[inline]
pub fn cubic_weight(t: f64) -> f64 {
    let t = t.abs();
    if t <= 1.0 {
        1.5 * t * t * t - 2.5 * t * t + 1.0
    } else if t <= 2.0 {
        -0.5 * t * t * t + 2.5 * t * t - 4.0 * t + 2.0
    } else {
        0.0
    }
}

/// Kernel weights for the neighbours at offsets -1, 0, +1, +2 from `floor`.
#[inline]
fn cubic_weights(frac: f64) -> [f64; 4] {
    [
        cubic_weight(frac + 1.0),
        cubic_weight(frac),
        cubic_weight(1.0 - frac),
        cubic_weight(2.0 - frac),
    ]
}

/// Sample a pixel using separable bicubic (Catmull-Rom) interpolation.
///
/// Each of the four rows of the 4x4 neighbourhood is interpolated along X,
/// then the four row results are interpolated along Y. The kernel overshoots
/// around sharp edges; intermediate values are kept as-is and the result is
/// clamped once, after both passes.
pub fn bicubic(buffer: &PixelBuffer, x: f64, y: f64) -> [u8; 4] {
    let x0 = x.floor();
    let y0 = y.floor();

    let wx = cubic_weights(x - x0);
    let wy = cubic_weights(y - y0);

    let (x0, y0) = (x0 as i64, y0 as i64);

    // First pass: interpolate each row along X
    let mut rows = [[0.0f64; 4]; 4];
    for (j, row) in rows.iter_mut().enumerate() {
        let py = y0 + j as i64 - 1;
        for (i, weight) in wx.iter().enumerate() {
            let p = get_pixel_f64(buffer, x0 + i as i64 - 1, py);
            for c in 0..4 {
                row[c] += p[c] * weight;
            }
        }
    }

    // Second pass: interpolate the row results along Y, then clamp
    let mut result = [0u8; 4];
    for c in 0..4 {
        let v: f64 = rows.iter().zip(wy.iter()).map(|(row, w)| row[c] * w).sum();
        result[c] = to_channel(v);
    }

    result
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn buffer_strategy() -> impl Strategy<Value = PixelBuffer> {
        (1u32..=10, 1u32..=10).prop_flat_map(|(w, h)| {
            prop::collection::vec(any::<u8>(), (w * h * 4) as usize)
                .prop_map(move |data| PixelBuffer::from_raw(w, h, data).unwrap())
        })
    }

    proptest! {
        /// Property: both methods reproduce the source pixel at integer coordinates.
        #[test]
        fn prop_integer_coordinates_exact(
            buf in buffer_strategy(),
            (fx, fy) in (0.0f64..1.0, 0.0f64..1.0),
        ) {
            let x = ((buf.width() - 1) as f64 * fx).floor();
            let y = ((buf.height() - 1) as f64 * fy).floor();
            let expected = buf.pixel(x as u32, y as u32);

            prop_assert_eq!(bilinear(&buf, x, y), expected);
            prop_assert_eq!(bicubic(&buf, x, y), expected);
        }

        /// Property: bilinear output stays within the range of its neighbours
        /// (transparent neighbours included).
        #[test]
        fn prop_bilinear_bounded(
            buf in buffer_strategy(),
            (x, y) in (-1.5f64..11.0, -1.5f64..11.0),
        ) {
            let (x0, y0) = (x.floor() as i64, y.floor() as i64);
            let neighbours = [
                buf.pixel_or_transparent(x0, y0),
                buf.pixel_or_transparent(x0 + 1, y0),
                buf.pixel_or_transparent(x0, y0 + 1),
                buf.pixel_or_transparent(x0 + 1, y0 + 1),
            ];
            let result = bilinear(&buf, x, y);
            for c in 0..4 {
                let lo = neighbours.iter().map(|p| p[c]).min().unwrap();
                let hi = neighbours.iter().map(|p| p[c]).max().unwrap();
                prop_assert!(result[c] >= lo && result[c] <= hi);
            }
        }
    }
}
