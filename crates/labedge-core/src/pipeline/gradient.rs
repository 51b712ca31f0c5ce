//! Sobel gradient magnitude with a fixed 3x3 Gaussian pre-blur.
//!
//! Every stage uses border replication. Channels are processed
//! independently, so a 3-identical-channel visualization produces a
//! 3-identical-channel result.

use crate::buffer::PixelBuffer;
use crate::error::PipelineResult;
use crate::types::{ChannelVisualization, GradientBuffer};

use super::color::saturate_u8;

/// Binomial taps shared by the 3x3 Gaussian (sigma derived from size) and
/// the smoothing axis of the Sobel kernels.
const SMOOTH: [i32; 3] = [1, 2, 1];

/// Central difference along the derivative axis.
const DERIV: [i32; 3] = [-1, 0, 1];

/// Weight applied to each of |Gx| and |Gy|: `1.5 * 0.5`.
///
/// Kept for output compatibility; whether the 1.5 boost was intentional is
/// unknown.
pub const GRADIENT_WEIGHT: f32 = 0.75;

/// Gradient magnitude of a chroma visualization.
pub fn compute_gradient(img: &ChannelVisualization) -> PipelineResult<GradientBuffer> {
    compute_gradient_buffer(img.pixels())
}

/// Gradient magnitude of any buffer, per channel.
///
/// The input is left untouched; blurring happens on a private copy.
pub fn compute_gradient_buffer(src: &PixelBuffer) -> PipelineResult<GradientBuffer> {
    let blurred = gaussian_blur_3x3(src)?;

    let mut out = PixelBuffer::new(src.width(), src.height(), src.channels())?;
    for y in 0..src.height() {
        for x in 0..src.width() {
            for c in 0..src.channels() {
                let (gx, gy) = sobel_at(&blurred, x, y, c)?;
                let magnitude = GRADIENT_WEIGHT * abs_u8(gx) as f32
                    + GRADIENT_WEIGHT * abs_u8(gy) as f32;
                out.set(x, y, c, saturate_u8(magnitude))?;
            }
        }
    }

    tracing::debug!("Computed gradient ({}x{})", src.width(), src.height());
    Ok(GradientBuffer::new(out))
}

/// 3x3 Gaussian blur into a new packed buffer, rounding to nearest.
fn gaussian_blur_3x3(src: &PixelBuffer) -> PipelineResult<PixelBuffer> {
    let mut out = PixelBuffer::new(src.width(), src.height(), src.channels())?;
    for y in 0..src.height() {
        for x in 0..src.width() {
            for c in 0..src.channels() {
                let mut sum = 0i32;
                for (j, wy) in SMOOTH.iter().enumerate() {
                    for (i, wx) in SMOOTH.iter().enumerate() {
                        let v = replicated(src, x, y, i, j, c)?;
                        sum += wy * wx * v as i32;
                    }
                }
                // Kernel weights sum to 16.
                out.set(x, y, c, ((sum + 8) >> 4) as u8)?;
            }
        }
    }
    Ok(out)
}

/// Horizontal and vertical Sobel responses at one sample, 16-bit signed.
fn sobel_at(src: &PixelBuffer, x: usize, y: usize, c: usize) -> PipelineResult<(i16, i16)> {
    let mut gx = 0i32;
    let mut gy = 0i32;
    for j in 0..3 {
        for i in 0..3 {
            let v = replicated(src, x, y, i, j, c)? as i32;
            gx += SMOOTH[j] * DERIV[i] * v;
            gy += DERIV[j] * SMOOTH[i] * v;
        }
    }
    // |g| <= 4 * 255, well inside i16.
    Ok((gx as i16, gy as i16))
}

/// Sample at `(x + i - 1, y + j - 1)` with coordinates clamped to the edge.
fn replicated(
    src: &PixelBuffer,
    x: usize,
    y: usize,
    i: usize,
    j: usize,
    c: usize,
) -> PipelineResult<u8> {
    let sx = (x + i).saturating_sub(1).min(src.width() - 1);
    let sy = (y + j).saturating_sub(1).min(src.height() - 1);
    src.get(sx, sy, c)
}

fn abs_u8(v: i16) -> u8 {
    v.unsigned_abs().min(255) as u8
}
