//! RGB to CIE Lab conversion with 8-bit Lab encoding.
//!
//! Input is RGB byte order (what the codec adapter produces). Each pixel is
//! linearized with the sRGB curve, mapped to XYZ under D65 and run through
//! the CIE Lab transfer functions. The result is stored as
//! `(L * 255 / 100, a + 128, b + 128)`, rounded and saturated.

use crate::buffer::PixelBuffer;
use crate::error::{PipelineError, PipelineResult};
use crate::types::LabBuffer;

/// sRGB (linear) to XYZ, rows X, Y, Z.
const RGB_TO_XYZ: [[f32; 3]; 3] = [
    [0.412453, 0.357580, 0.180423],
    [0.212671, 0.715160, 0.072169],
    [0.019334, 0.119193, 0.950227],
];

/// D65 reference white (Y = 1).
const WHITE_X: f32 = 0.950456;
const WHITE_Z: f32 = 1.088754;

/// Linear-segment threshold of the Lab transfer function.
const LAB_EPSILON: f32 = 0.008856;

/// Convert a 3-channel RGB buffer to Lab.
pub fn to_lab(rgb: &PixelBuffer) -> PipelineResult<LabBuffer> {
    if rgb.channels() != 3 {
        return Err(PipelineError::InvalidInput(format!(
            "Lab conversion needs 3 channels, got {}",
            rgb.channels()
        )));
    }

    let mut lab = PixelBuffer::new(rgb.width(), rgb.height(), 3)?;
    for y in 0..rgb.height() {
        for x in 0..rgb.width() {
            let px = rgb.pixel(x, y)?;
            let encoded = encode_lab(rgb_to_lab_pixel([px[0], px[1], px[2]]));
            for (c, &value) in encoded.iter().enumerate() {
                lab.set(x, y, c, value)?;
            }
        }
    }
    Ok(LabBuffer::new(lab))
}

/// Unquantized (L, a, b) for one sRGB pixel. L is in [0, 100].
pub fn rgb_to_lab_pixel(rgb: [u8; 3]) -> [f32; 3] {
    let linear = rgb.map(|c| srgb_to_linear(c as f32 / 255.0));

    let [x, y, z] =
        RGB_TO_XYZ.map(|row| row[0] * linear[0] + row[1] * linear[1] + row[2] * linear[2]);
    let x = x / WHITE_X;
    let z = z / WHITE_Z;

    let fx = lab_f(x);
    let fy = lab_f(y);
    let fz = lab_f(z);

    let l = if y > LAB_EPSILON {
        116.0 * y.cbrt() - 16.0
    } else {
        903.3 * y
    };
    [l, 500.0 * (fx - fy), 200.0 * (fy - fz)]
}

/// Quantize (L, a, b) into the 8-bit Lab encoding.
pub fn encode_lab(lab: [f32; 3]) -> [u8; 3] {
    [
        saturate_u8(lab[0] * 255.0 / 100.0),
        saturate_u8(lab[1] + 128.0),
        saturate_u8(lab[2] + 128.0),
    ]
}

fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

fn lab_f(t: f32) -> f32 {
    if t > LAB_EPSILON {
        t.cbrt()
    } else {
        7.787 * t + 16.0 / 116.0
    }
}

pub(crate) fn saturate_u8(v: f32) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}
