//! The codec seam between the pipeline and the `image` crate.
//!
//! Transforms only ever see [`PixelBuffer`]s. Reading and writing files goes
//! through [`ImageCodec`], so tests can swap in an in-memory codec and the
//! rest of the crate never names an `image` type.

use image::codecs::jpeg::JpegEncoder;
use image::{ExtendedColorType, ImageEncoder, ImageFormat};
use std::fs::File;
use std::io::{BufWriter, Cursor, Write};
use std::path::Path;

use crate::buffer::PixelBuffer;
use crate::config::LimitsConfig;
use crate::error::{PipelineError, PipelineResult};

use super::validate::Validator;

/// Decode to and encode from pixel buffers.
pub trait ImageCodec {
    /// Read `path` as 3-channel RGB.
    fn decode(&self, path: &Path) -> PipelineResult<PixelBuffer>;

    /// Write `buffer` to `path`; the format follows the file extension.
    fn encode(&self, buffer: &PixelBuffer, path: &Path) -> PipelineResult<()>;
}

/// [`ImageCodec`] backed by the `image` crate.
///
/// Inputs are validated (existence, size, magic bytes) before decoding.
pub struct ImageRsCodec {
    validator: Validator,
    limits: LimitsConfig,
    jpeg_quality: u8,
}

impl ImageRsCodec {
    pub fn new(limits: LimitsConfig, jpeg_quality: u8) -> Self {
        Self {
            validator: Validator::new(limits.clone()),
            limits,
            jpeg_quality,
        }
    }

    fn decode_bytes(&self, bytes: Vec<u8>, path: &Path) -> PipelineResult<PixelBuffer> {
        let mut reader = image::ImageReader::new(Cursor::new(bytes))
            .with_guessed_format()
            .map_err(|e| PipelineError::Decode {
                path: path.to_path_buf(),
                message: format!("Cannot detect image format: {}", e),
            })?;

        // Content sniffing failed; trust the extension.
        if reader.format().is_none() {
            let format =
                ImageFormat::from_path(path).map_err(|_| PipelineError::UnsupportedFormat {
                    path: path.to_path_buf(),
                    format: path
                        .extension()
                        .and_then(|e| e.to_str())
                        .unwrap_or("unknown")
                        .to_string(),
                })?;
            reader.set_format(format);
        }

        let image = reader.decode().map_err(|e| PipelineError::Decode {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let (width, height) = (image.width(), image.height());
        let max_dim = self.limits.max_image_dimension;
        if width > max_dim || height > max_dim {
            return Err(PipelineError::ImageTooLarge {
                path: path.to_path_buf(),
                width,
                height,
                max_dim,
            });
        }

        let rgb = image.into_rgb8();
        let (width, height) = (width as usize, height as usize);
        PixelBuffer::from_raw(width, height, 3, width * 3, rgb.into_raw())
    }
}

impl ImageCodec for ImageRsCodec {
    fn decode(&self, path: &Path) -> PipelineResult<PixelBuffer> {
        self.validator.validate(path)?;
        let bytes = std::fs::read(path).map_err(|e| PipelineError::Decode {
            path: path.to_path_buf(),
            message: format!("Cannot read file: {}", e),
        })?;
        self.decode_bytes(bytes, path)
    }

    fn encode(&self, buffer: &PixelBuffer, path: &Path) -> PipelineResult<()> {
        let encode_err = |message: String| PipelineError::Encode {
            path: path.to_path_buf(),
            message,
        };

        let color = match buffer.channels() {
            1 => ExtendedColorType::L8,
            3 => ExtendedColorType::Rgb8,
            4 => ExtendedColorType::Rgba8,
            n => return Err(encode_err(format!("cannot encode {} channels", n))),
        };
        let format = ImageFormat::from_path(path)
            .map_err(|e| encode_err(format!("Cannot choose format: {}", e)))?;

        let packed = buffer.to_packed();
        let (width, height) = (buffer.width() as u32, buffer.height() as u32);

        if format == ImageFormat::Jpeg {
            let file = File::create(path).map_err(|e| encode_err(e.to_string()))?;
            let mut writer = BufWriter::new(file);
            JpegEncoder::new_with_quality(&mut writer, self.jpeg_quality)
                .write_image(&packed, width, height, color)
                .map_err(|e| encode_err(e.to_string()))?;
            writer.flush().map_err(|e| encode_err(e.to_string()))?;
        } else {
            image::save_buffer_with_format(path, &packed, width, height, color, format)
                .map_err(|e| encode_err(e.to_string()))?;
        }
        Ok(())
    }
}
