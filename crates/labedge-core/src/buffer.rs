//! Strided 8-bit pixel storage.
//!
//! Rows may carry trailing padding, so every access goes through
//! [`PixelBuffer::get`] / [`PixelBuffer::set`], which apply the stride once and
//! bounds-check the coordinates.

use crate::error::{PipelineError, PipelineResult};

/// A `width x height` grid of pixels with `channels` bytes each.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    channels: usize,
    stride: usize,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Create a zeroed, tightly packed buffer.
    pub fn new(width: usize, height: usize, channels: usize) -> PipelineResult<Self> {
        Self::with_stride(width, height, channels, width * channels)
    }

    /// Create a zeroed buffer whose rows are `stride` bytes apart.
    pub fn with_stride(
        width: usize,
        height: usize,
        channels: usize,
        stride: usize,
    ) -> PipelineResult<Self> {
        Self::check_shape(width, height, channels, stride)?;
        Ok(Self {
            width,
            height,
            channels,
            stride,
            data: vec![0; stride * height],
        })
    }

    /// Adopt existing bytes. `data` must hold exactly `stride * height` bytes.
    pub fn from_raw(
        width: usize,
        height: usize,
        channels: usize,
        stride: usize,
        data: Vec<u8>,
    ) -> PipelineResult<Self> {
        Self::check_shape(width, height, channels, stride)?;
        if data.len() != stride * height {
            return Err(PipelineError::InvalidInput(format!(
                "expected {} bytes for {}x{} buffer with stride {}, got {}",
                stride * height,
                width,
                height,
                stride,
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            channels,
            stride,
            data,
        })
    }

    /// Build a packed buffer by evaluating `f(x, y, channel)` for every byte.
    pub fn from_fn<F>(
        width: usize,
        height: usize,
        channels: usize,
        mut f: F,
    ) -> PipelineResult<Self>
    where
        F: FnMut(usize, usize, usize) -> u8,
    {
        let mut buffer = Self::new(width, height, channels)?;
        for y in 0..height {
            for x in 0..width {
                for c in 0..channels {
                    buffer.set(x, y, c, f(x, y, c))?;
                }
            }
        }
        Ok(buffer)
    }

    fn check_shape(
        width: usize,
        height: usize,
        channels: usize,
        stride: usize,
    ) -> PipelineResult<()> {
        if width == 0 || height == 0 {
            return Err(PipelineError::InvalidInput(format!(
                "buffer dimensions must be non-zero, got {}x{}",
                width, height
            )));
        }
        if channels == 0 {
            return Err(PipelineError::InvalidInput(
                "buffer must have at least one channel".to_string(),
            ));
        }
        if stride < width * channels {
            return Err(PipelineError::InvalidInput(format!(
                "stride {} is shorter than a packed row of {} bytes",
                stride,
                width * channels
            )));
        }
        Ok(())
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Bytes between the starts of consecutive rows.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Whether `other` has the same width, height and channel count.
    ///
    /// Stride is not compared.
    pub fn same_shape(&self, other: &PixelBuffer) -> bool {
        self.width == other.width && self.height == other.height && self.channels == other.channels
    }

    fn offset(&self, x: usize, y: usize, channel: usize) -> PipelineResult<usize> {
        if x >= self.width || y >= self.height || channel >= self.channels {
            return Err(PipelineError::OutOfBounds {
                x,
                y,
                channel,
                width: self.width,
                height: self.height,
                channels: self.channels,
            });
        }
        Ok(self.stride * y + self.channels * x + channel)
    }

    /// Read one channel of one pixel.
    pub fn get(&self, x: usize, y: usize, channel: usize) -> PipelineResult<u8> {
        let offset = self.offset(x, y, channel)?;
        Ok(self.data[offset])
    }

    /// Write one channel of one pixel.
    pub fn set(&mut self, x: usize, y: usize, channel: usize, value: u8) -> PipelineResult<()> {
        let offset = self.offset(x, y, channel)?;
        self.data[offset] = value;
        Ok(())
    }

    /// All channels of one pixel.
    pub fn pixel(&self, x: usize, y: usize) -> PipelineResult<&[u8]> {
        let start = self.offset(x, y, 0)?;
        Ok(&self.data[start..start + self.channels])
    }

    /// One row without its padding.
    pub fn row(&self, y: usize) -> PipelineResult<&[u8]> {
        let start = self.offset(0, y, 0)?;
        Ok(&self.data[start..start + self.width * self.channels])
    }

    /// Copy of the pixel data with row padding removed.
    pub fn to_packed(&self) -> Vec<u8> {
        let row_len = self.width * self.channels;
        if self.stride == row_len {
            return self.data.clone();
        }
        let mut packed = Vec::with_capacity(row_len * self.height);
        for row in self.data.chunks(self.stride) {
            packed.extend_from_slice(&row[..row_len]);
        }
        packed
    }
}
