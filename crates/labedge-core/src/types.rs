//! Typed buffers flowing between pipeline stages, plus the run report.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

use crate::buffer::PixelBuffer;

/// A 3-channel buffer holding 8-bit encoded (L, a, b) per pixel.
///
/// L is scaled by 255/100; a and b are offset by 128.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabBuffer(PixelBuffer);

/// A 3-channel buffer whose channels all repeat one Lab chroma byte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelVisualization(PixelBuffer);

/// Saturated per-pixel gradient magnitude.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradientBuffer(PixelBuffer);

impl LabBuffer {
    pub(crate) fn new(pixels: PixelBuffer) -> Self {
        Self(pixels)
    }

    pub fn pixels(&self) -> &PixelBuffer {
        &self.0
    }

    pub fn into_pixels(self) -> PixelBuffer {
        self.0
    }
}

impl ChannelVisualization {
    pub(crate) fn new(pixels: PixelBuffer) -> Self {
        Self(pixels)
    }

    pub fn pixels(&self) -> &PixelBuffer {
        &self.0
    }

    pub fn into_pixels(self) -> PixelBuffer {
        self.0
    }
}

impl GradientBuffer {
    pub(crate) fn new(pixels: PixelBuffer) -> Self {
        Self(pixels)
    }

    pub fn pixels(&self) -> &PixelBuffer {
        &self.0
    }

    pub fn into_pixels(self) -> PixelBuffer {
        self.0
    }
}

/// Chroma channel of a Lab buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabChannel {
    /// Green-red axis
    A,
    /// Blue-yellow axis
    B,
}

impl LabChannel {
    /// Byte offset of this channel within a Lab pixel.
    pub fn index(self) -> usize {
        match self {
            LabChannel::A => 1,
            LabChannel::B => 2,
        }
    }
}

impl fmt::Display for LabChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LabChannel::A => write!(f, "a"),
            LabChannel::B => write!(f, "b"),
        }
    }
}

/// One of the five images a run persists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputKind {
    Lab,
    AChannel,
    BChannel,
    AGradient,
    BGradient,
}

impl OutputKind {
    /// All kinds, in write order.
    pub const ALL: [OutputKind; 5] = [
        OutputKind::Lab,
        OutputKind::AChannel,
        OutputKind::BChannel,
        OutputKind::AGradient,
        OutputKind::BGradient,
    ];

    /// File name used when the configuration does not override it.
    pub fn default_file_name(self) -> &'static str {
        match self {
            OutputKind::Lab => "rgb_2_lab.jpg",
            OutputKind::AChannel => "aLab.jpg",
            OutputKind::BChannel => "bLab.jpg",
            OutputKind::AGradient => "aLabGradient.jpg",
            OutputKind::BGradient => "bLabGradient.jpg",
        }
    }
}

/// An output file written during a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WrittenOutput {
    pub kind: OutputKind,
    pub path: PathBuf,
}

/// Summary of one pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    /// Input image path as given
    pub input: PathBuf,

    /// Decoded width in pixels
    pub width: u32,

    /// Decoded height in pixels
    pub height: u32,

    /// Files written, in write order
    pub outputs: Vec<WrittenOutput>,

    /// Wall-clock time for the whole run
    pub elapsed_ms: u64,
}

impl RunReport {
    /// Path written for `kind`, if any.
    pub fn path_for(&self, kind: OutputKind) -> Option<&PathBuf> {
        self.outputs
            .iter()
            .find(|output| output.kind == kind)
            .map(|output| &output.path)
    }
}
