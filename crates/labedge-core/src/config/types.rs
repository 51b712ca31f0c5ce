//! Sub-configuration structs with defaults.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::types::OutputKind;

/// Where and how the five output images are written.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory the outputs land in (`~` is expanded)
    pub dir: PathBuf,

    /// File name of the Lab-encoded image
    pub lab: String,

    /// File name of the a-channel visualization
    pub a_channel: String,

    /// File name of the b-channel visualization
    pub b_channel: String,

    /// File name of the a-channel gradient
    pub a_gradient: String,

    /// File name of the b-channel gradient
    pub b_gradient: String,

    /// JPEG quality for `.jpg`/`.jpeg` outputs (1-100)
    pub jpeg_quality: u8,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
            lab: OutputKind::Lab.default_file_name().to_string(),
            a_channel: OutputKind::AChannel.default_file_name().to_string(),
            b_channel: OutputKind::BChannel.default_file_name().to_string(),
            a_gradient: OutputKind::AGradient.default_file_name().to_string(),
            b_gradient: OutputKind::BGradient.default_file_name().to_string(),
            jpeg_quality: 90,
        }
    }
}

impl OutputConfig {
    /// Write outputs into `dir`, keeping the configured file names.
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            ..Self::default()
        }
    }

    /// Configured file name for one output.
    pub fn file_name(&self, kind: OutputKind) -> &str {
        match kind {
            OutputKind::Lab => &self.lab,
            OutputKind::AChannel => &self.a_channel,
            OutputKind::BChannel => &self.b_channel,
            OutputKind::AGradient => &self.a_gradient,
            OutputKind::BGradient => &self.b_gradient,
        }
    }

    /// Output directory with `~` expanded.
    pub fn resolved_dir(&self) -> PathBuf {
        let dir = self.dir.to_string_lossy();
        let expanded = shellexpand::tilde(&dir);
        PathBuf::from(expanded.into_owned())
    }

    /// Full path for one output.
    pub fn path_for(&self, kind: OutputKind) -> PathBuf {
        self.resolved_dir().join(self.file_name(kind))
    }
}

/// Resource limits to protect against problematic inputs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Maximum file size in megabytes
    pub max_file_size_mb: u64,

    /// Maximum image dimension (width or height)
    pub max_image_dimension: u32,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_file_size_mb: 100,
            max_image_dimension: 10000,
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: "error", "warn", "info", "debug" or "trace"
    pub level: String,

    /// Log format: "pretty" or "json"
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}
