//! Error types for the labedge pipeline.
//!
//! Errors are organized by stage so messages carry the context a user needs
//! (file paths, pixel coordinates, the limit that was exceeded).

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for labedge operations.
#[derive(Error, Debug)]
pub enum LabEdgeError {
    /// Configuration-related errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Pipeline processing errors
    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    /// General I/O errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors.
///
/// The wrapped cause is part of the message and is not exposed as a
/// `source`, so an error chain prints it once.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file from disk
    #[error("Failed to read config file: {0}")]
    ReadError(std::io::Error),

    /// Failed to parse TOML configuration
    #[error("Failed to parse config: {0}")]
    ParseError(toml::de::Error),

    /// Configuration values are invalid
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::ReadError(e)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::ParseError(e)
    }
}

/// Pipeline processing errors, organized by stage.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Input image could not be read or decoded
    #[error("Decode error for {path}: {message}")]
    Decode { path: PathBuf, message: String },

    /// Output image could not be encoded or written
    #[error("Encode error for {path}: {message}")]
    Encode { path: PathBuf, message: String },

    /// A buffer reaching a transform stage is empty or has the wrong shape
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Pixel access outside the buffer
    #[error(
        "Pixel ({x}, {y}) channel {channel} out of bounds for {width}x{height}x{channels} buffer"
    )]
    OutOfBounds {
        x: usize,
        y: usize,
        channel: usize,
        width: usize,
        height: usize,
        channels: usize,
    },

    /// File not found
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// File exceeds size limit
    #[error("File too large: {path} ({size_mb}MB > {max_mb}MB)")]
    FileTooLarge {
        path: PathBuf,
        size_mb: u64,
        max_mb: u64,
    },

    /// Image dimensions exceed limit
    #[error("Image too large: {path} ({width}x{height} > {max_dim})")]
    ImageTooLarge {
        path: PathBuf,
        width: u32,
        height: u32,
        max_dim: u32,
    },

    /// Format could not be determined from content or extension
    #[error("Unsupported format for {path}: {format}")]
    UnsupportedFormat { path: PathBuf, format: String },
}

impl PipelineError {
    /// Whether the error happened before any pixels were available.
    ///
    /// Every variant in this group means nothing was written.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            PipelineError::Decode { .. }
                | PipelineError::FileNotFound(_)
                | PipelineError::FileTooLarge { .. }
                | PipelineError::ImageTooLarge { .. }
                | PipelineError::UnsupportedFormat { .. }
        )
    }

    /// Whether the run stopped before the first output was written.
    ///
    /// Only a failed write can leave earlier outputs on disk.
    pub fn wrote_nothing(&self) -> bool {
        !matches!(self, PipelineError::Encode { .. })
    }
}

/// Convenience type alias for labedge results.
pub type Result<T> = std::result::Result<T, LabEdgeError>;

/// Convenience type alias for pipeline-specific results.
pub type PipelineResult<T> = std::result::Result<T, PipelineError>;
