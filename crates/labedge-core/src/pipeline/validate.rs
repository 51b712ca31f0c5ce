//! Input checks that run before the decoder sees any bytes.

use image::ImageFormat;
use std::io::Read;
use std::path::Path;

use crate::config::LimitsConfig;
use crate::error::PipelineError;

/// Leading-byte signatures of the formats the codec adapter decodes.
const SIGNATURES: &[(&str, &[u8])] = &[
    ("jpeg", &[0xFF, 0xD8, 0xFF]),
    ("png", &[0x89, b'P', b'N', b'G']),
    ("gif", b"GIF8"),
    ("bmp", b"BM"),
    ("tiff", &[b'I', b'I', 0x2A, 0x00]),
    ("tiff", &[b'M', b'M', 0x00, 0x2A]),
    ("pnm", b"P1"),
    ("pnm", b"P2"),
    ("pnm", b"P3"),
    ("pnm", b"P4"),
    ("pnm", b"P5"),
    ("pnm", b"P6"),
    ("pnm", b"P7"),
    ("qoi", b"qoif"),
    ("farbfeld", b"farbfeld"),
    ("hdr", b"#?RADIANCE"),
    ("ico", &[0x00, 0x00, 0x01, 0x00]),
    ("openexr", &[0x76, 0x2F, 0x31, 0x01]),
];

/// Validates the input file against size limits and known signatures.
pub struct Validator {
    limits: LimitsConfig,
}

impl Validator {
    pub fn new(limits: LimitsConfig) -> Self {
        Self { limits }
    }

    /// Check that `path` exists, fits the size limit and looks like an image.
    ///
    /// Formats without a signature (TGA, for one) pass when the extension
    /// names a format the decoder knows.
    pub fn validate(&self, path: &Path) -> Result<(), PipelineError> {
        if !path.exists() {
            return Err(PipelineError::FileNotFound(path.to_path_buf()));
        }

        let metadata = std::fs::metadata(path).map_err(|e| PipelineError::Decode {
            path: path.to_path_buf(),
            message: format!("Cannot read metadata: {}", e),
        })?;

        let max_bytes = self.limits.max_file_size_mb * 1024 * 1024;
        if metadata.len() > max_bytes {
            return Err(PipelineError::FileTooLarge {
                path: path.to_path_buf(),
                size_mb: metadata.len() / (1024 * 1024),
                max_mb: self.limits.max_file_size_mb,
            });
        }

        let mut header = [0u8; 12];
        let bytes_read = std::fs::File::open(path)
            .and_then(|mut file| file.read(&mut header))
            .map_err(|e| PipelineError::Decode {
                path: path.to_path_buf(),
                message: format!("Cannot open file: {}", e),
            })?;

        if sniff_format(&header[..bytes_read]).is_none() && ImageFormat::from_path(path).is_err() {
            return Err(PipelineError::Decode {
                path: path.to_path_buf(),
                message: "Unrecognized image format (invalid magic bytes)".to_string(),
            });
        }
        Ok(())
    }
}

/// Name of the format whose signature `header` starts with.
pub fn sniff_format(header: &[u8]) -> Option<&'static str> {
    if header.len() >= 12 && &header[0..4] == b"RIFF" && &header[8..12] == b"WEBP" {
        return Some("webp");
    }
    SIGNATURES
        .iter()
        .find(|(_, sig)| header.starts_with(sig))
        .map(|(name, _)| *name)
}
