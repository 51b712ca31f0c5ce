//! labedge core - Lab chroma edge maps as an embeddable library.
//!
//! An RGB image is converted to 8-bit Lab, its a and b chroma channels are
//! pulled out as grayscale-looking visualizations, and each visualization is
//! turned into a blurred Sobel gradient-magnitude map.
//!
//! # Architecture
//!
//! ```text
//! Image → Decode → Lab → a / b channels → a / b gradients → Encode (x5)
//! ```
//!
//! The transforms work on [`PixelBuffer`] only. File I/O goes through the
//! [`ImageCodec`](pipeline::ImageCodec) trait, implemented over the `image`
//! crate by [`ImageRsCodec`](pipeline::ImageRsCodec).
//!
//! # Usage
//!
//! ```rust,no_run
//! use labedge_core::{Config, LabEdgeProcessor};
//!
//! fn main() -> labedge_core::Result<()> {
//!     let config = Config::load()?;
//!     let processor = LabEdgeProcessor::new(&config);
//!
//!     let report = processor.process("./skyline.jpg".as_ref())?;
//!     println!("Wrote {} files", report.outputs.len());
//!     Ok(())
//! }
//! ```

// Module declarations
pub mod buffer;
pub mod config;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod types;

// Re-exports for convenient access
pub use buffer::PixelBuffer;
pub use config::Config;
pub use error::{ConfigError, LabEdgeError, PipelineError, PipelineResult, Result};
pub use output::{write_report, ReportWriter};
pub use pipeline::{LabEdgeProcessor, Products};
pub use types::{
    ChannelVisualization, GradientBuffer, LabBuffer, LabChannel, OutputKind, RunReport,
    WrittenOutput,
};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
