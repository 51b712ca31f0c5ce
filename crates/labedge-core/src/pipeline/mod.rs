//! Image processing pipeline components.
//!
//! This module contains all the stages of the pipeline:
//! - **color**: RGB to 8-bit Lab conversion
//! - **channel**: a/b chroma channel extraction
//! - **gradient**: blurred Sobel gradient magnitude
//! - **validate**: pre-decode input checks
//! - **codec**: the file I/O seam over the `image` crate
//! - **processor**: orchestrates the full pipeline

pub mod channel;
pub mod codec;
pub mod color;
pub mod gradient;
pub mod processor;
pub mod validate;

// Re-exports for convenient access
pub use channel::extract_channel;
pub use codec::{ImageCodec, ImageRsCodec};
pub use color::to_lab;
pub use gradient::{compute_gradient, compute_gradient_buffer};
pub use processor::{LabEdgeProcessor, Products};
pub use validate::Validator;
