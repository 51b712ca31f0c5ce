//! Pipeline orchestration - wires together all processing stages.

use std::path::Path;
use std::time::Instant;

use crate::buffer::PixelBuffer;
use crate::config::{Config, OutputConfig};
use crate::error::{PipelineError, PipelineResult, Result};
use crate::types::{
    ChannelVisualization, GradientBuffer, LabBuffer, LabChannel, OutputKind, RunReport,
    WrittenOutput,
};

use super::channel::extract_channel;
use super::codec::{ImageCodec, ImageRsCodec};
use super::color::to_lab;
use super::gradient::compute_gradient;

/// Every image a run produces, before anything is written.
#[derive(Debug, Clone)]
pub struct Products {
    pub lab: LabBuffer,
    pub a_channel: ChannelVisualization,
    pub b_channel: ChannelVisualization,
    pub a_gradient: GradientBuffer,
    pub b_gradient: GradientBuffer,
}

impl Products {
    /// Pixels backing one output.
    pub fn buffer(&self, kind: OutputKind) -> &PixelBuffer {
        match kind {
            OutputKind::Lab => self.lab.pixels(),
            OutputKind::AChannel => self.a_channel.pixels(),
            OutputKind::BChannel => self.b_channel.pixels(),
            OutputKind::AGradient => self.a_gradient.pixels(),
            OutputKind::BGradient => self.b_gradient.pixels(),
        }
    }
}

/// Runs RGB -> Lab -> chroma channels -> gradients and persists the results.
pub struct LabEdgeProcessor {
    codec: Box<dyn ImageCodec>,
    output: OutputConfig,
}

impl LabEdgeProcessor {
    /// Create a processor that reads and writes files through the `image` crate.
    pub fn new(config: &Config) -> Self {
        let codec = ImageRsCodec::new(config.limits.clone(), config.output.jpeg_quality);
        Self::with_codec(Box::new(codec), config.output.clone())
    }

    /// Create a processor with a caller-supplied codec.
    pub fn with_codec(codec: Box<dyn ImageCodec>, output: OutputConfig) -> Self {
        Self { codec, output }
    }

    pub fn output(&self) -> &OutputConfig {
        &self.output
    }

    /// Run every transform on an RGB buffer without touching the filesystem.
    pub fn transform(rgb: &PixelBuffer) -> PipelineResult<Products> {
        let stage = Instant::now();
        let lab = to_lab(rgb)?;
        tracing::trace!("  Lab conversion: {:?}", stage.elapsed());

        let stage = Instant::now();
        let a_channel = extract_channel(&lab, LabChannel::A)?;
        let b_channel = extract_channel(&lab, LabChannel::B)?;
        tracing::trace!("  Channel extraction: {:?}", stage.elapsed());

        let stage = Instant::now();
        let a_gradient = compute_gradient(&a_channel)?;
        let b_gradient = compute_gradient(&b_channel)?;
        tracing::trace!("  Gradients: {:?}", stage.elapsed());

        Ok(Products {
            lab,
            a_channel,
            b_channel,
            a_gradient,
            b_gradient,
        })
    }

    /// Decode `input`, transform it and write all five outputs.
    ///
    /// Nothing is written unless decoding and every transform succeed. The
    /// first failed write aborts the run with [`PipelineError::Encode`].
    pub fn process(&self, input: &Path) -> Result<RunReport> {
        let start = Instant::now();
        tracing::debug!("Processing: {:?}", input);

        let decode_start = Instant::now();
        let rgb = self.codec.decode(input)?;
        tracing::trace!("  Decode: {:?}", decode_start.elapsed());

        let products = Self::transform(&rgb)?;

        let dir = self.output.resolved_dir();
        std::fs::create_dir_all(&dir).map_err(|e| PipelineError::Encode {
            path: dir.clone(),
            message: format!("Cannot create output directory: {}", e),
        })?;

        let mut outputs = Vec::with_capacity(OutputKind::ALL.len());
        for kind in OutputKind::ALL {
            let path = self.output.path_for(kind);
            self.codec.encode(products.buffer(kind), &path)?;
            tracing::info!("Wrote {}", path.display());
            outputs.push(WrittenOutput { kind, path });
        }

        let elapsed = start.elapsed();
        tracing::debug!(
            "Processed {:?} in {:?} ({}x{})",
            input,
            elapsed,
            rgb.width(),
            rgb.height()
        );

        Ok(RunReport {
            input: input.to_path_buf(),
            width: rgb.width() as u32,
            height: rgb.height() as u32,
            outputs,
            elapsed_ms: elapsed.as_millis() as u64,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LabEdgeError;
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::path::PathBuf;
    use std::rc::Rc;

    type Written = Rc<RefCell<HashMap<PathBuf, PixelBuffer>>>;

    /// Keeps everything in memory; can be told to fail one write.
    struct MemoryCodec {
        input: Option<PixelBuffer>,
        fail_on: Option<String>,
        written: Written,
    }

    impl MemoryCodec {
        fn new(input: Option<PixelBuffer>) -> (Self, Written) {
            let written = Written::default();
            let codec = Self {
                input,
                fail_on: None,
                written: Rc::clone(&written),
            };
            (codec, written)
        }
    }

    impl ImageCodec for MemoryCodec {
        fn decode(&self, path: &Path) -> PipelineResult<PixelBuffer> {
            self.input.clone().ok_or_else(|| PipelineError::Decode {
                path: path.to_path_buf(),
                message: "no such image".to_string(),
            })
        }

        fn encode(&self, buffer: &PixelBuffer, path: &Path) -> PipelineResult<()> {
            let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
            if self.fail_on.as_deref() == Some(name) {
                return Err(PipelineError::Encode {
                    path: path.to_path_buf(),
                    message: "disk full".to_string(),
                });
            }
            self.written
                .borrow_mut()
                .insert(path.to_path_buf(), buffer.clone());
            Ok(())
        }
    }

    fn red(width: usize, height: usize) -> PixelBuffer {
        PixelBuffer::from_fn(width, height, 3, |_, _, c| if c == 0 { 255 } else { 0 }).unwrap()
    }

    #[test]
    fn test_transform_solid_red() {
        let products = LabEdgeProcessor::transform(&red(4, 4)).unwrap();
        assert_eq!(products.lab.pixels().pixel(0, 0).unwrap(), &[136, 208, 195]);
        assert_eq!(products.a_channel.pixels().pixel(3, 3).unwrap(), &[208, 208, 208]);
        assert_eq!(products.b_channel.pixels().pixel(3, 3).unwrap(), &[195, 195, 195]);
        for kind in [OutputKind::AGradient, OutputKind::BGradient] {
            let grad = products.buffer(kind);
            for y in 0..4 {
                assert!(grad.row(y).unwrap().iter().all(|&v| v == 0));
            }
        }
    }

    #[test]
    fn test_transform_rejects_grayscale() {
        let gray = PixelBuffer::new(4, 4, 1).unwrap();
        assert!(matches!(
            LabEdgeProcessor::transform(&gray),
            Err(PipelineError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_process_writes_five_outputs() {
        let dir = tempfile::tempdir().unwrap();
        let (codec, written) = MemoryCodec::new(Some(red(4, 4)));
        let processor =
            LabEdgeProcessor::with_codec(Box::new(codec), OutputConfig::in_dir(dir.path()));

        let report = processor.process(Path::new("red.png")).unwrap();
        assert_eq!((report.width, report.height), (4, 4));
        assert_eq!(report.outputs.len(), 5);
        let kinds: Vec<_> = report.outputs.iter().map(|o| o.kind).collect();
        assert_eq!(kinds, OutputKind::ALL.to_vec());

        let written = written.borrow();
        assert_eq!(written.len(), 5);
        let lab = &written[&dir.path().join("rgb_2_lab.jpg")];
        assert_eq!(lab.get(0, 0, 0).unwrap(), 136);
    }

    #[test]
    fn test_decode_failure_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let (codec, written) = MemoryCodec::new(None);
        let processor =
            LabEdgeProcessor::with_codec(Box::new(codec), OutputConfig::in_dir(dir.path()));

        let err = processor.process(Path::new("missing.png")).unwrap_err();
        assert!(matches!(
            err,
            LabEdgeError::Pipeline(PipelineError::Decode { .. })
        ));
        assert!(written.borrow().is_empty());
    }

    #[test]
    fn test_invalid_input_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let (codec, written) = MemoryCodec::new(Some(PixelBuffer::new(2, 2, 4).unwrap()));
        let processor =
            LabEdgeProcessor::with_codec(Box::new(codec), OutputConfig::in_dir(dir.path()));

        let err = processor.process(Path::new("rgba.png")).unwrap_err();
        assert!(matches!(
            err,
            LabEdgeError::Pipeline(PipelineError::InvalidInput(_))
        ));
        assert!(written.borrow().is_empty());
    }

    #[test]
    fn test_encode_failure_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let (mut codec, written) = MemoryCodec::new(Some(red(3, 3)));
        codec.fail_on = Some("bLab.jpg".to_string());
        let processor =
            LabEdgeProcessor::with_codec(Box::new(codec), OutputConfig::in_dir(dir.path()));

        let err = processor.process(Path::new("red.png")).unwrap_err();
        match err {
            LabEdgeError::Pipeline(PipelineError::Encode { path, .. }) => {
                assert!(path.ends_with("bLab.jpg"));
            }
            other => panic!("unexpected error: {other}"),
        }
        // Lab and a-channel were written before the failure.
        assert_eq!(written.borrow().len(), 2);
    }

    #[test]
    fn test_output_dir_is_created() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let (codec, _written) = MemoryCodec::new(Some(red(2, 2)));
        let processor =
            LabEdgeProcessor::with_codec(Box::new(codec), OutputConfig::in_dir(&nested));

        processor.process(Path::new("red.png")).unwrap();
        assert!(nested.is_dir());
    }
}
