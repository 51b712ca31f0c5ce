//! End-to-end runs through the real codec against a temporary directory.

use image::{Rgb, RgbImage};
use labedge_core::config::OutputConfig;
use labedge_core::pipeline::{ImageCodec, ImageRsCodec};
use labedge_core::{Config, LabEdgeError, LabEdgeProcessor, OutputKind, PipelineError};

/// Lab-encoded lightness of pure sRGB red: round(53.24 * 255 / 100).
const RED_L: i32 = 136;

fn config_for(dir: &std::path::Path) -> Config {
    Config {
        output: OutputConfig::in_dir(dir),
        ..Config::default()
    }
}

#[test]
fn solid_red_produces_five_outputs() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("red.png");
    RgbImage::from_pixel(4, 4, Rgb([255, 0, 0]))
        .save(&input)
        .unwrap();

    let out_dir = dir.path().join("out");
    let config = config_for(&out_dir);
    let report = LabEdgeProcessor::new(&config).process(&input).unwrap();

    assert_eq!((report.width, report.height), (4, 4));
    for kind in OutputKind::ALL {
        let path = out_dir.join(kind.default_file_name());
        assert!(path.is_file(), "missing {}", path.display());
        assert_eq!(report.path_for(kind), Some(&path));
    }

    let codec = ImageRsCodec::new(config.limits.clone(), 90);
    for kind in [OutputKind::AGradient, OutputKind::BGradient] {
        let grad = codec.decode(&out_dir.join(kind.default_file_name())).unwrap();
        for y in 0..grad.height() {
            assert!(
                grad.row(y).unwrap().iter().all(|&v| v <= 2),
                "{:?} row {} not near zero",
                kind,
                y
            );
        }
    }

    let lab = codec
        .decode(&out_dir.join(OutputKind::Lab.default_file_name()))
        .unwrap();
    let l = lab.get(1, 1, 0).unwrap() as i32;
    assert!((l - RED_L).abs() <= 4, "L = {}", l);
}

#[test]
fn lossless_outputs_keep_exact_values() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("split.png");
    RgbImage::from_fn(8, 8, |x, _| {
        if x < 4 {
            Rgb([255, 0, 0])
        } else {
            Rgb([0, 0, 255])
        }
    })
    .save(&input)
    .unwrap();

    let mut config = config_for(dir.path());
    config.output.a_channel = "a.png".into();
    config.output.b_gradient = "b_grad.png".into();
    LabEdgeProcessor::new(&config).process(&input).unwrap();

    let codec = ImageRsCodec::new(config.limits.clone(), 90);
    let a = codec.decode(&dir.path().join("a.png")).unwrap();
    // Red encodes a = 208; the channel is repeated across RGB.
    assert_eq!(a.pixel(0, 0).unwrap(), &[208, 208, 208]);

    let b_grad = codec.decode(&dir.path().join("b_grad.png")).unwrap();
    assert_eq!(b_grad.get(0, 4, 0).unwrap(), 0);
    assert!(b_grad.get(3, 4, 0).unwrap() > 100);
}

#[test]
fn missing_input_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let out_dir = dir.path().join("out");
    let err = LabEdgeProcessor::new(&config_for(&out_dir))
        .process(&dir.path().join("nope.jpg"))
        .unwrap_err();

    assert!(matches!(
        err,
        LabEdgeError::Pipeline(PipelineError::FileNotFound(_))
    ));
    assert!(!out_dir.exists());
}

#[test]
fn undecodable_input_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("broken.png");
    // Valid PNG signature, garbage afterwards.
    std::fs::write(&input, [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 1, 2, 3]).unwrap();

    let out_dir = dir.path().join("out");
    let err = LabEdgeProcessor::new(&config_for(&out_dir))
        .process(&input)
        .unwrap_err();

    assert!(matches!(
        err,
        LabEdgeError::Pipeline(PipelineError::Decode { .. })
    ));
    assert!(!out_dir.exists());
}
