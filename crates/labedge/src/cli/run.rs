//! The single labedge run: load config, process one image, report.

use anyhow::Context;
use clap::Args;
use labedge_core::{write_report, Config, LabEdgeProcessor, RunReport};
use std::path::{Path, PathBuf};

/// Arguments for a run.
#[derive(Args, Debug, Default)]
pub struct RunArgs {
    /// Input image (JPEG, PNG, ...)
    pub input: Option<PathBuf>,

    /// Config file (defaults to the platform config directory)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Directory for the five output images (overrides output.dir)
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Write a JSON run report to this path ("-" for stdout)
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// Write the report as a single JSON line
    #[arg(long, requires = "report")]
    pub compact: bool,
}

/// Load configuration from an explicit path, or the default location.
///
/// An explicit path must exist and parse. A broken default config only
/// produces a warning and falls back to defaults.
pub fn load_config(explicit: Option<&Path>) -> anyhow::Result<Config> {
    if let Some(path) = explicit {
        return Config::load_from(path)
            .with_context(|| format!("Failed to load config from {}", path.display()));
    }
    match Config::load() {
        Ok(config) => Ok(config),
        Err(e) => {
            // Logging isn't initialized yet.
            eprintln!(
                "Warning: Failed to load config: {e}\n  \
                 Using default configuration. Expected file: {}",
                Config::default_path().display()
            );
            Ok(Config::default())
        }
    }
}

/// Process `input` with `config`, applying CLI overrides.
pub fn execute(input: &Path, args: &RunArgs, mut config: Config) -> anyhow::Result<RunReport> {
    if let Some(dir) = &args.output_dir {
        config.output.dir = dir.clone();
    }

    let processor = LabEdgeProcessor::new(&config);
    let report = processor
        .process(input)
        .with_context(|| format!("Failed to process {}", input.display()))?;

    if let Some(target) = &args.report {
        write_report(&report, target, !args.compact)
            .with_context(|| format!("Failed to write report to {}", target.display()))?;
    }

    tracing::info!(
        "Wrote {} images to {}",
        report.outputs.len(),
        processor.output().resolved_dir().display()
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_input(dir: &Path) -> PathBuf {
        let path = dir.join("in.png");
        image::RgbImage::from_pixel(5, 3, image::Rgb([30, 160, 90]))
            .save(&path)
            .unwrap();
        path
    }

    #[test]
    fn test_explicit_config_must_exist() {
        let err = load_config(Some(Path::new("/no/such/labedge.toml"))).unwrap_err();
        assert!(err.to_string().contains("/no/such/labedge.toml"));
    }

    #[test]
    fn test_explicit_config_is_validated() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[output]\njpeg_quality = 0\n").unwrap();
        assert!(load_config(Some(&path)).is_err());
    }

    #[test]
    fn test_explicit_config_rejects_bad_log_level() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[logging]\nlevel = \"inf\"\n").unwrap();
        let err = load_config(Some(&path)).unwrap_err();
        assert!(format!("{err:#}").contains("logging.level"));
    }

    #[test]
    fn test_output_dir_override_and_report() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_input(dir.path());
        let out = dir.path().join("out");
        let report_path = dir.path().join("report.json");
        let args = RunArgs {
            input: Some(input.clone()),
            output_dir: Some(out.clone()),
            report: Some(report_path.clone()),
            ..RunArgs::default()
        };

        let report = execute(&input, &args, Config::default()).unwrap();
        assert_eq!(report.outputs.len(), 5);
        assert!(out.join("aLab.jpg").is_file());

        let text = std::fs::read_to_string(&report_path).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed["width"], 5);
        assert_eq!(parsed["outputs"].as_array().unwrap().len(), 5);
    }
}
