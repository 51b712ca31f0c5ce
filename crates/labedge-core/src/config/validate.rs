//! Configuration validation with range checks.

use std::collections::HashSet;

use crate::error::ConfigError;
use crate::types::OutputKind;

use super::Config;

impl Config {
    /// Validate configuration values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for kind in OutputKind::ALL {
            let name = self.output.file_name(kind);
            if name.trim().is_empty() {
                return Err(ConfigError::ValidationError(format!(
                    "output file name for {:?} must not be empty",
                    kind
                )));
            }
            if !seen.insert(name) {
                return Err(ConfigError::ValidationError(format!(
                    "output file name '{}' is used more than once",
                    name
                )));
            }
        }
        if !(1..=100).contains(&self.output.jpeg_quality) {
            return Err(ConfigError::ValidationError(
                "output.jpeg_quality must be between 1 and 100".into(),
            ));
        }
        if self.limits.max_file_size_mb == 0 {
            return Err(ConfigError::ValidationError(
                "limits.max_file_size_mb must be > 0".into(),
            ));
        }
        if self.limits.max_image_dimension == 0 {
            return Err(ConfigError::ValidationError(
                "limits.max_image_dimension must be > 0".into(),
            ));
        }
        if !matches!(
            self.logging.level.as_str(),
            "error" | "warn" | "info" | "debug" | "trace"
        ) {
            return Err(ConfigError::ValidationError(format!(
                "logging.level must be one of error, warn, info, debug, trace; got \"{}\"",
                self.logging.level
            )));
        }
        if !matches!(self.logging.format.as_str(), "pretty" | "json") {
            return Err(ConfigError::ValidationError(format!(
                "logging.format must be \"pretty\" or \"json\", got \"{}\"",
                self.logging.format
            )));
        }
        Ok(())
    }
}
