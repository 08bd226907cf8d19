//! Engine configuration
//!
//! Loaded from an optional TOML file. Every key is optional and unknown keys
//! are rejected:
//!
//! ```toml
//! max_depth = 32
//! pretty = false
//! direction = "encode"   # auto | decode | encode
//! log_level = "debug"
//! ```
//!
//! Command-line flags are applied on top with the `with_*` setters.

use crate::error::{EngineError, Result};
use crate::processor::{Direction, Processor};
use firestore_json_core::{TranscodeOptions, DEFAULT_MAX_DEPTH};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Default log filter when neither the file nor the environment sets one
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Deepest container nesting accepted in either direction
    pub max_depth: usize,
    /// Pretty-print converted documents
    pub pretty: bool,
    /// Conversion direction
    pub direction: Direction,
    /// Log filter directive, e.g. `info` or `firestore_json_engine=debug`
    pub log_level: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            max_depth: DEFAULT_MAX_DEPTH,
            pretty: true,
            direction: Direction::Auto,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl EngineConfig {
    /// Parse configuration from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| EngineError::Config(e.to_string()))
    }

    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .map_err(|e| EngineError::Config(format!("can't read {}: {}", path.display(), e)))?;
        toml::from_str(&text)
            .map_err(|e| EngineError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Load `path` if given, defaults otherwise
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Override the depth bound when one was given
    pub fn with_max_depth(mut self, max_depth: Option<usize>) -> Self {
        if let Some(max_depth) = max_depth {
            self.max_depth = max_depth;
        }
        self
    }

    /// Override the direction when one was given
    pub fn with_direction(mut self, direction: Option<Direction>) -> Self {
        if let Some(direction) = direction {
            self.direction = direction;
        }
        self
    }

    /// `--compact` can only switch pretty printing off
    pub fn with_compact(mut self, compact: bool) -> Self {
        if compact {
            self.pretty = false;
        }
        self
    }

    /// Transcoder options built from this configuration
    pub fn transcode_options(&self) -> TranscodeOptions {
        TranscodeOptions::new().max_depth(self.max_depth)
    }

    /// Processor built from this configuration
    pub fn processor(&self) -> Processor {
        Processor::new(self.transcode_options())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.max_depth, 64);
        assert!(config.pretty);
        assert_eq!(config.direction, Direction::Auto);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_empty_file_gives_defaults() {
        assert_eq!(EngineConfig::from_toml_str("").unwrap(), EngineConfig::default());
    }

    #[test]
    fn test_partial_file() {
        let config = EngineConfig::from_toml_str("direction = \"decode\"\nmax_depth = 8\n").unwrap();
        assert_eq!(config.direction, Direction::Decode);
        assert_eq!(config.max_depth, 8);
        assert!(config.pretty);
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = EngineConfig::from_toml_str("depth = 3").unwrap_err();
        assert!(matches!(err, EngineError::Config(_)));
    }

    #[test]
    fn test_bad_direction_rejected() {
        assert!(EngineConfig::from_toml_str("direction = \"sideways\"").is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "pretty = false\nlog_level = \"warn\"").unwrap();

        let config = EngineConfig::load(file.path()).unwrap();
        assert!(!config.pretty);
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn test_load_missing_file() {
        let err = EngineConfig::load(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(err.to_string().contains("can't read"));
    }

    #[test]
    fn test_flags_override_file() {
        let config = EngineConfig::from_toml_str("max_depth = 8\ndirection = \"decode\"")
            .unwrap()
            .with_max_depth(Some(3))
            .with_direction(None)
            .with_compact(true);
        assert_eq!(config.max_depth, 3);
        assert_eq!(config.direction, Direction::Decode);
        assert!(!config.pretty);
        assert_eq!(config.processor().options().max_depth, 3);
    }
}
