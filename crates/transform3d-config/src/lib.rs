//! Transform3d configuration system
//!
//! This crate provides configuration for the `transform3d` sampling tool,
//! loaded from `transform3d.toml` with environment variable overrides.
//!
//! ```toml
//! [sampling]
//! steps = 4
//!
//! [output]
//! format = "both"
//!
//! [[animation.from]]
//! type = "translate3d"
//! x = 10.0
//!
//! [[animation.to]]
//! type = "rotate"
//! angle = 90.0
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

pub mod operation;

pub use operation::OperationSpec;

/// Default configuration file name, looked up in the current directory.
pub const DEFAULT_CONFIG_FILE: &str = "transform3d.toml";

/// Errors that can occur while loading configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid TOML for this schema.
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Transform3dConfig {
    /// Which progress values to sample
    pub sampling: SamplingConfig,
    /// How samples are printed
    pub output: OutputConfig,
    /// Logging settings
    pub log: LogConfig,
    /// The two transform lists to interpolate between
    pub animation: AnimationConfig,
}

/// Sampling configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SamplingConfig {
    /// Number of intervals; `steps + 1` samples are taken
    pub steps: u32,
    /// First progress value
    pub start: f64,
    /// Last progress value (may lie outside `[0, 1]`)
    pub end: f64,
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    /// Decimal places for matrix entries; full precision when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub precision: Option<usize>,
}

/// What to print for every sample.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// The interpolated transform list as CSS text
    #[default]
    Text,
    /// The composed `matrix3d(...)`
    Matrix,
    Both,
}

impl OutputFormat {
    /// Parse `text`, `matrix` or `both` (case insensitive).
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "text" => Some(Self::Text),
            "matrix" => Some(Self::Matrix),
            "both" => Some(Self::Both),
            _ => None,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct LogConfig {
    /// `env_logger` filter string, e.g. `"debug"` or `"transform3d_ops=trace"`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
}

/// Source and target transform lists
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct AnimationConfig {
    pub from: Vec<OperationSpec>,
    pub to: Vec<OperationSpec>,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            steps: 10,
            start: 0.0,
            end: 1.0,
        }
    }
}

impl SamplingConfig {
    /// Evenly spaced progress values from `start` to `end`, both included.
    pub fn progress_values(&self) -> Vec<f64> {
        if self.steps == 0 {
            return vec![self.start];
        }
        let span = self.end - self.start;
        (0..=self.steps)
            .map(|i| {
                if i == self.steps {
                    self.end
                } else {
                    self.start + span * f64::from(i) / f64::from(self.steps)
                }
            })
            .collect()
    }
}

impl Transform3dConfig {
    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load from `path`, falling back to defaults if it is missing or invalid.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        match Self::load_from_file(path) {
            Ok(config) => config,
            Err(ConfigError::Io { source, .. })
                if source.kind() == std::io::ErrorKind::NotFound =>
            {
                Self::default()
            }
            Err(err) => {
                warn!("{err}; using default configuration");
                Self::default()
            }
        }
    }

    /// Merge configuration with environment variables
    ///
    /// Environment variables take precedence over configuration file values.
    /// Unparsable values are ignored.
    pub fn merge_with_env(&mut self) {
        if let Ok(val) = std::env::var("TRANSFORM3D_STEPS") {
            match val.parse::<u32>() {
                Ok(steps) => self.sampling.steps = steps,
                Err(_) => warn!(value = %val, "ignoring invalid TRANSFORM3D_STEPS"),
            }
        }
        if let Ok(val) = std::env::var("TRANSFORM3D_OUTPUT") {
            match OutputFormat::parse(&val) {
                Some(format) => self.output.format = format,
                None => warn!(value = %val, "ignoring invalid TRANSFORM3D_OUTPUT"),
            }
        }
        if let Ok(filter) = std::env::var("TRANSFORM3D_LOG") {
            self.log.filter = Some(filter);
        }
    }

    /// Load configuration with environment variable overrides
    ///
    /// 1. Load from `path` (or use defaults if not found)
    /// 2. Override with environment variables if present
    pub fn load<P: AsRef<Path>>(path: P) -> Self {
        let mut config = Self::load_or_default(path);
        config.merge_with_env();
        config
    }
}
