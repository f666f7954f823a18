//! Classifier configuration.
//!
//! Defaults reproduce the stock setup: `model.onnx` in the working directory,
//! the three iris species in model output order, CPU execution and the first
//! model output. A TOML file may override any key and environment variables
//! take precedence over the file.
//!
//! Config keys (TOML): `model_path`, `class_names`, `device`, `output_index`.

use std::path::{Path, PathBuf};

use serde::de::Error as SerdeDeError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::classifier::Device;

/// Model file used when nothing else is configured.
pub const DEFAULT_MODEL_PATH: &str = "model.onnx";

/// Class labels in the order of the bundled model's output dimension.
pub const DEFAULT_CLASS_NAMES: &[&str] = &["Iris-setosa", "Iris-versicolor", "Iris-virginica"];

/// Environment variable overriding the model path.
pub const MODEL_PATH_ENV: &str = "IRIS_MODEL_PATH";
/// Environment variable overriding the compute device.
pub const DEVICE_ENV: &str = "IRIS_DEVICE";

/// Where the model lives and how its outputs are labelled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    pub model_path: PathBuf,
    pub class_names: Vec<String>,
    pub device: Device,
    /// Which model output carries the class probabilities.
    pub output_index: usize,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
            class_names: DEFAULT_CLASS_NAMES
                .iter()
                .map(|name| (*name).to_string())
                .collect(),
            device: Device::default(),
            output_index: 0,
        }
    }
}

/// Errors that may occur while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid config at {path}: {source}")]
    ParseToml {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl ClassifierConfig {
    /// Load settings from a TOML file; missing keys keep their defaults.
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let bytes = std::fs::read(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let text = String::from_utf8(bytes).map_err(|source| ConfigError::ParseToml {
            path: path.to_path_buf(),
            source: SerdeDeError::custom(source),
        })?;
        toml::from_str(&text).map_err(|source| ConfigError::ParseToml {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Defaults or the given file, with environment overrides applied.
    pub fn resolve(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match config_path {
            Some(path) => Self::load_from_path(path)?,
            None => Self::default(),
        };
        Ok(config.with_overrides(|key| std::env::var(key).ok()))
    }

    fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(path) = lookup(MODEL_PATH_ENV).filter(|value| !value.trim().is_empty()) {
            self.model_path = PathBuf::from(path);
        }
        if let Some(name) = lookup(DEVICE_ENV) {
            self.device = Device::from_name(&name);
        }
        self
    }
}
