//! Iris species classifier backed by an ONNX model.
//!
//! `FlowerClassifier` owns the loaded graph and the device it runs on. Both
//! are read-only after construction, so one instance can serve any number of
//! `predict` calls, including from several threads.

mod device;
mod error;
mod features;
mod runtime;

use std::path::{Path, PathBuf};

use tracing::{debug, info};

pub use device::Device;
pub use error::ClassifierError;
pub use features::{FEATURE_COUNT, FlowerFeatures};

use crate::config::ClassifierConfig;
use runtime::OnnxRuntime;

/// Loaded flower classification model bound to a compute device.
pub struct FlowerClassifier {
    runtime: OnnxRuntime,
    device: Device,
    model_path: PathBuf,
}

impl FlowerClassifier {
    /// Load `model.onnx` from the working directory onto the CPU.
    pub fn create() -> Result<Self, ClassifierError> {
        Self::load(&ClassifierConfig::default())
    }

    /// Load the model named by `config` onto its device.
    pub fn load(config: &ClassifierConfig) -> Result<Self, ClassifierError> {
        let model_path = config.model_path.clone();
        let device = config.device;
        let runtime = OnnxRuntime::load(&model_path, config.output_index)?;
        info!(
            "Loaded model {} on {device} (input width {}, classes {})",
            model_path.display(),
            runtime.input_width(),
            runtime
                .output_width()
                .map(|width| width.to_string())
                .unwrap_or_else(|| "unknown".to_string()),
        );
        Ok(Self {
            runtime,
            device,
            model_path,
        })
    }

    /// Class probabilities for one flower.
    ///
    /// Arguments are taken petal-first but packed sepal-first, see
    /// [`FlowerFeatures::to_batch_row`].
    pub fn predict(
        &self,
        petal_width: f32,
        petal_length: f32,
        sepal_width: f32,
        sepal_length: f32,
    ) -> Result<Vec<f32>, ClassifierError> {
        self.predict_features(&FlowerFeatures::from_petal_first(
            petal_width,
            petal_length,
            sepal_width,
            sepal_length,
        ))
    }

    pub fn predict_features(&self, features: &FlowerFeatures) -> Result<Vec<f32>, ClassifierError> {
        self.evaluate(&features.to_batch_row())
    }

    /// Evaluate one already-packed input row.
    pub fn evaluate(&self, row: &[f32]) -> Result<Vec<f32>, ClassifierError> {
        let probabilities = self.runtime.run(row)?;
        debug!(?row, ?probabilities, "Evaluated flower row");
        Ok(probabilities)
    }

    /// Output dimension of the model, when the graph declares it concretely.
    pub fn class_count(&self) -> Option<usize> {
        self.runtime.output_width()
    }

    /// Number of values each input row must carry.
    pub fn input_width(&self) -> usize {
        self.runtime.input_width()
    }

    pub fn device(&self) -> Device {
        self.device
    }

    pub fn model_path(&self) -> &Path {
        &self.model_path
    }
}

impl std::fmt::Debug for FlowerClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FlowerClassifier")
            .field("model_path", &self.model_path)
            .field("device", &self.device)
            .field("input_width", &self.input_width())
            .field("class_count", &self.class_count())
            .finish()
    }
}
