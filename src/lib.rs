//! Iris flower classification over an ONNX model.
/// Model loading and single-flower prediction.
pub mod classifier;
/// Classifier configuration defaults, file and environment overrides.
pub mod config;
/// Class label pairing and report lines.
pub mod report;
/// JSON request scoring.
pub mod scoring;
/// Logging setup and log directory resolution shared by the binaries.
pub mod logging;

pub use classifier::{ClassifierError, Device, FlowerClassifier, FlowerFeatures};
pub use config::ClassifierConfig;
pub use report::{ClassScore, Prediction};
