use std::path::PathBuf;

use thiserror::Error;

/// Failures raised while loading a model or evaluating it.
#[derive(Debug, Error)]
pub enum ClassifierError {
    /// The model file does not exist.
    #[error("Model file not found at {path}")]
    ModelNotFound { path: PathBuf },
    /// The model file could not be read, parsed or prepared for execution.
    #[error("Failed to load model {path}: {message}")]
    ModelLoad { path: PathBuf, message: String },
    /// The model declares an input layout that cannot take a single flower row.
    #[error("Model {path} declares an unsupported input of rank {rank}")]
    UnsupportedInput { path: PathBuf, rank: usize },
    /// The input row does not match the width the model was prepared with.
    #[error("Input row has {actual} values but the model expects {expected}")]
    ShapeMismatch { expected: usize, actual: usize },
    /// The runtime rejected the evaluation call.
    #[error("Inference failed: {message}")]
    Inference { message: String },
    /// The model has fewer outputs than the configured output index requires.
    #[error("Model has no output at index {index}")]
    MissingOutput { index: usize },
}
