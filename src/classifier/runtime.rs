use std::path::Path;

use tract_onnx::prelude::tract_ndarray::Axis;
use tract_onnx::prelude::*;
use tract_onnx::tract_hir::infer::{GenericFactoid, ShapeFactoid};

use super::error::ClassifierError;
use super::features::FEATURE_COUNT;

type RunnablePlan = TypedRunnableModel<TypedModel>;

/// Optimized ONNX graph pinned to a single-sample input.
pub(crate) struct OnnxRuntime {
    plan: RunnablePlan,
    input_shape: TVec<usize>,
    output_index: usize,
    output_width: Option<usize>,
}

impl OnnxRuntime {
    pub(crate) fn load(model_path: &Path, output_index: usize) -> Result<Self, ClassifierError> {
        if !model_path.is_file() {
            return Err(ClassifierError::ModelNotFound {
                path: model_path.to_path_buf(),
            });
        }
        let load_error = |err: TractError| ClassifierError::ModelLoad {
            path: model_path.to_path_buf(),
            message: format!("{err:#}"),
        };
        // Declared output shapes may carry a symbolic batch that no longer
        // unifies once the input is pinned, so they are re-derived instead.
        let model = tract_onnx::onnx()
            .with_ignore_output_shapes(true)
            .model_for_path(model_path)
            .map_err(load_error)?;
        let declared = model.input_fact(0).map_err(load_error)?.shape.clone();
        let input_shape =
            single_sample_shape(&declared).ok_or_else(|| ClassifierError::UnsupportedInput {
                path: model_path.to_path_buf(),
                rank: declared.dims().count(),
            })?;
        let plan = model
            .with_input_fact(
                0,
                InferenceFact::dt_shape(f32::datum_type(), input_shape.clone()),
            )
            .and_then(|model| model.into_optimized())
            .and_then(|model| model.into_runnable())
            .map_err(load_error)?;
        // `output_fact` indexes the outlet slice directly, so range-check first.
        let outputs = plan.model().output_outlets().map_err(load_error)?;
        let Some(outlet) = outputs.get(output_index) else {
            return Err(ClassifierError::MissingOutput {
                index: output_index,
            });
        };
        let output_width = plan
            .model()
            .outlet_fact(*outlet)
            .ok()
            .and_then(|fact| fact.shape.as_concrete())
            .and_then(|dims| dims.last().copied());
        Ok(Self {
            plan,
            input_shape,
            output_index,
            output_width,
        })
    }

    /// Number of values one input row must carry.
    pub(crate) fn input_width(&self) -> usize {
        self.input_shape.last().copied().unwrap_or(0)
    }

    pub(crate) fn output_width(&self) -> Option<usize> {
        self.output_width
    }

    /// Evaluate a single row and return the dense values of its first sample.
    pub(crate) fn run(&self, row: &[f32]) -> Result<Vec<f32>, ClassifierError> {
        let expected = self.input_width();
        if row.len() != expected {
            return Err(ClassifierError::ShapeMismatch {
                expected,
                actual: row.len(),
            });
        }
        let input = Tensor::from_shape(&self.input_shape, row).map_err(inference_error)?;
        let outputs = self.plan.run(tvec!(input.into())).map_err(inference_error)?;
        let output = outputs
            .get(self.output_index)
            .ok_or(ClassifierError::MissingOutput {
                index: self.output_index,
            })?;
        let values = output.to_array_view::<f32>().map_err(inference_error)?;
        if values.ndim() <= 1 {
            return Ok(values.iter().copied().collect());
        }
        if values.shape()[0] == 0 {
            return Err(ClassifierError::Inference {
                message: "model returned an empty batch".to_string(),
            });
        }
        Ok(values.index_axis(Axis(0), 0).iter().copied().collect())
    }
}

fn inference_error(err: TractError) -> ClassifierError {
    ClassifierError::Inference {
        message: format!("{err:#}"),
    }
}

/// Resolve the declared input shape to a batch of one flower.
///
/// `[batch, width]` becomes `[1, width]` and `[width]` is kept. A width that
/// is unknown or symbolic falls back to the four flower measurements.
fn single_sample_shape(declared: &ShapeFactoid) -> Option<TVec<usize>> {
    if declared.is_open() {
        return Some(tvec![1, FEATURE_COUNT]);
    }
    let dims: Vec<_> = declared.dims().collect();
    let width = match dims.last() {
        Some(GenericFactoid::Only(dim)) => dim
            .to_i64()
            .ok()
            .and_then(|value| usize::try_from(value).ok())
            .filter(|value| *value > 0)
            .unwrap_or(FEATURE_COUNT),
        _ => FEATURE_COUNT,
    };
    match dims.len() {
        0 => Some(tvec![1, FEATURE_COUNT]),
        1 => Some(tvec![width]),
        2 => Some(tvec![1, width]),
        _ => None,
    }
}
