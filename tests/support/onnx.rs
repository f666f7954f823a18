//! Small ONNX graphs written on the fly for integration tests.

use std::path::{Path, PathBuf};

use prost::Message;
use tract_onnx::pb::{
    self, attribute_proto::AttributeType, tensor_proto::DataType, tensor_shape_proto::Dimension,
    tensor_shape_proto::dimension, type_proto,
};

/// Path of the model shipped at the crate root.
pub fn bundled_model_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("model.onnx")
}

/// `probabilities = softmax(input @ weights + bias)` over a `[batch, width]` input.
///
/// `weights` is row-major with one row per input column.
pub fn write_linear_model(path: &Path, weights: &[Vec<f32>], bias: &[f32], softmax: bool) {
    let width = weights.len();
    let classes = bias.len();
    let flat: Vec<f32> = weights.iter().flatten().copied().collect();
    assert_eq!(flat.len(), width * classes, "weights must be width x classes");

    let linear_out = if softmax { "logits" } else { "probabilities" };
    let mut nodes = vec![pb::NodeProto {
        input: vec!["features".into(), "weights".into(), "bias".into()],
        output: vec![linear_out.into()],
        name: "linear".into(),
        op_type: "Gemm".into(),
        ..Default::default()
    }];
    if softmax {
        nodes.push(pb::NodeProto {
            input: vec!["logits".into()],
            output: vec!["probabilities".into()],
            name: "softmax".into(),
            op_type: "Softmax".into(),
            attribute: vec![pb::AttributeProto {
                name: "axis".into(),
                i: 1,
                r#type: AttributeType::Int as i32,
                ..Default::default()
            }],
            ..Default::default()
        });
    }

    let graph = pb::GraphProto {
        node: nodes,
        name: "linear_classifier".into(),
        initializer: vec![
            float_tensor("weights", &[width as i64, classes as i64], flat),
            float_tensor("bias", &[classes as i64], bias.to_vec()),
        ],
        input: vec![float_value("features", width)],
        output: vec![float_value("probabilities", classes)],
        ..Default::default()
    };
    let model = pb::ModelProto {
        ir_version: 7,
        opset_import: vec![pb::OperatorSetIdProto {
            domain: String::new(),
            version: 13,
        }],
        producer_name: "iris-classifier-tests".into(),
        graph: Some(graph),
        ..Default::default()
    };
    std::fs::write(path, model.encode_to_vec()).expect("write onnx fixture");
}

/// Model whose output is its input row, exposing the packing order.
pub fn write_echo_model(path: &Path) {
    let identity = (0..4)
        .map(|row| (0..4).map(|col| if row == col { 1.0 } else { 0.0 }).collect())
        .collect::<Vec<Vec<f32>>>();
    write_linear_model(path, &identity, &[0.0; 4], false);
}

fn float_tensor(name: &str, dims: &[i64], values: Vec<f32>) -> pb::TensorProto {
    pb::TensorProto {
        dims: dims.to_vec(),
        data_type: DataType::Float as i32,
        float_data: values,
        name: name.into(),
        ..Default::default()
    }
}

fn float_value(name: &str, width: usize) -> pb::ValueInfoProto {
    let dims = vec![
        Dimension {
            value: Some(dimension::Value::DimParam("batch".into())),
            ..Default::default()
        },
        Dimension {
            value: Some(dimension::Value::DimValue(width as i64)),
            ..Default::default()
        },
    ];
    pb::ValueInfoProto {
        name: name.into(),
        r#type: Some(pb::TypeProto {
            value: Some(type_proto::Value::TensorType(type_proto::Tensor {
                elem_type: DataType::Float as i32,
                shape: Some(pb::TensorShapeProto { dim: dims }),
            })),
            ..Default::default()
        }),
        ..Default::default()
    }
}
