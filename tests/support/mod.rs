#![allow(dead_code)]

pub mod env_guard;
pub mod onnx;
