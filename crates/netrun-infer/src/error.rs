use crate::{Runtime, TensorShape};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InferError {
    #[error("model load error: {0}")]
    ModelLoad(String),

    #[error("unsupported runtime: {0}")]
    UnsupportedRuntime(Runtime),

    #[error("no backend named '{name}', available: {available:?}")]
    UnknownBackend { name: String, available: Vec<String> },

    #[error("backend error: {0}")]
    Backend(String),

    #[error("unsupported element type: {0}")]
    UnsupportedElementType(String),

    #[error("invalid input '{name}', expected one of {expected_names:?}")]
    InvalidInput {
        name: String,
        expected_names: Vec<String>,
    },

    #[error("shape {shape} cannot hold {elements} elements")]
    ShapeMismatch { shape: TensorShape, elements: usize },

    #[error("shape dimensions overflow when multiplied")]
    ShapeOverflow,

    #[error("buffer '{name}' holds {actual} bytes, expected {expected}")]
    BufferSize {
        name: String,
        expected: usize,
        actual: usize,
    },

    #[error("runtime error: {0}")]
    Runtime(String),
}

#[cfg(feature = "onnx")]
impl From<ort::Error> for InferError {
    fn from(err: ort::Error) -> Self {
        InferError::Backend(err.to_string())
    }
}
