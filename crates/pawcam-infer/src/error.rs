use crate::Device;
use std::fmt;
use std::time::Duration;

#[derive(Debug)]
pub enum InferError {
    ModelLoad(String),
    ModelNotLoaded,
    ShapeMismatch {
        expected: Vec<usize>,
        got: Vec<usize>,
    },
    InvalidInput {
        name: String,
        expected_names: Vec<String>,
    },
    InvalidDevice(String),
    /// The engine failed while running a loaded model.
    Backend(String),
    UnsupportedDevice(Device),
    UnsupportedDtype(String),
    Timeout(Duration),
    /// A previous call still holds the session.
    Busy,
}

impl fmt::Display for InferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InferError::ModelLoad(msg) => write!(f, "model load error: {msg}"),
            InferError::ModelNotLoaded => write!(f, "no model loaded"),
            InferError::ShapeMismatch { expected, got } => {
                write!(f, "shape mismatch: expected {expected:?}, got {got:?}")
            }
            InferError::InvalidInput {
                name,
                expected_names,
            } => write!(
                f,
                "invalid input '{name}', expected one of: {}",
                expected_names.join(", ")
            ),
            InferError::InvalidDevice(msg) => write!(f, "invalid device: {msg}"),
            InferError::Backend(msg) => write!(f, "backend error: {msg}"),
            InferError::UnsupportedDevice(device) => write!(f, "unsupported device: {device}"),
            InferError::UnsupportedDtype(msg) => write!(f, "unsupported dtype: {msg}"),
            InferError::Timeout(limit) => {
                write!(f, "inference did not finish within {}ms", limit.as_millis())
            }
            InferError::Busy => write!(f, "a previous inference is still running"),
        }
    }
}

impl std::error::Error for InferError {}

impl From<pawcam_base::TensorError> for InferError {
    fn from(err: pawcam_base::TensorError) -> Self {
        InferError::Backend(err.to_string())
    }
}
