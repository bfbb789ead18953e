use pawcam_camera::CameraError;
use pawcam_image::ImageError;
use pawcam_infer::InferError;
use std::fmt;
use std::time::Duration;

#[derive(Debug)]
pub enum PipelineError {
    ModelLoadFailure(String),
    ModelNotLoaded,
    DeviceUnavailable(String),
    /// Tensor and model disagree on shape. Never coerced.
    ShapeMismatch(String),
    InferenceFailure(String),
    InferenceTimeout(Duration),
    /// The previous inference still holds the model.
    Busy,
    Capture(String),
    UnexpectedOutput(String),
    Config(String),
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineError::ModelLoadFailure(msg) => write!(f, "model load failed: {msg}"),
            PipelineError::ModelNotLoaded => write!(f, "no model loaded"),
            PipelineError::DeviceUnavailable(msg) => write!(f, "device unavailable: {msg}"),
            PipelineError::ShapeMismatch(msg) => write!(f, "{msg}"),
            PipelineError::InferenceFailure(msg) => write!(f, "inference failed: {msg}"),
            PipelineError::InferenceTimeout(limit) => {
                write!(f, "inference timed out after {}ms", limit.as_millis())
            }
            PipelineError::Busy => write!(f, "a previous inference is still running"),
            PipelineError::Capture(msg) => write!(f, "capture failed: {msg}"),
            PipelineError::UnexpectedOutput(msg) => write!(f, "unexpected model output: {msg}"),
            PipelineError::Config(msg) => write!(f, "configuration error: {msg}"),
        }
    }
}

impl std::error::Error for PipelineError {}

impl From<CameraError> for PipelineError {
    fn from(err: CameraError) -> Self {
        match err {
            CameraError::DeviceUnavailable(msg) => PipelineError::DeviceUnavailable(msg),
            other => PipelineError::Capture(other.to_string()),
        }
    }
}

impl From<ImageError> for PipelineError {
    fn from(err: ImageError) -> Self {
        PipelineError::Capture(err.to_string())
    }
}

impl From<InferError> for PipelineError {
    fn from(err: InferError) -> Self {
        match err {
            InferError::ModelLoad(msg) => PipelineError::ModelLoadFailure(msg),
            InferError::UnsupportedDevice(_) => PipelineError::ModelLoadFailure(err.to_string()),
            InferError::InvalidDevice(_) => PipelineError::Config(err.to_string()),
            InferError::ModelNotLoaded => PipelineError::ModelNotLoaded,
            InferError::ShapeMismatch { .. } => PipelineError::ShapeMismatch(err.to_string()),
            InferError::Timeout(limit) => PipelineError::InferenceTimeout(limit),
            InferError::Busy => PipelineError::Busy,
            InferError::InvalidInput { .. }
            | InferError::Backend(_)
            | InferError::UnsupportedDtype(_) => PipelineError::InferenceFailure(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for PipelineError {
    fn from(err: serde_json::Error) -> Self {
        PipelineError::Config(err.to_string())
    }
}
