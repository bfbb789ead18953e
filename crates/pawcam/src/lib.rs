//! Cat or dog?
//!
//! `Pipeline` takes the current image from a `FrameSource`, scales it to the
//! model's input size, encodes it as a float tensor, runs a two-class ONNX
//! classifier and reports `Cat`, `Dog` or `Unknown`.
//!
//! ```no_run
//! use pawcam::{Pipeline, PipelineConfig, StillImage};
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let mut pipeline = Pipeline::create("catvsdog.onnx", PipelineConfig::default()).await?;
//! let mut photo = StillImage::open("whiskers.jpg").await?;
//! println!("{}", pipeline.classify(&mut photo).await?);
//! # Ok(())
//! # }
//! ```

pub mod capture;
pub mod config;
pub mod decision;
pub mod encode;
pub mod error;
pub mod invoke;
pub mod pipeline;

pub use capture::FrameCapture;
pub use config::PipelineConfig;
pub use decision::{ClassificationResult, DEFAULT_THRESHOLD, DecisionEngine, softmax};
pub use encode::{InputTensor, TensorEncoder};
pub use error::PipelineError;
pub use invoke::{DEFAULT_INFERENCE_TIMEOUT, InferenceInvoker};
pub use pipeline::{Pipeline, Stage};

pub use pawcam_base::{Layout, Shape};
pub use pawcam_camera::{
    ActiveSource, CameraConfig, CameraError, CameraProvider, Constraints, FacingMode, FrameSource,
    StillImage,
};
pub use pawcam_image::{Filter, RawFrame, Resampler};
pub use pawcam_infer::{Backend, Device, InputSize, ModelInfo, ModelSource, Session, TensorInfo};
