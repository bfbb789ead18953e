//! Model loading and execution for pawcam.
//!
//! A `Backend` turns a `ModelSource` into a `Session`; `ModelInfo` resolves
//! the session's declared input into a typed image `Shape`.

pub mod backend;
pub mod backends;
pub mod device;
pub mod error;
pub mod modelinfo;
pub mod modelsource;
pub mod session;

pub use backend::Backend;
pub use backends::OnnxBackend;
pub use device::Device;
pub use error::InferError;
pub use modelinfo::{InputSize, ModelInfo, TensorInfo};
pub use modelsource::ModelSource;
pub use session::Session;
