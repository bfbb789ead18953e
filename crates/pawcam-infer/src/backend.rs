use crate::{InferError, ModelSource, Session};

/// An inference engine that can turn a model artifact into a runnable session.
pub trait Backend: Send + Sync {
    fn name(&self) -> &str;
    fn load_model(&self, model: ModelSource) -> Result<Box<dyn Session>, InferError>;
}
