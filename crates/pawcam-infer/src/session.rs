use crate::{InferError, TensorInfo};
use pawcam_base::Tensor;
use std::collections::HashMap;

/// A loaded model. `run` needs exclusive access, so callers serialize calls.
pub trait Session: Send {
    fn run(
        &mut self,
        inputs: &[(&str, Tensor<f32>)],
    ) -> Result<HashMap<String, Tensor<f32>>, InferError>;
    fn inputs(&self) -> &[TensorInfo];
    fn outputs(&self) -> &[TensorInfo];
}
