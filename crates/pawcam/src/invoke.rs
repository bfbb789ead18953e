use crate::encode::InputTensor;
use pawcam_infer::{Backend, InferError, InputSize, ModelInfo, ModelSource, Session};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

/// Default limit for a single inference call.
pub const DEFAULT_INFERENCE_TIMEOUT: Duration = Duration::from_secs(30);

struct LoadedModel {
    session: Arc<Mutex<Box<dyn Session>>>,
    info: ModelInfo,
}

/// Owns the loaded model and runs one inference at a time on it.
///
/// Calls run on tokio's blocking pool. A call that times out keeps the
/// session until the engine returns; requests arriving in the meantime are
/// rejected with `InferError::Busy` instead of queueing behind it.
pub struct InferenceInvoker {
    backend: Arc<dyn Backend>,
    model: Option<LoadedModel>,
    timeout: Option<Duration>,
    retries: u32,
    retry_backoff: Duration,
}

impl InferenceInvoker {
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self {
            backend,
            model: None,
            timeout: Some(DEFAULT_INFERENCE_TIMEOUT),
            retries: 0,
            retry_backoff: Duration::from_millis(100),
        }
    }

    /// `None` lets calls run as long as the engine needs.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Retry `InferError::Backend` failures up to `retries` extra times,
    /// waiting `backoff * attempt` before each one.
    pub fn with_retries(mut self, retries: u32, backoff: Duration) -> Self {
        self.retries = retries;
        self.retry_backoff = backoff;
        self
    }

    /// Replace the current model with `model`.
    ///
    /// The old model is dropped first; if loading fails the invoker is left
    /// without a model.
    pub async fn load(
        &mut self,
        model: ModelSource,
        size: Option<InputSize>,
    ) -> Result<&ModelInfo, InferError> {
        self.model = None;

        let backend = Arc::clone(&self.backend);
        let (session, info) = tokio::task::spawn_blocking(move || {
            let session = backend.load_model(model)?;
            let info = ModelInfo::resolve(session.inputs(), session.outputs(), size)?;
            Ok::<_, InferError>((session, info))
        })
        .await
        .map_err(|e| InferError::ModelLoad(e.to_string()))??;

        log::info!(
            "Model ready on {}: input '{}' {}, output '{}' {:?}",
            self.backend.name(),
            info.input_name,
            info.input_shape,
            info.output_name,
            info.output_shape
        );

        let loaded = self.model.insert(LoadedModel {
            session: Arc::new(Mutex::new(session)),
            info,
        });
        Ok(&loaded.info)
    }

    pub fn unload(&mut self) {
        self.model = None;
    }

    pub fn is_loaded(&self) -> bool {
        self.model.is_some()
    }

    pub fn model_info(&self) -> Option<&ModelInfo> {
        self.model.as_ref().map(|m| &m.info)
    }

    /// Run the model on `input` and return the raw scores of its output.
    pub async fn invoke(&self, input: &InputTensor) -> Result<Vec<f32>, InferError> {
        let model = self.model.as_ref().ok_or(InferError::ModelNotLoaded)?;
        let expected = model.info.input_shape;

        if input.shape != expected {
            return Err(InferError::ShapeMismatch {
                expected: expected.dims().to_vec(),
                got: input.shape.dims().to_vec(),
            });
        }
        if input.data.len() != expected.len() {
            return Err(InferError::ShapeMismatch {
                expected: vec![expected.len()],
                got: vec![input.data.len()],
            });
        }

        let mut attempt = 0;
        loop {
            match self.run_once(model, input).await {
                Err(InferError::Backend(msg)) if attempt < self.retries => {
                    attempt += 1;
                    let wait = self.retry_backoff * attempt;
                    log::warn!(
                        "Inference failed ({msg}), retry {attempt}/{} in {}ms",
                        self.retries,
                        wait.as_millis()
                    );
                    tokio::time::sleep(wait).await;
                }
                result => return result,
            }
        }
    }

    async fn run_once(
        &self,
        model: &LoadedModel,
        input: &InputTensor,
    ) -> Result<Vec<f32>, InferError> {
        let mut session = Arc::clone(&model.session)
            .try_lock_owned()
            .map_err(|_| InferError::Busy)?;

        let tensor = input.to_tensor()?;
        let input_name = model.info.input_name.clone();
        let output_name = model.info.output_name.clone();

        let task = tokio::task::spawn_blocking(move || {
            let mut outputs = session.run(&[(input_name.as_str(), tensor)])?;
            outputs
                .remove(&output_name)
                .map(|t| t.into_data())
                .ok_or_else(|| InferError::Backend(format!("model produced no '{output_name}' output")))
        });

        let joined = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, task)
                .await
                .map_err(|_| InferError::Timeout(limit))?,
            None => task.await,
        };
        joined.map_err(|e| InferError::Backend(format!("inference task failed: {e}")))?
    }
}
