use crate::capture::FrameCapture;
use crate::config::PipelineConfig;
use crate::decision::{ClassificationResult, DecisionEngine};
use crate::encode::TensorEncoder;
use crate::error::PipelineError;
use crate::invoke::InferenceInvoker;
use pawcam_camera::FrameSource;
use pawcam_image::RawFrame;
use pawcam_infer::{Backend, InputSize, ModelInfo, ModelSource, OnnxBackend};
use std::fmt;
use std::sync::Arc;

/// Where a classification request currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Idle,
    Capturing,
    Encoding,
    Invoking,
    Deciding,
    Error,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Idle => "idle",
            Stage::Capturing => "capturing",
            Stage::Encoding => "encoding",
            Stage::Invoking => "invoking",
            Stage::Deciding => "deciding",
            Stage::Error => "error",
        };
        f.write_str(name)
    }
}

/// Capture, encode, infer and decide, one request at a time.
///
/// A pipeline owns its model for its whole life. Requests take `&mut self`,
/// so a single pipeline never has two requests in flight.
pub struct Pipeline {
    capture: FrameCapture,
    invoker: InferenceInvoker,
    decision: DecisionEngine,
    input_size: Option<InputSize>,
    stage: Stage,
    last_result: Option<ClassificationResult>,
}

impl Pipeline {
    /// Load `model` with ONNX Runtime on the configured device.
    pub async fn create(
        model: impl Into<ModelSource>,
        config: PipelineConfig,
    ) -> Result<Self, PipelineError> {
        let mut backend = OnnxBackend::new(config.device().clone());
        if let Some(threads) = config.intra_threads() {
            backend = backend.with_intra_threads(threads);
        }
        Self::with_backend(Arc::new(backend), model, config).await
    }

    /// Load `model` with any inference backend.
    pub async fn with_backend(
        backend: Arc<dyn Backend>,
        model: impl Into<ModelSource>,
        config: PipelineConfig,
    ) -> Result<Self, PipelineError> {
        config.validate()?;

        let invoker = InferenceInvoker::new(backend)
            .with_timeout(config.inference_timeout())
            .with_retries(config.retries(), config.retry_backoff());

        let mut pipeline = Pipeline {
            capture: FrameCapture::new(config.filter()),
            invoker,
            decision: DecisionEngine::new(config.threshold()),
            input_size: config.input_size(),
            stage: Stage::Idle,
            last_result: None,
        };
        pipeline.load(model.into()).await?;
        Ok(pipeline)
    }

    /// Use a custom resampler instead of the configured filter.
    pub fn with_capture(mut self, capture: FrameCapture) -> Self {
        self.capture = capture;
        self
    }

    async fn load(&mut self, model: ModelSource) -> Result<(), PipelineError> {
        log::info!("Loading model from {model}");
        self.invoker
            .load(model, self.input_size)
            .await
            .map(|_| ())
            .map_err(|e| {
                log::error!("Failed to load model: {e}");
                PipelineError::from(e)
            })
    }

    /// Swap in a different model.
    ///
    /// On failure the pipeline keeps no model and every request fails with
    /// `ModelNotLoaded` until a later reload succeeds.
    pub async fn reload(&mut self, model: impl Into<ModelSource>) -> Result<(), PipelineError> {
        self.last_result = None;
        self.load(model.into()).await
    }

    /// Classify whatever `source` is currently showing.
    pub async fn classify<S: FrameSource>(
        &mut self,
        source: &mut S,
    ) -> Result<ClassificationResult, PipelineError> {
        let result = self.run_source(source).await;
        self.finish(result)
    }

    /// Classify an already captured frame of any size.
    pub async fn classify_frame(
        &mut self,
        frame: &RawFrame,
    ) -> Result<ClassificationResult, PipelineError> {
        let result = self.run_frame(frame).await;
        self.finish(result)
    }

    /// The most recent successful result. Cleared by a failed request.
    pub fn last_result(&self) -> Option<ClassificationResult> {
        self.last_result
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn model_info(&self) -> Option<&ModelInfo> {
        self.invoker.model_info()
    }

    pub fn threshold(&self) -> f32 {
        self.decision.threshold()
    }

    fn enter(&mut self, stage: Stage) {
        log::debug!("{} -> {stage}", self.stage);
        self.stage = stage;
    }

    fn encoder(&self) -> Result<TensorEncoder, PipelineError> {
        let info = self.invoker.model_info().ok_or(PipelineError::ModelNotLoaded)?;
        Ok(TensorEncoder::new(info.input_shape))
    }

    async fn run_source<S: FrameSource>(
        &mut self,
        source: &mut S,
    ) -> Result<ClassificationResult, PipelineError> {
        let encoder = self.encoder()?;
        let shape = encoder.shape();

        self.enter(Stage::Capturing);
        let frame = self
            .capture
            .capture(source, shape.width, shape.height)
            .await?;
        self.run_encoded(encoder, &frame).await
    }

    async fn run_frame(&mut self, frame: &RawFrame) -> Result<ClassificationResult, PipelineError> {
        let encoder = self.encoder()?;
        let shape = encoder.shape();

        self.enter(Stage::Capturing);
        let frame = self.capture.resample(frame, shape.width, shape.height)?;
        self.run_encoded(encoder, &frame).await
    }

    async fn run_encoded(
        &mut self,
        encoder: TensorEncoder,
        frame: &RawFrame,
    ) -> Result<ClassificationResult, PipelineError> {
        self.enter(Stage::Encoding);
        let input = encoder.encode(frame)?;

        self.enter(Stage::Invoking);
        let scores = self.invoker.invoke(&input).await?;

        self.enter(Stage::Deciding);
        self.decision.classify(&scores)
    }

    fn finish(
        &mut self,
        result: Result<ClassificationResult, PipelineError>,
    ) -> Result<ClassificationResult, PipelineError> {
        match &result {
            Ok(classification) => {
                log::info!("Result: {classification}");
                self.last_result = Some(*classification);
            }
            Err(e) => {
                self.enter(Stage::Error);
                log::error!("Classification failed: {e}");
                self.last_result = None;
            }
        }
        self.enter(Stage::Idle);
        result
    }
}
