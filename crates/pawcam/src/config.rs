use crate::PipelineError;
use crate::decision::DEFAULT_THRESHOLD;
use pawcam_camera::CameraConfig;
use pawcam_image::Filter;
use pawcam_infer::{Device, InputSize};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Configuration for a `Pipeline`.
///
/// Every field has a default, so a JSON file only needs the keys it changes:
///
/// ```json
/// { "threshold": 0.95, "filter": "nearest", "camera": { "width": 1280 } }
/// ```
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    threshold: f32,
    filter: Filter,
    input_width: Option<usize>,
    input_height: Option<usize>,
    inference_timeout_ms: u64,
    retries: u32,
    retry_backoff_ms: u64,
    device: Device,
    intra_threads: Option<usize>,
    camera: CameraConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            filter: Filter::default(),
            input_width: None,
            input_height: None,
            inference_timeout_ms: 30_000,
            retries: 0,
            retry_backoff_ms: 100,
            device: Device::Cpu,
            intra_threads: None,
            camera: CameraConfig::default(),
        }
    }
}

impl PipelineConfig {
    /// Parse a JSON document and validate it.
    pub fn from_json(json: &str) -> Result<Self, PipelineError> {
        let config: PipelineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, PipelineError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| PipelineError::Config(format!("cannot read {}: {e}", path.display())))?;
        Self::from_json(&json)
    }

    /// Check value ranges that serde cannot express.
    pub fn validate(&self) -> Result<(), PipelineError> {
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(PipelineError::Config(format!(
                "threshold must be within [0, 1], got {}",
                self.threshold
            )));
        }
        match (self.input_width, self.input_height) {
            (None, None) => {}
            (Some(w), Some(h)) if w > 0 && h > 0 => {}
            (Some(_), Some(_)) => {
                return Err(PipelineError::Config(
                    "input_width and input_height must be positive".to_string(),
                ));
            }
            _ => {
                return Err(PipelineError::Config(
                    "input_width and input_height must be set together".to_string(),
                ));
            }
        }
        if self.intra_threads == Some(0) {
            return Err(PipelineError::Config(
                "intra_threads must be positive".to_string(),
            ));
        }
        Ok(())
    }

    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.filter = filter;
        self
    }

    /// Spatial input size for models that leave it symbolic.
    pub fn with_input_size(mut self, width: usize, height: usize) -> Self {
        self.input_width = Some(width);
        self.input_height = Some(height);
        self
    }

    /// `Duration::ZERO` disables the timeout.
    pub fn with_inference_timeout(mut self, timeout: Duration) -> Self {
        self.inference_timeout_ms = timeout.as_millis() as u64;
        self
    }

    pub fn with_retries(mut self, retries: u32) -> Self {
        self.retries = retries;
        self
    }

    pub fn with_retry_backoff(mut self, backoff: Duration) -> Self {
        self.retry_backoff_ms = backoff.as_millis() as u64;
        self
    }

    pub fn with_device(mut self, device: Device) -> Self {
        self.device = device;
        self
    }

    pub fn with_intra_threads(mut self, threads: usize) -> Self {
        self.intra_threads = Some(threads);
        self
    }

    pub fn with_camera(mut self, camera: CameraConfig) -> Self {
        self.camera = camera;
        self
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    pub fn filter(&self) -> Filter {
        self.filter
    }

    pub fn input_size(&self) -> Option<InputSize> {
        Some(InputSize {
            width: self.input_width?,
            height: self.input_height?,
        })
    }

    pub fn inference_timeout(&self) -> Option<Duration> {
        (self.inference_timeout_ms > 0).then(|| Duration::from_millis(self.inference_timeout_ms))
    }

    pub fn retries(&self) -> u32 {
        self.retries
    }

    pub fn retry_backoff(&self) -> Duration {
        Duration::from_millis(self.retry_backoff_ms)
    }

    pub fn device(&self) -> &Device {
        &self.device
    }

    pub fn intra_threads(&self) -> Option<usize> {
        self.intra_threads
    }

    pub fn camera(&self) -> &CameraConfig {
        &self.camera
    }
}
