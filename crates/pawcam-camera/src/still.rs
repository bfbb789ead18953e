use crate::{CameraError, FrameSource};
use pawcam_image::RawFrame;
use std::path::Path;

/// A single decoded image posing as a frame source.
///
/// Every snapshot returns the same frame until the source is released.
#[derive(Debug, Clone)]
pub struct StillImage {
    frame: Option<RawFrame>,
}

impl StillImage {
    pub fn new(frame: RawFrame) -> Self {
        Self { frame: Some(frame) }
    }

    /// Decode encoded image bytes (JPEG, PNG, ...) off the async runtime.
    pub async fn from_bytes(data: Vec<u8>) -> Result<Self, CameraError> {
        let frame = pawcam_image::load_frame(data).await?;
        Ok(Self::new(frame))
    }

    /// Read and decode an image file.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, CameraError> {
        let path = path.as_ref();
        let data = tokio::fs::read(path)
            .await
            .map_err(|e| CameraError::Stream(format!("cannot read {}: {e}", path.display())))?;
        let still = Self::from_bytes(data).await?;
        if let Some(frame) = &still.frame {
            log::info!(
                "Loaded {} ({}x{})",
                path.display(),
                frame.width(),
                frame.height()
            );
        }
        Ok(still)
    }
}

impl FrameSource for StillImage {
    async fn snapshot(&mut self) -> Result<RawFrame, CameraError> {
        self.frame.clone().ok_or(CameraError::Released)
    }

    fn release(&mut self) {
        self.frame = None;
    }

    fn is_released(&self) -> bool {
        self.frame.is_none()
    }
}
