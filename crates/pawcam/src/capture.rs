use crate::PipelineError;
use pawcam_camera::FrameSource;
use pawcam_image::{Filter, RawFrame, Resampler};

/// Snapshots a source and rescales the image to the model's input size.
pub struct FrameCapture {
    resampler: Box<dyn Resampler>,
}

impl Default for FrameCapture {
    fn default() -> Self {
        Self::new(Filter::default())
    }
}

impl FrameCapture {
    pub fn new(resampler: impl Resampler + 'static) -> Self {
        Self {
            resampler: Box::new(resampler),
        }
    }

    /// Take the source's current image, scaled to exactly `width` x `height`.
    pub async fn capture<S: FrameSource>(
        &self,
        source: &mut S,
        width: usize,
        height: usize,
    ) -> Result<RawFrame, PipelineError> {
        let frame = source.snapshot().await?;
        log::debug!(
            "Captured {}x{} frame, scaling to {width}x{height}",
            frame.width(),
            frame.height()
        );
        self.resample(&frame, width, height)
    }

    pub fn resample(
        &self,
        frame: &RawFrame,
        width: usize,
        height: usize,
    ) -> Result<RawFrame, PipelineError> {
        Ok(self.resampler.resample(frame, width, height)?)
    }
}
