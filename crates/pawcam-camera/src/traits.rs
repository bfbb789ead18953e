use crate::{CameraError, Constraints};
use pawcam_image::RawFrame;

/// Something that can show the current image: a live camera or an upload.
#[allow(async_fn_in_trait)]
pub trait FrameSource {
    /// The current visual content at native resolution, as RGBA.
    async fn snapshot(&mut self) -> Result<RawFrame, CameraError>;

    /// Stop the underlying stream and close the device. Calling it again is
    /// a no-op; `snapshot` fails with `CameraError::Released` afterwards.
    fn release(&mut self);

    fn is_released(&self) -> bool;
}

/// Opens frame sources matching a set of constraints.
#[allow(async_fn_in_trait)]
pub trait CameraProvider {
    type Source: FrameSource;

    /// Open a source.
    ///
    /// Fails with `CameraError::DeviceUnavailable` when no device matches
    /// the constraints or it cannot be opened.
    async fn acquire(&mut self, constraints: &Constraints) -> Result<Self::Source, CameraError>;
}
