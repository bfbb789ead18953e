use crate::{CameraConfig, CameraError, CameraProvider, Constraints, FrameSource};
use pawcam_image::RawFrame;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TryRecvError;
use v4l::buffer::Type;
use v4l::io::mmap::Stream as MmapStream;
use v4l::io::traits::CaptureStream;
use v4l::video::Capture;
use v4l::{Device, Format, FourCC};

type FrameResult = Result<RawFrame, CameraError>;

/// A V4L2 camera streaming MJPEG on a background thread.
///
/// The stream starts as soon as the camera is opened; `snapshot` returns the
/// most recent frame the thread has decoded.
pub struct V4l2Camera {
    path: String,
    receiver: Option<mpsc::Receiver<FrameResult>>,
    cancel: Arc<AtomicBool>,
    thread_handle: Option<JoinHandle<()>>,
}

impl std::fmt::Debug for V4l2Camera {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("V4l2Camera")
            .field("path", &self.path)
            .field("receiver", &self.receiver.is_some())
            .field("thread_handle", &self.thread_handle.is_some())
            .finish()
    }
}

impl V4l2Camera {
    /// Open the device at `path` in MJPEG mode and start streaming.
    ///
    /// # Errors
    ///
    /// Returns `CameraError::DeviceUnavailable` if the device cannot be
    /// opened, does not support MJPEG, or rejects the format or frame rate.
    pub fn open(path: &str, config: &CameraConfig) -> Result<Self, CameraError> {
        let device = Device::with_path(path)
            .map_err(|e| CameraError::DeviceUnavailable(format!("{path}: {e}")))?;

        let format = Format::new(config.width(), config.height(), FourCC::new(b"MJPG"));
        let format = Capture::set_format(&device, &format)?;
        if format.fourcc != FourCC::new(b"MJPG") {
            return Err(CameraError::DeviceUnavailable(format!(
                "{path}: MJPEG format not supported"
            )));
        }

        let params = v4l::video::capture::Parameters::with_fps(config.fps());
        Capture::set_params(&device, &params)?;

        let buffer_count = config.buffer_count().max(1) as usize;
        let (tx, rx) = mpsc::channel(buffer_count);
        let cancel = Arc::new(AtomicBool::new(false));

        let handle = thread::spawn({
            let cancel = Arc::clone(&cancel);
            let path = path.to_string();
            move || {
                if let Err(e) = Self::capture_loop(device, tx, buffer_count, cancel) {
                    log::error!("{path}: capture thread stopped: {e}");
                }
            }
        });

        log::info!(
            "Opened {path} at {}x{} MJPEG",
            format.width,
            format.height
        );

        Ok(Self {
            path: path.to_string(),
            receiver: Some(rx),
            cancel,
            thread_handle: Some(handle),
        })
    }

    /// Reads frames, decodes MJPEG to RGBA and forwards them until the
    /// receiver is gone or the camera is released.
    fn capture_loop(
        device: Device,
        tx: mpsc::Sender<FrameResult>,
        buffer_count: usize,
        cancel: Arc<AtomicBool>,
    ) -> Result<(), CameraError> {
        let mut stream = MmapStream::with_buffers(&device, Type::VideoCapture, buffer_count as u32)?;

        while !cancel.load(Ordering::Relaxed) {
            let (frame_data, _metadata) = CaptureStream::next(&mut stream)
                .map_err(|e| CameraError::Stream(e.to_string()))?;

            // decode before the next call reuses the mmap buffer
            let frame = pawcam_image::decode_frame(frame_data).map_err(CameraError::from);

            if tx.blocking_send(frame).is_err() {
                break;
            }
        }

        Ok(())
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

impl FrameSource for V4l2Camera {
    async fn snapshot(&mut self) -> Result<RawFrame, CameraError> {
        let receiver = self.receiver.as_mut().ok_or(CameraError::Released)?;

        // skip frames queued while nobody was looking
        let mut latest = None;
        loop {
            match receiver.try_recv() {
                Ok(frame) => latest = Some(frame),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    if latest.is_none() {
                        return Err(CameraError::Channel("capture thread exited".to_string()));
                    }
                    break;
                }
            }
        }

        match latest {
            Some(frame) => frame,
            None => receiver
                .recv()
                .await
                .ok_or_else(|| CameraError::Channel("capture thread exited".to_string()))?,
        }
    }

    fn release(&mut self) {
        self.cancel.store(true, Ordering::Relaxed);
        // dropping the receiver unblocks a pending blocking_send
        drop(self.receiver.take());
        if let Some(handle) = self.thread_handle.take() {
            let _ = handle.join();
            log::debug!("{}: capture thread joined", self.path);
        }
    }

    fn is_released(&self) -> bool {
        self.receiver.is_none()
    }
}

impl Drop for V4l2Camera {
    fn drop(&mut self) {
        self.release();
    }
}

/// Opens `V4l2Camera`s, mapping facing modes to device paths from the config.
#[derive(Debug, Clone, Default)]
pub struct V4l2Provider {
    config: CameraConfig,
}

impl V4l2Provider {
    pub fn new(config: CameraConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CameraConfig {
        &self.config
    }
}

impl CameraProvider for V4l2Provider {
    type Source = V4l2Camera;

    async fn acquire(&mut self, constraints: &Constraints) -> Result<V4l2Camera, CameraError> {
        let path = self.config.device_for(constraints.facing).to_string();
        let config = self.config.clone();
        // opening and configuring the device blocks
        tokio::task::spawn_blocking(move || V4l2Camera::open(&path, &config))
            .await
            .map_err(|e| CameraError::DeviceUnavailable(e.to_string()))?
    }
}
