use pawcam_image::ImageError;
use std::fmt;

#[derive(Debug)]
pub enum CameraError {
    /// No matching device, or it could not be opened.
    DeviceUnavailable(String),
    Stream(String),
    Decode(ImageError),
    Channel(String),
    /// A facing mode name other than `user` or `environment`.
    UnknownFacing(String),
    /// The source was used after `release()`.
    Released,
}

impl fmt::Display for CameraError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CameraError::DeviceUnavailable(msg) => write!(f, "device unavailable: {msg}"),
            CameraError::Stream(msg) => write!(f, "stream error: {msg}"),
            CameraError::Decode(err) => write!(f, "decode error: {err}"),
            CameraError::Channel(msg) => write!(f, "channel error: {msg}"),
            CameraError::UnknownFacing(name) => write!(f, "unknown facing mode: {name}"),
            CameraError::Released => write!(f, "frame source already released"),
        }
    }
}

impl std::error::Error for CameraError {}

impl From<std::io::Error> for CameraError {
    fn from(err: std::io::Error) -> Self {
        CameraError::DeviceUnavailable(err.to_string())
    }
}

impl From<ImageError> for CameraError {
    fn from(err: ImageError) -> Self {
        CameraError::Decode(err)
    }
}
