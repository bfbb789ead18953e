use std::fmt;

#[derive(Debug)]
pub enum ImageError {
    Decode(String),
    Resize(String),
    Frame { width: usize, height: usize, len: usize },
    Tensor(pawcam_base::TensorError),
}

impl fmt::Display for ImageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageError::Decode(msg) => write!(f, "decode error: {msg}"),
            ImageError::Resize(msg) => write!(f, "resize error: {msg}"),
            ImageError::Frame { width, height, len } => write!(
                f,
                "frame error: {width}x{height} RGBA needs {} bytes, got {len}",
                width * height * 4
            ),
            ImageError::Tensor(err) => write!(f, "tensor error: {err}"),
        }
    }
}

impl std::error::Error for ImageError {}

impl From<crates_image::ImageError> for ImageError {
    fn from(err: crates_image::ImageError) -> Self {
        ImageError::Decode(err.to_string())
    }
}

impl From<pawcam_base::TensorError> for ImageError {
    fn from(err: pawcam_base::TensorError) -> Self {
        ImageError::Tensor(err)
    }
}
