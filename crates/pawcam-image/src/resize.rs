use crate::{ImageError, RawFrame};
use crates_image::{
    RgbaImage,
    imageops::{self, FilterType},
};
use serde::Deserialize;

/// Rescales a frame to an exact pixel grid.
///
/// Implementations must be deterministic: the same frame and target size
/// always produce the same bytes.
pub trait Resampler: Send + Sync {
    fn resample(
        &self,
        frame: &RawFrame,
        width: usize,
        height: usize,
    ) -> Result<RawFrame, ImageError>;
}

/// Built-in resampling filters.
///
/// `Bilinear` is the default: it matches what a browser canvas does when an
/// image is drawn at a smaller size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Filter {
    Nearest,
    #[default]
    Bilinear,
}

impl Filter {
    fn filter_type(self) -> FilterType {
        match self {
            Filter::Nearest => FilterType::Nearest,
            Filter::Bilinear => FilterType::Triangle,
        }
    }
}

impl std::str::FromStr for Filter {
    type Err = ImageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "nearest" => Ok(Filter::Nearest),
            "bilinear" => Ok(Filter::Bilinear),
            other => Err(ImageError::Resize(format!("unknown filter: {other}"))),
        }
    }
}

impl Resampler for Filter {
    fn resample(
        &self,
        frame: &RawFrame,
        width: usize,
        height: usize,
    ) -> Result<RawFrame, ImageError> {
        if width == 0 || height == 0 {
            return Err(ImageError::Resize(format!(
                "target size must be non-zero, got {width}x{height}"
            )));
        }
        if frame.pixel_count() == 0 {
            return Err(ImageError::Resize("source frame is empty".to_string()));
        }
        if frame.width() == width && frame.height() == height {
            return Ok(frame.clone());
        }

        let source = RgbaImage::from_raw(
            frame.width() as u32,
            frame.height() as u32,
            frame.data().to_vec(),
        )
        .ok_or_else(|| ImageError::Resize("frame buffer does not match its size".to_string()))?;

        let resized = imageops::resize(&source, width as u32, height as u32, self.filter_type());
        RawFrame::new(width, height, resized.into_raw())
    }
}
