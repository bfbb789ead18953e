use crate::{ImageError, RawFrame};
use pawcam_base::Tensor;

/// A decoded image in HWC layout, keeping the source pixel precision.
#[derive(Debug, Clone, PartialEq)]
pub enum Image {
    U8(Tensor<u8>),
    U16(Tensor<u16>),
    F32(Tensor<f32>),
}

impl Image {
    pub fn shape(&self) -> &[usize] {
        match self {
            Image::U8(t) => &t.shape,
            Image::U16(t) => &t.shape,
            Image::F32(t) => &t.shape,
        }
    }

    pub fn height(&self) -> usize {
        self.shape()[0]
    }

    pub fn width(&self) -> usize {
        self.shape()[1]
    }

    pub fn channels(&self) -> usize {
        self.shape()[2]
    }

    /// Convert to an 8-bit RGBA frame.
    ///
    /// Gray is replicated into R, G and B; a missing alpha channel becomes
    /// opaque. 16-bit samples keep their high byte and float samples are
    /// clamped to [0, 1] before scaling to 0..=255.
    pub fn to_raw_frame(&self) -> Result<RawFrame, ImageError> {
        let samples: Vec<u8> = match self {
            Image::U8(t) => t.data.clone(),
            Image::U16(t) => t.data.iter().map(|&v| (v >> 8) as u8).collect(),
            Image::F32(t) => t
                .data
                .iter()
                .map(|&v| (v.clamp(0.0, 1.0) * 255.0).round() as u8)
                .collect(),
        };

        let channels = self.channels();
        if !(1..=4).contains(&channels) {
            return Err(ImageError::Decode(format!(
                "unsupported channel count: {channels}"
            )));
        }

        let mut rgba = Vec::with_capacity(self.width() * self.height() * 4);
        for px in samples.chunks_exact(channels) {
            let pixel = match px {
                &[l] => [l, l, l, u8::MAX],
                &[l, a] => [l, l, l, a],
                &[r, g, b] => [r, g, b, u8::MAX],
                &[r, g, b, a] => [r, g, b, a],
                _ => unreachable!("channel count checked above"),
            };
            rgba.extend_from_slice(&pixel);
        }

        RawFrame::new(self.width(), self.height(), rgba)
    }
}
