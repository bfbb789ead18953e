//! Image handling for pawcam.
//!
//! Decodes uploaded or camera-delivered images with the `image` crate,
//! normalizes them to `RawFrame` (8-bit RGBA) and rescales frames to the
//! size a model expects.
//!
//! Decoded tensors use HWC layout: `[height, width, channels]`.

pub mod error;
pub mod image;
pub mod rawframe;
pub mod resize;

pub use error::ImageError;
pub use image::Image;
pub use rawframe::{RGBA_CHANNELS, RawFrame};
pub use resize::{Filter, Resampler};

use crates_image::DynamicImage;
use pawcam_base::Tensor;

fn to_tensor<T>(width: u32, height: u32, channels: usize, data: Vec<T>) -> Result<Tensor<T>, ImageError> {
    let shape = vec![height as usize, width as usize, channels];
    Ok(Tensor::new(shape, data)?)
}

/// Decodes an image from raw bytes, auto-detecting the format.
///
/// The pixel precision of the source is preserved (u8, u16 or f32); exotic
/// variants are converted to 8-bit RGBA.
///
/// # Errors
///
/// Returns `ImageError::Decode` if the data is invalid or the format is unsupported.
pub fn decode_image(data: &[u8]) -> Result<Image, ImageError> {
    let img = crates_image::load_from_memory(data)?;

    match img {
        DynamicImage::ImageLuma8(buf) => {
            let (w, h) = buf.dimensions();
            Ok(Image::U8(to_tensor(w, h, 1, buf.into_raw())?))
        }
        DynamicImage::ImageLumaA8(buf) => {
            let (w, h) = buf.dimensions();
            Ok(Image::U8(to_tensor(w, h, 2, buf.into_raw())?))
        }
        DynamicImage::ImageRgb8(buf) => {
            let (w, h) = buf.dimensions();
            Ok(Image::U8(to_tensor(w, h, 3, buf.into_raw())?))
        }
        DynamicImage::ImageRgba8(buf) => {
            let (w, h) = buf.dimensions();
            Ok(Image::U8(to_tensor(w, h, 4, buf.into_raw())?))
        }
        DynamicImage::ImageLuma16(buf) => {
            let (w, h) = buf.dimensions();
            Ok(Image::U16(to_tensor(w, h, 1, buf.into_raw())?))
        }
        DynamicImage::ImageRgb16(buf) => {
            let (w, h) = buf.dimensions();
            Ok(Image::U16(to_tensor(w, h, 3, buf.into_raw())?))
        }
        DynamicImage::ImageRgba16(buf) => {
            let (w, h) = buf.dimensions();
            Ok(Image::U16(to_tensor(w, h, 4, buf.into_raw())?))
        }
        DynamicImage::ImageRgb32F(buf) => {
            let (w, h) = buf.dimensions();
            Ok(Image::F32(to_tensor(w, h, 3, buf.into_raw())?))
        }
        _ => {
            let rgba = img.to_rgba8();
            let (w, h) = rgba.dimensions();
            Ok(Image::U8(to_tensor(w, h, 4, rgba.into_raw())?))
        }
    }
}

/// Decodes an image straight into an RGBA frame.
pub fn decode_frame(data: &[u8]) -> Result<RawFrame, ImageError> {
    decode_image(data)?.to_raw_frame()
}

/// Like `decode_frame`, but runs the CPU-bound decode on tokio's blocking pool.
pub async fn load_frame(data: Vec<u8>) -> Result<RawFrame, ImageError> {
    tokio::task::spawn_blocking(move || decode_frame(&data))
        .await
        .map_err(|e| ImageError::Decode(e.to_string()))?
}
