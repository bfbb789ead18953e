use crates_image::ImageEncoder;
use pawcam_image::{Image, ImageError, decode_frame, decode_image, load_frame};

fn encode_png(raw: &[u8], width: u32, height: u32, color: crates_image::ExtendedColorType) -> Vec<u8> {
    let mut buffer = Vec::new();
    crates_image::codecs::png::PngEncoder::new(&mut buffer)
        .write_image(raw, width, height, color)
        .unwrap();
    buffer
}

#[test]
fn test_decode_jpeg_rgb() {
    let mut buffer = Vec::new();
    let img = crates_image::RgbImage::from_fn(4, 2, |x, y| {
        let val = (x + y) as u8 * 32;
        crates_image::Rgb([val, val + 16, val + 32])
    });
    crates_image::codecs::jpeg::JpegEncoder::new(&mut buffer)
        .encode_image(&img)
        .unwrap();

    let decoded = decode_image(&buffer).unwrap();
    match decoded {
        Image::U8(ref tensor) => {
            assert_eq!(tensor.shape, vec![2, 4, 3]);
            assert_eq!(decoded.height(), 2);
            assert_eq!(decoded.width(), 4);
            assert_eq!(decoded.channels(), 3);
        }
        _ => panic!("Expected U8 variant"),
    }
}

#[test]
fn test_decode_png_16bit_keeps_precision() {
    let raw: Vec<u8> = [0u16, 4096, 8192, 16384, 20480, 24576]
        .iter()
        .flat_map(|v| v.to_be_bytes())
        .collect();
    let buffer = encode_png(&raw, 2, 1, crates_image::ExtendedColorType::Rgb16);

    let decoded = decode_image(&buffer).unwrap();
    assert!(matches!(decoded, Image::U16(_)));
    assert_eq!(decoded.shape(), &[1, 2, 3]);
}

#[test]
fn test_decode_frame_expands_rgb_to_rgba() {
    let raw = vec![
        255, 0, 0, // red
        0, 255, 0, // green
        0, 0, 255, // blue
        128, 128, 128, // gray
    ];
    let buffer = encode_png(&raw, 2, 2, crates_image::ExtendedColorType::Rgb8);

    let frame = decode_frame(&buffer).unwrap();
    assert_eq!((frame.width(), frame.height()), (2, 2));
    assert_eq!(frame.data().len(), 16);
    assert_eq!(frame.pixel(0, 0), Some([255, 0, 0, 255]));
    assert_eq!(frame.pixel(1, 0), Some([0, 255, 0, 255]));
    assert_eq!(frame.pixel(0, 1), Some([0, 0, 255, 255]));
    assert_eq!(frame.pixel(1, 1), Some([128, 128, 128, 255]));
}

#[test]
fn test_decode_frame_keeps_alpha() {
    let raw = vec![10, 20, 30, 40];
    let buffer = encode_png(&raw, 1, 1, crates_image::ExtendedColorType::Rgba8);

    let frame = decode_frame(&buffer).unwrap();
    assert_eq!(frame.pixel(0, 0), Some([10, 20, 30, 40]));
}

#[test]
fn test_decode_frame_replicates_gray() {
    let buffer = encode_png(&[7, 200], 2, 1, crates_image::ExtendedColorType::L8);

    let frame = decode_frame(&buffer).unwrap();
    assert_eq!(frame.pixel(0, 0), Some([7, 7, 7, 255]));
    assert_eq!(frame.pixel(1, 0), Some([200, 200, 200, 255]));
}

#[test]
fn test_decode_invalid_data() {
    let result = decode_image(&[0xFF, 0x00, 0x12, 0x34]);
    assert!(matches!(result, Err(ImageError::Decode(_))));
}

#[test]
fn test_decode_empty_data() {
    assert!(decode_image(&[]).is_err());
}

#[tokio::test]
async fn test_load_frame_on_blocking_pool() {
    let buffer = encode_png(&[1, 2, 3, 4, 5, 6], 2, 1, crates_image::ExtendedColorType::Rgb8);

    let frame = load_frame(buffer).await.unwrap();
    assert_eq!(frame.pixel(1, 0), Some([4, 5, 6, 255]));
}

#[tokio::test]
async fn test_load_frame_propagates_decode_error() {
    let result = load_frame(b"not an image".to_vec()).await;
    assert!(matches!(result, Err(ImageError::Decode(_))));
}
