use std::io::Cursor;

use image::{DynamicImage, Rgb, RgbImage, Rgba, RgbaImage};
use image_pipeline::{decode, encode, resize, ImageFormat, PipelineError, ResizePlan};
use pretty_assertions::assert_eq;

/// Renders a gradient of the given size in the given container format
fn fixture(width: u32, height: u32, format: image::ImageFormat) -> Vec<u8> {
    let image = if format == image::ImageFormat::Gif {
        DynamicImage::ImageRgba8(RgbaImage::from_fn(width, height, |x, y| {
            Rgba([(x % 256) as u8, (y % 256) as u8, 128, 255])
        }))
    } else {
        DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
            Rgb([(x % 256) as u8, (y % 256) as u8, 128])
        }))
    };

    let mut buffer = Cursor::new(Vec::new());
    image.write_to(&mut buffer, format).unwrap();
    buffer.into_inner()
}

/// Runs decode -> plan -> resize -> encode and re-decodes the result
fn round_trip(bytes: &[u8], width: u32, height: u32) -> (ImageFormat, u32, u32) {
    let decoded = decode(bytes).unwrap();
    let plan = ResizePlan::new(width, height, decoded.width(), decoded.height());
    let resized = resize(decoded.image(), plan).unwrap();
    let encoded = encode(&resized, decoded.format()).unwrap();

    let output = decode(&encoded).unwrap();
    (output.format(), output.width(), output.height())
}

#[test]
fn test_decode_detects_format_from_content() {
    let cases = [
        (image::ImageFormat::Jpeg, ImageFormat::Jpeg),
        (image::ImageFormat::Png, ImageFormat::Png),
        (image::ImageFormat::Gif, ImageFormat::Gif),
        (
            image::ImageFormat::Bmp,
            ImageFormat::Other(image::ImageFormat::Bmp),
        ),
    ];

    for (container, expected) in cases {
        let decoded = decode(&fixture(64, 32, container)).unwrap();
        assert_eq!(decoded.format(), expected, "container: {container:?}");
        assert_eq!((decoded.width(), decoded.height()), (64, 32));
    }
}

#[test]
fn test_jpeg_width_only_preserves_aspect_ratio() {
    let bytes = fixture(640, 480, image::ImageFormat::Jpeg);
    assert_eq!(round_trip(&bytes, 320, 0), (ImageFormat::Jpeg, 320, 240));
}

#[test]
fn test_png_height_only_preserves_aspect_ratio() {
    let bytes = fixture(300, 600, image::ImageFormat::Png);
    assert_eq!(round_trip(&bytes, 0, 100), (ImageFormat::Png, 50, 100));
}

#[test]
fn test_gif_round_trip_keeps_format() {
    let bytes = fixture(120, 60, image::ImageFormat::Gif);
    assert_eq!(round_trip(&bytes, 60, 0), (ImageFormat::Gif, 60, 30));
}

#[test]
fn test_both_dimensions_on_landscape_source_resize_by_height() {
    let bytes = fixture(1000, 500, image::ImageFormat::Png);
    assert_eq!(round_trip(&bytes, 200, 200), (ImageFormat::Png, 400, 200));
}

#[test]
fn test_both_dimensions_on_portrait_source_resize_by_width() {
    let bytes = fixture(500, 1000, image::ImageFormat::Jpeg);
    assert_eq!(round_trip(&bytes, 200, 200), (ImageFormat::Jpeg, 200, 400));
}

#[test]
fn test_oversized_request_is_capped() {
    let bytes = fixture(100, 50, image::ImageFormat::Png);
    assert_eq!(round_trip(&bytes, 5000, 0), (ImageFormat::Png, 1920, 960));
}

#[test]
fn test_encode_rejects_formats_without_encoder() {
    let decoded = decode(&fixture(16, 16, image::ImageFormat::Bmp)).unwrap();
    assert!(!decoded.format().is_encodable());

    let err = encode(decoded.image(), decoded.format()).unwrap_err();
    assert!(matches!(
        err,
        PipelineError::UnsupportedFormat(ImageFormat::Other(image::ImageFormat::Bmp))
    ));
}

#[test]
fn test_noop_plan_returns_same_dimensions() {
    let decoded = decode(&fixture(80, 40, image::ImageFormat::Png)).unwrap();
    let plan = ResizePlan::new(0, 0, decoded.width(), decoded.height());
    let resized = resize(decoded.image(), plan).unwrap();
    assert_eq!((resized.width(), resized.height()), (80, 40));
}

#[test]
fn test_upscaling_past_pixel_budget_fails() {
    let decoded = decode(&fixture(1, 4000, image::ImageFormat::Png)).unwrap();
    let plan = ResizePlan::new(1920, 0, decoded.width(), decoded.height());

    let err = resize(decoded.image(), plan).unwrap_err();
    assert!(matches!(
        err,
        PipelineError::OutputTooLarge {
            width: 1920,
            height: 7_680_000
        }
    ));
}
