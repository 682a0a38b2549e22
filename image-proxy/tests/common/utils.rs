use std::io::Cursor;

use axum::{http::header::CONTENT_TYPE, response::Response};
use bytes::Bytes;
use http_body_util::BodyExt;
use image::{DynamicImage, Rgb, RgbImage, Rgba, RgbaImage};

/// Render a gradient test image of the given size and container format
pub fn create_test_image(width: u32, height: u32, format: image::ImageFormat) -> Vec<u8> {
    let image = if format == image::ImageFormat::Gif {
        DynamicImage::ImageRgba8(RgbaImage::from_fn(width, height, |x, y| {
            Rgba([(x % 256) as u8, (y % 256) as u8, 64, 255])
        }))
    } else {
        DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
            Rgb([(x % 256) as u8, (y % 256) as u8, 64])
        }))
    };

    let mut buffer = Cursor::new(Vec::new());
    image.write_to(&mut buffer, format).unwrap();
    buffer.into_inner()
}

/// Detected format and dimensions of encoded image bytes
pub fn inspect_image(bytes: &[u8]) -> (image::ImageFormat, u32, u32) {
    let format = image::guess_format(bytes).unwrap();
    let image = image::load_from_memory(bytes).unwrap();
    (format, image.width(), image.height())
}

/// Collect the response body
pub async fn response_bytes(response: Response) -> Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

/// Parse response body to JSON
pub async fn parse_response_body(response: Response) -> serde_json::Value {
    serde_json::from_slice(&response_bytes(response).await).unwrap()
}

/// `Content-Type` header of a response
pub fn content_type(response: &Response) -> Option<String> {
    response
        .headers()
        .get(CONTENT_TYPE)
        .map(|value| value.to_str().unwrap().to_string())
}
