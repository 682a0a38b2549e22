use std::io::Cursor;

use image::DynamicImage;

use crate::{ImageFormat, PipelineError, PipelineResult};

/// Encodes `image` in `format` with the codec defaults
///
/// JPEG uses the encoder's default quality; PNG and GIF take no options.
///
/// # Errors
///
/// Returns `PipelineError::UnsupportedFormat` for formats other than JPEG, PNG and GIF
/// Returns `PipelineError::Encode` if the codec fails to write the image
pub fn encode(image: &DynamicImage, format: ImageFormat) -> PipelineResult<Vec<u8>> {
    let output = match format {
        ImageFormat::Jpeg => image::ImageFormat::Jpeg,
        ImageFormat::Png => image::ImageFormat::Png,
        ImageFormat::Gif => image::ImageFormat::Gif,
        ImageFormat::Other(_) => return Err(PipelineError::UnsupportedFormat(format)),
    };

    let mut buffer = Cursor::new(Vec::new());
    image
        .write_to(&mut buffer, output)
        .map_err(PipelineError::Encode)?;

    Ok(buffer.into_inner())
}
