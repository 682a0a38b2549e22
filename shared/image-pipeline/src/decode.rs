use image::DynamicImage;

use crate::{ImageFormat, PipelineError, PipelineResult};

/// A decoded raster together with the format it was stored in
#[derive(Debug, Clone)]
pub struct DecodedImage {
    image: DynamicImage,
    format: ImageFormat,
}

impl DecodedImage {
    /// Pixel data
    #[must_use]
    pub const fn image(&self) -> &DynamicImage {
        &self.image
    }

    /// Format detected from the source bytes
    #[must_use]
    pub const fn format(&self) -> ImageFormat {
        self.format
    }

    /// Natural width in pixels
    #[must_use]
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Natural height in pixels
    #[must_use]
    pub fn height(&self) -> u32 {
        self.image.height()
    }
}

/// Decodes raw object bytes, detecting the format from the content
///
/// # Errors
///
/// Returns `PipelineError::UnrecognizedFormat` if no known signature matches
/// Returns `PipelineError::Decode` if the detected codec rejects the payload
pub fn decode(bytes: &[u8]) -> PipelineResult<DecodedImage> {
    let detected = image::guess_format(bytes).map_err(PipelineError::UnrecognizedFormat)?;

    let image = image::load_from_memory_with_format(bytes, detected).map_err(|source| {
        PipelineError::Decode {
            format: detected.into(),
            source,
        }
    })?;

    Ok(DecodedImage {
        image,
        format: detected.into(),
    })
}
