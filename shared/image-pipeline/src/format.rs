use std::fmt;

/// Encoding format detected from an image's content
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    /// JPEG / JFIF
    Jpeg,
    /// PNG
    Png,
    /// GIF (first frame only once decoded)
    Gif,
    /// Any other format the decoder understands but the proxy cannot re-encode
    Other(image::ImageFormat),
}

impl ImageFormat {
    /// Whether the pipeline can re-encode images of this format
    #[must_use]
    pub const fn is_encodable(self) -> bool {
        matches!(self, Self::Jpeg | Self::Png | Self::Gif)
    }
}

impl From<image::ImageFormat> for ImageFormat {
    fn from(format: image::ImageFormat) -> Self {
        match format {
            image::ImageFormat::Jpeg => Self::Jpeg,
            image::ImageFormat::Png => Self::Png,
            image::ImageFormat::Gif => Self::Gif,
            other => Self::Other(other),
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Jpeg => f.write_str("jpeg"),
            Self::Png => f.write_str("png"),
            Self::Gif => f.write_str("gif"),
            Self::Other(other) => write!(f, "{}", format!("{other:?}").to_lowercase()),
        }
    }
}
