//! Error types for pipeline operations

use thiserror::Error;

use crate::ImageFormat;

/// Result type for pipeline operations
pub type PipelineResult<T> = Result<T, PipelineError>;

/// Errors that can occur while decoding, resizing or encoding an image
#[derive(Error, Debug)]
pub enum PipelineError {
    /// The bytes do not start with the signature of any known image format
    #[error("unrecognized image format: {0}")]
    UnrecognizedFormat(#[source] image::ImageError),

    /// The format was detected but the payload could not be decoded
    #[error("failed to decode {format} image: {source}")]
    Decode {
        /// Format detected from the magic bytes
        format: ImageFormat,
        /// Underlying codec error
        #[source]
        source: image::ImageError,
    },

    /// The planned output would exceed the pixel budget
    #[error("resize output of {width}x{height} pixels is too large")]
    OutputTooLarge {
        /// Planned output width
        width: u64,
        /// Planned output height
        height: u64,
    },

    /// There is no encoder for the detected format
    #[error("no encoder available for {0} images")]
    UnsupportedFormat(ImageFormat),

    /// The encoder failed to write the resized image
    #[error("failed to encode image: {0}")]
    Encode(#[source] image::ImageError),
}
