//! In-memory image pipeline for the image proxy
//!
//! This crate holds the CPU-bound half of a proxied image request: detecting and
//! decoding the fetched bytes, deciding which dimension to resize along,
//! resampling, and encoding the result back into its original format.
//! Nothing here performs I/O; callers own the bytes for the whole pipeline.

#![deny(clippy::all, clippy::pedantic, clippy::nursery, dead_code)]

mod decode;
mod encode;
mod error;
mod format;
mod plan;
mod resize;

pub use decode::{decode, DecodedImage};
pub use encode::encode;
pub use error::{PipelineError, PipelineResult};
pub use format::ImageFormat;
pub use plan::{clamp_dimension, ResizePlan, MAX_DIMENSION, MAX_OUTPUT_PIXELS};
pub use resize::resize;
