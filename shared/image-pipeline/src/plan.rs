//! Resize planning
//!
//! A plan never carries two independent targets. When a caller asks for both a
//! width and a height, only one survives so the original aspect ratio is kept:
//!
//! * landscape source: the requested width is dropped, the height is kept
//! * portrait source: the requested height is dropped, the width is kept
//! * square source: the larger requested value is dropped
//!
//! Existing callers depend on this exact tie-break.

use tracing::debug;

use crate::{PipelineError, PipelineResult};

/// Largest width or height a caller may request
pub const MAX_DIMENSION: u32 = 1920;

/// Largest pixel count a resize may produce, four 1920x1920 frames
pub const MAX_OUTPUT_PIXELS: u64 = 4 * 1920 * 1920;

/// Caps a requested dimension to [`MAX_DIMENSION`]
#[must_use]
pub const fn clamp_dimension(value: u32) -> u32 {
    if value > MAX_DIMENSION {
        MAX_DIMENSION
    } else {
        value
    }
}

/// Effective resize target; at most one of the two dimensions is non-zero
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizePlan {
    target_width: u32,
    target_height: u32,
}

impl ResizePlan {
    /// Builds the plan for the requested dimensions of an image of the given natural size
    ///
    /// Both requested values are clamped to [`MAX_DIMENSION`] first. A zero means
    /// "not requested".
    #[must_use]
    pub fn new(
        requested_width: u32,
        requested_height: u32,
        natural_width: u32,
        natural_height: u32,
    ) -> Self {
        let width = clamp_dimension(requested_width);
        let height = clamp_dimension(requested_height);

        if width == 0 || height == 0 {
            return Self {
                target_width: width,
                target_height: height,
            };
        }

        let keep_height = match natural_width.cmp(&natural_height) {
            std::cmp::Ordering::Greater => true,
            std::cmp::Ordering::Less => false,
            std::cmp::Ordering::Equal => width > height,
        };

        debug!(
            requested_width = width,
            requested_height = height,
            natural_width,
            natural_height,
            keep_height,
            "Both dimensions requested, keeping one"
        );

        if keep_height {
            Self {
                target_width: 0,
                target_height: height,
            }
        } else {
            Self {
                target_width: width,
                target_height: 0,
            }
        }
    }

    /// Target width, zero when the width follows the aspect ratio
    #[must_use]
    pub const fn target_width(&self) -> u32 {
        self.target_width
    }

    /// Target height, zero when the height follows the aspect ratio
    #[must_use]
    pub const fn target_height(&self) -> u32 {
        self.target_height
    }

    /// True when neither dimension was requested
    #[must_use]
    pub const fn is_noop(&self) -> bool {
        self.target_width == 0 && self.target_height == 0
    }

    /// Final pixel dimensions for an image of the given natural size
    ///
    /// The unspecified dimension is scaled by the same ratio as the bounded one
    /// and rounded as `floor(0.7 + x)`, never below one pixel. Upscaling is allowed.
    ///
    /// # Errors
    ///
    /// Returns `PipelineError::OutputTooLarge` if the result exceeds [`MAX_OUTPUT_PIXELS`]
    pub fn output_dimensions(
        &self,
        natural_width: u32,
        natural_height: u32,
    ) -> PipelineResult<(u32, u32)> {
        let (width, height) = match (self.target_width, self.target_height) {
            (0, 0) => return Ok((natural_width, natural_height)),
            (width, 0) => (
                u64::from(width),
                scale(natural_height, width, natural_width),
            ),
            (0, height) => (
                scale(natural_width, height, natural_height),
                u64::from(height),
            ),
            (width, height) => (u64::from(width), u64::from(height)),
        };

        if width.saturating_mul(height) > MAX_OUTPUT_PIXELS {
            return Err(PipelineError::OutputTooLarge { width, height });
        }

        match (u32::try_from(width), u32::try_from(height)) {
            (Ok(width), Ok(height)) => Ok((width, height)),
            _ => Err(PipelineError::OutputTooLarge { width, height }),
        }
    }
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::suboptimal_flops
)]
fn scale(other: u32, target: u32, bounded: u32) -> u64 {
    if bounded == 0 {
        return u64::from(other.max(1));
    }
    let scaled = 0.7 + f64::from(other) * f64::from(target) / f64::from(bounded);
    (scaled as u64).max(1)
}
