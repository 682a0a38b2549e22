use image::{imageops::FilterType, DynamicImage};

use crate::{PipelineResult, ResizePlan};

/// Resamples `image` according to `plan` with a Lanczos3 filter
///
/// The dimension left at zero in the plan follows the source aspect ratio.
/// A no-op plan returns an unmodified copy.
///
/// # Errors
///
/// Returns `PipelineError::OutputTooLarge` if the planned output exceeds the pixel budget
pub fn resize(image: &DynamicImage, plan: ResizePlan) -> PipelineResult<DynamicImage> {
    if plan.is_noop() {
        return Ok(image.clone());
    }

    let (width, height) = plan.output_dimensions(image.width(), image.height())?;
    Ok(image.resize_exact(width, height, FilterType::Lanczos3))
}
