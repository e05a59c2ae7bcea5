//! Pure calculation functions for image dimensions.
//!
//! All functions here are pure and testable without any I/O or images.

/// Target dimensions for an oversized picture.
///
/// Returns `None` when `width` is within `threshold` (nothing to do).
/// Otherwise both edges are multiplied by `scale` and truncated, never
/// going below one pixel. A scale that leaves the size unchanged is also
/// `None`.
///
/// # Examples
/// ```
/// # use docnav::imaging::downscaled_dimensions;
/// assert_eq!(downscaled_dimensions((4000, 3000), 2000, 0.5), Some((2000, 1500)));
/// assert_eq!(downscaled_dimensions((2000, 3000), 2000, 0.5), None);
/// ```
pub fn downscaled_dimensions(
    (width, height): (u32, u32),
    threshold: u32,
    scale: f64,
) -> Option<(u32, u32)> {
    if width <= threshold {
        return None;
    }
    let scaled = |edge: u32| ((edge as f64 * scale) as u32).max(1);
    Some((scaled(width), scaled(height))).filter(|&dims| dims != (width, height))
}
