//! Picture downscaling in pure Rust, with no system dependencies.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Identify** | `image::image_dimensions` (header only, no decode) |
//! | **Resize** | `image::DynamicImage::resize_exact` with `Lanczos3` |
//! | **Encode** | `image` PNG encoder, written over the source file |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for dimension math (unit testable)
//! - **Parameters**: Data structures describing a resize
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]
//! - **Operations**: Discovery of pictures and the parallel downscale pass

pub mod backend;
mod calculations;
pub mod operations;
mod params;
pub mod rust_backend;

pub use backend::{BackendError, Dimensions, ImageBackend};
pub use calculations::downscaled_dimensions;
pub use operations::{
    DownscaleOutcome, DownscaleReport, PictureResult, downscale_pictures, find_pictures,
};
pub use params::ResizeParams;
pub use rust_backend::RustBackend;
