//! Image processing — pure Rust, no system libraries.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Identify** | `ImageReader::into_dimensions` |
//! | **Thumbnail** | decode + `resize_exact` (Lanczos3), never upscaled |
//! | **Encode** | PNG / JPEG / BMP / GIF chosen by output extension |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for grid and fit arithmetic (unit testable)
//! - **Parameters**: Data structures describing image operations
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]

pub mod backend;
mod calculations;
mod params;
pub mod rust_backend;

pub use backend::{BackendError, Dimensions, ImageBackend};
pub use calculations::{
    GridLayout, LayoutError, calculate_cell_extent, calculate_fit_dimensions, calculate_grid_size,
};
pub use params::{EncodeParams, OutputFormat, Quality, ThumbnailParams};
pub use rust_backend::RustBackend;
