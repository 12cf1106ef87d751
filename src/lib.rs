//! # Photo Collage
//!
//! Arranges a folder of images into a single grid composite of fixed size.
//!
//! # Pipeline
//!
//! ```text
//! 1. Scan     source/   →  sorted image list     (png, jpg, jpeg, bmp, gif)
//! 2. Layout   count     →  GridLayout            (ceil(sqrt(n)) square grid)
//! 3. Place    images    →  canvas                (thumbnail + paste, row-major)
//! 4. Encode   canvas    →  output file           (format from extension)
//! ```
//!
//! One bad image does not spoil the run: it is recorded in the
//! [`collage::CollageReport`] and its cell stays background colour.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scan`] | Lists eligible image files directly inside the source directory |
//! | [`imaging`] | Grid arithmetic, the [`imaging::ImageBackend`] trait and its `image`-crate implementation |
//! | [`collage`] | The build pipeline: canvas, placement cursor, per-image results |
//! | [`config`] | TOML config loading, layering with CLI flags, validation |
//! | [`output`] | CLI output formatting for build and check results |
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! let report = photo_collage::build(
//!     Path::new("holiday"),
//!     Path::new("holiday.jpg"),
//!     1000,
//!     1000,
//!     photo_collage::collage::DEFAULT_MARGIN,
//! )?;
//! for failure in &report.failures {
//!     eprintln!("skipped {}: {}", failure.source.display(), failure.error);
//! }
//! # Ok::<(), photo_collage::CollageError>(())
//! ```
//!
//! # Design Decisions
//!
//! ## Sorted Input
//!
//! Directory listing order differs between platforms and filesystems, so the
//! eligible files are sorted by path before the grid is filled. The same
//! directory always produces the same collage.
//!
//! ## Fail Fast on Degenerate Layouts
//!
//! When margins eat the whole canvas the computed cell size reaches zero or
//! below. That is reported as [`imaging::LayoutError::CellTooSmall`] before a
//! single image is decoded.

pub mod collage;
pub mod config;
pub mod imaging;
pub mod output;
pub mod scan;

pub use collage::{
    CollageError, CollageOptions, CollageReport, ImageFailure, Placement, build,
    build_with_options,
};

#[cfg(test)]
pub(crate) mod test_helpers;
