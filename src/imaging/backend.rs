//! Image processing backend trait and shared types.
//!
//! The [`ImageBackend`] trait defines the three operations the collage needs:
//! identify, thumbnail, and encode.
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend), built on the `image`
//! crate. Tests use a recording mock so pipeline logic can be checked without
//! decoding real files.

use super::params::{EncodeParams, ThumbnailParams};
use image::RgbImage;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Processing failed: {0}")]
    ProcessingFailed(String),
}

/// Result of an identify operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

/// Trait for image processing backends.
///
/// A backend owns decoding and encoding. Every decoded bitmap it hands back
/// is already resized and converted to RGB, so callers only ever hold one
/// cell-sized image at a time.
pub trait ImageBackend {
    /// Get image dimensions without decoding pixel data.
    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError>;

    /// Decode the source and shrink it to fit the cell bounds.
    fn thumbnail(&self, params: &ThumbnailParams) -> Result<RgbImage, BackendError>;

    /// Encode a finished canvas into the bytes of the requested format.
    fn encode(&self, canvas: &RgbImage, params: &EncodeParams) -> Result<Vec<u8>, BackendError>;
}
