//! Collage assembly.
//!
//! Turns a directory of images into one grid composite:
//!
//! ```text
//! source/ → sorted image list → GridLayout → per image: thumbnail + paste → encode → output file
//! ```
//!
//! ## Grid
//!
//! `n` images go into a square grid of `ceil(sqrt(n))` rows and columns,
//! filled row-major. Every cell is `floor((canvas - (grid + 1) * margin) / grid)`
//! pixels on each axis and has a `margin` gutter on all sides. The last row
//! may be partially filled; unused cells stay background colour.
//!
//! ## Failure Semantics
//!
//! Directory-level problems (missing directory, no eligible files, a layout
//! whose cells would be smaller than one pixel, an output extension we cannot
//! encode) abort before any image is decoded and no output file is created.
//!
//! A single image that fails to decode is recorded in
//! [`CollageReport::failures`] and its cell is left empty; the run carries on.
//!
//! The canvas is encoded in memory and written in one call, so a failed
//! encode never leaves a partial file behind.
//!
//! ## Memory
//!
//! Only the canvas and the current thumbnail are alive at any time. Each
//! decoded image is dropped as soon as it has been pasted.

use crate::imaging::{
    BackendError, Dimensions, EncodeParams, GridLayout, ImageBackend, LayoutError, OutputFormat,
    Quality, RustBackend, ThumbnailParams,
};
use crate::scan::{self, ScanError};
use image::{Rgb, RgbImage};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Margin used by [`build`] when the caller has no preference.
pub const DEFAULT_MARGIN: u32 = 10;

/// Background of every cell no image covers.
pub const DEFAULT_BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);

#[derive(Error, Debug)]
pub enum CollageError {
    #[error(transparent)]
    Scan(#[from] ScanError),
    #[error("Invalid layout: {0}")]
    InvalidLayout(#[from] LayoutError),
    #[error("Canvas must be at least 1x1 pixels, got {width}x{height}")]
    InvalidCanvas { width: u32, height: u32 },
    #[error("Unsupported output format: {} (expected png, jpg, jpeg, bmp or gif)", .0.display())]
    UnsupportedOutputFormat(PathBuf),
    #[error("Failed to encode collage: {0}")]
    Encode(#[source] BackendError),
    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Canvas and encoding settings for one run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollageOptions {
    pub width: u32,
    pub height: u32,
    pub margin: u32,
    pub background: Rgb<u8>,
    pub quality: Quality,
}

impl CollageOptions {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    fn validate(&self) -> Result<(), CollageError> {
        if self.width == 0 || self.height == 0 {
            return Err(CollageError::InvalidCanvas {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }
}

impl Default for CollageOptions {
    fn default() -> Self {
        Self {
            width: 1000,
            height: 1000,
            margin: DEFAULT_MARGIN,
            background: DEFAULT_BACKGROUND,
            quality: Quality::default(),
        }
    }
}

/// One image successfully pasted onto the canvas.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Placement {
    pub source: PathBuf,
    /// Row-major cell position.
    pub cell: usize,
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// One image that could not be processed. Its cell stays background colour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageFailure {
    pub source: PathBuf,
    pub cell: usize,
    pub error: String,
}

/// Outcome of a successful run.
#[derive(Debug, Clone, Serialize)]
pub struct CollageReport {
    pub output: PathBuf,
    pub layout: GridLayout,
    pub placements: Vec<Placement>,
    pub failures: Vec<ImageFailure>,
}

impl CollageReport {
    /// True when every eligible image made it onto the canvas.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// The in-memory bitmap being assembled.
///
/// Owned by a single run and mutated only through [`Canvas::paste`].
pub struct Canvas {
    pixels: RgbImage,
}

impl Canvas {
    pub fn new(width: u32, height: u32, background: Rgb<u8>) -> Self {
        Self {
            pixels: RgbImage::from_pixel(width, height, background),
        }
    }

    /// Copy `tile` onto the canvas with its top-left corner at `(x, y)`.
    ///
    /// Pixels falling outside the canvas are clipped.
    pub fn paste(&mut self, tile: &RgbImage, x: u32, y: u32) {
        image::imageops::replace(&mut self.pixels, tile, i64::from(x), i64::from(y));
    }

    pub fn pixels(&self) -> &RgbImage {
        &self.pixels
    }
}

/// Sequential cell position, advanced once per image in grid order.
///
/// Moves right by `cell_width + margin` after each image and wraps to a new
/// row after every `grid_size` images.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacementCursor {
    x: u32,
    y: u32,
    column: u32,
    layout: GridLayout,
}

impl PlacementCursor {
    pub fn new(layout: GridLayout) -> Self {
        Self {
            x: layout.margin,
            y: layout.margin,
            column: 0,
            layout,
        }
    }

    pub fn position(&self) -> (u32, u32) {
        (self.x, self.y)
    }

    pub fn advance(&mut self) {
        self.x += self.layout.cell_width + self.layout.margin;
        self.column += 1;
        if self.column == self.layout.grid_size {
            self.column = 0;
            self.x = self.layout.margin;
            self.y += self.layout.cell_height + self.layout.margin;
        }
    }
}

/// Build a collage with the default background and quality.
///
/// See [`build_with_backend`] for the full pipeline.
pub fn build(
    source: &Path,
    output: &Path,
    width: u32,
    height: u32,
    margin: u32,
) -> Result<CollageReport, CollageError> {
    let options = CollageOptions {
        margin,
        ..CollageOptions::new(width, height)
    };
    build_with_options(source, output, &options)
}

pub fn build_with_options(
    source: &Path,
    output: &Path,
    options: &CollageOptions,
) -> Result<CollageReport, CollageError> {
    build_with_backend(&RustBackend::new(), source, output, options)
}

/// Build a collage using a specific backend (allows testing with mock).
pub fn build_with_backend(
    backend: &impl ImageBackend,
    source: &Path,
    output: &Path,
    options: &CollageOptions,
) -> Result<CollageReport, CollageError> {
    options.validate()?;
    let format = OutputFormat::from_path(output)
        .ok_or_else(|| CollageError::UnsupportedOutputFormat(output.to_path_buf()))?;

    let images = scan::collect_images(source)?;
    let layout = GridLayout::compute(images.len(), options.width, options.height, options.margin)?;
    log::info!(
        "arranging {} images in a {}x{} grid ({}x{} cells)",
        images.len(),
        layout.grid_size,
        layout.grid_size,
        layout.cell_width,
        layout.cell_height
    );

    let mut canvas = Canvas::new(options.width, options.height, options.background);
    let mut cursor = PlacementCursor::new(layout);
    let mut placements = Vec::with_capacity(images.len());
    let mut failures = Vec::new();

    for (cell, path) in images.iter().enumerate() {
        let (x, y) = cursor.position();
        match place_image(backend, &mut canvas, &layout, path, x, y) {
            Ok((width, height)) => {
                log::debug!("placed {} at ({x}, {y}) as {width}x{height}", path.display());
                placements.push(Placement {
                    source: path.clone(),
                    cell,
                    x,
                    y,
                    width,
                    height,
                });
            }
            Err(e) => {
                log::warn!("Error processing {}: {}", path.display(), e);
                failures.push(ImageFailure {
                    source: path.clone(),
                    cell,
                    error: e.to_string(),
                });
            }
        }
        cursor.advance();
    }

    let bytes = backend
        .encode(
            canvas.pixels(),
            &EncodeParams {
                format,
                quality: options.quality,
            },
        )
        .map_err(CollageError::Encode)?;
    drop(canvas);
    write_output(output, &bytes)?;

    log::info!("Collage saved to {}", output.display());
    Ok(CollageReport {
        output: output.to_path_buf(),
        layout,
        placements,
        failures,
    })
}

/// Thumbnail one image and paste it. The decoded bitmap is dropped on return.
fn place_image(
    backend: &impl ImageBackend,
    canvas: &mut Canvas,
    layout: &GridLayout,
    path: &Path,
    x: u32,
    y: u32,
) -> Result<(u32, u32), BackendError> {
    let thumb = backend.thumbnail(&ThumbnailParams {
        source: path.to_path_buf(),
        max_width: layout.cell_width,
        max_height: layout.cell_height,
    })?;
    canvas.paste(&thumb, x, y);
    Ok(thumb.dimensions())
}

fn write_output(path: &Path, bytes: &[u8]) -> Result<(), CollageError> {
    let write_err = |source| CollageError::Write {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(write_err)?;
    }
    fs::write(path, bytes).map_err(write_err)
}

// ============================================================================
// Check: layout preview without decoding or writing anything
// ============================================================================

/// One file as seen by [`check`].
#[derive(Debug)]
pub struct CheckEntry {
    pub source: PathBuf,
    pub dimensions: Result<Dimensions, BackendError>,
}

#[derive(Debug)]
pub struct CheckReport {
    pub layout: GridLayout,
    pub entries: Vec<CheckEntry>,
}

impl CheckReport {
    pub fn unreadable(&self) -> impl Iterator<Item = &CheckEntry> {
        self.entries.iter().filter(|e| e.dimensions.is_err())
    }
}

/// Enumerate images, compute the layout and read each image header.
pub fn check(source: &Path, options: &CollageOptions) -> Result<CheckReport, CollageError> {
    check_with_backend(&RustBackend::new(), source, options)
}

pub fn check_with_backend(
    backend: &impl ImageBackend,
    source: &Path,
    options: &CollageOptions,
) -> Result<CheckReport, CollageError> {
    options.validate()?;
    let images = scan::collect_images(source)?;
    let layout = GridLayout::compute(images.len(), options.width, options.height, options.margin)?;

    let entries = images
        .into_iter()
        .map(|source| {
            let dimensions = backend.identify(&source);
            CheckEntry { source, dimensions }
        })
        .collect();

    Ok(CheckReport { layout, entries })
}
