//! Pure calculation functions for grid layout and thumbnail dimensions.
//!
//! All functions here are pure and testable without any I/O or images.

use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    #[error("cannot lay out an empty image list")]
    Empty,
    #[error(
        "a {grid_size}x{grid_size} grid leaves cells of {cell_width}x{cell_height} pixels; \
         use a larger canvas or a smaller margin"
    )]
    CellTooSmall {
        grid_size: u32,
        cell_width: i64,
        cell_height: i64,
    },
}

/// Number of rows (and columns) of the smallest square grid holding `count` items.
///
/// Returns 0 for an empty list.
///
/// # Examples
/// ```
/// # use photo_collage::imaging::calculate_grid_size;
/// assert_eq!(calculate_grid_size(1), 1);
/// assert_eq!(calculate_grid_size(4), 2);
/// assert_eq!(calculate_grid_size(5), 3);
/// ```
pub fn calculate_grid_size(count: usize) -> u32 {
    if count == 0 {
        return 0;
    }
    let mut size = (count as f64).sqrt().ceil() as u64;
    // Float sqrt can land one off for large counts
    while size * size < count as u64 {
        size += 1;
    }
    while size > 1 && (size - 1) * (size - 1) >= count as u64 {
        size -= 1;
    }
    size as u32
}

/// Length of one cell along an axis: `floor((extent - (grid + 1) * margin) / grid)`.
///
/// Signed so that an over-subscribed axis reports how far negative it went.
pub fn calculate_cell_extent(extent: u32, grid_size: u32, margin: u32) -> i64 {
    let grid = i64::from(grid_size.max(1));
    let gutters = (grid + 1) * i64::from(margin);
    (i64::from(extent) - gutters).div_euclid(grid)
}

/// Derived grid geometry for one collage run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GridLayout {
    pub image_count: usize,
    /// Rows and columns (the grid is square).
    pub grid_size: u32,
    pub cell_width: u32,
    pub cell_height: u32,
    pub margin: u32,
    pub canvas_width: u32,
    pub canvas_height: u32,
}

impl GridLayout {
    /// Compute the grid for `count` images on a `width`x`height` canvas.
    ///
    /// Fails when the list is empty or when either cell dimension drops below
    /// one pixel.
    pub fn compute(count: usize, width: u32, height: u32, margin: u32) -> Result<Self, LayoutError> {
        let grid_size = calculate_grid_size(count);
        if grid_size == 0 {
            return Err(LayoutError::Empty);
        }

        let cell_width = calculate_cell_extent(width, grid_size, margin);
        let cell_height = calculate_cell_extent(height, grid_size, margin);
        if cell_width < 1 || cell_height < 1 {
            return Err(LayoutError::CellTooSmall {
                grid_size,
                cell_width,
                cell_height,
            });
        }

        Ok(Self {
            image_count: count,
            grid_size,
            cell_width: cell_width as u32,
            cell_height: cell_height as u32,
            margin,
            canvas_width: width,
            canvas_height: height,
        })
    }

    /// Top-left corner of the cell at row-major position `index`.
    pub fn cell_origin(&self, index: usize) -> (u32, u32) {
        let grid = self.grid_size as usize;
        let col = (index % grid) as u32;
        let row = (index / grid) as u32;
        (
            self.margin + col * (self.cell_width + self.margin),
            self.margin + row * (self.cell_height + self.margin),
        )
    }

    /// Number of rows that actually hold images (the last may be partial).
    pub fn occupied_rows(&self) -> u32 {
        self.image_count.div_ceil(self.grid_size as usize) as u32
    }
}

/// Calculate dimensions that fit `source` inside `bounds` without upscaling.
///
/// The aspect ratio is preserved. Each side is rounded and clamped to
/// `[1, bound]`, so a 1000x1 strip into a 10x10 cell yields 10x1.
///
/// # Examples
/// ```
/// # use photo_collage::imaging::calculate_fit_dimensions;
/// // 800x600 into a 485x485 cell → 485x364
/// assert_eq!(calculate_fit_dimensions((800, 600), (485, 485)), (485, 364));
///
/// // Already fits: never upscaled
/// assert_eq!(calculate_fit_dimensions((100, 50), (485, 485)), (100, 50));
/// ```
pub fn calculate_fit_dimensions(source: (u32, u32), bounds: (u32, u32)) -> (u32, u32) {
    let (src_w, src_h) = source;
    let (max_w, max_h) = bounds;

    if src_w <= max_w && src_h <= max_h {
        return (src_w, src_h);
    }

    let scale = (max_w as f64 / src_w as f64).min(max_h as f64 / src_h as f64);
    let w = ((src_w as f64 * scale).round() as u32).clamp(1, max_w.max(1));
    let h = ((src_h as f64 * scale).round() as u32).clamp(1, max_h.max(1));
    (w, h)
}
