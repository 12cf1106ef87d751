//! CLI output formatting for `build` and `check`.
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format functions
//! are pure — no I/O, no side effects.
//!
//! # Output Format
//!
//! ## Build
//!
//! ```text
//! Grid 2x2 (cells 485x485, margin 10)
//! 001 a.jpg → (10, 10) 485x364
//! 002 b.jpg → skipped: Processing failed: Failed to decode ...
//! 003 c.jpg → (10, 505) 364x485
//! Collage saved to collage.jpg (2 placed, 1 skipped)
//! ```
//!
//! ## Check
//!
//! ```text
//! Grid 2x2 (cells 485x485, margin 10)
//! 001 a.jpg 800x600
//! 002 b.jpg unreadable: ...
//! 3 images, 1 unreadable
//! ```

use crate::collage::{CheckReport, CollageReport};
use crate::imaging::GridLayout;
use std::path::Path;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

fn layout_line(layout: &GridLayout) -> String {
    format!(
        "Grid {g}x{g} (cells {}x{}, margin {})",
        layout.cell_width,
        layout.cell_height,
        layout.margin,
        g = layout.grid_size
    )
}

/// Lines describing every cell of a finished collage, in grid order.
pub fn format_report(report: &CollageReport) -> Vec<String> {
    let mut lines = vec![layout_line(&report.layout)];

    let mut placements = report.placements.iter().peekable();
    let mut failures = report.failures.iter().peekable();
    for cell in 0..report.layout.image_count {
        if let Some(p) = placements.next_if(|p| p.cell == cell) {
            lines.push(format!(
                "{} {} → ({}, {}) {}x{}",
                format_index(cell + 1),
                file_name(&p.source),
                p.x,
                p.y,
                p.width,
                p.height
            ));
        } else if let Some(f) = failures.next_if(|f| f.cell == cell) {
            lines.push(format!(
                "{} {} → skipped: {}",
                format_index(cell + 1),
                file_name(&f.source),
                f.error
            ));
        }
    }

    lines.push(format!(
        "Collage saved to {} ({} placed, {} skipped)",
        report.output.display(),
        report.placements.len(),
        report.failures.len()
    ));
    lines
}

pub fn print_report(report: &CollageReport) {
    for line in format_report(report) {
        println!("{}", line);
    }
}

/// Lines describing the planned layout and each image's header.
pub fn format_check(report: &CheckReport) -> Vec<String> {
    let mut lines = vec![layout_line(&report.layout)];

    for (i, entry) in report.entries.iter().enumerate() {
        let detail = match &entry.dimensions {
            Ok(d) => format!("{}x{}", d.width, d.height),
            Err(e) => format!("unreadable: {}", e),
        };
        lines.push(format!(
            "{} {} {}",
            format_index(i + 1),
            file_name(&entry.source),
            detail
        ));
    }

    let unreadable = report.unreadable().count();
    lines.push(format!(
        "{} images, {} unreadable",
        report.entries.len(),
        unreadable
    ));
    lines
}

pub fn print_check(report: &CheckReport) {
    for line in format_check(report) {
        println!("{}", line);
    }
}
