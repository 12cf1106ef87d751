//! Shared test utilities: synthetic image files written with the `image` crate.

use image::{ImageEncoder, Rgb, RgbImage};
use std::path::Path;

/// Create a small valid JPEG file with a gradient pattern.
pub fn create_test_jpeg(path: &Path, width: u32, height: u32) {
    let img = RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    });
    let file = std::fs::File::create(path).unwrap();
    let writer = std::io::BufWriter::new(file);
    image::codecs::jpeg::JpegEncoder::new(writer)
        .write_image(img.as_raw(), width, height, image::ExtendedColorType::Rgb8)
        .unwrap();
}

/// Create a solid-colour PNG. Lossless, so pixel checks are exact.
///
/// The PNG encoder is chosen explicitly so the extension on `path` can lie.
pub fn create_test_png(path: &Path, width: u32, height: u32, color: Rgb<u8>) {
    RgbImage::from_pixel(width, height, color)
        .save_with_format(path, image::ImageFormat::Png)
        .unwrap();
}

/// Write bytes that look like nothing any decoder accepts.
pub fn write_corrupt_image(path: &Path) {
    std::fs::write(path, b"definitely not an image").unwrap();
}
