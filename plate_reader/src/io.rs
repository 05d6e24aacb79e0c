use std::path::Path;

use image::{GrayImage, RgbImage};

use common::file_format::file_extension;

use crate::error::{Error, Result};
use crate::geometry::ImageDimensions;

/// Supported image file extensions for reading and writing.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "tiff", "tif", "bmp"];

/// Decodes `path` into 8-bit RGB.
///
/// Grayscale, alpha and 16-bit inputs are converted; alpha is dropped.
pub fn load_image<P: AsRef<Path>>(path: P) -> Result<RgbImage> {
    let path = path.as_ref();
    let decoded = image::open(path).map_err(|source| Error::ImageLoad {
        path: path.to_path_buf(),
        source,
    })?;

    log::debug!(
        "Loaded {} ({}x{}, {:?})",
        path.display(),
        decoded.width(),
        decoded.height(),
        decoded.color()
    );

    let rgb = decoded.into_rgb8();
    ImageDimensions::new(rgb.width(), rgb.height())?;

    Ok(rgb)
}

/// Fails unless `path` ends in one of [`SUPPORTED_EXTENSIONS`].
///
/// Lets callers reject an output path before any work is done.
pub fn check_image_path(path: &Path) -> Result<()> {
    match file_extension(path) {
        Some(ext) if SUPPORTED_EXTENSIONS.contains(&ext.as_str()) => Ok(()),
        _ => Err(Error::UnsupportedImageFormat {
            path: path.to_path_buf(),
            expected: SUPPORTED_EXTENSIONS.join(", "),
        }),
    }
}

pub fn save_rgb<P: AsRef<Path>>(image: &RgbImage, path: P) -> Result<()> {
    let path = path.as_ref();
    check_image_path(path)?;
    image.save(path).map_err(|source| Error::ImageSave {
        path: path.to_path_buf(),
        source,
    })
}

pub fn save_gray<P: AsRef<Path>>(image: &GrayImage, path: P) -> Result<()> {
    let path = path.as_ref();
    check_image_path(path)?;
    image.save(path).map_err(|source| Error::ImageSave {
        path: path.to_path_buf(),
        source,
    })
}
