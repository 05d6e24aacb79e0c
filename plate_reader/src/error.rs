use std::path::PathBuf;

use thiserror::Error;

/// Broad class of a scan failure.
///
/// Every class is terminal for the run: nothing is retried and no output
/// is written once an error has been raised.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Invalid plate layout, scale factor or degenerate geometry.
    Configuration,
    /// The image or configuration file could not be read or is unusable.
    Input,
    /// A well's sampling disk lies entirely outside the image.
    OutOfRange,
    /// An output artifact could not be written.
    Output,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid plate layout: rows = {rows}, cols = {cols} (both must be at least 1)")]
    InvalidLayout { rows: i32, cols: i32 },

    #[error("Invalid scale factor {scale_factor}: must be finite and in (0, 1]")]
    InvalidScaleFactor { scale_factor: f64 },

    #[error("Invalid annotation thickness {thickness}: must be at least 1 pixel")]
    InvalidAnnotationThickness { thickness: u32 },

    #[error(
        "Degenerate grid: sampling radius {radius} < 1 for a {width}x{height} image with \
         {rows}x{cols} wells (spacing {horizontal:.3} x {vertical:.3} px, half-pitch {half_pitch:.3} px, \
         scale factor {scale_factor}); use a larger image, fewer wells or a larger scale factor"
    )]
    DegenerateRadius {
        radius: i64,
        width: u32,
        height: u32,
        rows: u32,
        cols: u32,
        horizontal: f64,
        vertical: f64,
        half_pitch: f64,
        scale_factor: f64,
    },

    #[error("Empty image: {width}x{height} pixels")]
    EmptyImage { width: u32, height: u32 },

    #[error(
        "Intensity buffer is {buffer_width}x{buffer_height} but the grid was computed \
         for a {grid_width}x{grid_height} image"
    )]
    BufferSizeMismatch {
        buffer_width: u32,
        buffer_height: u32,
        grid_width: u32,
        grid_height: u32,
    },

    #[error("Failed to load image '{path}': {source}")]
    ImageLoad {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("Failed to read configuration '{path}': {source}")]
    ConfigLoad {
        path: PathBuf,
        source: anyhow::Error,
    },

    #[error(
        "Well Row {row1} / Column {col1} is entirely outside the {width}x{height} image \
         (center ({x}, {y}), radius {radius}); adjust the offset or scale factor",
        row1 = .row + 1,
        col1 = .col + 1
    )]
    WellOutOfRange {
        row: u32,
        col: u32,
        x: i64,
        y: i64,
        radius: u32,
        width: u32,
        height: u32,
    },

    #[error("Failed to save image '{path}': {source}")]
    ImageSave {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("Failed to write table '{path}': {source}")]
    TableWrite {
        path: PathBuf,
        source: anyhow::Error,
    },

    #[error("Unsupported image format for '{path}' (expected one of: {expected})")]
    UnsupportedImageFormat { path: PathBuf, expected: String },

    #[error("Unsupported table format for '{path}' (expected .csv, .json, .yaml or .yml)")]
    UnsupportedTableFormat { path: PathBuf },
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidLayout { .. }
            | Error::InvalidScaleFactor { .. }
            | Error::InvalidAnnotationThickness { .. }
            | Error::DegenerateRadius { .. } => ErrorKind::Configuration,
            Error::EmptyImage { .. }
            | Error::BufferSizeMismatch { .. }
            | Error::ImageLoad { .. }
            | Error::ConfigLoad { .. } => ErrorKind::Input,
            Error::WellOutOfRange { .. } => ErrorKind::OutOfRange,
            Error::ImageSave { .. }
            | Error::TableWrite { .. }
            | Error::UnsupportedImageFormat { .. }
            | Error::UnsupportedTableFormat { .. } => ErrorKind::Output,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
