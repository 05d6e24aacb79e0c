//! Plate reader - optical density of multi-well plates from a photograph.
//!
//! A regular grid is laid over the image, a circular region is sampled at
//! every well and its mean intensity is turned into an absorbance-like value.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use plate_reader::{load_image, write_table, PlateScanner, ScanConfig};
//!
//! let image = load_image("plate.png")?;
//! let scanner = PlateScanner::new(ScanConfig::default())?;
//! let result = scanner.scan(&image)?;
//!
//! write_table(&result.absorbance, "Intensities.csv")?;
//! ```

pub mod absorbance;
mod config;
pub mod drawing;
mod error;
pub mod export;
mod geometry;
mod gray;
pub mod io;
mod matrix;
pub mod sampler;
mod scanner;

pub mod prelude;

// ============================================================================
// Configuration and errors
// ============================================================================

pub use config::{
    AnnotationStyle, Offset, PitchRounding, PlateLayout, ScanConfig, DEFAULT_COLS, DEFAULT_ROWS,
    DEFAULT_SCALE_FACTOR,
};
pub use error::{Error, ErrorKind, Result};

// ============================================================================
// Geometry and buffers
// ============================================================================

pub use geometry::{GridGeometry, GridSpacing, ImageDimensions, WellCenter};
pub use gray::GrayBuffer;
pub use matrix::{col_label, row_label, AbsorbanceMatrix, LabelledRow, LabelledTable, WellMatrix};

// ============================================================================
// Scanning
// ============================================================================

pub use absorbance::to_absorbance;
pub use sampler::sample_mean;
pub use scanner::{annotate, scan, PlateScanner, ScanResult};

// ============================================================================
// I/O collaborators
// ============================================================================

pub use export::{write_table, TableFormat};
pub use io::{check_image_path, load_image, save_gray, save_rgb, SUPPORTED_EXTENSIONS};
