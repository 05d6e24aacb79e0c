//! Scan configuration.
//!
//! [`ScanConfig`] is an explicit value handed to the scanner. Every field has
//! a default, so a configuration file only needs to name what it changes.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default plate shape: the common 96-well (8 x 12) assay plate.
pub const DEFAULT_ROWS: i32 = 8;
pub const DEFAULT_COLS: i32 = 12;

/// Default fraction of the half-pitch used as sampling radius.
pub const DEFAULT_SCALE_FACTOR: f64 = 0.2;

/// Default annotation ring thickness in pixels.
pub const DEFAULT_ANNOTATION_THICKNESS: u32 = 2;

/// Number of wells along each plate axis.
///
/// Signed so that invalid values coming from files or the command line are
/// reported as configuration errors rather than parse errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlateLayout {
    pub rows: i32,
    pub cols: i32,
}

impl Default for PlateLayout {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
        }
    }
}

impl PlateLayout {
    pub fn new(rows: i32, cols: i32) -> Self {
        Self { rows, cols }
    }

    /// Returns `(rows, cols)` if both are at least 1.
    pub fn validated(&self) -> Result<(u32, u32)> {
        if self.rows < 1 || self.cols < 1 {
            return Err(Error::InvalidLayout {
                rows: self.rows,
                cols: self.cols,
            });
        }

        Ok((self.rows as u32, self.cols as u32))
    }

    pub fn well_count(&self) -> usize {
        self.rows.max(0) as usize * self.cols.max(0) as usize
    }
}

/// Pixel displacement subtracted from every computed well center.
///
/// Positive `x` moves the grid left, positive `y` moves it up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Offset {
    pub x: i32,
    pub y: i32,
}

impl Offset {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// How grid pitch and half-pitch are derived from the image size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PitchRounding {
    /// Plain floating-point division.
    #[default]
    Exact,
    /// Floor-divided integer pitch and half-pitch, as produced by older
    /// script-based plate readers. Useful to reproduce their well positions.
    Integer,
}

/// Appearance of the verification circles drawn on the annotated image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnotationStyle {
    pub enabled: bool,
    pub color: [u8; 3],
    pub thickness: u32,
}

impl Default for AnnotationStyle {
    fn default() -> Self {
        Self {
            enabled: true,
            color: [0, 0, 0],
            thickness: DEFAULT_ANNOTATION_THICKNESS,
        }
    }
}

/// Everything a scan needs besides the image itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    pub layout: PlateLayout,
    pub offset: Offset,
    /// Fraction of the half-pitch sampled around each well center, in (0, 1].
    pub scale_factor: f64,
    pub pitch: PitchRounding,
    pub annotation: AnnotationStyle,
    /// Evaluate wells on the rayon pool. Results are identical either way.
    pub parallel: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            layout: PlateLayout::default(),
            offset: Offset::default(),
            scale_factor: DEFAULT_SCALE_FACTOR,
            pitch: PitchRounding::default(),
            annotation: AnnotationStyle::default(),
            parallel: false,
        }
    }
}

impl ScanConfig {
    /// Loads a YAML or JSON configuration, picking the format by extension.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        common::serde_io::read_file(path).map_err(|source| Error::ConfigLoad {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Checks everything that does not depend on the image size.
    ///
    /// Image-dependent checks (sampling radius) happen in
    /// [`crate::GridGeometry::compute`].
    pub fn validate(&self) -> Result<()> {
        self.layout.validated()?;
        validate_scale_factor(self.scale_factor)?;

        if self.annotation.enabled && self.annotation.thickness < 1 {
            return Err(Error::InvalidAnnotationThickness {
                thickness: self.annotation.thickness,
            });
        }

        Ok(())
    }
}

pub(crate) fn validate_scale_factor(scale_factor: f64) -> Result<()> {
    if !scale_factor.is_finite() || scale_factor <= 0.0 || scale_factor > 1.0 {
        return Err(Error::InvalidScaleFactor { scale_factor });
    }

    Ok(())
}
