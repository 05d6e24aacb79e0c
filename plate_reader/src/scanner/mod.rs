//! Whole-plate scan.
//!
//! The scan converts the photograph to grayscale, inverts it, derives the
//! grid once and then samples every well in row-major order. Any failure
//! aborts the scan; there is no partial result. Annotation is drawn on a copy
//! of the source image only after every well has been measured.

#[cfg(test)]
mod tests;

use glam::Vec2;
use image::{Rgb, RgbImage};
use log::{debug, info, trace};

use crate::absorbance::to_absorbance;
use crate::config::{AnnotationStyle, ScanConfig};
use crate::drawing::draw_circle;
use crate::error::{Error, Result};
use crate::geometry::{GridGeometry, ImageDimensions};
use crate::gray::GrayBuffer;
use crate::matrix::{AbsorbanceMatrix, WellMatrix};
use crate::sampler::sample_mean;

/// Wells handed to the rayon pool at once in parallel mode.
const PARALLEL_CHUNK_WELLS: usize = 256;

/// Everything produced by one scan.
#[derive(Debug, Clone)]
pub struct ScanResult {
    pub geometry: GridGeometry,
    pub absorbance: AbsorbanceMatrix,
    /// Mean inverted intensity of every well, before the absorbance transform.
    pub mean_intensities: WellMatrix,
    /// Inverted grayscale buffer the wells were sampled from.
    pub inverted: GrayBuffer,
    /// Copy of the source image with one circle per well, if enabled.
    pub annotated: Option<RgbImage>,
}

#[derive(Debug, Clone)]
pub struct PlateScanner {
    config: ScanConfig,
}

impl PlateScanner {
    pub fn new(config: ScanConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    pub fn geometry_for(&self, dimensions: ImageDimensions) -> Result<GridGeometry> {
        let geometry = GridGeometry::compute(
            dimensions,
            self.config.layout,
            self.config.offset,
            self.config.scale_factor,
            self.config.pitch,
        )?;

        let spacing = geometry.spacing();
        debug!(
            "Grid {}x{} on {}x{} image: spacing {:.3} x {:.3} px, radius {} px, offset ({}, {})",
            geometry.rows(),
            geometry.cols(),
            dimensions.width,
            dimensions.height,
            spacing.horizontal,
            spacing.vertical,
            geometry.radius(),
            geometry.offset().x,
            geometry.offset().y,
        );

        Ok(geometry)
    }

    pub fn scan(&self, image: &RgbImage) -> Result<ScanResult> {
        let dimensions = ImageDimensions::new(image.width(), image.height())?;
        let geometry = self.geometry_for(dimensions)?;

        let inverted = GrayBuffer::from_rgb(image).inverted();
        let mean_intensities = self.measure(&inverted, &geometry)?;
        let absorbance = absorbance_matrix(&mean_intensities);

        let annotated = self
            .config
            .annotation
            .enabled
            .then(|| annotate(image, &geometry, &self.config.annotation));

        info!(
            "Scanned {} wells ({}x{}), radius {} px",
            geometry.well_count(),
            geometry.rows(),
            geometry.cols(),
            geometry.radius()
        );

        Ok(ScanResult {
            geometry,
            absorbance,
            mean_intensities,
            inverted,
            annotated,
        })
    }

    /// Mean inverted intensity of every well of `geometry`.
    ///
    /// Fails when `inverted` does not have the size `geometry` was computed
    /// for, or on the first well, in row-major order, whose disk lies
    /// entirely outside `inverted`.
    pub fn measure(&self, inverted: &GrayBuffer, geometry: &GridGeometry) -> Result<WellMatrix> {
        let grid = geometry.dimensions();
        if inverted.dimensions() != grid {
            return Err(Error::BufferSizeMismatch {
                buffer_width: inverted.width(),
                buffer_height: inverted.height(),
                grid_width: grid.width,
                grid_height: grid.height,
            });
        }

        let values = if self.config.parallel {
            let cells: Vec<(u32, u32)> = geometry.cells().collect();
            common::parallel::try_par_map_limited(&cells, PARALLEL_CHUNK_WELLS, |&(row, col)| {
                measure_well(inverted, geometry, row, col)
            })?
        } else {
            geometry
                .cells()
                .map(|(row, col)| measure_well(inverted, geometry, row, col))
                .collect::<Result<Vec<f64>>>()?
        };

        Ok(WellMatrix::from_row_major(
            geometry.rows(),
            geometry.cols(),
            values,
        ))
    }
}

/// Convenience wrapper: validate `config` and scan `image` once.
pub fn scan(image: &RgbImage, config: &ScanConfig) -> Result<ScanResult> {
    PlateScanner::new(config.clone())?.scan(image)
}

fn measure_well(inverted: &GrayBuffer, geometry: &GridGeometry, row: u32, col: u32) -> Result<f64> {
    let center = geometry.well_center(row, col);
    let radius = geometry.radius();
    let dimensions = geometry.dimensions();

    let mean = sample_mean(inverted, center, radius).ok_or(Error::WellOutOfRange {
        row,
        col,
        x: center.x,
        y: center.y,
        radius,
        width: dimensions.width,
        height: dimensions.height,
    })?;

    trace!(
        "Row {} / Column {}: center ({}, {}), mean {:.3}",
        row + 1,
        col + 1,
        center.x,
        center.y,
        mean
    );

    Ok(mean)
}

fn absorbance_matrix(mean_intensities: &WellMatrix) -> AbsorbanceMatrix {
    let values = mean_intensities
        .values()
        .iter()
        .map(|&mean| to_absorbance(mean))
        .collect();

    AbsorbanceMatrix::from_row_major(mean_intensities.rows(), mean_intensities.cols(), values)
}

/// Copy of `image` with an unfilled circle at every well.
pub fn annotate(image: &RgbImage, geometry: &GridGeometry, style: &AnnotationStyle) -> RgbImage {
    let mut annotated = image.clone();
    let color = Rgb(style.color);
    let radius = geometry.radius() as f32;

    for (row, col) in geometry.cells() {
        let center = geometry.well_center(row, col);
        draw_circle(
            &mut annotated,
            Vec2::new(center.x as f32, center.y as f32),
            radius,
            color,
            style.thickness as f32,
        );
    }

    annotated
}
