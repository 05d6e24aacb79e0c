//! Well grid geometry.
//!
//! Wells sit on a uniform grid whose pitch divides each image axis into
//! `n + 1` equal parts, so both plate edges get the same margin.

use crate::config::{validate_scale_factor, Offset, PitchRounding, PlateLayout};
use crate::error::{Error, Result};

/// Size of the decoded image, fixed for the duration of a scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageDimensions {
    pub width: u32,
    pub height: u32,
}

impl ImageDimensions {
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::EmptyImage { width, height });
        }

        Ok(Self { width, height })
    }
}

/// Distance in pixels between neighbouring well centers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridSpacing {
    pub horizontal: f64,
    pub vertical: f64,
}

/// Integer pixel position of a well center. May lie outside the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WellCenter {
    pub x: i64,
    pub y: i64,
}

/// Layout constants of one scan: spacing, sampling radius and offset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridGeometry {
    dimensions: ImageDimensions,
    rows: u32,
    cols: u32,
    offset: Offset,
    spacing: GridSpacing,
    half_pitch: f64,
    radius: u32,
}

impl GridGeometry {
    /// Derives spacing and sampling radius for `layout` on an image of
    /// `dimensions`.
    ///
    /// The radius is the floor of `min(half horizontal pitch, half vertical
    /// pitch) * scale_factor`; a radius below one pixel is rejected.
    pub fn compute(
        dimensions: ImageDimensions,
        layout: PlateLayout,
        offset: Offset,
        scale_factor: f64,
        pitch: PitchRounding,
    ) -> Result<Self> {
        let (rows, cols) = layout.validated()?;
        validate_scale_factor(scale_factor)?;

        let width = dimensions.width as f64;
        let height = dimensions.height as f64;
        let col_divisions = cols as f64 + 1.0;
        let row_divisions = rows as f64 + 1.0;

        let (spacing, half_pitch) = match pitch {
            PitchRounding::Exact => {
                let spacing = GridSpacing {
                    horizontal: width / col_divisions,
                    vertical: height / row_divisions,
                };
                let half_pitch =
                    (width / (2.0 * col_divisions)).min(height / (2.0 * row_divisions));
                (spacing, half_pitch)
            }
            PitchRounding::Integer => {
                let (w, h) = (dimensions.width as u64, dimensions.height as u64);
                let (c, r) = (cols as u64 + 1, rows as u64 + 1);
                let spacing = GridSpacing {
                    horizontal: (w / c) as f64,
                    vertical: (h / r) as f64,
                };
                let half_pitch = (w / (2 * c)).min(h / (2 * r)) as f64;
                (spacing, half_pitch)
            }
        };

        let radius = (half_pitch * scale_factor).floor() as i64;
        if radius < 1 {
            return Err(Error::DegenerateRadius {
                radius,
                width: dimensions.width,
                height: dimensions.height,
                rows,
                cols,
                horizontal: spacing.horizontal,
                vertical: spacing.vertical,
                half_pitch,
                scale_factor,
            });
        }

        Ok(Self {
            dimensions,
            rows,
            cols,
            offset,
            spacing,
            half_pitch,
            radius: radius as u32,
        })
    }

    pub fn dimensions(&self) -> ImageDimensions {
        self.dimensions
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn cols(&self) -> u32 {
        self.cols
    }

    pub fn well_count(&self) -> usize {
        self.rows as usize * self.cols as usize
    }

    pub fn offset(&self) -> Offset {
        self.offset
    }

    pub fn spacing(&self) -> GridSpacing {
        self.spacing
    }

    /// Unscaled half-pitch the radius was derived from.
    pub fn half_pitch(&self) -> f64 {
        self.half_pitch
    }

    pub fn radius(&self) -> u32 {
        self.radius
    }

    /// Center of the well at zero-based `(row, col)`.
    ///
    /// The offset is subtracted: positive `x` moves wells left, positive `y`
    /// moves them up.
    pub fn well_center(&self, row: u32, col: u32) -> WellCenter {
        debug_assert!(row < self.rows && col < self.cols);

        let x = ((col as f64 + 1.0) * self.spacing.horizontal).floor() as i64;
        let y = ((row as f64 + 1.0) * self.spacing.vertical).floor() as i64;

        WellCenter {
            x: x - self.offset.x as i64,
            y: y - self.offset.y as i64,
        }
    }

    /// All `(row, col)` pairs in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (u32, u32)> {
        let cols = self.cols;
        (0..self.rows).flat_map(move |row| (0..cols).map(move |col| (row, col)))
    }
}
