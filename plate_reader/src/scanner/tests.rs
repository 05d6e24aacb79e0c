//! Tests for whole-plate scanning.

use image::{Rgb, RgbImage};

use super::{annotate, scan, PlateScanner};
use crate::absorbance::{to_absorbance, FLOOR_ABSORBANCE};
use crate::config::{AnnotationStyle, Offset, PitchRounding, PlateLayout, ScanConfig};
use crate::error::{Error, ErrorKind};
use crate::geometry::ImageDimensions;
use crate::gray::GrayBuffer;
use common::float_ext::FloatExt;

const WHITE: Rgb<u8> = Rgb([255, 255, 255]);

fn config(rows: i32, cols: i32) -> ScanConfig {
    ScanConfig {
        layout: PlateLayout::new(rows, cols),
        ..ScanConfig::default()
    }
}

/// White plate image with one dark filled disk per requested well.
fn plate_image(
    width: u32,
    height: u32,
    config: &ScanConfig,
    dark_wells: &[(u32, u32, u8)],
) -> RgbImage {
    let mut image = RgbImage::from_pixel(width, height, WHITE);
    let scanner = PlateScanner::new(config.clone()).unwrap();
    let geometry = scanner
        .geometry_for(ImageDimensions::new(width, height).unwrap())
        .unwrap();
    let paint_radius = geometry.radius() as i64 + 2;

    for &(row, col, value) in dark_wells {
        let center = geometry.well_center(row, col);
        for y in (center.y - paint_radius)..=(center.y + paint_radius) {
            for x in (center.x - paint_radius)..=(center.x + paint_radius) {
                let (dx, dy) = (x - center.x, y - center.y);
                if dx * dx + dy * dy <= paint_radius * paint_radius {
                    image.put_pixel(x as u32, y as u32, Rgb([value, value, value]));
                }
            }
        }
    }

    image
}

#[test]
fn uniform_image_samples_inverted_value_everywhere() {
    let image = RgbImage::from_pixel(650, 450, Rgb([200, 200, 200]));
    let result = scan(&image, &config(8, 12)).unwrap();

    let expected = to_absorbance(55.0);
    for row in 0..8 {
        for col in 0..12 {
            assert!(result.mean_intensities.get(row, col).approximately_eq(55.0));
            assert!(result.absorbance.get(row, col).approximately_eq(expected));
        }
    }
}

#[test]
fn matrix_shape_matches_layout() {
    for (rows, cols) in [(1, 1), (2, 3), (8, 12), (16, 24)] {
        let image = RgbImage::from_pixel(1000, 800, WHITE);
        let result = scan(&image, &config(rows, cols)).unwrap();

        assert_eq!(result.absorbance.rows(), rows as u32);
        assert_eq!(result.absorbance.cols(), cols as u32);
        assert_eq!(result.absorbance.values().len(), (rows * cols) as usize);
        assert_eq!(result.absorbance.iter_rows().count(), rows as usize);
        assert_eq!(result.mean_intensities.rows(), rows as u32);
    }
}

#[test]
fn dark_wells_land_in_their_row_and_column() {
    let config = config(8, 12);
    let image = plate_image(1300, 900, &config, &[(1, 4, 0), (6, 10, 128)]);
    let result = scan(&image, &config).unwrap();

    // White background inverts to 0 -> floor absorbance; darker wells read lower.
    for row in 0..8 {
        for col in 0..12 {
            let a = result.absorbance.get(row, col);
            match (row, col) {
                (1, 4) => assert!(a.approximately_eq(0.0), "black well gave {a}"),
                (6, 10) => assert!(a.approximately_eq(to_absorbance(127.0))),
                _ => assert!(a.approximately_eq(FLOOR_ABSORBANCE), "({row}, {col}) gave {a}"),
            }
        }
    }
}

#[test]
fn darker_well_reads_higher_inverted_intensity() {
    let config = config(2, 2);
    let image = plate_image(300, 300, &config, &[(0, 0, 40), (1, 1, 160)]);
    let result = scan(&image, &config).unwrap();

    let darker = result.mean_intensities.get(0, 0);
    let lighter = result.mean_intensities.get(1, 1);
    assert!(darker > lighter);
    assert!(result.absorbance.get(0, 0) < result.absorbance.get(1, 1));
}

#[test]
fn degenerate_grid_fails_before_sampling() {
    let image = RgbImage::from_pixel(10, 10, WHITE);
    let err = scan(&image, &config(8, 12)).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Configuration);
    assert!(matches!(err, Error::DegenerateRadius { radius: 0, .. }));
}

#[test]
fn invalid_layout_is_rejected_at_construction() {
    let err = PlateScanner::new(config(0, 12)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Configuration);
}

#[test]
fn offset_pushing_wells_off_image_reports_first_cell() {
    let image = RgbImage::from_pixel(650, 450, WHITE);
    let config = ScanConfig {
        // negative x moves wells right, far past the right edge
        offset: Offset::new(-10_000, 0),
        ..config(8, 12)
    };

    let err = scan(&image, &config).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::OutOfRange);
    match err {
        Error::WellOutOfRange { row, col, radius, .. } => {
            assert_eq!((row, col), (0, 0));
            assert_eq!(radius, 5);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn partially_shifted_grid_reports_first_lost_well() {
    // spacing 100 px, radius 10 px; shifting left by 230 px loses columns 0 and 1
    let image = RgbImage::from_pixel(1300, 900, WHITE);
    let config = ScanConfig {
        offset: Offset::new(230, 0),
        ..config(8, 12)
    };

    let err = scan(&image, &config).unwrap_err();
    assert!(matches!(err, Error::WellOutOfRange { row: 0, col: 0, x: -130, .. }));

    // A well whose center is off-image but whose disk still overlaps is measured.
    let config = ScanConfig {
        offset: Offset::new(105, 0),
        ..config
    };
    let result = scan(&image, &config).unwrap();
    assert!(result.absorbance.get(0, 0).approximately_eq(FLOOR_ABSORBANCE));
}

#[test]
fn parallel_scan_matches_sequential() {
    let sequential = config(8, 12);
    let parallel = ScanConfig {
        parallel: true,
        ..sequential.clone()
    };
    let image = plate_image(
        1300,
        900,
        &sequential,
        &[(0, 0, 10), (3, 7, 90), (7, 11, 200), (5, 2, 33)],
    );

    let a = scan(&image, &sequential).unwrap();
    let b = scan(&image, &parallel).unwrap();
    assert_eq!(a.absorbance, b.absorbance);
    assert_eq!(a.mean_intensities, b.mean_intensities);
}

#[test]
fn parallel_scan_reports_the_same_first_failure() {
    let image = RgbImage::from_pixel(1300, 900, WHITE);
    let config = ScanConfig {
        offset: Offset::new(0, 750),
        parallel: true,
        ..config(8, 12)
    };

    // rows 0..=6 sit above the image; (0, 0) comes first in row-major order
    let err = scan(&image, &config).unwrap_err();
    assert!(matches!(err, Error::WellOutOfRange { row: 0, col: 0, .. }));
}

#[test]
fn annotation_draws_on_a_copy() {
    let image = RgbImage::from_pixel(1300, 900, WHITE);
    let result = scan(&image, &config(8, 12)).unwrap();

    let annotated = result.annotated.expect("annotation is enabled by default");
    assert_eq!(annotated.dimensions(), image.dimensions());
    assert!(image.pixels().all(|p| *p == WHITE));

    // well (0, 0) at (100, 100) with radius 10: ring pixel black, center untouched
    assert_eq!(*annotated.get_pixel(110, 100), Rgb([0, 0, 0]));
    assert_eq!(*annotated.get_pixel(100, 100), WHITE);
}

#[test]
fn annotation_does_not_change_numbers() {
    let image = plate_image(1300, 900, &config(8, 12), &[(2, 2, 50)]);
    let annotated_config = config(8, 12);
    let plain_config = ScanConfig {
        annotation: AnnotationStyle {
            enabled: false,
            ..AnnotationStyle::default()
        },
        ..config(8, 12)
    };

    let annotated = scan(&image, &annotated_config).unwrap();
    let plain = scan(&image, &plain_config).unwrap();
    assert!(plain.annotated.is_none());
    assert_eq!(annotated.absorbance, plain.absorbance);
}

#[test]
fn annotate_uses_configured_color() {
    let image = RgbImage::from_pixel(400, 300, WHITE);
    let scanner = PlateScanner::new(config(2, 3)).unwrap();
    let geometry = scanner
        .geometry_for(ImageDimensions::new(400, 300).unwrap())
        .unwrap();
    let style = AnnotationStyle {
        enabled: true,
        color: [255, 0, 0],
        thickness: 1,
    };

    let annotated = annotate(&image, &geometry, &style);
    let center = geometry.well_center(1, 2);
    let edge_x = (center.x + geometry.radius() as i64) as u32;
    assert_eq!(*annotated.get_pixel(edge_x, center.y as u32), Rgb([255, 0, 0]));
}

#[test]
fn measure_works_on_injected_buffers() {
    let scanner = PlateScanner::new(config(2, 2)).unwrap();
    let geometry = scanner
        .geometry_for(ImageDimensions::new(90, 90).unwrap())
        .unwrap();
    let inverted = GrayBuffer::new_filled(90, 90, 255);

    let means = scanner.measure(&inverted, &geometry).unwrap();
    assert!(means.values().iter().all(|m| m.approximately_eq(255.0)));
}

#[test]
fn measure_rejects_buffer_of_another_size() {
    let scanner = PlateScanner::new(config(2, 2)).unwrap();
    let geometry = scanner
        .geometry_for(ImageDimensions::new(90, 90).unwrap())
        .unwrap();
    let inverted = GrayBuffer::new_filled(100, 90, 255);

    let err = scanner.measure(&inverted, &geometry).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Input);
    assert!(matches!(
        err,
        Error::BufferSizeMismatch {
            buffer_width: 100,
            grid_width: 90,
            ..
        }
    ));
}

#[test]
fn integer_pitch_reproduces_floor_divided_grid() {
    let image = RgbImage::from_pixel(1000, 700, WHITE);
    let config = ScanConfig {
        offset: Offset::new(-5, -33),
        pitch: PitchRounding::Integer,
        ..config(8, 12)
    };

    let result = scan(&image, &config).unwrap();
    assert_eq!(result.geometry.spacing().horizontal, 76.0);
    assert_eq!(result.geometry.radius(), 7);
}

#[test]
fn inverted_buffer_is_returned() {
    let image = RgbImage::from_pixel(300, 200, Rgb([200, 200, 200]));
    let result = scan(&image, &config(2, 2)).unwrap();
    assert!(result.inverted.pixels().iter().all(|&v| v == 55));
}
