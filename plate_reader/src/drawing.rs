//! Verification drawing on RGB images.

use glam::Vec2;
use image::{Rgb, RgbImage};

/// Draw a hollow circle on an image.
///
/// Pixels whose distance to `center` is within `thickness / 2` of `radius`
/// are set to `color`. Parts outside the image are clipped.
pub fn draw_circle(image: &mut RgbImage, center: Vec2, radius: f32, color: Rgb<u8>, thickness: f32) {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return;
    }

    let half_thick = thickness / 2.0;
    let min_radius = (radius - half_thick).max(0.0);
    let max_radius = radius + half_thick;
    let min_r_sq = min_radius * min_radius;
    let max_r_sq = max_radius * max_radius;

    // Bounding box for the ring
    let x_min = (center.x - max_radius).floor().max(0.0) as i64;
    let x_max = ((center.x + max_radius).ceil() as i64).min(width as i64 - 1);
    let y_min = (center.y - max_radius).floor().max(0.0) as i64;
    let y_max = ((center.y + max_radius).ceil() as i64).min(height as i64 - 1);

    for y in y_min..=y_max {
        for x in x_min..=x_max {
            let dx = x as f32 - center.x;
            let dy = y as f32 - center.y;
            let dist_sq = dx * dx + dy * dy;

            if dist_sq >= min_r_sq && dist_sq <= max_r_sq {
                image.put_pixel(x as u32, y as u32, color);
            }
        }
    }
}
