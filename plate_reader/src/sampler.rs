use crate::geometry::WellCenter;
use crate::gray::GrayBuffer;

/// Mean intensity of the disk of `radius` around `center`.
///
/// A pixel belongs to the disk when its squared distance to the center is at
/// most `radius²`. Pixels outside the buffer are skipped, so the mean is over
/// in-bounds disk pixels only. Returns `None` when the disk does not overlap
/// the buffer at all.
pub fn sample_mean(buffer: &GrayBuffer, center: WellCenter, radius: u32) -> Option<f64> {
    let r = radius as i64;
    let r_sq = r * r;

    // Bounding box, clipped to the buffer
    let x_min = (center.x - r).max(0);
    let x_max = (center.x + r).min(buffer.width() as i64 - 1);
    let y_min = (center.y - r).max(0);
    let y_max = (center.y + r).min(buffer.height() as i64 - 1);

    if x_min > x_max || y_min > y_max {
        return None;
    }

    let mut sum: u64 = 0;
    let mut count: u64 = 0;

    for y in y_min..=y_max {
        let dy = y - center.y;
        let row = buffer.row(y as u32);
        for x in x_min..=x_max {
            let dx = x - center.x;
            if dx * dx + dy * dy <= r_sq {
                sum += row[x as usize] as u64;
                count += 1;
            }
        }
    }

    // The clipped box can still miss the disk itself near a corner.
    if count == 0 {
        return None;
    }

    Some(sum as f64 / count as f64)
}
