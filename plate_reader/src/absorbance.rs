//! Intensity to absorbance conversion.
//!
//! `A = -log10(T)` with `T = mean / 255`. Non-positive transmittance is
//! replaced by [`MIN_TRANSMITTANCE`], so the darkest possible reading maps to
//! an absorbance of exactly 3.

/// Full-scale value of an 8-bit intensity.
pub const FULL_SCALE: f64 = 255.0;

/// Transmittance used in place of zero or negative values.
pub const MIN_TRANSMITTANCE: f64 = 0.001;

/// Absorbance reported for a fully transmitting well.
pub const MIN_ABSORBANCE: f64 = 0.0;

/// Absorbance at [`MIN_TRANSMITTANCE`].
pub const FLOOR_ABSORBANCE: f64 = 3.0;

/// Normalized transmittance of a mean inverted intensity.
///
/// Zero, negative and NaN inputs give [`MIN_TRANSMITTANCE`]; values above
/// full scale saturate at 1.
pub fn transmittance(mean_intensity: f64) -> f64 {
    let t = mean_intensity / FULL_SCALE;
    if t.is_nan() || t <= 0.0 {
        MIN_TRANSMITTANCE
    } else {
        t.min(1.0)
    }
}

/// Simulated absorbance of a well. Always finite.
pub fn to_absorbance(mean_intensity: f64) -> f64 {
    -transmittance(mean_intensity).log10()
}
