//! Magnitude to color mapping for the spectrogram

use image::Rgb;

/// Dynamic range shown below the loudest cell
pub const DYNAMIC_RANGE_DB: f64 = 80.0;

/// Color stops from silent to loudest, luminance strictly increasing
const STOPS: [[u8; 3]; 5] = [
    [0, 0, 4],
    [40, 11, 84],
    [159, 42, 99],
    [245, 125, 21],
    [252, 255, 164],
];

/// Map a magnitude to `[0, 1]` on a log scale relative to `max_magnitude`
///
/// Non-positive magnitudes (and an all-silent grid) map to 0.
pub fn intensity(magnitude: f64, max_magnitude: f64) -> f64 {
    if max_magnitude <= 0.0 || magnitude <= 0.0 {
        return 0.0;
    }
    let db = 20.0 * (magnitude / max_magnitude).log10();
    ((db + DYNAMIC_RANGE_DB) / DYNAMIC_RANGE_DB).clamp(0.0, 1.0)
}

/// Color for an intensity in `[0, 1]` (values outside are clamped)
pub fn color(intensity: f64) -> Rgb<u8> {
    let t = if intensity.is_nan() { 0.0 } else { intensity.clamp(0.0, 1.0) };
    let scaled = t * (STOPS.len() - 1) as f64;
    let index = (scaled.floor() as usize).min(STOPS.len() - 2);
    let frac = scaled - index as f64;

    let lo = STOPS[index];
    let hi = STOPS[index + 1];
    let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * frac).round() as u8;
    Rgb([mix(lo[0], hi[0]), mix(lo[1], hi[1]), mix(lo[2], hi[2])])
}
