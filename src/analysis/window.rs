//! Window functions applied to each analysis frame

use clap::ValueEnum;
use std::f64::consts::PI;

/// Weighting applied to a frame before the transform
///
/// All windows are the symmetric variants. `Rectangular` is the explicit
/// "no weighting" choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum WindowFunction {
    #[default]
    Hann,
    Hamming,
    Blackman,
    Rectangular,
}

impl WindowFunction {
    /// Window coefficients for a frame of `size` samples
    pub fn coefficients(&self, size: usize) -> Vec<f64> {
        if size == 1 {
            return vec![1.0];
        }

        let denom = (size - 1) as f64;
        (0..size)
            .map(|i| {
                let phase = 2.0 * PI * i as f64 / denom;
                match self {
                    WindowFunction::Hann => 0.5 * (1.0 - phase.cos()),
                    WindowFunction::Hamming => 0.54 - 0.46 * phase.cos(),
                    WindowFunction::Blackman => {
                        0.42 - 0.5 * phase.cos() + 0.08 * (2.0 * phase).cos()
                    }
                    WindowFunction::Rectangular => 1.0,
                }
            })
            .collect()
    }
}
