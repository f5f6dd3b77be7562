//! Short-time spectral analysis
//!
//! Splits a mono signal into overlapping windows, weights each with a window
//! function and takes the magnitude of its real FFT. Frames are independent,
//! so they are transformed in parallel and collected back in frame order;
//! the output does not depend on how the work was scheduled.

use super::window::WindowFunction;
use crate::error::PipelineError;
use crate::model::{SpectralFrame, Spectrogram};
use rayon::prelude::*;
use realfft::RealFftPlanner;

/// Framing parameters for the analyzer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisParams {
    /// Samples per analysis window (W)
    pub window_size: usize,
    /// Samples shared by consecutive windows (O)
    pub overlap: usize,
    /// Weighting applied to each window
    pub window: WindowFunction,
}

impl Default for AnalysisParams {
    fn default() -> Self {
        Self {
            window_size: 1024,
            overlap: 512,
            window: WindowFunction::Hann,
        }
    }
}

impl AnalysisParams {
    /// Check `W > 0` and `0 <= O < W`
    pub fn validate(&self) -> Result<(), PipelineError> {
        if self.window_size == 0 {
            return Err(PipelineError::InvalidParameter(
                "window size must be greater than 0".to_string(),
            ));
        }
        if self.overlap >= self.window_size {
            return Err(PipelineError::InvalidParameter(format!(
                "overlap {} must be smaller than window size {}",
                self.overlap, self.window_size
            )));
        }
        Ok(())
    }

    /// Stride between window starts, `W - O`
    pub fn hop_size(&self) -> usize {
        self.window_size - self.overlap
    }

    /// Number of whole windows that fit in `n` samples (0 when `n < W`)
    pub fn frame_count(&self, n: usize) -> usize {
        if n < self.window_size {
            0
        } else {
            (n - self.window_size) / self.hop_size() + 1
        }
    }
}

/// Computes spectrograms for one set of framing parameters
pub struct SpectralAnalyzer {
    params: AnalysisParams,
    coefficients: Vec<f64>,
}

impl SpectralAnalyzer {
    pub fn new(params: AnalysisParams) -> Result<Self, PipelineError> {
        params.validate()?;
        Ok(Self {
            coefficients: params.window.coefficients(params.window_size),
            params,
        })
    }

    pub fn params(&self) -> &AnalysisParams {
        &self.params
    }

    /// Analyze mono samples recorded at `sample_rate`
    pub fn analyze(&self, samples: &[f64], sample_rate: u32) -> Result<Spectrogram, PipelineError> {
        if sample_rate == 0 {
            return Err(PipelineError::InvalidParameter(
                "sample rate must be greater than 0".to_string(),
            ));
        }

        let window_size = self.params.window_size;
        if samples.len() < window_size {
            return Err(PipelineError::InsufficientSamples {
                available: samples.len(),
                required: window_size,
            });
        }

        let hop = self.params.hop_size();
        let frame_count = self.params.frame_count(samples.len());

        let mut planner = RealFftPlanner::<f64>::new();
        let fft = planner.plan_fft_forward(window_size);

        let frames = (0..frame_count)
            .into_par_iter()
            .map_init(
                || (fft.make_input_vec(), fft.make_output_vec(), fft.make_scratch_vec()),
                |(input, spectrum, scratch), i| -> Result<SpectralFrame, PipelineError> {
                    let start = i * hop;
                    let frame = &samples[start..start + window_size];
                    for (slot, (&s, &w)) in input.iter_mut().zip(frame.iter().zip(self.coefficients.iter())) {
                        *slot = s * w;
                    }

                    fft.process_with_scratch(input, spectrum, scratch)
                        .map_err(|e| PipelineError::InvalidParameter(format!("transform rejected frame {}: {}", i, e)))?;

                    Ok(SpectralFrame {
                        start,
                        magnitudes: spectrum.iter().map(|c| c.norm()).collect(),
                    })
                },
            )
            .collect::<Result<Vec<_>, PipelineError>>()?;

        log::debug!(
            "Spectrogram: {} frames x {} bins (W={}, hop={}, {:?} window)",
            frames.len(),
            window_size / 2 + 1,
            window_size,
            hop,
            self.params.window
        );

        Ok(Spectrogram {
            frames,
            sample_rate,
            window_size,
            hop_size: hop,
        })
    }
}
