//! Numeric analysis of decoded audio
//!
//! The waveform extractor reduces interleaved samples to one amplitude per
//! frame; the spectral analyzer turns the same reduction into a
//! time x frequency magnitude grid. Neither stage knows about pixels.

mod spectral;
mod waveform;
mod window;

pub use spectral::{AnalysisParams, SpectralAnalyzer};
pub use waveform::{extract_waveform, mono_samples, ChannelReduction};
pub use window::WindowFunction;
