//! Pipeline configuration

use crate::analysis::{AnalysisParams, ChannelReduction, WindowFunction};
use crate::error::PipelineError;
use crate::render::{CanvasSize, MAX_DIMENSION};

/// Configuration shared by every clip a pipeline renders
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PipelineConfig {
    /// Output size of the waveform plot
    pub waveform_size: CanvasSize,

    /// Output size of the spectrogram plot
    pub spectrogram_size: CanvasSize,

    /// Window size, overlap and window function for the spectrogram
    pub analysis: AnalysisParams,

    /// Channel policy for both the waveform and the analyzer input
    pub reduction: ChannelReduction,
}

impl PipelineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use the same canvas size for both plots
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.waveform_size = CanvasSize::new(width, height);
        self.spectrogram_size = CanvasSize::new(width, height);
        self
    }

    pub fn with_waveform_size(mut self, size: CanvasSize) -> Self {
        self.waveform_size = size;
        self
    }

    pub fn with_spectrogram_size(mut self, size: CanvasSize) -> Self {
        self.spectrogram_size = size;
        self
    }

    /// Set window size `W` and overlap `O`
    pub fn with_framing(mut self, window_size: usize, overlap: usize) -> Self {
        self.analysis.window_size = window_size;
        self.analysis.overlap = overlap;
        self
    }

    pub fn with_window(mut self, window: WindowFunction) -> Self {
        self.analysis.window = window;
        self
    }

    pub fn with_reduction(mut self, reduction: ChannelReduction) -> Self {
        self.reduction = reduction;
        self
    }

    /// Check everything that can be checked before seeing any audio
    pub fn validate(&self) -> Result<(), PipelineError> {
        self.analysis.validate()?;
        for (name, size) in [("waveform", self.waveform_size), ("spectrogram", self.spectrogram_size)] {
            if size.width == 0 || size.height == 0 || size.width > MAX_DIMENSION || size.height > MAX_DIMENSION {
                return Err(PipelineError::Encoding(format!(
                    "{} canvas {}x{} is outside 1..={} pixels per side",
                    name, size.width, size.height, MAX_DIMENSION
                )));
            }
        }
        Ok(())
    }
}
