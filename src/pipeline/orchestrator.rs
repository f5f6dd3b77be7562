//! Clip pipeline orchestration

use super::config::PipelineConfig;
use crate::analysis::{extract_waveform, mono_samples, SpectralAnalyzer};
use crate::decode;
use crate::error::PipelineError;
use crate::model::{AudioClip, ClipArtifacts, ClipId};
use crate::render::{render_spectrogram, render_waveform};

/// Turns one clip into its waveform and spectrogram images
///
/// Holds only configuration, so one instance can render any number of clips,
/// from any number of threads.
#[derive(Debug, Clone, Default)]
pub struct ClipPipeline {
    config: PipelineConfig,
}

impl ClipPipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Render both plots for a clip
    ///
    /// All analysis runs before anything is rasterized, so a clip either
    /// yields both images or the first error encountered.
    pub fn render(&self, clip: &AudioClip) -> Result<ClipArtifacts, PipelineError> {
        log::debug!("Rendering {} ({} bytes)", clip.label, clip.bytes.len());

        let audio = decode::decode(&clip.bytes)?;

        let series = extract_waveform(&audio, self.config.reduction)?;

        let analyzer = SpectralAnalyzer::new(self.config.analysis)?;
        let mono = mono_samples(&audio, self.config.reduction)?;
        let spectrogram = analyzer.analyze(&mono, audio.sample_rate())?;

        let waveform = render_waveform(&series, self.config.waveform_size)?;
        let spectrogram = render_spectrogram(&spectrogram, self.config.spectrogram_size)?;

        log::debug!(
            "Rendered {}: waveform {} bytes, spectrogram {} bytes",
            clip.label,
            waveform.bytes.len(),
            spectrogram.bytes.len()
        );

        Ok(ClipArtifacts {
            id: clip.id.clone(),
            label: clip.label.clone(),
            waveform,
            spectrogram,
        })
    }

    /// Render raw container bytes under a label
    pub fn render_bytes(&self, label: &str, bytes: Vec<u8>) -> Result<ClipArtifacts, PipelineError> {
        self.render(&AudioClip::new(label, bytes))
    }

    /// Id the artifacts of `label` are stored under
    pub fn id_for(label: &str) -> ClipId {
        ClipId::from_label(label)
    }
}
