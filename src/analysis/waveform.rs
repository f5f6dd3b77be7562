//! Waveform extraction and channel reduction

use crate::error::PipelineError;
use crate::model::{AmplitudeSeries, DecodedAudio};
use std::fmt;

/// How one amplitude is picked from each interleaved frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChannelReduction {
    /// Channel 0 only
    #[default]
    First,
    /// A specific channel
    Channel(usize),
    /// Arithmetic mean of all channels
    Mean,
}

impl ChannelReduction {
    /// Fail if the policy names a channel the audio does not have
    pub fn check(&self, channels: usize) -> Result<(), PipelineError> {
        match *self {
            ChannelReduction::Channel(n) if n >= channels => Err(PipelineError::InvalidParameter(
                format!("channel {} requested from {}-channel audio", n, channels),
            )),
            _ => Ok(()),
        }
    }

    /// Reduce one frame (`channels` samples) to a single value
    #[inline]
    fn reduce(&self, frame: &[i32]) -> f64 {
        match *self {
            ChannelReduction::First => frame[0] as f64,
            ChannelReduction::Channel(n) => frame[n] as f64,
            ChannelReduction::Mean => {
                frame.iter().map(|&s| s as f64).sum::<f64>() / frame.len() as f64
            }
        }
    }
}

impl fmt::Display for ChannelReduction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChannelReduction::First => f.write_str("first channel"),
            ChannelReduction::Channel(n) => write!(f, "channel {}", n),
            ChannelReduction::Mean => f.write_str("channel mean"),
        }
    }
}

/// One amplitude per sample frame, in raw sample units
///
/// The series length always equals `audio.frame_count()`; no resampling or
/// smoothing is applied.
pub fn extract_waveform(audio: &DecodedAudio, reduction: ChannelReduction) -> Result<AmplitudeSeries, PipelineError> {
    reduction.check(audio.channels())?;

    let series = AmplitudeSeries::from_amplitudes(
        audio.frames().map(|frame| reduction.reduce(frame)),
        audio.sample_rate(),
    );

    log::debug!(
        "Extracted {} amplitude points ({})",
        series.len(),
        reduction
    );
    Ok(series)
}

/// Mono samples normalized to full scale (`[-1, 1)`) for spectral analysis
pub fn mono_samples(audio: &DecodedAudio, reduction: ChannelReduction) -> Result<Vec<f64>, PipelineError> {
    reduction.check(audio.channels())?;

    let scale = audio.full_scale();
    Ok(audio
        .frames()
        .map(|frame| reduction.reduce(frame) / scale)
        .collect())
}
