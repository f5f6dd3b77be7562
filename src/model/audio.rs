use crate::error::PipelineError;
use std::fmt;

/// Byte order of the raw sample data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endianness {
    Little,
    Big,
}

impl fmt::Display for Endianness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endianness::Little => f.write_str("little-endian"),
            Endianness::Big => f.write_str("big-endian"),
        }
    }
}

/// Sample framing declared by a container header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleLayout {
    /// Significant bits per sample (1-32)
    pub bit_depth: u16,

    /// Bytes each sample occupies in the data chunk (1-4)
    pub container_bytes: u16,

    /// Interleaved channel count (>= 1)
    pub channels: u16,

    /// Byte order of each sample
    pub endianness: Endianness,

    /// Two's complement (true) or offset binary (8-bit WAVE)
    pub signed: bool,
}

impl SampleLayout {
    /// Bytes per interleaved frame (one sample for every channel)
    pub fn frame_bytes(&self) -> usize {
        self.container_bytes as usize * self.channels as usize
    }

    /// Check the combination is one the sample converter can honor
    pub fn validate(&self) -> Result<(), PipelineError> {
        if self.channels == 0 {
            return Err(PipelineError::CorruptInput(
                "header declares zero channels".to_string(),
            ));
        }
        if !(1..=4).contains(&self.container_bytes) {
            return Err(PipelineError::UnsupportedFormat(format!(
                "{}-byte sample containers",
                self.container_bytes
            )));
        }
        if self.bit_depth == 0 || self.bit_depth > self.container_bytes * 8 {
            return Err(PipelineError::CorruptInput(format!(
                "bit depth {} does not fit a {}-byte container",
                self.bit_depth, self.container_bytes
            )));
        }
        Ok(())
    }
}

/// Decoded PCM: interleaved signed integer samples plus their framing
///
/// Invariant: `samples.len() % channels == 0`.
#[derive(Debug, Clone)]
pub struct DecodedAudio {
    layout: SampleLayout,
    sample_rate: u32,
    samples: Vec<i32>,
}

impl DecodedAudio {
    pub fn new(layout: SampleLayout, sample_rate: u32, samples: Vec<i32>) -> Result<Self, PipelineError> {
        layout.validate()?;
        if sample_rate == 0 {
            return Err(PipelineError::CorruptInput(
                "header declares a sample rate of 0 Hz".to_string(),
            ));
        }
        if samples.len() % layout.channels as usize != 0 {
            return Err(PipelineError::CorruptInput(format!(
                "{} samples is not a whole number of {}-channel frames",
                samples.len(),
                layout.channels
            )));
        }

        Ok(Self {
            layout,
            sample_rate,
            samples,
        })
    }

    pub fn layout(&self) -> &SampleLayout {
        &self.layout
    }

    pub fn channels(&self) -> usize {
        self.layout.channels as usize
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Interleaved samples, channel 0 first within each frame
    pub fn samples(&self) -> &[i32] {
        &self.samples
    }

    /// Number of sample frames (samples per channel)
    pub fn frame_count(&self) -> usize {
        self.samples.len() / self.channels()
    }

    /// Iterate over frames, each a slice of `channels` samples
    pub fn frames(&self) -> impl Iterator<Item = &[i32]> {
        self.samples.chunks_exact(self.channels())
    }

    pub fn duration_secs(&self) -> f64 {
        self.frame_count() as f64 / self.sample_rate as f64
    }

    /// Magnitude of a full-scale sample at the declared bit depth
    pub fn full_scale(&self) -> f64 {
        (1u64 << (self.layout.bit_depth - 1)) as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stereo_16() -> SampleLayout {
        SampleLayout {
            bit_depth: 16,
            container_bytes: 2,
            channels: 2,
            endianness: Endianness::Little,
            signed: true,
        }
    }

    #[test]
    fn test_decoded_audio_frames() {
        let audio = DecodedAudio::new(stereo_16(), 8000, vec![1, -1, 2, -2, 3, -3]).unwrap();
        assert_eq!(audio.frame_count(), 3);
        let firsts: Vec<i32> = audio.frames().map(|f| f[0]).collect();
        assert_eq!(firsts, vec![1, 2, 3]);
        assert_eq!(audio.full_scale(), 32768.0);
    }

    #[test]
    fn test_rejects_partial_frame() {
        let result = DecodedAudio::new(stereo_16(), 8000, vec![1, 2, 3]);
        assert!(matches!(result, Err(PipelineError::CorruptInput(_))));
    }

    #[test]
    fn test_rejects_zero_sample_rate() {
        let result = DecodedAudio::new(stereo_16(), 0, vec![]);
        assert!(matches!(result, Err(PipelineError::CorruptInput(_))));
    }

    #[test]
    fn test_layout_bit_depth_must_fit_container() {
        let layout = SampleLayout {
            bit_depth: 24,
            ..stereo_16()
        };
        assert!(layout.validate().is_err());
        assert_eq!(stereo_16().frame_bytes(), 4);
    }
}
