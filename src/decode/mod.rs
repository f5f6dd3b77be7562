//! PCM decoder
//!
//! Turns an in-memory container (RIFF/RIFX WAVE or AIFF/AIFC) into
//! `DecodedAudio`. Only uncompressed integer PCM is accepted; the header's
//! bit depth, channel count and byte order drive the sample conversion.

mod aiff;
mod chunks;
mod pcm;
mod wave;

pub use pcm::convert_samples;

use crate::error::PipelineError;
use crate::model::{DecodedAudio, Endianness};
use chunks::FormHeader;

/// Container families the decoder recognizes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Container {
    /// RIFF (little-endian) or RIFX (big-endian) WAVE
    Wave,
    /// AIFF or AIFF-C
    Aiff,
}

/// Decode a complete PCM container held in memory
pub fn decode(bytes: &[u8]) -> Result<DecodedAudio, PipelineError> {
    let (container, endianness) = sniff(bytes)?;
    let header = FormHeader::parse(bytes, endianness)?;
    let body = header.body(bytes);

    let audio = match container {
        Container::Wave => {
            if &header.form != b"WAVE" {
                return Err(PipelineError::UnsupportedFormat(format!(
                    "RIFF form type {:?} is not WAVE",
                    String::from_utf8_lossy(&header.form)
                )));
            }
            match endianness {
                Endianness::Little => wave::decode_riff(bytes)?,
                Endianness::Big => wave::decode_rifx(body)?,
            }
        }
        Container::Aiff => aiff::decode_aiff(body, &header.form)?,
    };

    log::debug!(
        "Decoded {:?}: {} ch, {} Hz, {}-bit {}, {} frames ({:.2}s)",
        container,
        audio.channels(),
        audio.sample_rate(),
        audio.layout().bit_depth,
        audio.layout().endianness,
        audio.frame_count(),
        audio.duration_secs()
    );

    Ok(audio)
}

/// Identify the container from its magic number
pub fn sniff(bytes: &[u8]) -> Result<(Container, Endianness), PipelineError> {
    let magic = bytes.get(0..4).ok_or_else(|| {
        PipelineError::CorruptInput(format!(
            "{} bytes is too short to identify a container",
            bytes.len()
        ))
    })?;

    match magic {
        b"RIFF" => Ok((Container::Wave, Endianness::Little)),
        b"RIFX" => Ok((Container::Wave, Endianness::Big)),
        b"FORM" => Ok((Container::Aiff, Endianness::Big)),
        other => Err(PipelineError::UnsupportedFormat(format!(
            "unrecognized container magic {:02x?}",
            other
        ))),
    }
}
