//! RIFF/RIFX WAVE readers
//!
//! Little-endian RIFF goes through `hound`. Big-endian RIFX, which hound
//! does not read, is parsed chunk by chunk with binrw.

use super::chunks::{find_chunk, read_chunks, read_header, Chunk};
use super::pcm::convert_samples;
use crate::error::PipelineError;
use crate::model::{DecodedAudio, Endianness, SampleLayout};
use binrw::BinRead;
use hound::{SampleFormat, WavReader};
use std::io::Cursor;

/// WAVE_FORMAT_PCM
const FORMAT_PCM: u16 = 0x0001;
/// WAVE_FORMAT_EXTENSIBLE
const FORMAT_EXTENSIBLE: u16 = 0xfffe;
/// Size of a `fmt ` body that carries the extensible fields
const EXTENSIBLE_FMT_SIZE: usize = 40;

#[derive(BinRead, Debug)]
struct FmtChunk {
    format_tag: u16,
    channels: u16,
    sample_rate: u32,
    byte_rate: u32,
    block_align: u16,
    bits_per_sample: u16,
}

/// Trailing fields of WAVE_FORMAT_EXTENSIBLE
#[derive(BinRead, Debug)]
struct FmtExtension {
    #[br(pad_before = 18)]
    valid_bits: u16,
    channel_mask: u32,
    /// First field of the sub-format GUID (the format tag)
    sub_format: u32,
}

/// Decode a complete little-endian RIFF WAVE file
pub(crate) fn decode_riff(bytes: &[u8]) -> Result<DecodedAudio, PipelineError> {
    let mut reader = WavReader::new(Cursor::new(bytes)).map_err(wav_error)?;
    let spec = reader.spec();
    log::debug!(
        "RIFF WAVE: {} ch, {} Hz, {}-bit {:?}",
        spec.channels,
        spec.sample_rate,
        spec.bits_per_sample,
        spec.sample_format
    );

    if spec.sample_format == SampleFormat::Float {
        return Err(PipelineError::UnsupportedFormat(format!(
            "{}-bit floating point WAVE is not integer PCM",
            spec.bits_per_sample
        )));
    }

    let container_bytes = spec.bits_per_sample.div_ceil(8);
    let layout = SampleLayout {
        bit_depth: spec.bits_per_sample,
        container_bytes,
        channels: spec.channels,
        endianness: Endianness::Little,
        signed: container_bytes > 1,
    };
    layout.validate()?;

    let samples = reader
        .samples::<i32>()
        .collect::<Result<Vec<_>, _>>()
        .map_err(wav_error)?;
    DecodedAudio::new(layout, spec.sample_rate, samples)
}

fn wav_error(err: hound::Error) -> PipelineError {
    match err {
        hound::Error::Unsupported => {
            PipelineError::UnsupportedFormat("WAVE encoding is not integer PCM".to_string())
        }
        hound::Error::FormatError(what) => PipelineError::CorruptInput(format!("malformed WAVE: {}", what)),
        other => PipelineError::CorruptInput(other.to_string()),
    }
}

/// Decode the chunk area of a big-endian RIFX WAVE
pub(crate) fn decode_rifx(area: &[u8]) -> Result<DecodedAudio, PipelineError> {
    let endianness = Endianness::Big;
    let chunks = read_chunks(area, endianness)?;
    log::debug!(
        "RIFX chunks: {}",
        chunks.iter().map(Chunk::name).collect::<Vec<_>>().join(", ")
    );

    let fmt_chunk = find_chunk(&chunks, b"fmt ")
        .ok_or_else(|| PipelineError::CorruptInput("WAVE has no 'fmt ' chunk".to_string()))?;
    let fmt: FmtChunk = read_header(fmt_chunk.body, endianness, "fmt")?;

    let mut bit_depth = fmt.bits_per_sample;
    match fmt.format_tag {
        FORMAT_PCM => {}
        FORMAT_EXTENSIBLE if fmt_chunk.body.len() >= EXTENSIBLE_FMT_SIZE => {
            let ext: FmtExtension = read_header(fmt_chunk.body, endianness, "fmt extension")?;
            if ext.sub_format != FORMAT_PCM as u32 {
                return Err(PipelineError::UnsupportedFormat(format!(
                    "extensible WAVE sub-format 0x{:04x} is not PCM",
                    ext.sub_format
                )));
            }
            log::debug!(
                "Extensible WAVE: {} valid bits, channel mask 0x{:x}",
                ext.valid_bits,
                ext.channel_mask
            );
            if ext.valid_bits != 0 {
                bit_depth = ext.valid_bits;
            }
        }
        FORMAT_EXTENSIBLE => {
            return Err(PipelineError::CorruptInput(format!(
                "extensible 'fmt ' chunk is only {} bytes",
                fmt_chunk.body.len()
            )));
        }
        other => {
            return Err(PipelineError::UnsupportedFormat(format!(
                "WAVE format tag 0x{:04x} is not integer PCM",
                other
            )));
        }
    }

    if fmt.channels == 0 {
        return Err(PipelineError::CorruptInput(
            "WAVE declares zero channels".to_string(),
        ));
    }
    if fmt.block_align == 0 || fmt.block_align % fmt.channels != 0 {
        return Err(PipelineError::CorruptInput(format!(
            "block align {} does not divide into {} channels",
            fmt.block_align, fmt.channels
        )));
    }

    let container_bytes = fmt.block_align / fmt.channels;
    let layout = SampleLayout {
        bit_depth,
        container_bytes,
        channels: fmt.channels,
        endianness,
        signed: container_bytes > 1,
    };
    layout.validate()?;

    let expected_rate = fmt.sample_rate as u64 * fmt.block_align as u64;
    if fmt.byte_rate as u64 != expected_rate {
        log::debug!(
            "WAVE byte rate {} disagrees with sample rate x block align ({})",
            fmt.byte_rate,
            expected_rate
        );
    }

    let data = find_chunk(&chunks, b"data")
        .ok_or_else(|| PipelineError::CorruptInput("WAVE has no 'data' chunk".to_string()))?;

    let samples = convert_samples(data.body, &layout)?;
    DecodedAudio::new(layout, fmt.sample_rate, samples)
}
