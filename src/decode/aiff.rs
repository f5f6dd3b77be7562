//! AIFF / AIFF-C reader

use super::chunks::{find_chunk, read_chunks, read_header, Chunk};
use super::pcm::convert_samples;
use crate::error::PipelineError;
use crate::model::{DecodedAudio, Endianness, SampleLayout};
use binrw::BinRead;

/// `COMM` body size for plain AIFF
const COMM_SIZE: usize = 18;
/// `COMM` body size up to and including the AIFF-C compression type
const COMM_AIFC_SIZE: usize = 22;

#[derive(BinRead, Debug)]
struct CommChunk {
    channels: i16,
    frame_count: u32,
    sample_size: i16,
    /// 80-bit IEEE 754 extended precision
    sample_rate: [u8; 10],
}

#[derive(BinRead, Debug)]
struct Compression {
    #[br(pad_before = 18)]
    kind: [u8; 4],
}

#[derive(BinRead, Debug)]
struct SsndHeader {
    offset: u32,
    block_size: u32,
}

pub(crate) fn decode_aiff(area: &[u8], form: &[u8; 4]) -> Result<DecodedAudio, PipelineError> {
    let is_aifc = match form {
        b"AIFF" => false,
        b"AIFC" => true,
        other => {
            return Err(PipelineError::UnsupportedFormat(format!(
                "FORM type {:?} is not AIFF",
                String::from_utf8_lossy(other)
            )))
        }
    };

    // Chunk headers are always big-endian, even for 'sowt' data
    let chunks = read_chunks(area, Endianness::Big)?;
    log::debug!(
        "AIFF chunks: {}",
        chunks.iter().map(Chunk::name).collect::<Vec<_>>().join(", ")
    );

    let comm_chunk = find_chunk(&chunks, b"COMM")
        .ok_or_else(|| PipelineError::CorruptInput("AIFF has no 'COMM' chunk".to_string()))?;
    if comm_chunk.body.len() < COMM_SIZE {
        return Err(PipelineError::CorruptInput(format!(
            "'COMM' chunk is only {} bytes",
            comm_chunk.body.len()
        )));
    }
    let comm: CommChunk = read_header(comm_chunk.body, Endianness::Big, "COMM")?;

    let endianness = if is_aifc {
        if comm_chunk.body.len() < COMM_AIFC_SIZE {
            return Err(PipelineError::CorruptInput(
                "AIFF-C 'COMM' chunk has no compression type".to_string(),
            ));
        }
        let compression: Compression = read_header(comm_chunk.body, Endianness::Big, "COMM")?;
        match &compression.kind {
            b"NONE" | b"twos" => Endianness::Big,
            b"sowt" => Endianness::Little,
            other => {
                return Err(PipelineError::UnsupportedFormat(format!(
                    "AIFF-C compression {:?} is not PCM",
                    String::from_utf8_lossy(other)
                )))
            }
        }
    } else {
        Endianness::Big
    };

    if comm.channels <= 0 {
        return Err(PipelineError::CorruptInput(format!(
            "AIFF declares {} channels",
            comm.channels
        )));
    }
    if comm.sample_size <= 0 {
        return Err(PipelineError::CorruptInput(format!(
            "AIFF declares a sample size of {} bits",
            comm.sample_size
        )));
    }

    let sample_rate = extended_to_f64(&comm.sample_rate);
    if !sample_rate.is_finite() || sample_rate < 1.0 || sample_rate > u32::MAX as f64 {
        return Err(PipelineError::CorruptInput(format!(
            "AIFF sample rate {} is out of range",
            sample_rate
        )));
    }

    let bit_depth = comm.sample_size as u16;
    let layout = SampleLayout {
        bit_depth,
        container_bytes: bit_depth.div_ceil(8),
        channels: comm.channels as u16,
        endianness,
        signed: true,
    };
    layout.validate()?;

    let data_len = comm.frame_count as usize * layout.frame_bytes();
    let data = match find_chunk(&chunks, b"SSND") {
        Some(ssnd) => {
            let header: SsndHeader = read_header(ssnd.body, Endianness::Big, "SSND")?;
            if header.block_size != 0 {
                log::debug!("AIFF block size {} ignored", header.block_size);
            }
            let start = 8 + header.offset as usize;
            ssnd.body
                .get(start..)
                .and_then(|rest| rest.get(..data_len))
                .ok_or_else(|| {
                    PipelineError::CorruptInput(format!(
                        "'SSND' chunk holds fewer than the {} frames declared",
                        comm.frame_count
                    ))
                })?
        }
        None if comm.frame_count == 0 => &[][..],
        None => {
            return Err(PipelineError::CorruptInput(
                "AIFF has no 'SSND' chunk".to_string(),
            ))
        }
    };

    let samples = convert_samples(data, &layout)?;
    DecodedAudio::new(layout, sample_rate.round() as u32, samples)
}

/// Convert an 80-bit IEEE 754 extended precision float
fn extended_to_f64(bytes: &[u8; 10]) -> f64 {
    let negative = bytes[0] & 0x80 != 0;
    let exponent = u16::from_be_bytes([bytes[0] & 0x7f, bytes[1]]) as i32;
    let mut mantissa_bytes = [0u8; 8];
    mantissa_bytes.copy_from_slice(&bytes[2..10]);
    let mantissa = u64::from_be_bytes(mantissa_bytes);

    if exponent == 0 && mantissa == 0 {
        return 0.0;
    }
    if exponent == 0x7fff {
        return f64::NAN;
    }

    let value = mantissa as f64 * 2f64.powi(exponent - 16383 - 63);
    if negative {
        -value
    } else {
        value
    }
}
