//! Raw sample conversion
//!
//! Converts packed sample bytes to signed integers at their declared bit
//! depth. Samples narrower than their container are left-justified, so the
//! padding bits are shifted out after sign extension.

use crate::error::PipelineError;
use crate::model::{Endianness, SampleLayout};

/// Convert a whole data chunk into interleaved signed samples
pub fn convert_samples(data: &[u8], layout: &SampleLayout) -> Result<Vec<i32>, PipelineError> {
    layout.validate()?;

    let frame_bytes = layout.frame_bytes();
    if data.len() % frame_bytes != 0 {
        return Err(PipelineError::CorruptInput(format!(
            "sample data of {} bytes ends mid-frame ({} bytes per frame)",
            data.len(),
            frame_bytes
        )));
    }

    let width = layout.container_bytes as usize;
    let padding = (width * 8) as u32 - layout.bit_depth as u32;

    Ok(data
        .chunks_exact(width)
        .map(|raw| read_sample(raw, layout.endianness, layout.signed) >> padding)
        .collect())
}

/// Read one 1-4 byte sample, sign-extended to 32 bits
#[inline]
fn read_sample(raw: &[u8], endianness: Endianness, signed: bool) -> i32 {
    let width = raw.len();

    // Most significant byte first, in the top bytes of the word
    let mut word = [0u8; 4];
    match endianness {
        Endianness::Big => word[..width].copy_from_slice(raw),
        Endianness::Little => {
            for (dst, &src) in word.iter_mut().zip(raw.iter().rev()) {
                *dst = src;
            }
        }
    }

    let shift = 32 - 8 * width as u32;
    if signed {
        i32::from_be_bytes(word) >> shift
    } else {
        let unsigned = (u32::from_be_bytes(word) >> shift) as i64;
        (unsigned - (1i64 << (8 * width - 1))) as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout(bit_depth: u16, container_bytes: u16, endianness: Endianness, signed: bool) -> SampleLayout {
        SampleLayout {
            bit_depth,
            container_bytes,
            channels: 1,
            endianness,
            signed,
        }
    }

    #[test]
    fn test_16bit_little_endian() {
        let data = [0x01, 0x00, 0xff, 0xff, 0x00, 0x80, 0xff, 0x7f];
        let samples = convert_samples(&data, &layout(16, 2, Endianness::Little, true)).unwrap();
        assert_eq!(samples, vec![1, -1, -32768, 32767]);
    }

    #[test]
    fn test_16bit_big_endian() {
        let data = [0x00, 0x01, 0xff, 0xfe, 0x80, 0x00];
        let samples = convert_samples(&data, &layout(16, 2, Endianness::Big, true)).unwrap();
        assert_eq!(samples, vec![1, -2, -32768]);
    }

    #[test]
    fn test_8bit_unsigned_offset() {
        let data = [0x80, 0x00, 0xff];
        let samples = convert_samples(&data, &layout(8, 1, Endianness::Little, false)).unwrap();
        assert_eq!(samples, vec![0, -128, 127]);
    }

    #[test]
    fn test_8bit_signed() {
        let data = [0x00, 0x80, 0x7f];
        let samples = convert_samples(&data, &layout(8, 1, Endianness::Big, true)).unwrap();
        assert_eq!(samples, vec![0, -128, 127]);
    }

    #[test]
    fn test_24bit_keeps_full_precision() {
        // -2 and 8_388_607 in 24-bit little-endian
        let data = [0xfe, 0xff, 0xff, 0xff, 0xff, 0x7f];
        let samples = convert_samples(&data, &layout(24, 3, Endianness::Little, true)).unwrap();
        assert_eq!(samples, vec![-2, 8_388_607]);
    }

    #[test]
    fn test_32bit_extremes() {
        let data = [0x00, 0x00, 0x00, 0x80, 0xff, 0xff, 0xff, 0x7f];
        let samples = convert_samples(&data, &layout(32, 4, Endianness::Little, true)).unwrap();
        assert_eq!(samples, vec![i32::MIN, i32::MAX]);
    }

    #[test]
    fn test_left_justified_20_bit() {
        // 20-bit value -1 stored left-justified in a 24-bit container
        let data = [0xf0, 0xff, 0xff];
        let samples = convert_samples(&data, &layout(20, 3, Endianness::Little, true)).unwrap();
        assert_eq!(samples, vec![-1]);
    }

    #[test]
    fn test_partial_frame_is_corrupt() {
        let stereo = SampleLayout {
            channels: 2,
            ..layout(16, 2, Endianness::Little, true)
        };
        let result = convert_samples(&[0, 0, 0, 0, 0, 0], &stereo);
        assert!(matches!(result, Err(PipelineError::CorruptInput(_))));
    }
}
