//! Canonical 24-bit mono PCM WAV writer.
//!
//! The layout is fixed so existing players and tools read it bit-for-bit:
//!
//! ```text
//! offset  size  field
//!      0     4  "RIFF"
//!      4     4  chunk size      = 36 + data size
//!      8     4  "WAVE"
//!     12     4  "fmt "
//!     16     4  fmt size        = 16
//!     20     2  format          = 1 (PCM)
//!     22     2  channels        = 1
//!     24     4  sample rate
//!     28     4  byte rate       = sample rate * 3
//!     32     2  block align     = 3
//!     34     2  bits per sample = 24
//!     36     4  "data"
//!     40     4  data size       = 3 * sample count
//!     44        samples, 3 bytes each, little-endian two's complement
//! ```

use std::io::Write;

use byteorder::{LittleEndian, WriteBytesExt};
use log::trace;

use crate::{Error, Result};

/// Size of the header in bytes.
pub const HEADER_LEN: usize = 44;

/// Largest positive 24-bit sample, and the float-to-int scale.
pub const PCM_MAX: i32 = 8_388_607;
/// Most negative 24-bit sample.
pub const PCM_MIN: i32 = -8_388_608;

/// Highest sample rate whose byte rate fits the 32-bit header field.
pub const MAX_SAMPLE_RATE: u32 = u32::MAX / BYTES_PER_SAMPLE;

const FMT_CHUNK_LEN: u32 = 16;
const PCM_FORMAT: u16 = 1;
const BYTES_PER_SAMPLE: u32 = 3;

/// Stream description written into the fmt chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavSpec {
    pub sample_rate: u32,
}

impl WavSpec {
    pub fn new(sample_rate: u32) -> Self {
        Self { sample_rate }
    }

    pub fn channels(&self) -> u16 {
        1
    }

    pub fn bits_per_sample(&self) -> u16 {
        24
    }

    pub fn block_align(&self) -> u16 {
        self.channels() * self.bits_per_sample() / 8
    }

    /// Bytes per second, or an error if it does not fit the header field.
    pub fn byte_rate(&self) -> Result<u32> {
        self.sample_rate
            .checked_mul(u32::from(self.block_align()))
            .ok_or_else(|| {
                Error::InvalidConfig(format!(
                    "sample rate {} Hz exceeds the WAV limit of {MAX_SAMPLE_RATE} Hz",
                    self.sample_rate
                ))
            })
    }
}

/// Convert one float sample to a 24-bit integer.
///
/// Clamps to -1..1, scales by [`PCM_MAX`] and rounds half to even. NaN
/// encodes as silence.
pub fn encode_sample(sample: f32) -> i32 {
    if sample.is_nan() {
        return 0;
    }
    let scaled = sample.clamp(-1.0, 1.0) * PCM_MAX as f32;
    (scaled.round_ties_even() as i32).clamp(PCM_MIN, PCM_MAX)
}

/// Data chunk size in bytes for `sample_count` samples, if it fits the
/// 32-bit size fields.
pub fn data_len(sample_count: usize) -> Result<u32> {
    u32::try_from(sample_count)
        .ok()
        .and_then(|count| count.checked_mul(BYTES_PER_SAMPLE))
        .filter(|len| len.checked_add(36).is_some())
        .ok_or(Error::DataTooLarge {
            samples: sample_count,
        })
}

/// Write the 44-byte header for `sample_count` samples.
///
/// Every size field is checked before the first byte goes out.
pub fn write_header<W: Write>(writer: &mut W, spec: WavSpec, sample_count: usize) -> Result<()> {
    let data_len = data_len(sample_count)?;
    let byte_rate = spec.byte_rate()?;

    writer.write_all(b"RIFF")?;
    writer.write_u32::<LittleEndian>(36 + data_len)?;
    writer.write_all(b"WAVE")?;

    writer.write_all(b"fmt ")?;
    writer.write_u32::<LittleEndian>(FMT_CHUNK_LEN)?;
    writer.write_u16::<LittleEndian>(PCM_FORMAT)?;
    writer.write_u16::<LittleEndian>(spec.channels())?;
    writer.write_u32::<LittleEndian>(spec.sample_rate)?;
    writer.write_u32::<LittleEndian>(byte_rate)?;
    writer.write_u16::<LittleEndian>(spec.block_align())?;
    writer.write_u16::<LittleEndian>(spec.bits_per_sample())?;

    writer.write_all(b"data")?;
    writer.write_u32::<LittleEndian>(data_len)?;
    Ok(())
}

/// Write a complete WAV: header followed by every sample.
///
/// The size is checked before any byte is written.
pub fn write_wav24<W: Write>(writer: &mut W, spec: WavSpec, samples: &[f32]) -> Result<()> {
    write_header(writer, spec, samples.len())?;
    for &sample in samples {
        writer.write_i24::<LittleEndian>(encode_sample(sample))?;
    }
    trace!(
        "wrote {} bytes of 24-bit PCM at {} Hz",
        HEADER_LEN + samples.len() * BYTES_PER_SAMPLE as usize,
        spec.sample_rate
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn u16_at(bytes: &[u8], offset: usize) -> u16 {
        u16::from_le_bytes([bytes[offset], bytes[offset + 1]])
    }

    fn u32_at(bytes: &[u8], offset: usize) -> u32 {
        u32::from_le_bytes(bytes[offset..offset + 4].try_into().unwrap())
    }

    #[test]
    fn header_layout_is_canonical() {
        let mut bytes = Vec::new();
        write_header(&mut bytes, WavSpec::new(48_000), 96_000).unwrap();

        assert_eq!(bytes.len(), HEADER_LEN);
        assert_eq!(&bytes[0..4], b"RIFF");
        assert_eq!(u32_at(&bytes, 4), 36 + 288_000);
        assert_eq!(&bytes[8..12], b"WAVE");
        assert_eq!(&bytes[12..16], b"fmt ");
        assert_eq!(u32_at(&bytes, 16), 16);
        assert_eq!(u16_at(&bytes, 20), 1);
        assert_eq!(u16_at(&bytes, 22), 1);
        assert_eq!(u32_at(&bytes, 24), 48_000);
        assert_eq!(u32_at(&bytes, 28), 144_000);
        assert_eq!(u16_at(&bytes, 32), 3);
        assert_eq!(u16_at(&bytes, 34), 24);
        assert_eq!(&bytes[36..40], b"data");
        assert_eq!(u32_at(&bytes, 40), 288_000);
    }

    #[test]
    fn encodes_full_scale_and_rounding() {
        assert_eq!(encode_sample(0.0), 0);
        assert_eq!(encode_sample(1.0), PCM_MAX);
        assert_eq!(encode_sample(-1.0), -PCM_MAX);
        // 4194303.5 rounds to the even neighbour.
        assert_eq!(encode_sample(0.5), 4_194_304);
        assert_eq!(encode_sample(-0.5), -4_194_304);
    }

    #[test]
    fn encode_saturates_out_of_range() {
        assert_eq!(encode_sample(2.0), PCM_MAX);
        assert_eq!(encode_sample(-7.5), -PCM_MAX);
        assert_eq!(encode_sample(f32::INFINITY), PCM_MAX);
        assert_eq!(encode_sample(f32::NAN), 0);
    }

    #[test]
    fn samples_are_three_byte_little_endian() {
        let mut bytes = Vec::new();
        write_wav24(&mut bytes, WavSpec::new(8_000), &[1.0, -1.0, 0.0]).unwrap();

        assert_eq!(bytes.len(), HEADER_LEN + 9);
        let data = &bytes[HEADER_LEN..];
        assert_eq!(&data[0..3], &[0xFF, 0xFF, 0x7F]);
        assert_eq!(&data[3..6], &[0x01, 0x00, 0x80]);
        assert_eq!(&data[6..9], &[0x00, 0x00, 0x00]);
    }

    #[test]
    fn empty_buffer_is_header_only() {
        let mut bytes = Vec::new();
        write_wav24(&mut bytes, WavSpec::new(48_000), &[]).unwrap();
        assert_eq!(bytes.len(), HEADER_LEN);
        assert_eq!(u32_at(&bytes, 4), 36);
        assert_eq!(u32_at(&bytes, 40), 0);
    }

    #[test]
    fn rejects_byte_rate_overflow_before_writing() {
        assert_eq!(WavSpec::new(MAX_SAMPLE_RATE).byte_rate().unwrap(), u32::MAX);

        let mut bytes = Vec::new();
        let err = write_header(&mut bytes, WavSpec::new(2_000_000_000), 1).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
        assert!(bytes.is_empty());

        let err = write_wav24(&mut bytes, WavSpec::new(MAX_SAMPLE_RATE + 1), &[0.0]).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
        assert!(bytes.is_empty());
    }

    #[test]
    fn rejects_data_beyond_riff_limits() {
        assert_eq!(data_len(1_000).unwrap(), 3_000);
        assert!(data_len(u32::MAX as usize / 3).is_err());
        assert!(matches!(
            data_len(usize::MAX),
            Err(Error::DataTooLarge { .. })
        ));
    }
}
