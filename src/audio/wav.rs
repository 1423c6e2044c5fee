//! RIFF/WAVE container synthesis for raw linear-PCM samples.
//!
//! The speech endpoint returns bare LPCM bytes with no metadata. Players need a
//! container header in front of them, so [`encode`] prepends the canonical
//! 44-byte header and copies the samples through unchanged.

use thiserror::Error;

/// Size of the header emitted by [`encode`].
pub const HEADER_LEN: usize = 44;

/// Highest sample rate accepted by [`AudioFormat::validate`].
pub const MAX_SAMPLE_RATE: u32 = 768_000;

const SUPPORTED_BITS: [u16; 4] = [8, 16, 24, 32];

// RIFF size field covers everything after itself: "WAVE" + fmt chunk + data chunk header.
const RIFF_OVERHEAD: u32 = 36;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WavError {
    #[error("invalid audio format: {field} = {value}")]
    InvalidFormat { field: &'static str, value: u64 },

    #[error("no audio samples to encode")]
    EmptyInput,

    #[error("sample data length {len} is not a multiple of block alignment {block_align}")]
    UnalignedSamples { len: usize, block_align: u16 },

    #[error("sample data of {0} bytes does not fit a WAV container")]
    TooLarge(usize),
}

/// Format of the raw samples handed to [`encode`].
///
/// The encoder trusts these values; they must describe how the samples were
/// actually produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AudioFormat {
    pub sample_rate: u32,
    pub bits_per_sample: u16,
    pub channels: u16,
}

impl AudioFormat {
    pub fn new(sample_rate: u32, bits_per_sample: u16, channels: u16) -> Self {
        Self {
            sample_rate,
            bits_per_sample,
            channels,
        }
    }

    /// 16-bit signed mono, the layout of the speech endpoint's `lpcm` output.
    pub fn mono_pcm16(sample_rate: u32) -> Self {
        Self::new(sample_rate, 16, 1)
    }

    pub fn bytes_per_sample(&self) -> u16 {
        self.bits_per_sample / 8
    }

    /// Bytes in one complete multi-channel frame.
    pub fn block_align(&self) -> u16 {
        self.channels * self.bytes_per_sample()
    }

    pub fn byte_rate(&self) -> u32 {
        self.sample_rate * u32::from(self.block_align())
    }

    pub fn validate(&self) -> Result<(), WavError> {
        if self.sample_rate == 0 || self.sample_rate > MAX_SAMPLE_RATE {
            return Err(WavError::InvalidFormat {
                field: "sample_rate",
                value: u64::from(self.sample_rate),
            });
        }
        if !SUPPORTED_BITS.contains(&self.bits_per_sample) {
            return Err(WavError::InvalidFormat {
                field: "bits_per_sample",
                value: u64::from(self.bits_per_sample),
            });
        }
        if self.channels == 0 {
            return Err(WavError::InvalidFormat {
                field: "channels",
                value: 0,
            });
        }

        // block_align and byte_rate are stored as u16 / u32 in the header
        let block_align = u64::from(self.channels) * u64::from(self.bytes_per_sample());
        if block_align > u64::from(u16::MAX) {
            return Err(WavError::InvalidFormat {
                field: "channels",
                value: u64::from(self.channels),
            });
        }
        let byte_rate = u64::from(self.sample_rate) * block_align;
        if byte_rate > u64::from(u32::MAX) {
            return Err(WavError::InvalidFormat {
                field: "byte_rate",
                value: byte_rate,
            });
        }

        Ok(())
    }
}

/// Wraps raw PCM `samples` in a WAV container described by `format`.
///
/// Returns `HEADER_LEN + samples.len()` bytes: the header followed by the
/// samples verbatim. Empty input is rejected with [`WavError::EmptyInput`] and a
/// length that does not divide into whole frames with
/// [`WavError::UnalignedSamples`]; nothing is produced on error.
pub fn encode(samples: &[u8], format: &AudioFormat) -> Result<Vec<u8>, WavError> {
    format.validate()?;

    if samples.is_empty() {
        return Err(WavError::EmptyInput);
    }

    let block_align = format.block_align();
    if samples.len() % usize::from(block_align) != 0 {
        return Err(WavError::UnalignedSamples {
            len: samples.len(),
            block_align,
        });
    }

    let data_size = u32::try_from(samples.len())
        .ok()
        .filter(|size| size.checked_add(RIFF_OVERHEAD).is_some())
        .ok_or(WavError::TooLarge(samples.len()))?;

    let mut buf = Vec::with_capacity(HEADER_LEN + samples.len());

    // RIFF header
    buf.extend_from_slice(b"RIFF");
    buf.extend_from_slice(&(RIFF_OVERHEAD + data_size).to_le_bytes());
    buf.extend_from_slice(b"WAVE");

    // fmt chunk
    buf.extend_from_slice(b"fmt ");
    buf.extend_from_slice(&16u32.to_le_bytes()); // chunk size for PCM
    buf.extend_from_slice(&1u16.to_le_bytes()); // audio format 1 = PCM
    buf.extend_from_slice(&format.channels.to_le_bytes());
    buf.extend_from_slice(&format.sample_rate.to_le_bytes());
    buf.extend_from_slice(&format.byte_rate().to_le_bytes());
    buf.extend_from_slice(&block_align.to_le_bytes());
    buf.extend_from_slice(&format.bits_per_sample.to_le_bytes());

    // data chunk
    buf.extend_from_slice(b"data");
    buf.extend_from_slice(&data_size.to_le_bytes());
    buf.extend_from_slice(samples);

    Ok(buf)
}
