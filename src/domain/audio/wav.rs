//! Minimal WAV container encoding
//!
//! Produces the exact 44-byte-header, little-endian, mono 16-bit layout
//! the speech recognition service expects. Only uncompressed PCM is
//! supported.

/// Target sample rate for recognition audio
pub const SAMPLE_RATE: u32 = 16_000;

/// Channel count (mono)
pub const CHANNELS: u16 = 1;

/// Bits per sample
pub const BITS_PER_SAMPLE: u16 = 16;

/// Size of the RIFF/fmt/data header in bytes
pub const HEADER_LEN: usize = 44;

/// Encode 16-bit mono PCM samples into a WAV container.
///
/// Every multi-byte header field is little-endian. The data chunk length
/// equals `samples.len() * 2`; samples are written in order.
pub fn encode_wav(samples: &[i16], sample_rate: u32) -> Vec<u8> {
    let data_len = (samples.len() * 2) as u32;
    let byte_rate = sample_rate * u32::from(CHANNELS) * u32::from(BITS_PER_SAMPLE) / 8;
    let block_align = CHANNELS * BITS_PER_SAMPLE / 8;

    let mut out = Vec::with_capacity(HEADER_LEN + samples.len() * 2);

    out.extend_from_slice(b"RIFF");
    out.extend_from_slice(&(36 + data_len).to_le_bytes());
    out.extend_from_slice(b"WAVE");

    out.extend_from_slice(b"fmt ");
    out.extend_from_slice(&16u32.to_le_bytes()); // PCM chunk size
    out.extend_from_slice(&1u16.to_le_bytes()); // audio format (PCM)
    out.extend_from_slice(&CHANNELS.to_le_bytes());
    out.extend_from_slice(&sample_rate.to_le_bytes());
    out.extend_from_slice(&byte_rate.to_le_bytes());
    out.extend_from_slice(&block_align.to_le_bytes());
    out.extend_from_slice(&BITS_PER_SAMPLE.to_le_bytes());

    out.extend_from_slice(b"data");
    out.extend_from_slice(&data_len.to_le_bytes());
    for sample in samples {
        out.extend_from_slice(&sample.to_le_bytes());
    }

    out
}
