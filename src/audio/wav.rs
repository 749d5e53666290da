//! WAV container framing and parsing
//!
//! The canonical container is a fixed 44-byte RIFF/WAVE header
//! immediately followed by packed little-endian PCM. The header field
//! offsets are part of the format's binary contract and are read from
//! fixed positions; the `data` chunk is located by scanning, so
//! containers with auxiliary chunks between the format block and the
//! payload (common in upstream encoder output) still parse.

use crate::{Error, Result};

/// Length of the canonical fixed header
pub const HEADER_LEN: usize = 44;

/// Parsed WAV header plus the payload byte range
///
/// Constructed once by [`parse`] and read-only afterward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavDescriptor {
    pub channels: u16,
    pub sample_rate: u32,
    pub bits_per_sample: u16,
    /// Byte offset of the payload within the original buffer
    pub data_offset: usize,
    /// Payload length in bytes, clamped to the bytes actually present
    pub data_len: usize,
}

impl WavDescriptor {
    /// Payload slice within the buffer this descriptor was parsed from
    #[must_use]
    pub fn payload<'a>(&self, bytes: &'a [u8]) -> &'a [u8] {
        &bytes[self.data_offset..self.data_offset + self.data_len]
    }
}

/// Wrap raw packed PCM bytes in a canonical 44-byte WAV header
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn frame_pcm(pcm: &[u8], sample_rate: u32, channels: u16, bits_per_sample: u16) -> Vec<u8> {
    let data_len = pcm.len() as u32;
    let byte_rate = sample_rate * u32::from(channels) * u32::from(bits_per_sample) / 8;
    let block_align = channels * bits_per_sample / 8;

    let mut out = Vec::with_capacity(HEADER_LEN + pcm.len());
    out.extend_from_slice(b"RIFF");
    out.extend_from_slice(&(36 + data_len).to_le_bytes());
    out.extend_from_slice(b"WAVE");
    out.extend_from_slice(b"fmt ");
    out.extend_from_slice(&16u32.to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes()); // linear PCM
    out.extend_from_slice(&channels.to_le_bytes());
    out.extend_from_slice(&sample_rate.to_le_bytes());
    out.extend_from_slice(&byte_rate.to_le_bytes());
    out.extend_from_slice(&block_align.to_le_bytes());
    out.extend_from_slice(&bits_per_sample.to_le_bytes());
    out.extend_from_slice(b"data");
    out.extend_from_slice(&data_len.to_le_bytes());
    out.extend_from_slice(pcm);
    out
}

/// Parse a WAV container and locate its payload
///
/// A declared payload length running past the end of the buffer is
/// clamped to the remaining bytes rather than rejected; truncated and
/// metadata-appended responses from synthesis services still play.
///
/// # Errors
///
/// Returns [`Error::MalformedContainer`] when the buffer is shorter
/// than the 44-byte header, or [`Error::PayloadNotFound`] when no
/// `data` chunk exists between the header and end of buffer.
pub fn parse(bytes: &[u8]) -> Result<WavDescriptor> {
    if bytes.len() < HEADER_LEN {
        return Err(Error::MalformedContainer(bytes.len()));
    }

    let channels = u16::from_le_bytes([bytes[22], bytes[23]]);
    let sample_rate = u32::from_le_bytes([bytes[24], bytes[25], bytes[26], bytes[27]]);
    let bits_per_sample = u16::from_le_bytes([bytes[34], bytes[35]]);

    let mut i = 36;
    while i + 8 <= bytes.len() {
        if &bytes[i..i + 4] == b"data" {
            let declared =
                u32::from_le_bytes([bytes[i + 4], bytes[i + 5], bytes[i + 6], bytes[i + 7]])
                    as usize;
            let data_offset = i + 8;
            let data_len = declared.min(bytes.len() - data_offset);

            return Ok(WavDescriptor {
                channels,
                sample_rate,
                bits_per_sample,
                data_offset,
                data_len,
            });
        }
        i += 1;
    }

    Err(Error::PayloadNotFound)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frames_canonical_header() {
        let pcm = [0x00, 0x10, 0x00, 0x20];
        let wav = frame_pcm(&pcm, 16_000, 1, 16);

        assert_eq!(wav.len(), HEADER_LEN + 4);
        assert_eq!(&wav[0..4], b"RIFF");
        assert_eq!(u32::from_le_bytes([wav[4], wav[5], wav[6], wav[7]]), 40);
        assert_eq!(&wav[8..12], b"WAVE");
        assert_eq!(&wav[12..16], b"fmt ");
        // byte rate = 16000 * 1 * 16 / 8
        assert_eq!(
            u32::from_le_bytes([wav[28], wav[29], wav[30], wav[31]]),
            32_000
        );
        // block align = 1 * 16 / 8
        assert_eq!(u16::from_le_bytes([wav[32], wav[33]]), 2);
        assert_eq!(&wav[36..40], b"data");
        assert_eq!(&wav[44..], &pcm);
    }

    #[test]
    fn roundtrip_preserves_format_and_payload() {
        let pcm = [0x00, 0x10, 0x00, 0x20];
        let wav = frame_pcm(&pcm, 16_000, 1, 16);
        let desc = parse(&wav).unwrap();

        assert_eq!(desc.channels, 1);
        assert_eq!(desc.sample_rate, 16_000);
        assert_eq!(desc.bits_per_sample, 16);
        assert_eq!(desc.payload(&wav), &pcm);
    }

    #[test]
    fn short_buffer_is_malformed() {
        let err = parse(&[0u8; 43]).unwrap_err();
        assert!(matches!(err, Error::MalformedContainer(43)));
    }

    #[test]
    fn header_only_container_has_empty_payload() {
        let wav = frame_pcm(&[], 22_050, 2, 16);
        assert_eq!(wav.len(), HEADER_LEN);

        let desc = parse(&wav).unwrap();
        assert_eq!(desc.data_len, 0);
        assert!(desc.payload(&wav).is_empty());
    }

    #[test]
    fn missing_data_chunk_is_reported() {
        let mut wav = frame_pcm(&[1, 2, 3, 4], 16_000, 1, 16);
        wav[36..40].copy_from_slice(b"junk");
        assert!(matches!(parse(&wav).unwrap_err(), Error::PayloadNotFound));
    }

    #[test]
    fn tolerates_auxiliary_chunk_before_data() {
        let pcm = [5, 6, 7, 8];
        let mut wav = frame_pcm(&pcm, 44_100, 2, 16)[..36].to_vec();
        // LIST chunk with 4 bytes of metadata, then the real payload.
        wav.extend_from_slice(b"LIST");
        wav.extend_from_slice(&4u32.to_le_bytes());
        wav.extend_from_slice(b"INFO");
        wav.extend_from_slice(b"data");
        wav.extend_from_slice(&(pcm.len() as u32).to_le_bytes());
        wav.extend_from_slice(&pcm);

        let desc = parse(&wav).unwrap();
        assert_eq!(desc.sample_rate, 44_100);
        assert_eq!(desc.payload(&wav), &pcm);
    }

    #[test]
    fn overdeclared_length_is_clamped() {
        let mut wav = frame_pcm(&[1, 2, 3, 4, 5, 6], 16_000, 1, 16);
        wav[40..44].copy_from_slice(&1000u32.to_le_bytes());

        let desc = parse(&wav).unwrap();
        assert_eq!(desc.data_len, 6);
        assert_eq!(desc.payload(&wav), &[1, 2, 3, 4, 5, 6]);
    }
}
