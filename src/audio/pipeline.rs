//! Conversion pipelines to device-ready PCM
//!
//! Two entry points share the gain stage and serialization
//! primitives: [`process_wav`] for synthesis output wrapped in a WAV
//! container, and [`process_raw`] for PCM that is already in the
//! device format and only needs the volume ceiling applied.

use crate::audio::{gain, mixer, resample, wav};
use crate::{Error, Result};

/// Fixed output contract of the embedded playback device
///
/// Passed into the pipelines rather than read from globals so they
/// can be exercised against other target profiles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeviceProfile {
    /// Output sample rate in Hz
    pub sample_rate: u32,
    /// Output channel count (interleaved)
    pub channels: u16,
    /// Output bit depth
    pub bits_per_sample: u16,
    /// Attenuation applied to every sample
    pub gain: f32,
}

impl Default for DeviceProfile {
    /// The deployed speaker driver: 16 kHz, 16-bit, stereo, with a
    /// 90% attenuation against its fixed volume ceiling.
    fn default() -> Self {
        Self {
            sample_rate: 16_000,
            channels: 2,
            bits_per_sample: 16,
            gain: 0.1,
        }
    }
}

/// Convert a synthesized WAV container to device-ready raw PCM
///
/// Parses the container, downmixes stereo to mono, applies the
/// profile gain, resamples to the profile rate, widens to the
/// profile channel count and serializes little-endian. Output always
/// matches the profile regardless of the input format.
///
/// # Errors
///
/// Returns a container error from [`wav::parse`], or
/// [`Error::UnsupportedBitDepth`] for payloads that are not 16-bit.
pub fn process_wav(wav_bytes: &[u8], profile: &DeviceProfile) -> Result<Vec<u8>> {
    let desc = wav::parse(wav_bytes)?;
    tracing::debug!(
        channels = desc.channels,
        sample_rate = desc.sample_rate,
        bits = desc.bits_per_sample,
        payload_bytes = desc.data_len,
        "parsed synthesis container"
    );

    if desc.bits_per_sample != 16 {
        return Err(Error::UnsupportedBitDepth(desc.bits_per_sample));
    }

    let mut samples = decode_samples(desc.payload(wav_bytes));

    // Mixing must precede resampling: interpolating across
    // interleaved stereo pairs would corrupt channel alignment.
    if desc.channels == 2 {
        samples = mixer::downmix_to_mono(&samples);
    }

    samples = gain::apply_gain(&samples, profile.gain);

    if desc.sample_rate != profile.sample_rate {
        samples = resample::resample_linear(&samples, desc.sample_rate, profile.sample_rate);
    }

    if profile.channels == 2 {
        samples = mixer::upmix_to_stereo(&samples);
    }
    Ok(encode_samples(&samples))
}

/// Apply the profile gain to PCM already in the device format
///
/// No format inspection; the caller vouches for rate, channel count
/// and bit depth. A trailing odd byte is dropped.
#[must_use]
pub fn process_raw(pcm: &[u8], profile: &DeviceProfile) -> Vec<u8> {
    let samples = decode_samples(pcm);
    encode_samples(&gain::apply_gain(&samples, profile.gain))
}

/// Interpret packed little-endian bytes as 16-bit samples
///
/// A trailing odd byte is dropped.
#[must_use]
pub fn decode_samples(bytes: &[u8]) -> Vec<i16> {
    bytes
        .chunks_exact(2)
        .map(|b| i16::from_le_bytes([b[0], b[1]]))
        .collect()
}

/// Serialize samples to packed little-endian bytes
#[must_use]
pub fn encode_samples(samples: &[i16]) -> Vec<u8> {
    let mut out = Vec::with_capacity(samples.len() * 2);
    for s in samples {
        out.extend_from_slice(&s.to_le_bytes());
    }
    out
}
