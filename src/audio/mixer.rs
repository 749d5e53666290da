//! Stereo/mono channel conversion

/// Downmix interleaved stereo to mono by averaging each pair
///
/// Integer division truncates toward zero. A trailing unpaired sample
/// is dropped.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn downmix_to_mono(samples: &[i16]) -> Vec<i16> {
    samples
        .chunks_exact(2)
        .map(|pair| ((i32::from(pair[0]) + i32::from(pair[1])) / 2) as i16)
        .collect()
}

/// Upmix mono to interleaved stereo by duplicating each sample
#[must_use]
pub fn upmix_to_stereo(samples: &[i16]) -> Vec<i16> {
    samples.iter().flat_map(|&s| [s, s]).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn downmix_averages_pairs() {
        assert_eq!(downmix_to_mono(&[100, 200, 300, 400]), vec![150, 350]);
    }

    #[test]
    fn downmix_truncates_toward_zero() {
        assert_eq!(downmix_to_mono(&[0, 1]), vec![0]);
        assert_eq!(downmix_to_mono(&[0, -1]), vec![0]);
        assert_eq!(downmix_to_mono(&[-3, -4]), vec![-3]);
    }

    #[test]
    fn downmix_drops_trailing_sample() {
        assert_eq!(downmix_to_mono(&[10, 20, 30]), vec![15]);
        assert!(downmix_to_mono(&[7]).is_empty());
    }

    #[test]
    fn downmix_handles_extreme_amplitudes() {
        // i16::MIN + i16::MIN would overflow in 16-bit; the average is
        // computed in i32 and always fits.
        assert_eq!(downmix_to_mono(&[i16::MIN, i16::MIN]), vec![i16::MIN]);
        assert_eq!(downmix_to_mono(&[i16::MAX, i16::MAX]), vec![i16::MAX]);
    }

    #[test]
    fn upmix_duplicates_samples() {
        assert_eq!(upmix_to_stereo(&[1, -2]), vec![1, 1, -2, -2]);
    }

    #[test]
    fn upmix_then_downmix_is_identity() {
        let samples = vec![0, 5, -5, i16::MAX, i16::MIN, 1234];
        assert_eq!(downmix_to_mono(&upmix_to_stereo(&samples)), samples);
    }
}
