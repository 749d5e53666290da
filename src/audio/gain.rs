//! Fixed attenuation for the device volume ceiling

/// Scale every sample by `factor` and narrow back to 16 bits
///
/// The fractional part truncates toward zero; a result outside the
/// 16-bit range saturates at the bounds. The deployed factor (0.1)
/// keeps every result well inside the range, so only the truncation
/// is observable in practice.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn apply_gain(samples: &[i16], factor: f32) -> Vec<i16> {
    samples
        .iter()
        .map(|&s| (f32::from(s) * factor) as i16)
        .collect()
}
