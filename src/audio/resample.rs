//! Linear-interpolation resampling
//!
//! A single interpolation pass with no anti-alias filtering; the
//! target is device compatibility, not fidelity. Downsampling from
//! much higher rates will alias.

/// Resample to a new rate via linear interpolation
///
/// Output length is `floor(len * target / source)`. The source index
/// is clamped to `len - 2` so the right-hand neighbor always exists,
/// which linearly extrapolates the final output positions past the
/// last input sample.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss
)]
pub fn resample_linear(samples: &[i16], source_rate: u32, target_rate: u32) -> Vec<i16> {
    if source_rate == target_rate {
        return samples.to_vec();
    }

    let ratio = f64::from(target_rate) / f64::from(source_rate);
    let new_len = (samples.len() as f64 * ratio) as usize;

    match samples {
        [] => Vec::new(),
        // No neighbor to interpolate toward; hold the one value.
        [only] => vec![*only; new_len],
        _ => (0..new_len)
            .map(|i| {
                let src_pos = i as f64 / ratio;
                let idx = (src_pos as usize).min(samples.len() - 2);
                let frac = src_pos - idx as f64;
                (f64::from(samples[idx]).mul_add(1.0 - frac, f64::from(samples[idx + 1]) * frac))
                    as i16
            })
            .collect(),
    }
}
