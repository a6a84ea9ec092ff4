//! PCM sample conversion and signal level estimation

/// Lowest level reported for an empty or all-zero window
pub const SILENCE_FLOOR_DB: f32 = -100.0;

/// Convert float samples in [-1, 1] to signed 16-bit PCM.
///
/// Out-of-range input is clamped first. Negative values scale by 32768
/// and non-negative values by 32767 so neither end of the i16 range
/// overflows.
pub fn f32_to_i16(samples: &[f32]) -> Vec<i16> {
    samples
        .iter()
        .map(|&sample| {
            let s = sample.clamp(-1.0, 1.0);
            if s < 0.0 {
                (s * 32768.0) as i16
            } else {
                (s * 32767.0) as i16
            }
        })
        .collect()
}

/// Estimate the level of a float sample window in dBFS from its RMS.
pub fn energy_db(samples: &[f32]) -> f32 {
    if samples.is_empty() {
        return SILENCE_FLOOR_DB;
    }
    let sq_sum: f32 = samples.iter().map(|&x| x * x).sum();
    let rms = (sq_sum / samples.len() as f32).sqrt();
    if rms <= 0.0 {
        SILENCE_FLOOR_DB
    } else {
        (20.0 * rms.log10()).max(SILENCE_FLOOR_DB)
    }
}

/// Estimate the level of a 16-bit PCM window in dBFS from its RMS.
pub fn energy_db_i16(samples: &[i16]) -> f32 {
    if samples.is_empty() {
        return SILENCE_FLOOR_DB;
    }
    let sq_sum: f64 = samples
        .iter()
        .map(|&s| {
            let x = s as f64 / 32768.0;
            x * x
        })
        .sum();
    let rms = (sq_sum / samples.len() as f64).sqrt() as f32;
    if rms <= 0.0 {
        SILENCE_FLOOR_DB
    } else {
        (20.0 * rms.log10()).max(SILENCE_FLOOR_DB)
    }
}
