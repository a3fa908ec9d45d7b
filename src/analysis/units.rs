//! dB / linear power conversions
//!
//! All ratio and RMS arithmetic on amplitudes happens in milliwatts and is
//! converted back to dBm afterwards. Scaling a dBm value by a linear constant
//! is never meaningful.

/// Convert a level in dBm to power in milliwatts
pub fn dbm_to_milliwatts(dbm: f64) -> f64 {
    10f64.powf(dbm / 10.0)
}

/// Convert power in milliwatts to dBm
pub fn milliwatts_to_dbm(milliwatts: f64) -> f64 {
    10.0 * milliwatts.log10()
}

/// Mean power of a set of dBm levels, returned in dBm
///
/// Returns `None` for an empty slice.
pub fn power_mean_dbm(levels_dbm: &[f64]) -> Option<f64> {
    let peak = levels_dbm.iter().copied().reduce(f64::max)?;
    Some(peak - peak_to_mean_power_db(levels_dbm)?)
}

/// How far the mean power of `levels_dbm` sits below the strongest level, in dB
///
/// Powers are taken relative to the strongest level, so every term lies in
/// `(0, 1]` and any finite dBm input gives a finite result. The result is
/// `0.0` only when every level equals the maximum.
pub fn peak_to_mean_power_db(levels_dbm: &[f64]) -> Option<f64> {
    let peak = levels_dbm.iter().copied().reduce(f64::max)?;
    // 10^(x/10) - 1 summed via exp_m1 keeps small deficits from rounding to zero
    let scale = std::f64::consts::LN_10 / 10.0;
    let deficit = levels_dbm
        .iter()
        .map(|&a| ((a - peak) * scale).exp_m1())
        .sum::<f64>()
        / levels_dbm.len() as f64;
    Some(-deficit.ln_1p() / scale)
}

/// Arithmetic mean, `None` for an empty slice
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}
