//! Small statistical helpers
//!
//! Standard deviations are sample (Bessel-corrected) throughout; with
//! fewer than two observations the deviation is defined as zero.

/// Arithmetic mean; `None` for an empty slice
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample standard deviation (divides by n - 1); 0.0 when n <= 1
pub fn sample_sd(values: &[f64]) -> Option<f64> {
    let m = mean(values)?;
    if values.len() < 2 {
        return Some(0.0);
    }
    let sum_sq: f64 = values.iter().map(|v| (v - m) * (v - m)).sum();
    Some((sum_sq / (values.len() - 1) as f64).sqrt())
}

/// Coefficient of variation: sample SD / mean
///
/// Undefined (None) with fewer than two observations or a non-positive
/// mean.
pub fn coefficient_of_variation(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let m = mean(values)?;
    if m <= 0.0 {
        return None;
    }
    Some(sample_sd(values)? / m)
}

/// True when `actual` is within `tolerance` of `expected`, relative to
/// the magnitude of `expected` (absolute near zero)
pub fn within_tolerance(expected: f64, actual: f64, tolerance: f64) -> bool {
    let scale = expected.abs().max(1.0);
    (expected - actual).abs() <= tolerance * scale
}
