//! Metric normalization for display.

/// Convert a 0..=1 ratio into a whole percentage.
///
/// Absent and NaN map to 0. Values outside 0..=1 are not clamped, so they
/// produce percentages outside 0..=100; infinities saturate.
pub fn normalize_percent(value: Option<f64>) -> i64 {
    match value {
        Some(x) if !x.is_nan() => (x * 100.0).round() as i64,
        _ => 0,
    }
}

/// Number of filled cells for a meter `width` cells wide; clamped to the meter
pub fn meter_fill(percent: i64, width: usize) -> usize {
    let clamped = percent.clamp(0, 100) as usize;
    (clamped * width + 50) / 100
}
