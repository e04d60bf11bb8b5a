//! Centered moving average over positional neighbours.

/// Centered moving average of odd width `window`.
///
/// Position `i` averages `values[i - h ..= i + h]` with `h = window / 2`,
/// skipping `NaN`. The result is `NaN` when fewer than `min_periods` values
/// in the window are present, and always `NaN` within `h` positions of
/// either end. Neighbours are positional, so callers pass a gap-free daily
/// axis.
pub(crate) fn centered_moving_average(values: &[f64], window: usize, min_periods: usize) -> Vec<f64> {
    debug_assert!(window % 2 == 1, "window must be odd");
    let n = values.len();
    let half = window / 2;
    let mut out = vec![f64::NAN; n];
    if n < window {
        return out;
    }

    for (i, slot) in out.iter_mut().enumerate().take(n - half).skip(half) {
        let mut sum = 0.0;
        let mut count = 0usize;
        for &v in &values[i - half..=i + half] {
            if !v.is_nan() {
                sum += v;
                count += 1;
            }
        }
        if count >= min_periods && count > 0 {
            *slot = sum / count as f64;
        }
    }
    out
}
