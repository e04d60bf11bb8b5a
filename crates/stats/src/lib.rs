//! Statistical helper functions for floodstat.
//!
//! Slices passed here are expected to be free of NaN; callers filter missing
//! values first.

/// Arithmetic mean of a slice. Returns 0.0 if empty.
pub fn mean(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    let sum: f64 = data.iter().sum();
    sum / data.len() as f64
}

/// Sample variance with N-1 denominator (matching R's `var()`).
/// Returns 0.0 if fewer than 2 elements.
pub fn variance(data: &[f64]) -> f64 {
    let n = data.len();
    if n < 2 {
        return 0.0;
    }
    let nf = n as f64;
    let mean = data.iter().sum::<f64>() / nf;
    data.iter().map(|&x| (x - mean) * (x - mean)).sum::<f64>() / (nf - 1.0)
}

/// Sample standard deviation with N-1 denominator (matching R's `sd()`).
/// Returns 0.0 if fewer than 2 elements.
pub fn sd(data: &[f64]) -> f64 {
    variance(data).sqrt()
}

/// Population standard deviation (N denominator). Returns 0.0 if empty.
pub fn population_sd(data: &[f64]) -> f64 {
    central_moment(data, 2).sqrt()
}

/// Population skewness `m3 / m2^1.5`, without bias correction.
///
/// Returns `None` if fewer than 3 elements or if the data are constant.
pub fn skewness(data: &[f64]) -> Option<f64> {
    if data.len() < 3 {
        return None;
    }
    let m2 = central_moment(data, 2);
    if m2 <= 0.0 {
        return None;
    }
    let m3 = central_moment(data, 3);
    Some(m3 / m2.powf(1.5))
}

/// k-th central moment with N denominator.
fn central_moment(data: &[f64], k: i32) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    let m = mean(data);
    data.iter().map(|&x| (x - m).powi(k)).sum::<f64>() / data.len() as f64
}

/// The first two sample L-moments and the L-skewness ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LMoments {
    /// λ1, the L-location (equal to the mean).
    pub l1: f64,
    /// λ2, the L-scale.
    pub l2: f64,
    /// τ3 = λ3 / λ2, the L-skewness.
    pub t3: f64,
}

/// Unbiased sample L-moments from probability-weighted moments
/// (Hosking 1990).
///
/// **Expects pre-sorted (ascending) input.** Returns `None` if fewer than 3
/// values or if λ2 is not positive (constant sample).
pub fn sample_lmoments(sorted: &[f64]) -> Option<LMoments> {
    let n = sorted.len();
    if n < 3 {
        return None;
    }
    let nf = n as f64;
    let mut b0 = 0.0;
    let mut b1 = 0.0;
    let mut b2 = 0.0;
    for (i, &x) in sorted.iter().enumerate() {
        let j = i as f64;
        b0 += x;
        b1 += x * j / (nf - 1.0);
        b2 += x * j * (j - 1.0) / ((nf - 1.0) * (nf - 2.0));
    }
    b0 /= nf;
    b1 /= nf;
    b2 /= nf;

    let l1 = b0;
    let l2 = 2.0 * b1 - b0;
    let l3 = 6.0 * b2 - 6.0 * b1 + b0;
    if l2 <= 0.0 {
        return None;
    }
    Some(LMoments {
        l1,
        l2,
        t3: l3 / l2,
    })
}

/// Round to `decimals` places, halves to even. Non-finite values pass
/// through unchanged.
pub fn round_to(x: f64, decimals: u32) -> f64 {
    if !x.is_finite() {
        return x;
    }
    let factor = 10f64.powi(decimals as i32);
    (x * factor).round_ties_even() / factor
}
