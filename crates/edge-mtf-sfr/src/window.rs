use edge_mtf_core::fill_with;
use std::f64::consts::PI;

/// Hamming window centered on the middle of a `len` sample vector:
/// `w(x) = 0.54 + 0.46 * cos(2π (x - len/2) / len)`.
pub fn hamming_window(len: usize) -> Vec<f32> {
    let n = len as f64;
    fill_with(len, 1.0, |x| {
        (0.54 + 0.46 * (2.0 * PI * (x as f64 - n / 2.0) / n).cos()) as f32
    })
}

/// Element-wise product, truncated to the shorter input.
pub fn apply_window(values: &[f32], window: &[f32]) -> Vec<f32> {
    values.iter().zip(window).map(|(v, w)| v * w).collect()
}
