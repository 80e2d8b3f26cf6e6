//! Discrete frequency response of the windowed LSF.

use std::f64::consts::PI;

use log::debug;

use crate::MtfCurveParams;

/// Evaluate the MTF at `k = 1..=samples`.
///
/// With `len = lsf_w.len()` and `step = k / xp`:
///
/// ```text
/// d      = min(1 / sin(π step / len), max_gain)
/// mtf[k] = d * Σ_{y=1}^{len-1} lsf_w[y] exp(-2π step y / len) / Σ_{y=1}^{len-1} lsf_w[y]
/// ```
///
/// Sample 0 of the window is left out of both sums.
pub fn compute_mtf(lsf_w: &[f32], oversampling: usize, params: &MtfCurveParams) -> Vec<f32> {
    let len = lsf_w.len() as f64;
    let xp = oversampling as f64;
    let tail = lsf_w.get(1..).unwrap_or(&[]);
    let sum2: f64 = tail.iter().map(|&v| v as f64).sum();

    let mtf: Vec<f32> = (1..=params.samples)
        .map(|k| {
            let step = k as f64 / xp;
            let d = (1.0 / (PI * step / len).sin()).min(params.max_gain as f64);
            let sum1: f64 = tail
                .iter()
                .enumerate()
                .map(|(i, &v)| {
                    let y = (i + 1) as f64;
                    v as f64 * (-2.0 * PI * step * y / len).exp()
                })
                .sum();
            (d * sum1 / sum2) as f32
        })
        .collect();

    debug!(
        "MTF over {} samples, first {:?}",
        mtf.len(),
        mtf.first().copied()
    );
    mtf
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn single_sample_response() {
        // only y = 1 contributes: mtf = d * exp(-2π step / len)
        let lsf_w = [7.0f32, 3.0, 0.0, 0.0];
        let params = MtfCurveParams {
            samples: 3,
            max_gain: 10.0,
        };
        let mtf = compute_mtf(&lsf_w, 2, &params);
        assert_eq!(mtf.len(), 3);
        for (k, &m) in mtf.iter().enumerate() {
            let step = (k + 1) as f64 / 2.0;
            let d = (1.0 / (PI * step / 4.0).sin()).min(10.0);
            let expected = d * (-2.0 * PI * step / 4.0).exp();
            assert_relative_eq!(m as f64, expected, epsilon = 1e-6);
        }
    }

    #[test]
    fn gain_is_clamped_at_low_frequency() {
        let lsf_w: Vec<f32> = (0..200).map(|i| if i == 100 { 1.0 } else { 0.0 }).collect();
        let mtf = compute_mtf(&lsf_w, 10, &MtfCurveParams::default());
        assert_eq!(mtf.len(), 100);
        // 1 / sin(π * 0.1 / 200) is far above the clamp
        let expected = 10.0 * (-2.0 * PI * 0.1 * 100.0 / 200.0).exp();
        assert_relative_eq!(mtf[0] as f64, expected, epsilon = 1e-5);
        assert!(mtf.iter().all(|v| v.is_finite()));
    }
}
