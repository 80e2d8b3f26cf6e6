//! Line spread function: derivative of the ESF, cropped around its peak.

use edge_mtf_core::differentiate;
use log::debug;
use serde::{Deserialize, Serialize};

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{LsfParams, MtfError};

/// Differentiation half-width for oversampling factor `xp`.
pub fn dif_level(oversampling: usize, params: &LsfParams) -> usize {
    params.dif_level.unwrap_or(oversampling / 2).max(1)
}

/// Centered difference of the summed ESF, `esf.len() - 2 * dif_level` long.
pub fn line_spread(esf: &[f32], dif_level: usize) -> Result<Vec<f32>, MtfError> {
    let lsf = differentiate(esf, dif_level)?;
    if lsf.is_empty() {
        return Err(MtfError::EmptyLsf);
    }
    Ok(lsf)
}

/// Peak of the LSF and the crop window derived from its threshold crossings.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PeakWindow {
    pub peak_index: usize,
    /// Largest absolute LSF value.
    pub peak_amplitude: f32,
    pub threshold: f32,
    /// Crossing found scanning back from the peak.
    pub n1: i64,
    /// Crossing found scanning forward from the peak.
    pub n2: i64,
    pub left: i64,
    pub right: i64,
}

impl PeakWindow {
    pub fn width(&self) -> i64 {
        self.right - self.left
    }
}

/// Locate the peak and the `[left, right)` crop window.
///
/// Both scans start at the peak and look for the first `i` where
/// `|lsf[i]| >= threshold >= |lsf[i - 1]|`. The backward scan runs while
/// `i > len / 4`, the forward scan while `i < len / 2 + len / 4`. A scan
/// without a crossing leaves its configured default in place.
#[cfg_attr(feature = "tracing", instrument(level = "debug", skip(lsf, params), fields(len = lsf.len())))]
pub fn locate_peak_window(lsf: &[f32], params: &LsfParams) -> Result<PeakWindow, MtfError> {
    if lsf.is_empty() {
        return Err(MtfError::EmptyLsf);
    }
    let len = lsf.len();

    let mut peak_index = 0;
    let mut peak_amplitude = f32::MIN;
    for (i, v) in lsf.iter().enumerate() {
        if v.abs() > peak_amplitude {
            peak_amplitude = v.abs();
            peak_index = i;
        }
    }
    let threshold = peak_amplitude * params.threshold_frac;
    let crosses = |i: usize| lsf[i].abs() >= threshold && threshold >= lsf[i - 1].abs();

    let mut n1 = params.backward_default;
    let mut i = peak_index;
    while i > len / 4 {
        if crosses(i) {
            n1 = i as i64;
            break;
        }
        i -= 1;
    }

    let mut n2 = params.forward_default;
    for i in peak_index.max(1)..len / 2 + len / 4 {
        if crosses(i) {
            n2 = i as i64;
            break;
        }
    }

    let half = params.crop_mul * (n2 - n1);
    let window = PeakWindow {
        peak_index,
        peak_amplitude,
        threshold,
        n1,
        n2,
        left: peak_index as i64 - half,
        right: peak_index as i64 + half,
    };
    debug!(
        "LSF peak {peak_amplitude:.3} at {peak_index}, crossings n1={n1} n2={n2}, window [{}, {})",
        window.left, window.right
    );
    Ok(window)
}

/// Copy `lsf[left..right]`.
pub fn crop_lsf(lsf: &[f32], window: &PeakWindow) -> Result<Vec<f32>, MtfError> {
    let out_of_range = || MtfError::LsfWindowOutOfRange {
        left: window.left,
        right: window.right,
        len: lsf.len(),
    };
    let left = usize::try_from(window.left).map_err(|_| out_of_range())?;
    let right = usize::try_from(window.right).map_err(|_| out_of_range())?;
    if left >= right || right > lsf.len() {
        return Err(out_of_range());
    }
    Ok(lsf[left..right].to_vec())
}
