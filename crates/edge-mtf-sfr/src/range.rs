//! Dynamic range bounds from the intensity histogram.

use edge_mtf_core::{nearest_value, Histogram};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::MtfError;

/// Low/high histogram bins bounding the useful intensity range.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DynamicRange {
    pub low: usize,
    pub high: usize,
    /// Bin count used as the crossing level.
    pub level: u32,
}

/// Locate the rising crossing from the dark end and the falling crossing
/// from the bright end of `level = floor(peak / 100) * percent`.
///
/// Both scans advance together, one bin per step, and each stops at its
/// first crossing. Whether the crossing bin or its outer neighbor becomes the
/// bound depends on which of the two bracketing counts is nearer the level.
pub fn find_dynamic_range(hist: &Histogram, percent: u32) -> Result<DynamicRange, MtfError> {
    let h = &hist.bins;
    let n = h.len();
    let level = (hist.peak() / 100) * percent;
    if n < 3 {
        return Err(MtfError::RangeNotFound { level });
    }

    let mut low = None;
    let mut high = None;
    let mut start = 1usize;
    let mut end = n - 2;

    loop {
        if low.is_none() {
            if h[start - 1] <= level && h[start] >= level {
                let closer = nearest_value(level, false, &[h[start], h[start - 1]])?;
                low = Some(if closer >= level { start } else { start - 1 });
            } else if start + 1 >= n {
                return Err(MtfError::RangeNotFound { level });
            } else {
                start += 1;
            }
        }

        if high.is_none() {
            if h[end + 1] <= level && h[end] >= level {
                let closer = nearest_value(level, false, &[h[end], h[end + 1]])?;
                high = Some(if closer >= level { end } else { end + 1 });
            } else if end == 0 {
                return Err(MtfError::RangeNotFound { level });
            } else {
                end -= 1;
            }
        }

        if let (Some(low), Some(high)) = (low, high) {
            debug!("dynamic range [{low}, {high}] at level {level}");
            return Ok(DynamicRange { low, high, level });
        }
    }
}
