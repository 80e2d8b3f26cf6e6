//! Oversampled edge spread function.
//!
//! With an edge that shifts by `1 / xp` of a pixel per row, every group of
//! `xp` neighbouring columns interleaves into one profile sampled `xp` times
//! finer than the pixel grid.

use edge_mtf_core::{moving_average, GrayImage};
use log::debug;

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{EdgeLine, MtfError};

/// `round(1 / |slope|)`; must be a finite integer of at least 1.
pub fn oversampling_factor(line: &EdgeLine) -> Result<usize, MtfError> {
    let xp = (1.0 / line.slope.abs()).round();
    if !xp.is_finite() || xp < 1.0 || xp > u32::MAX as f64 {
        return Err(MtfError::InvalidOversampling { slope: line.slope });
    }
    Ok(xp as usize)
}

/// Interleaved edge profiles, `segments[e][offset]`.
#[derive(Clone, Debug, PartialEq)]
pub struct EsfSegments {
    pub oversampling: usize,
    /// `width / oversampling` profiles of `height * oversampling` samples.
    pub segments: Vec<Vec<u8>>,
}

impl EsfSegments {
    pub fn count(&self) -> usize {
        self.segments.len()
    }

    pub fn segment_len(&self) -> usize {
        self.segments.first().map_or(0, Vec::len)
    }
}

/// Remap columns `[0, M * xp)` into `M = width / xp` oversampled profiles.
///
/// Pixel `(x, y)` lands in profile `e = x / xp` at offset
/// `(x - e * xp) + y * xp`.
pub fn resample_segments(img: &GrayImage, oversampling: usize) -> Result<EsfSegments, MtfError> {
    let xp = oversampling;
    let count = if xp == 0 { 0 } else { img.width / xp };
    let len = img.height * xp;
    if count == 0 {
        return Err(MtfError::EmptyEsf {
            width: img.width,
            height: img.height,
            oversampling: xp,
        });
    }

    let mut segments = vec![vec![0u8; len]; count];
    for y in 0..img.height {
        for x in 0..count * xp {
            let e = x / xp;
            segments[e][(x - e * xp) + y * xp] = img.get(x, y);
        }
    }

    Ok(EsfSegments {
        oversampling: xp,
        segments,
    })
}

/// Phase-aligned sum of all profiles.
///
/// `sum[i] = Σ_j segments[j][i - j * xp]` for `i` in `[M * xp, L)`; the
/// leading `M * xp` entries stay zero.
pub fn sum_segments(esf: &EsfSegments) -> Vec<f32> {
    let xp = esf.oversampling;
    let count = esf.count();
    let len = esf.segment_len();
    let mut sum = vec![0.0f32; len];
    for (i, slot) in sum.iter_mut().enumerate().skip(count * xp) {
        *slot = esf
            .segments
            .iter()
            .enumerate()
            .map(|(j, seg)| seg[i - j * xp] as f32)
            .sum();
    }
    sum
}

/// Summed ESF of `img`, smoothed with a moving average over `xp` samples.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "debug", skip(img), fields(width = img.width, height = img.height))
)]
pub fn summed_esf(img: &GrayImage, oversampling: usize) -> Result<Vec<f32>, MtfError> {
    let segments = resample_segments(img, oversampling)?;
    if segments.count() * oversampling >= segments.segment_len() {
        return Err(MtfError::EmptyEsf {
            width: img.width,
            height: img.height,
            oversampling,
        });
    }
    let mut sum = sum_segments(&segments);
    let smoothed = moving_average(&mut sum, oversampling)?;
    debug!(
        "{} profiles of {} samples, smoothed ESF length {}",
        segments.count(),
        segments.segment_len(),
        smoothed.len()
    );
    Ok(smoothed)
}
