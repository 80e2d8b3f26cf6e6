use serde::{Deserialize, Serialize};

/// Dynamic range search on the intensity histogram.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RangeParams {
    /// Crossing level as a percentage of the peak bin count.
    pub percent: u32,
}

impl Default for RangeParams {
    fn default() -> Self {
        Self { percent: 3 }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BinarizeParams {
    /// Cut point as a percentage of the dynamic range width.
    pub percent_sensitivity: u32,
}

impl Default for BinarizeParams {
    fn default() -> Self {
        Self {
            percent_sensitivity: 60,
        }
    }
}

/// Block despeckle schedule.
///
/// Passes start with `start_block` sized blocks and halve the block size
/// until it reaches zero.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoiseFilterParams {
    pub start_block: usize,
    /// Context radius around each block; `None` uses the block size.
    pub outer_radius: Option<usize>,
    /// Blocks up to this size use `small_block_sensitivity`.
    pub small_block_max: usize,
    pub small_block_sensitivity: u32,
    pub large_block_sensitivity: u32,
}

impl Default for NoiseFilterParams {
    fn default() -> Self {
        Self {
            start_block: 2,
            outer_radius: None,
            small_block_max: 3,
            small_block_sensitivity: 75,
            large_block_sensitivity: 65,
        }
    }
}

impl NoiseFilterParams {
    /// Sensitivity used for a pass with the given block size.
    pub fn sensitivity_for(&self, block: usize) -> u32 {
        if block <= self.small_block_max {
            self.small_block_sensitivity
        } else {
            self.large_block_sensitivity
        }
    }
}

/// Line spread function differentiation and crop.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LsfParams {
    /// Half-width of the centered difference; `None` uses half the
    /// oversampling factor.
    pub dif_level: Option<usize>,
    /// Crossing level as a fraction of the peak amplitude.
    pub threshold_frac: f32,
    /// `n1` when the backward scan finds no crossing.
    pub backward_default: i64,
    /// `n2` when the forward scan finds no crossing.
    pub forward_default: i64,
    /// Half crop width in units of `n2 - n1`.
    pub crop_mul: i64,
}

impl Default for LsfParams {
    fn default() -> Self {
        Self {
            dif_level: None,
            threshold_frac: 0.30,
            backward_default: -1,
            forward_default: 11600,
            crop_mul: 4,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MtfCurveParams {
    /// Number of frequency indices, evaluated at `k = 1..=samples`.
    pub samples: usize,
    /// Upper clamp of the `1 / sin` amplitude correction.
    pub max_gain: f32,
}

impl Default for MtfCurveParams {
    fn default() -> Self {
        Self {
            samples: 100,
            max_gain: 10.0,
        }
    }
}

/// Configuration of the whole measurement.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MtfParams {
    pub range: RangeParams,
    pub binarize: BinarizeParams,
    pub noise: NoiseFilterParams,
    pub lsf: LsfParams,
    pub mtf: MtfCurveParams,
}
