use serde::{Deserialize, Serialize};

pub const HISTOGRAM_BINS: usize = 256;

/// 256-bin intensity histogram of an 8-bit image.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Histogram {
    pub bins: Vec<u32>,
}

impl Histogram {
    pub fn from_samples(samples: &[u8]) -> Self {
        let mut bins = vec![0u32; HISTOGRAM_BINS];
        for &v in samples {
            bins[v as usize] += 1;
        }
        Self { bins }
    }

    /// Largest bin count.
    pub fn peak(&self) -> u32 {
        self.bins.iter().copied().max().unwrap_or(0)
    }

    /// Sum over all bins; equals the number of samples.
    pub fn total(&self) -> u64 {
        self.bins.iter().map(|&c| c as u64).sum()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bins.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }
}

impl std::ops::Index<usize> for Histogram {
    type Output = u32;

    fn index(&self, idx: usize) -> &u32 {
        &self.bins[idx]
    }
}
