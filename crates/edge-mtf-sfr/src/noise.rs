//! Block despeckle filter for binarized edge images.
//!
//! Non-overlapping `inner x inner` blocks are visited column by column. The
//! mean over the block grown by `outer` on every side decides whether the
//! block is a black speck sitting on white background; such blocks are
//! painted white. Block writes are visible to the context means of blocks
//! visited later in the same pass.

use edge_mtf_core::{CoreError, GrayImage};
use log::debug;

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{MtfError, NoiseFilterParams};

/// Context-mean cutoff for a block filter.
///
/// `percent_sensitivity` is the share of the surrounding ring that has to be
/// white, e.g. 51 percent of 8 ring cells rounds up to 5 of 8.
pub fn speck_cutoff(inner: usize, outer: usize, percent_sensitivity: u32) -> f32 {
    let dimension = ((inner + 2 * outer) * (inner + 2 * outer)) as f64;
    let free_cells = dimension - (inner * inner) as f64;
    let required = (free_cells as f32 * (percent_sensitivity as f32 / 100.0)).ceil() as f64;
    (255.0 * (free_cells - required) / dimension) as f32
}

/// One despeckle pass with block size `inner` and context radius `outer`
/// (`None` uses `inner`).
#[cfg_attr(
    feature = "tracing",
    instrument(level = "debug", skip(img), fields(width = img.width, height = img.height))
)]
pub fn clean_noise(
    img: &GrayImage,
    inner: usize,
    outer: Option<usize>,
    percent_sensitivity: u32,
) -> Result<GrayImage, MtfError> {
    if inner == 0 {
        return Err(CoreError::InvalidParameter {
            what: "noise filter block size",
            value: inner,
        }
        .into());
    }
    let outer = outer.unwrap_or(inner);
    let cutoff = speck_cutoff(inner, outer, percent_sensitivity);

    let margin = (inner - 1 + outer + 1) as i64;
    let x_end = img.width as i64 - margin;
    let y_end = img.height as i64 - margin;
    let (n, o) = (inner as i64, outer as i64);

    let mut work = img.clone();
    let mut painted = 0usize;
    let mut x = n;
    while x < x_end {
        let mut y = n;
        while y < y_end {
            let mean = work.mean_rect(x - o, y - o, x + n - 1 + o, y + n - 1 + o);
            if mean > cutoff {
                for bx in x..x + n {
                    for by in y..y + n {
                        work.set(bx as usize, by as usize, 255);
                    }
                }
                painted += 1;
            }
            y += n;
        }
        x += n;
    }

    debug!("block {inner}/{outer}: cutoff {cutoff:.2}, {painted} blocks painted white");
    Ok(work)
}

/// Run the full pass schedule: block sizes `start_block`, `start_block / 2`,
/// ... down to 1.
pub fn run_noise_filter(
    img: &GrayImage,
    params: &NoiseFilterParams,
) -> Result<GrayImage, MtfError> {
    let mut out = img.clone();
    let mut block = params.start_block;
    while block > 0 {
        out = clean_noise(
            &out,
            block,
            params.outer_radius,
            params.sensitivity_for(block),
        )?;
        block /= 2;
    }
    Ok(out)
}
