//! Slanted-edge spatial frequency response measurement.
//!
//! ## Quickstart
//!
//! ```
//! use edge_mtf_core::GrayImage;
//! use edge_mtf_sfr::{MtfParams, MtfPipeline};
//!
//! // dark region above a shallow slanted boundary
//! let img = GrayImage::from_fn(96, 96, |x, y| if (y as f32) < 40.0 + 0.1 * x as f32 { 20 } else { 230 });
//! let pipeline = MtfPipeline::new(MtfParams::default());
//! match pipeline.run(&img) {
//!     Ok(m) => println!("mtf[0] = {}", m.mtf[0]),
//!     Err(err) => println!("measurement failed: {err}"),
//! }
//! ```
//!
//! Stages, in pipeline order:
//! 1. Classify the edge orientation from the four quadrant means.
//! 2. Rotate/mirror the image so the dark side sits top-left.
//! 3. Find the dynamic range bounds on the intensity histogram.
//! 4. Binarize at a percentage of that range.
//! 5. Despeckle with a shrinking block filter.
//! 6. Least-squares fit of the black-pixel count per column.
//! 7. Resample the gray columns into an oversampled edge spread function.
//! 8. Differentiate into the line spread function and crop around its peak.
//! 9. Apply a Hamming window.
//! 10. Evaluate the discrete frequency response.
//!
//! Every stage is a free function taking and returning plain values, so each
//! one can be exercised on its own.

mod binarize;
mod edge_fit;
mod error;
mod esf;
mod io;
mod lsf;
mod mtf;
mod noise;
mod orientation;
mod params;
mod pipeline;
mod range;
mod window;

pub use binarize::{binarize, cut_point, ensure_binarized};
pub use edge_fit::{draw_edge_line, fit_edge_line, EdgeLine};
pub use error::MtfError;
pub use esf::{oversampling_factor, resample_segments, sum_segments, summed_esf, EsfSegments};
pub use io::{MtfConfig, MtfIoError, MtfReport};
pub use lsf::{crop_lsf, dif_level, line_spread, locate_peak_window, PeakWindow};
pub use mtf::compute_mtf;
pub use noise::{clean_noise, run_noise_filter, speck_cutoff};
pub use orientation::{detect_orientation, normalize, NormalizeStep, Orientation, QuadrantMeans};
pub use params::{
    BinarizeParams, LsfParams, MtfCurveParams, MtfParams, NoiseFilterParams, RangeParams,
};
pub use pipeline::{MtfMeasurement, MtfPipeline};
pub use range::{find_dynamic_range, DynamicRange};
pub use window::{apply_window, hamming_window};
