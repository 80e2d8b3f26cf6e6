//! High-level facade crate for the `edge-mtf-*` workspace.
//!
//! This crate provides:
//! - re-exports of the core image/numeric types and the measurement stages
//! - semicolon-delimited table export of the 1-D and 2-D intermediate arrays
//! - (feature `image`) file loading/saving through the `image` crate and an
//!   artifact writer reproducing the classic measurement outputs
//! - (feature `cli`) the `edge-mtf` command-line tool
//!
//! ## Quickstart
//!
//! ```no_run
//! use edge_mtf::measure;
//! use edge_mtf::sfr::MtfParams;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let m = measure::measure_file("edge.bmp", &MtfParams::default())?;
//! println!("oversampling {}, MTF[0] = {}", m.oversampling, m.mtf[0]);
//! # Ok(())
//! # }
//! ```
//!
//! ## API map
//! - `edge_mtf::core`: gray image, histogram, numeric primitives, logger.
//! - `edge_mtf::sfr`: orientation, binarization, noise filter, edge fit,
//!   ESF/LSF/MTF stages and the `MtfPipeline` driver.
//! - `edge_mtf::export`: CSV-like table writers.
//! - `edge_mtf::measure` (feature `image`): end-to-end helpers on image files.

pub use edge_mtf_core as core;
pub use edge_mtf_sfr as sfr;

pub use edge_mtf_core::GrayImage;
pub use edge_mtf_sfr::{MtfConfig, MtfError, MtfMeasurement, MtfParams, MtfPipeline, MtfReport};

pub mod export;

#[cfg(feature = "image")]
pub mod measure;
