//! Core types and utilities for slanted-edge MTF measurement.
//!
//! This crate is intentionally small. It owns the 8-bit gray image value
//! type with its whole-grid transforms (rotation, mirroring), the intensity
//! histogram, and the generic numeric primitives shared by the measurement
//! stages. It does *not* depend on any image codec.

mod error;
mod histogram;
mod image;
mod logger;
mod numeric;

pub use error::CoreError;
pub use histogram::{Histogram, HISTOGRAM_BINS};
pub use image::{GrayImage, GrayImageView};
pub use numeric::{
    differentiate, fill_with, moving_average, nearest_value, Numeric, SignedNumeric,
};

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::init_with_level;
