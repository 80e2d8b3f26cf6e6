//! Edge orientation classification and geometric normalization.
//!
//! The image is split into four quadrants at `width / 2`, `height / 2`:
//!
//! ```text
//!  S1 | S2
//! ----+----
//!  S3 | S4
//! ```
//!
//! The pair of quadrants that is darker than the others tells which side of
//! the frame the dark region occupies; comparing half-sums picks the tilt.

use edge_mtf_core::{nearest_value, GrayImage, GrayImageView};
use log::debug;
use serde::{Deserialize, Serialize};

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::MtfError;

/// Where the dark side of the edge sits and which way the edge leans.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    LeftUp,
    LeftDown,
    RightUp,
    RightDown,
}

/// One step of a normalization recipe.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NormalizeStep {
    /// Clockwise rotation in degrees.
    Rotate(i32),
    FlipHorizontal,
    FlipVertical,
}

impl Orientation {
    /// Steps bringing this orientation to [`Orientation::TopLeft`].
    pub fn normalization(self) -> &'static [NormalizeStep] {
        use NormalizeStep::*;
        match self {
            Orientation::TopLeft => &[],
            Orientation::TopRight => &[FlipHorizontal],
            Orientation::BottomLeft => &[FlipVertical],
            Orientation::BottomRight => &[Rotate(180)],
            Orientation::LeftUp => &[Rotate(90), FlipHorizontal],
            Orientation::LeftDown => &[Rotate(90)],
            Orientation::RightUp => &[Rotate(270)],
            Orientation::RightDown => &[Rotate(90), FlipVertical],
        }
    }
}

/// Mean intensity of the four image quadrants.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct QuadrantMeans {
    pub top_left: f32,
    pub top_right: f32,
    pub bottom_left: f32,
    pub bottom_right: f32,
}

impl QuadrantMeans {
    /// Quadrant means over inclusive rectangles split at the image center.
    pub fn measure(img: &GrayImageView<'_>) -> Self {
        let w = img.width as i64;
        let h = img.height as i64;
        let (cx, cy) = (w / 2, h / 2);
        Self {
            top_left: img.mean_rect(0, 0, cx, cy),
            top_right: img.mean_rect(cx, 0, w - 1, cy),
            bottom_left: img.mean_rect(0, cy, cx, h - 1),
            bottom_right: img.mean_rect(cx, cy, w - 1, h - 1),
        }
    }

    pub fn as_array(&self) -> [f32; 4] {
        [
            self.top_left,
            self.top_right,
            self.bottom_left,
            self.bottom_right,
        ]
    }
}

/// Classify the edge orientation of a single slanted edge image.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "debug", skip(img), fields(width = img.width, height = img.height))
)]
pub fn detect_orientation(img: &GrayImageView<'_>) -> Result<Orientation, MtfError> {
    let means = QuadrantMeans::measure(img);
    let [s1, s2, s3, s4] = means.as_array();

    let min = s1.min(s2).min(s3.min(s4));
    let max = s1.max(s2).max(s3.max(s4));
    let closer_to_min = |s: f32| -> Result<bool, MtfError> {
        Ok(nearest_value(s, false, &[min, max])? <= min)
    };
    let (c1, c2, c3, c4) = (
        closer_to_min(s1)?,
        closer_to_min(s2)?,
        closer_to_min(s3)?,
        closer_to_min(s4)?,
    );
    debug!("quadrant means {means:?}, closer to min: {c1} {c2} {c3} {c4}");

    let orientation = if c1 && c3 {
        if s1 + s2 > s3 + s4 {
            Orientation::LeftDown
        } else {
            Orientation::LeftUp
        }
    } else if c2 && c4 {
        if s1 + s2 > s3 + s4 {
            Orientation::RightDown
        } else {
            Orientation::RightUp
        }
    } else if c1 && c2 {
        if s1 + s3 > s2 + s4 {
            Orientation::TopRight
        } else {
            Orientation::TopLeft
        }
    } else if c3 && c4 {
        if s1 + s3 > s2 + s4 {
            Orientation::BottomRight
        } else {
            Orientation::BottomLeft
        }
    } else {
        return Err(MtfError::AmbiguousOrientation {
            means: means.as_array(),
        });
    };

    Ok(orientation)
}

/// Apply the normalization recipe of `orientation`, returning a new image.
pub fn normalize(img: &GrayImage, orientation: Orientation) -> Result<GrayImage, MtfError> {
    let mut out = img.clone();
    for step in orientation.normalization() {
        out = match *step {
            NormalizeStep::Rotate(deg) => out.rotate_cw(deg)?,
            NormalizeStep::FlipHorizontal => out.flip_horizontal(),
            NormalizeStep::FlipVertical => out.flip_vertical(),
        };
    }
    Ok(out)
}
