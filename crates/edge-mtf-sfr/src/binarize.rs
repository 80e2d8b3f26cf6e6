use edge_mtf_core::GrayImage;
use log::debug;

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{DynamicRange, MtfError};

/// Threshold at `percent_sensitivity` percent of the range width.
///
/// The width is measured from zero, not from `range.low`. Halves round to the
/// nearest even value.
pub fn cut_point(range: &DynamicRange, percent_sensitivity: u32) -> u8 {
    let one_percent = (range.high as f32 - range.low as f32) / 100.0;
    (one_percent * percent_sensitivity as f32)
        .round_ties_even()
        .clamp(0.0, 255.0) as u8
}

/// Map every pixel to 0 or 255 around the cut point.
///
/// An image that is already binary is returned unchanged.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "debug", skip(img), fields(width = img.width, height = img.height))
)]
pub fn binarize(img: &GrayImage, range: &DynamicRange, percent_sensitivity: u32) -> GrayImage {
    if img.is_binarized() {
        return img.clone();
    }
    let cut = cut_point(range, percent_sensitivity);
    debug!("binarizing at {cut} (range {}..{})", range.low, range.high);
    GrayImage {
        width: img.width,
        height: img.height,
        data: img
            .data
            .iter()
            .map(|&v| if v >= cut { 255 } else { 0 })
            .collect(),
    }
}

/// Fail with [`MtfError::NotBinarized`] unless every pixel is 0 or 255.
pub fn ensure_binarized(img: &GrayImage) -> Result<(), MtfError> {
    let residual = img.data.iter().filter(|&&v| v % 255 != 0).count();
    if residual == 0 {
        Ok(())
    } else {
        Err(MtfError::NotBinarized {
            residual,
            image: Box::new(img.clone()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(low: usize, high: usize) -> DynamicRange {
        DynamicRange {
            low,
            high,
            level: 0,
        }
    }

    #[test]
    fn cut_point_is_fraction_of_width() {
        assert_eq!(cut_point(&range(20, 220), 60), 120);
        assert_eq!(cut_point(&range(0, 200), 50), 100);
        assert_eq!(cut_point(&range(0, 50), 5), 2); // 2.5 -> 2
        assert_eq!(cut_point(&range(0, 150), 5), 8); // 7.5 -> 8
        assert_eq!(cut_point(&range(200, 10), 60), 0);
    }

    #[test]
    fn output_is_binary() {
        let img = GrayImage::from_fn(16, 9, |x, y| (x * 16 + y * 3) as u8);
        let out = binarize(&img, &range(0, 255), 60);
        assert!(out.data.iter().all(|&v| v == 0 || v == 255));
        assert!(ensure_binarized(&out).is_ok());
        // 60% of 255 = 153: pixels at the cut go white
        let cut_img = GrayImage::from_raw(3, 1, vec![152, 153, 154]).unwrap();
        assert_eq!(binarize(&cut_img, &range(0, 255), 60).data, vec![0, 255, 255]);
    }

    #[test]
    fn binary_input_is_untouched() {
        let img = GrayImage::from_raw(2, 2, vec![0, 255, 255, 0]).unwrap();
        assert_eq!(binarize(&img, &range(100, 110), 1), img);
    }

    #[test]
    fn residual_gray_is_reported() {
        let img = GrayImage::from_raw(3, 1, vec![0, 17, 255]).unwrap();
        match ensure_binarized(&img) {
            Err(MtfError::NotBinarized { residual, image }) => {
                assert_eq!(residual, 1);
                assert_eq!(*image, img);
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
