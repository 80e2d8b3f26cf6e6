use edge_mtf_core::GrayImage;
use serde::{Deserialize, Serialize};

use crate::MtfError;

/// Fitted edge position `y = slope * x + intercept` in column-index space.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EdgeLine {
    pub slope: f64,
    pub intercept: f64,
}

impl EdgeLine {
    pub fn at(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Least-squares line through `(i, columns[i])`.
///
/// The last column is left out of the fit, so `N = columns.len() - 1`
/// samples are used. Fewer than two samples make the normal equations
/// singular.
pub fn fit_edge_line(columns: &[u32]) -> Result<EdgeLine, MtfError> {
    let samples = columns.len().saturating_sub(1);
    if samples < 2 {
        return Err(MtfError::DegenerateFit { samples });
    }

    let (mut sum_x, mut sum_y, mut sum_xy, mut sum_xx) = (0.0f64, 0.0f64, 0.0f64, 0.0f64);
    for (i, &y) in columns[..samples].iter().enumerate() {
        let (x, y) = (i as f64, y as f64);
        sum_x += x;
        sum_y += y;
        sum_xy += x * y;
        sum_xx += x * x;
    }

    let n = samples as f64;
    let denom = n * sum_xx - sum_x * sum_x;
    if denom == 0.0 {
        return Err(MtfError::DegenerateFit { samples });
    }

    Ok(EdgeLine {
        slope: (n * sum_xy - sum_x * sum_y) / denom,
        intercept: (sum_y * sum_xx - sum_x * sum_xy) / denom,
    })
}

/// Paint the mirrored fit `y = -slope * x + intercept` into a copy of `img`.
///
/// Points falling outside the frame are skipped.
pub fn draw_edge_line(img: &GrayImage, line: &EdgeLine, brightness: u8) -> GrayImage {
    let mut out = img.clone();
    for x in 0..img.width {
        let y = (-line.slope * x as f64 + line.intercept) as i64;
        if (0..img.height as i64).contains(&y) {
            out.set(x, y as usize, brightness);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn recovers_exact_linear_series() {
        let columns: Vec<u32> = (0..50).map(|i| (3 * i + 7) as u32).collect();
        let line = fit_edge_line(&columns).unwrap();
        assert_relative_eq!(line.slope, 3.0, epsilon = 1e-9);
        assert_relative_eq!(line.intercept, 7.0, epsilon = 1e-9);
    }

    #[test]
    fn last_column_is_ignored() {
        let mut columns: Vec<u32> = (0..20).map(|i| 100 - 2 * i as u32).collect();
        *columns.last_mut().unwrap() = 10_000;
        let line = fit_edge_line(&columns).unwrap();
        assert_relative_eq!(line.slope, -2.0, epsilon = 1e-9);
        assert_relative_eq!(line.intercept, 100.0, epsilon = 1e-9);
        assert_relative_eq!(line.at(10.0), 80.0, epsilon = 1e-9);
    }

    #[test]
    fn constant_counts_give_flat_line() {
        let line = fit_edge_line(&[32; 64]).unwrap();
        assert_relative_eq!(line.slope, 0.0);
        assert_relative_eq!(line.intercept, 32.0, epsilon = 1e-9);
    }

    #[test]
    fn too_few_columns_are_degenerate() {
        assert!(matches!(
            fit_edge_line(&[4, 5]),
            Err(MtfError::DegenerateFit { samples: 1 })
        ));
        assert!(fit_edge_line(&[]).is_err());
    }

    #[test]
    fn overlay_skips_out_of_frame_points() {
        let img = GrayImage::new(8, 4);
        let line = EdgeLine {
            slope: -1.0,
            intercept: 0.0,
        };
        // y = x, visible for x < 4
        let out = draw_edge_line(&img, &line, 255);
        for x in 0..4 {
            assert_eq!(out.get(x, x), 255);
        }
        assert_eq!(out.data.iter().filter(|&&v| v == 255).count(), 4);
    }
}
