//! 8-bit gray image value type.
//!
//! Every geometric transform builds a fresh grid and returns it; nothing is
//! rotated or mirrored in place.

use crate::{CoreError, Histogram};

/// Borrowed row-major gray buffer.
#[derive(Clone, Copy, Debug)]
pub struct GrayImageView<'a> {
    pub width: usize,
    pub height: usize,
    pub data: &'a [u8], // row-major, len = w*h
}

/// Owned row-major gray image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GrayImage {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u8>,
}

impl<'a> GrayImageView<'a> {
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.data[y * self.width + x]
    }

    /// Mean intensity over the inclusive rectangle `(x1, y1)..=(x2, y2)`.
    ///
    /// The rectangle is clipped to the image; an empty intersection yields 0.
    pub fn mean_rect(&self, x1: i64, y1: i64, x2: i64, y2: i64) -> f32 {
        if self.width == 0 || self.height == 0 {
            return 0.0;
        }
        let x1 = x1.max(0) as usize;
        let y1 = y1.max(0) as usize;
        let x2 = x2.min(self.width as i64 - 1);
        let y2 = y2.min(self.height as i64 - 1);
        if x2 < x1 as i64 || y2 < y1 as i64 {
            return 0.0;
        }
        let (x2, y2) = (x2 as usize, y2 as usize);

        let mut sum = 0u64;
        for y in y1..=y2 {
            let row = &self.data[y * self.width..(y + 1) * self.width];
            sum += row[x1..=x2].iter().map(|&v| v as u64).sum::<u64>();
        }
        let count = ((x2 - x1 + 1) * (y2 - y1 + 1)) as f64;
        (sum as f64 / count) as f32
    }

    pub fn histogram(&self) -> Histogram {
        Histogram::from_samples(self.data)
    }

    /// `true` when every sample is either 0 or 255.
    pub fn is_binarized(&self) -> bool {
        self.data.iter().all(|&v| v % 255 == 0)
    }

    /// Number of pure-black samples in every column.
    pub fn black_count_per_column(&self) -> Vec<u32> {
        let mut counts = vec![0u32; self.width];
        for row in self.data.chunks_exact(self.width.max(1)) {
            for (count, &v) in counts.iter_mut().zip(row) {
                if v == 0 {
                    *count += 1;
                }
            }
        }
        counts
    }

    pub fn to_owned_image(&self) -> GrayImage {
        GrayImage {
            width: self.width,
            height: self.height,
            data: self.data.to_vec(),
        }
    }
}

impl GrayImage {
    /// Black image of the given size.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![0; width * height],
        }
    }

    /// Wrap a row-major buffer, checking its length.
    pub fn from_raw(width: usize, height: usize, data: Vec<u8>) -> Result<Self, CoreError> {
        let expected = width
            .checked_mul(height)
            .ok_or(CoreError::InvalidGrid {
                expected: usize::MAX,
                got: data.len(),
            })?;
        if data.len() != expected {
            return Err(CoreError::InvalidGrid {
                expected,
                got: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Build an image from a column grid, `grid[x][y]`.
    ///
    /// All columns must have the same length.
    pub fn from_grid(grid: &[Vec<u8>]) -> Result<Self, CoreError> {
        let width = grid.len();
        let height = grid.first().map_or(0, Vec::len);
        let mut img = Self::new(width, height);
        for (x, column) in grid.iter().enumerate() {
            if column.len() != height {
                return Err(CoreError::InvalidGrid {
                    expected: height,
                    got: column.len(),
                });
            }
            for (y, &v) in column.iter().enumerate() {
                img.set(x, y, v);
            }
        }
        Ok(img)
    }

    /// Build an image by evaluating `f(x, y)` for every pixel.
    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(usize, usize) -> u8) -> Self {
        let mut data = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                data.push(f(x, y));
            }
        }
        Self {
            width,
            height,
            data,
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.data[y * self.width + x]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, v: u8) {
        self.data[y * self.width + x] = v;
    }

    pub fn view(&self) -> GrayImageView<'_> {
        GrayImageView {
            width: self.width,
            height: self.height,
            data: &self.data,
        }
    }

    /// See [`GrayImageView::mean_rect`].
    pub fn mean_rect(&self, x1: i64, y1: i64, x2: i64, y2: i64) -> f32 {
        self.view().mean_rect(x1, y1, x2, y2)
    }

    pub fn histogram(&self) -> Histogram {
        self.view().histogram()
    }

    pub fn is_binarized(&self) -> bool {
        self.view().is_binarized()
    }

    /// One clockwise quarter turn: `new[x, y] = old[y, height - 1 - x]`.
    pub fn rotate_quarter_cw(&self) -> GrayImage {
        let (w, h) = (self.width, self.height);
        GrayImage::from_fn(h, w, |x, y| self.get(y, h - 1 - x))
    }

    /// Rotate clockwise by a non-negative multiple of 90 degrees.
    pub fn rotate_cw(&self, degrees: i32) -> Result<GrayImage, CoreError> {
        if degrees < 0 || degrees % 90 != 0 {
            return Err(CoreError::InvalidRotation { degrees });
        }
        let mut out = self.clone();
        for _ in 0..degrees / 90 {
            out = out.rotate_quarter_cw();
        }
        Ok(out)
    }

    /// Mirror the column index.
    pub fn flip_horizontal(&self) -> GrayImage {
        let w = self.width;
        GrayImage::from_fn(w, self.height, |x, y| self.get(w - 1 - x, y))
    }

    /// Mirror the row index.
    pub fn flip_vertical(&self) -> GrayImage {
        let h = self.height;
        GrayImage::from_fn(self.width, h, |x, y| self.get(x, h - 1 - y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(w: usize, h: usize) -> GrayImage {
        GrayImage::from_fn(w, h, |x, y| ((x * 7 + y * 13) % 256) as u8)
    }

    #[test]
    fn quarter_turn_is_clockwise() {
        // 2x3 image:
        // 1 2
        // 3 4
        // 5 6
        let img = GrayImage::from_raw(2, 3, vec![1, 2, 3, 4, 5, 6]).unwrap();
        let rot = img.rotate_quarter_cw();
        assert_eq!((rot.width, rot.height), (3, 2));
        // 5 3 1
        // 6 4 2
        assert_eq!(rot.data, vec![5, 3, 1, 6, 4, 2]);
    }

    #[test]
    fn four_quarter_turns_restore_the_grid() {
        let img = ramp(7, 5);
        assert_eq!(img.rotate_cw(360).unwrap(), img);
        let step = img.rotate_cw(90).unwrap().rotate_cw(270).unwrap();
        assert_eq!(step, img);
    }

    #[test]
    fn rotation_rejects_odd_angles() {
        let img = ramp(4, 4);
        assert_eq!(
            img.rotate_cw(45),
            Err(CoreError::InvalidRotation { degrees: 45 })
        );
        assert!(img.rotate_cw(-90).is_err());
        assert_eq!(img.rotate_cw(0).unwrap(), img);
    }

    #[test]
    fn double_flip_is_identity() {
        let img = ramp(9, 4);
        assert_eq!(img.flip_horizontal().flip_horizontal(), img);
        assert_eq!(img.flip_vertical().flip_vertical(), img);
        assert_ne!(img.flip_horizontal(), img);
    }

    #[test]
    fn mean_rect_is_inclusive_and_clipped() {
        let img = GrayImage::from_raw(2, 2, vec![0, 100, 200, 60]).unwrap();
        assert_eq!(img.mean_rect(0, 0, 1, 1), 90.0);
        assert_eq!(img.mean_rect(1, 0, 1, 0), 100.0);
        assert_eq!(img.mean_rect(-3, -3, 0, 0), 0.0);
        assert_eq!(img.mean_rect(1, 1, 10, 10), 60.0);
    }

    #[test]
    fn from_grid_is_column_major() {
        let grid = vec![vec![1, 2, 3], vec![4, 5, 6]];
        let img = GrayImage::from_grid(&grid).unwrap();
        assert_eq!((img.width(), img.height()), (2, 3));
        assert_eq!(img.get(1, 0), 4);
        assert_eq!(img.get(0, 2), 3);

        let ragged = vec![vec![1, 2], vec![3]];
        assert!(GrayImage::from_grid(&ragged).is_err());
    }

    #[test]
    fn binarized_check_and_column_counts() {
        let mut img = GrayImage::from_fn(3, 2, |x, _| if x == 0 { 0 } else { 255 });
        assert!(img.is_binarized());
        assert_eq!(img.view().black_count_per_column(), vec![2, 0, 0]);
        img.set(1, 1, 17);
        assert!(!img.is_binarized());
    }
}
