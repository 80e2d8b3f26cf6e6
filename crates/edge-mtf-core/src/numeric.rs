//! Numeric primitives shared by the measurement stages.
//!
//! The helpers are generic over a closed set of primitive numeric types.
//! [`Numeric`] is sealed, so asking for a non-numeric element type is a
//! compile error rather than a runtime check.

use std::fmt::Debug;
use std::ops::{Add, Div, Mul, Sub};

use crate::CoreError;

mod sealed {
    pub trait Sealed {}
}

/// Primitive numeric element accepted by the generic helpers.
pub trait Numeric:
    sealed::Sealed
    + Copy
    + Debug
    + PartialOrd
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
{
    /// Absolute difference type. Unsigned for integers so the distance never
    /// overflows.
    type Distance: Copy + PartialOrd + Debug;

    const ZERO: Self;

    fn distance(self, other: Self) -> Self::Distance;

    fn from_usize(v: usize) -> Self;

    #[inline]
    fn is_nan(self) -> bool {
        false
    }
}

/// Numeric types with a meaningful negative range (needed by differences).
pub trait SignedNumeric: Numeric {}

macro_rules! impl_numeric_int {
    (@signed $t:ty, signed) => { impl SignedNumeric for $t {} };
    (@signed $t:ty, unsigned) => {};
    ($($t:ty => $d:ty, $signed:tt);* $(;)?) => {$(
        impl sealed::Sealed for $t {}
        impl Numeric for $t {
            type Distance = $d;
            const ZERO: Self = 0;

            #[inline]
            fn distance(self, other: Self) -> $d {
                self.abs_diff(other)
            }

            #[inline]
            fn from_usize(v: usize) -> Self {
                v as $t
            }
        }
        impl_numeric_int!(@signed $t, $signed);
    )*};
}

macro_rules! impl_numeric_float {
    ($($t:ty),*) => {$(
        impl sealed::Sealed for $t {}
        impl Numeric for $t {
            type Distance = $t;
            const ZERO: Self = 0.0;

            #[inline]
            fn distance(self, other: Self) -> $t {
                (self - other).abs()
            }

            #[inline]
            fn from_usize(v: usize) -> Self {
                v as $t
            }

            #[inline]
            fn is_nan(self) -> bool {
                <$t>::is_nan(self)
            }
        }
        impl SignedNumeric for $t {}
    )*};
}

impl_numeric_int! {
    i8 => u8, signed;
    i16 => u16, signed;
    i32 => u32, signed;
    i64 => u64, signed;
    u8 => u8, unsigned;
    u16 => u16, unsigned;
    u32 => u32, unsigned;
    u64 => u64, unsigned;
}
impl_numeric_float!(f32, f64);

/// Candidate closest to `target`.
///
/// A candidate equal to `target` is returned as-is. When two candidates are
/// equally close, `prefer_greater` picks the larger one, otherwise the
/// smaller. Any NaN among the candidates is an error.
pub fn nearest_value<T: Numeric>(
    target: T,
    prefer_greater: bool,
    candidates: &[T],
) -> Result<T, CoreError> {
    if candidates.is_empty() {
        return Err(CoreError::EmptyCandidates);
    }
    if candidates.contains(&target) {
        return Ok(target);
    }
    if target.is_nan() {
        return Err(CoreError::NotANumber);
    }

    // (distance, lesser, greater) among the candidates at minimal distance
    let mut best: Option<(T::Distance, T, T)> = None;
    for &c in candidates {
        if c.is_nan() {
            return Err(CoreError::NotANumber);
        }
        let d = target.distance(c);
        best = match best {
            None => Some((d, c, c)),
            Some((bd, _, _)) if d < bd => Some((d, c, c)),
            Some((bd, lo, hi)) if d == bd => {
                let lo = if c < lo { c } else { lo };
                let hi = if c > hi { c } else { hi };
                Some((bd, lo, hi))
            }
            keep => keep,
        };
    }

    let (_, lo, hi) = best.ok_or(CoreError::EmptyCandidates)?;
    Ok(if prefer_greater { hi } else { lo })
}

/// Centered difference `(f[i+d] - f[i-d]) / d * 2`.
///
/// The output holds one sample per interior position, so its length is
/// `values.len() - 2 * dif_level` (empty when the input is too short).
pub fn differentiate<T: SignedNumeric>(
    values: &[T],
    dif_level: usize,
) -> Result<Vec<T>, CoreError> {
    if dif_level == 0 {
        return Err(CoreError::InvalidParameter {
            what: "differentiation level",
            value: dif_level,
        });
    }
    if values.len() <= 2 * dif_level {
        return Ok(Vec::new());
    }
    let d = T::from_usize(dif_level);
    let two = T::from_usize(2);
    Ok((dif_level..values.len() - dif_level)
        .map(|i| (values[i + dif_level] - values[i - dif_level]) / d * two)
        .collect())
}

/// Sample `f` at `x = 0, step, 2*step, ...` into a vector of `len` values.
pub fn fill_with<T: Numeric>(len: usize, step: f32, mut f: impl FnMut(f32) -> T) -> Vec<T> {
    let mut out = Vec::with_capacity(len);
    let mut x = 0.0f32;
    for _ in 0..len {
        out.push(f(x));
        x += step;
    }
    out
}

/// Trailing-window moving average starting at the first positive sample.
///
/// Each output sample accumulates the following `interval - 1` samples into
/// the head sample in place, then divides by `interval`. The input slice is
/// left holding those running sums. The output length is
/// `values.len() - interval - first_positive_index`.
pub fn moving_average(values: &mut [f32], interval: usize) -> Result<Vec<f32>, CoreError> {
    if interval == 0 {
        return Err(CoreError::InvalidParameter {
            what: "moving average interval",
            value: interval,
        });
    }
    let offset = values.iter().position(|&v| v > 0.0).unwrap_or(0);
    let needed = interval + offset;
    if values.len() < needed {
        return Err(CoreError::MovingAverageTooShort {
            len: values.len(),
            offset,
            needed,
        });
    }
    let out_len = values.len() - needed;

    let mut out = Vec::with_capacity(out_len);
    for i in offset..offset + out_len {
        for j in i + 1..i + interval {
            values[i] += values[j];
        }
        out.push(values[i] / interval as f32);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn nearest_value_matches_reference_case() {
        let candidates = [
            2.15f32,
            2.91,
            3.53,
            4.54,
            9.07,
            15.11,
            1.09,
            7.77,
            130.03,
            -8.81,
            6.39,
            -91.00,
            9.91,
            -9.35,
            10.21,
            3.96,
            11.63,
            5.54,
            -9.36,
            f32::from_bits(1), // smallest positive subnormal
            f32::MAX,
            f32::MIN,
            f32::NEG_INFINITY,
            f32::INFINITY,
        ];
        assert_eq!(nearest_value(9.36f32, false, &candidates), Ok(9.07));
    }

    #[test]
    fn exact_member_is_returned() {
        assert_eq!(nearest_value(4i32, false, &[1, 4, 9]), Ok(4));
        assert_eq!(nearest_value(0.5f64, true, &[0.5, f64::NAN]), Ok(0.5));
    }

    #[test]
    fn ties_follow_preference() {
        assert_eq!(nearest_value(7u8, true, &[5, 9]), Ok(9));
        assert_eq!(nearest_value(7u8, false, &[9, 5]), Ok(5));
        assert_eq!(nearest_value(-2i64, true, &[-4, 0, 10]), Ok(0));
        assert_eq!(nearest_value(-2i64, false, &[-4, 0, 10]), Ok(-4));
    }

    #[test]
    fn first_candidate_can_win() {
        assert_eq!(nearest_value(10u32, false, &[11, 40, 2]), Ok(11));
    }

    #[test]
    fn nearest_value_minimises_distance_on_grid() {
        let candidates = [-17i16, -3, 0, 8, 21, 400];
        for target in -40i16..450 {
            let got = nearest_value(target, false, &candidates).unwrap();
            let best = candidates
                .iter()
                .map(|c| target.distance(*c))
                .min()
                .unwrap();
            assert_eq!(target.distance(got), best, "target {target}");
        }
    }

    #[test]
    fn extreme_signed_distance_does_not_overflow() {
        assert_eq!(nearest_value(i8::MIN, false, &[i8::MAX, 0]), Ok(0));
    }

    #[test]
    fn nan_and_empty_are_rejected() {
        assert_eq!(
            nearest_value(1.0f32, false, &[2.0, f32::NAN]),
            Err(CoreError::NotANumber)
        );
        assert_eq!(
            nearest_value::<f64>(1.0, false, &[]),
            Err(CoreError::EmptyCandidates)
        );
    }

    #[test]
    fn differentiate_centered_difference() {
        let f: Vec<f32> = (0..10).map(|i| (i * i) as f32).collect();
        let df = differentiate(&f, 2).unwrap();
        assert_eq!(df.len(), f.len() - 4);
        // (f[i+2] - f[i-2]) / 2 * 2 = 8i for i = 2..8
        for (k, v) in df.iter().enumerate() {
            assert_relative_eq!(*v, 8.0 * (k + 2) as f32);
        }
        let di = differentiate(&[1i32, 3, 9, 27], 1).unwrap();
        assert_eq!(di, vec![16, 48]);
        assert!(differentiate(&[1.0f64], 0).is_err());
        assert!(differentiate(&[1.0f64, 2.0], 1).unwrap().is_empty());
    }

    #[test]
    fn fill_with_samples_on_step_grid() {
        let v = fill_with(4, 0.5, |x| x * 2.0);
        assert_eq!(v, vec![0.0f32, 1.0, 2.0, 3.0]);
        let ints: Vec<u16> = fill_with(3, 1.0, |x| x as u16 + 1);
        assert_eq!(ints, vec![1, 2, 3]);
    }

    #[test]
    fn moving_average_length_law() {
        let mut values = vec![0.0f32, 0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0];
        let interval = 3;
        let out = moving_average(&mut values, interval).unwrap();
        assert_eq!(out.len(), 10 - interval - 2);
        assert_relative_eq!(out[0], 2.0); // (1 + 2 + 3) / 3
        assert_relative_eq!(out[4], 6.0); // (5 + 6 + 7) / 3
        // head samples now carry their window sums
        assert_relative_eq!(values[2], 6.0);
        assert_relative_eq!(values[9], 8.0);
    }

    #[test]
    fn moving_average_rejects_short_input() {
        let mut values = vec![0.0f32, 0.0, 1.0];
        assert_eq!(
            moving_average(&mut values, 2),
            Err(CoreError::MovingAverageTooShort {
                len: 3,
                offset: 2,
                needed: 4
            })
        );
        assert!(moving_average(&mut values, 0).is_err());
    }
}
