use crate::{simd::traits::SimdSum, Element};

/// Sum of all elements.
///
/// Uses several independent lane accumulators that are combined pairwise at the end,
/// so the result may differ from a strict left-to-right sum by rounding. An empty slice
/// sums to zero. NaN and infinities propagate.
///
/// # Examples
///
/// ```rust
/// let values: Vec<f32> = (1..=33).map(|i| i as f32).collect();
/// assert_eq!(lanekit::sum(&values), 561.0);
/// assert_eq!(lanekit::sum::<f64>(&[]), 0.0);
/// ```
#[inline]
pub fn sum<T: Element>(values: &[T]) -> T {
    T::lane_sum(values)
}

/// Strict left-to-right sum.
#[inline]
fn scalar_sum<T: Element>(values: &[T]) -> T {
    values.iter().fold(T::zero(), |acc, &x| acc + x)
}

impl<T: Element> SimdSum for &[T] {
    type Output = T;

    #[inline(always)]
    fn simd_sum(self) -> Self::Output {
        sum(self)
    }

    #[inline(always)]
    fn scalar_sum(self) -> Self::Output {
        scalar_sum(self)
    }
}

impl<T: Element> SimdSum for &Vec<T> {
    type Output = T;

    #[inline(always)]
    fn simd_sum(self) -> Self::Output {
        sum(self.as_slice())
    }

    #[inline(always)]
    fn scalar_sum(self) -> Self::Output {
        scalar_sum(self.as_slice())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_sum_is_zero() {
        assert_eq!(sum::<f32>(&[]), 0.0);
        assert_eq!(sum::<f64>(&[]), 0.0);
    }

    #[test]
    fn test_integer_valued_sums_are_exact() {
        for len in [1usize, 7, 8, 9, 15, 16, 17, 31, 32, 33, 64, 65, 100] {
            let values: Vec<f64> = (1..=len).map(|i| i as f64).collect();
            assert_eq!(sum(&values), (len * (len + 1) / 2) as f64, "len = {len}");
        }
    }

    #[test]
    fn test_trait_forms_agree_with_function() {
        let values: Vec<f32> = (0..50).map(|i| (i as f32) * 0.5).collect();
        assert_eq!(values.as_slice().simd_sum(), sum(&values));
        assert_eq!((&values).simd_sum(), sum(&values));
        assert_eq!((&values).scalar_sum(), values.iter().sum::<f32>());
    }

    #[test]
    fn test_nan_and_infinity_propagate() {
        let mut values = vec![1.0f64; 20];
        values[13] = f64::NAN;
        assert!(sum(&values).is_nan());

        values[13] = f64::INFINITY;
        assert_eq!(sum(&values), f64::INFINITY);
    }
}
