use crate::{
    shape::{check_dot, require},
    simd::traits::SimdDot,
    Element,
};

/// Dot product `Σ a[i]·b[i]` of two equal-length slices.
///
/// The product stream is reduced with the same multi-accumulator strategy as
/// [`crate::sum`] (fused multiply-add on the hardware backends).
///
/// # Panics
///
/// Panics if `a.len() != b.len()`.
///
/// # Examples
///
/// ```rust
/// let a = [1.0f32, 2.0, 3.0];
/// let b = [4.0f32, 5.0, 6.0];
/// assert_eq!(lanekit::dot(&a, &b), 32.0);
/// ```
#[inline]
#[track_caller]
pub fn dot<T: Element>(a: &[T], b: &[T]) -> T {
    require(check_dot(a.len(), b.len()));
    T::lane_dot(a, b)
}

#[inline]
#[track_caller]
fn scalar_dot<T: Element>(a: &[T], b: &[T]) -> T {
    require(check_dot(a.len(), b.len()));
    a.iter().zip(b).fold(T::zero(), |acc, (&x, &y)| acc + x * y)
}

impl<'b, T: Element> SimdDot<&'b [T]> for &[T] {
    type Output = T;

    #[inline(always)]
    #[track_caller]
    fn simd_dot(self, rhs: &'b [T]) -> Self::Output {
        dot(self, rhs)
    }

    #[inline(always)]
    #[track_caller]
    fn scalar_dot(self, rhs: &'b [T]) -> Self::Output {
        scalar_dot(self, rhs)
    }
}

impl<'b, T: Element> SimdDot<&'b Vec<T>> for &Vec<T> {
    type Output = T;

    #[inline(always)]
    #[track_caller]
    fn simd_dot(self, rhs: &'b Vec<T>) -> Self::Output {
        dot(self.as_slice(), rhs.as_slice())
    }

    #[inline(always)]
    #[track_caller]
    fn scalar_dot(self, rhs: &'b Vec<T>) -> Self::Output {
        scalar_dot(self.as_slice(), rhs.as_slice())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_dot_is_zero() {
        assert_eq!(dot::<f32>(&[], &[]), 0.0);
    }

    #[test]
    fn test_small_integer_dots_are_exact() {
        for len in [1usize, 3, 4, 5, 8, 9, 16, 17, 33, 70] {
            let a: Vec<f32> = (0..len).map(|i| (i % 7) as f32).collect();
            let b: Vec<f32> = (0..len).map(|i| (i % 3) as f32 - 1.0).collect();
            assert_eq!(dot(&a, &b), a.as_slice().scalar_dot(b.as_slice()), "len = {len}");
        }
    }

    #[test]
    fn test_vec_trait_form() {
        let a = vec![0.5f64; 19];
        let b = vec![2.0f64; 19];
        assert_eq!((&a).simd_dot(&b), 19.0);
        assert_eq!((&a).scalar_dot(&b), 19.0);
    }

    #[test]
    #[should_panic(expected = "Length mismatch: left operand has 3 elements, right operand has 2")]
    fn test_length_mismatch_panics() {
        dot(&[1.0f64, 2.0, 3.0], &[1.0, 2.0]);
    }

    #[test]
    #[should_panic(expected = "Length mismatch")]
    fn test_scalar_form_checks_lengths_too() {
        let a = [1.0f32; 4];
        let b = [1.0f32; 5];
        a.as_slice().scalar_dot(b.as_slice());
    }
}
