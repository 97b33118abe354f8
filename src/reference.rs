//! Strict-order reference kernels and seeded inputs.
//!
//! The naive kernels accumulate left to right with a single running total and are the
//! ground truth the optimized kernels are compared against in tests, benches and the
//! `lanekit-report` binary. They perform the same shape checks as the optimized ones.

use rand::{distr::uniform::SampleUniform, rngs::StdRng, Rng, SeedableRng};

use crate::{
    shape::{check_dot, check_matmul, check_matvec, require},
    Element,
};

/// Left-to-right sum.
pub fn naive_sum<T: Element>(values: &[T]) -> T {
    let mut acc = T::zero();
    for &x in values {
        acc = acc + x;
    }
    acc
}

/// Left-to-right dot product.
///
/// # Panics
///
/// Panics if `a.len() != b.len()`.
#[track_caller]
pub fn naive_dot<T: Element>(a: &[T], b: &[T]) -> T {
    require(check_dot(a.len(), b.len()));

    let mut acc = T::zero();
    for (&x, &y) in a.iter().zip(b) {
        acc = acc + x * y;
    }
    acc
}

/// One strict-order dot product per row.
///
/// # Panics
///
/// Same preconditions as [`crate::matvec`].
#[track_caller]
pub fn naive_matvec<T: Element>(matrix: &[T], rows: usize, cols: usize, vector: &[T], out: &mut [T]) {
    require(check_matvec(matrix.len(), rows, cols, vector.len(), out.len()));

    for (r, slot) in out.iter_mut().enumerate() {
        let mut acc = T::zero();
        for c in 0..cols {
            acc = acc + matrix[r * cols + c] * vector[c];
        }
        *slot = acc;
    }
}

/// Textbook `i → p → j` triple loop: each row of C is zeroed, then
/// `C[i,j] += A[i,p]·B[p,j]` for increasing `p`.
///
/// # Panics
///
/// Same preconditions as [`crate::matmul`].
#[track_caller]
pub fn naive_matmul<T: Element>(a: &[T], b: &[T], c: &mut [T], m: usize, n: usize, k: usize) {
    require(check_matmul(a.len(), b.len(), c.len(), m, n, k));

    for i in 0..m {
        for j in 0..n {
            c[i * n + j] = T::zero();
        }
        for p in 0..k {
            for j in 0..n {
                c[i * n + j] = c[i * n + j] + a[i * k + p] * b[p * n + j];
            }
        }
    }
}

/// Deterministic generator for reproducible inputs.
pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// `len` values drawn uniformly from `[-1, 1]`.
pub fn uniform_vec<T: Element + SampleUniform>(len: usize, rng: &mut StdRng) -> Vec<T> {
    let (lo, hi) = (-T::one(), T::one());
    (0..len).map(|_| rng.random_range(lo..=hi)).collect()
}

/// Largest element-wise `|a[i] - b[i]|`; NaN if any pair differs by NaN.
///
/// # Panics
///
/// Panics if `a.len() != b.len()`.
#[track_caller]
pub fn max_abs_diff<T: Element>(a: &[T], b: &[T]) -> T {
    require(check_dot(a.len(), b.len()));

    a.iter().zip(b).fold(T::zero(), |worst, (&x, &y)| {
        let diff = (x - y).abs();
        if diff.is_nan() || diff > worst {
            diff
        } else {
            worst
        }
    })
}

/// Euclidean distance `‖a - b‖₂`.
///
/// # Panics
///
/// Panics if `a.len() != b.len()`.
#[track_caller]
pub fn l2_distance<T: Element>(a: &[T], b: &[T]) -> T {
    require(check_dot(a.len(), b.len()));

    a.iter()
        .zip(b)
        .fold(T::zero(), |acc, (&x, &y)| {
            let delta = x - y;
            acc + delta * delta
        })
        .sqrt()
}

/// Error bound for a reordered sum of `n` terms whose absolute values add up to
/// `magnitude`: `2·n·ε·magnitude`.
///
/// Any summation order (and fused or unfused products) stays within `n·ε·magnitude`
/// of the exact result to first order, so two orders are within twice that.
pub fn reordering_bound<T: Element>(n: usize, magnitude: T) -> T {
    let n = T::from(n.max(1)).unwrap_or_else(T::max_value);
    (T::one() + T::one()) * n * T::epsilon() * magnitude
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_naive_matmul_2x3_times_3x2() {
        let a = [1.0f64, 2.0, 3.0, 4.0, 5.0, 6.0];
        let b = [7.0f64, 8.0, 9.0, 10.0, 11.0, 12.0];
        let mut c = [f64::NAN; 4];

        naive_matmul(&a, &b, &mut c, 2, 2, 3);
        assert_eq!(c, [58.0, 64.0, 139.0, 154.0]);
    }

    #[test]
    fn test_naive_matvec() {
        let matrix = [1.0f32, 2.0, 3.0, 4.0];
        let mut out = [0.0f32; 2];
        naive_matvec(&matrix, 2, 2, &[1.0, 1.0], &mut out);
        assert_eq!(out, [3.0, 7.0]);
    }

    #[test]
    fn test_uniform_vec_is_seeded_and_bounded() {
        let first: Vec<f32> = uniform_vec(512, &mut seeded_rng(42));
        let second: Vec<f32> = uniform_vec(512, &mut seeded_rng(42));
        assert_eq!(first, second);
        assert!(first.iter().all(|x| (-1.0..=1.0).contains(x)));

        let other: Vec<f32> = uniform_vec(512, &mut seeded_rng(43));
        assert_ne!(first, other);
    }

    #[test]
    fn test_differences() {
        let a = [1.0f64, 2.0, 3.0];
        let b = [1.0f64, 2.5, 1.0];
        assert_eq!(max_abs_diff(&a, &b), 2.0);
        assert_eq!(l2_distance(&[3.0f64, 0.0], &[0.0, 4.0]), 5.0);
        assert!(max_abs_diff(&[f64::NAN], &[1.0]).is_nan());
    }
}
