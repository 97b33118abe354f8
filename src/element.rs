//! Element types accepted by the kernels.

use std::fmt::{Debug, Display};
use std::iter::Sum;

use num::Float;

use crate::simd::backend;

mod sealed {
    pub trait Sealed {}

    impl Sealed for f32 {}
    impl Sealed for f64 {}
}

/// A floating point element type with a SIMD implementation in the build's backend.
///
/// Implemented for `f32` and `f64` only. The hidden methods route to the backend
/// selected by `build.rs`; call the functions in [`crate::kernels`] instead.
pub trait Element: Float + Sum + Debug + Display + Send + Sync + 'static + sealed::Sealed {
    /// Rows of C per register tile (MR).
    const TILE_ROWS: usize;
    /// Columns of C per register tile (NR).
    const TILE_COLS: usize;

    #[doc(hidden)]
    fn lane_sum(values: &[Self]) -> Self;

    #[doc(hidden)]
    fn lane_dot(a: &[Self], b: &[Self]) -> Self;

    /// Full MR×NR tile update of `c` (row stride `ldc`) from `a` (stride `lda`) and `b`
    /// (stride `ldb`) over depth `kc`.
    #[doc(hidden)]
    fn register_tile(a: &[Self], lda: usize, b: &[Self], ldb: usize, c: &mut [Self], ldc: usize, kc: usize);
}

impl Element for f32 {
    const TILE_ROWS: usize = backend::TILE_ROWS;
    const TILE_COLS: usize = backend::F32_TILE_COLS;

    #[inline(always)]
    fn lane_sum(values: &[f32]) -> f32 {
        backend::sum_f32(values)
    }

    #[inline(always)]
    fn lane_dot(a: &[f32], b: &[f32]) -> f32 {
        backend::dot_f32(a, b)
    }

    #[inline(always)]
    fn register_tile(a: &[f32], lda: usize, b: &[f32], ldb: usize, c: &mut [f32], ldc: usize, kc: usize) {
        backend::tile_f32(a, lda, b, ldb, c, ldc, kc)
    }
}

impl Element for f64 {
    const TILE_ROWS: usize = backend::TILE_ROWS;
    const TILE_COLS: usize = backend::F64_TILE_COLS;

    #[inline(always)]
    fn lane_sum(values: &[f64]) -> f64 {
        backend::sum_f64(values)
    }

    #[inline(always)]
    fn lane_dot(a: &[f64], b: &[f64]) -> f64 {
        backend::dot_f64(a, b)
    }

    #[inline(always)]
    fn register_tile(a: &[f64], lda: usize, b: &[f64], ldb: usize, c: &mut [f64], ldc: usize, kc: usize) {
        backend::tile_f64(a, lda, b, ldb, c, ldc, kc)
    }
}
