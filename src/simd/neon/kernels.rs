//! NEON kernel entry points.
//!
//! Advanced SIMD is mandatory on aarch64; `build.rs` still only selects this backend
//! after seeing `neon`/`asimd` reported by the host.

use crate::simd::{
    check_tile, lanes,
    neon::{f32x4::F32x4, f64x2::F64x2},
};

pub(crate) const NAME: &str = "neon";

pub(crate) const TILE_ROWS: usize = lanes::TILE_ROWS;
pub(crate) const F32_TILE_COLS: usize = lanes::TILE_REGISTERS * 4;
pub(crate) const F64_TILE_COLS: usize = lanes::TILE_REGISTERS * 2;

#[target_feature(enable = "neon")]
unsafe fn sum_f32_neon(values: &[f32]) -> f32 {
    lanes::sum::<f32, F32x4>(values)
}

#[target_feature(enable = "neon")]
unsafe fn sum_f64_neon(values: &[f64]) -> f64 {
    lanes::sum::<f64, F64x2>(values)
}

#[target_feature(enable = "neon")]
unsafe fn dot_f32_neon(a: &[f32], b: &[f32]) -> f32 {
    lanes::dot::<f32, F32x4>(a, b)
}

#[target_feature(enable = "neon")]
unsafe fn dot_f64_neon(a: &[f64], b: &[f64]) -> f64 {
    lanes::dot::<f64, F64x2>(a, b)
}

#[target_feature(enable = "neon")]
unsafe fn tile_f32_neon(a: &[f32], lda: usize, b: &[f32], ldb: usize, c: &mut [f32], ldc: usize, kc: usize) {
    lanes::tile::<f32, F32x4>(a.as_ptr(), lda, b.as_ptr(), ldb, c.as_mut_ptr(), ldc, kc)
}

#[target_feature(enable = "neon")]
unsafe fn tile_f64_neon(a: &[f64], lda: usize, b: &[f64], ldb: usize, c: &mut [f64], ldc: usize, kc: usize) {
    lanes::tile::<f64, F64x2>(a.as_ptr(), lda, b.as_ptr(), ldb, c.as_mut_ptr(), ldc, kc)
}

#[inline]
pub(crate) fn sum_f32(values: &[f32]) -> f32 {
    // SAFETY: cfg(neon) guarantees Advanced SIMD on this CPU.
    unsafe { sum_f32_neon(values) }
}

#[inline]
pub(crate) fn sum_f64(values: &[f64]) -> f64 {
    // SAFETY: cfg(neon) guarantees Advanced SIMD on this CPU.
    unsafe { sum_f64_neon(values) }
}

#[inline]
pub(crate) fn dot_f32(a: &[f32], b: &[f32]) -> f32 {
    assert_eq!(a.len(), b.len(), "Vectors must be the same length");
    // SAFETY: lengths checked above; cfg(neon) guarantees the instruction set.
    unsafe { dot_f32_neon(a, b) }
}

#[inline]
pub(crate) fn dot_f64(a: &[f64], b: &[f64]) -> f64 {
    assert_eq!(a.len(), b.len(), "Vectors must be the same length");
    // SAFETY: lengths checked above; cfg(neon) guarantees the instruction set.
    unsafe { dot_f64_neon(a, b) }
}

#[inline]
pub(crate) fn tile_f32(a: &[f32], lda: usize, b: &[f32], ldb: usize, c: &mut [f32], ldc: usize, kc: usize) {
    check_tile(a.len(), lda, b.len(), ldb, c.len(), ldc, TILE_ROWS, F32_TILE_COLS, kc);
    // SAFETY: extents checked above; cfg(neon) guarantees the instruction set.
    unsafe { tile_f32_neon(a, lda, b, ldb, c, ldc, kc) }
}

#[inline]
pub(crate) fn tile_f64(a: &[f64], lda: usize, b: &[f64], ldb: usize, c: &mut [f64], ldc: usize, kc: usize) {
    check_tile(a.len(), lda, b.len(), ldb, c.len(), ldc, TILE_ROWS, F64_TILE_COLS, kc);
    // SAFETY: extents checked above; cfg(neon) guarantees the instruction set.
    unsafe { tile_f64_neon(a, lda, b, ldb, c, ldc, kc) }
}
