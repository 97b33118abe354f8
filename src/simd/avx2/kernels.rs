//! AVX2 + FMA kernel entry points.
//!
//! Each `unsafe` entry point carries `#[target_feature(enable = "avx2,fma")]` so the
//! shared lane algorithms are compiled with the intrinsics inlined. The safe wrappers
//! below are what [`crate::Element`] calls.
//!
//! `build.rs` only sets `cfg(avx2)` when the host CPU reports both `avx2` and `fma`,
//! which is the invariant every `unsafe` block in this module relies on.

use crate::simd::{
    avx2::{f32x8::F32x8, f64x4::F64x4},
    check_tile, lanes,
};

pub(crate) const NAME: &str = "avx2";

/// Rows of C per register tile.
pub(crate) const TILE_ROWS: usize = lanes::TILE_ROWS;
/// Columns of C per f32 register tile (two `F32x8` per row).
pub(crate) const F32_TILE_COLS: usize = lanes::TILE_REGISTERS * 8;
/// Columns of C per f64 register tile (two `F64x4` per row).
pub(crate) const F64_TILE_COLS: usize = lanes::TILE_REGISTERS * 4;

#[target_feature(enable = "avx2,fma")]
unsafe fn sum_f32_avx2(values: &[f32]) -> f32 {
    lanes::sum::<f32, F32x8>(values)
}

#[target_feature(enable = "avx2,fma")]
unsafe fn sum_f64_avx2(values: &[f64]) -> f64 {
    lanes::sum::<f64, F64x4>(values)
}

#[target_feature(enable = "avx2,fma")]
unsafe fn dot_f32_avx2(a: &[f32], b: &[f32]) -> f32 {
    lanes::dot::<f32, F32x8>(a, b)
}

#[target_feature(enable = "avx2,fma")]
unsafe fn dot_f64_avx2(a: &[f64], b: &[f64]) -> f64 {
    lanes::dot::<f64, F64x4>(a, b)
}

#[target_feature(enable = "avx2,fma")]
unsafe fn tile_f32_avx2(a: &[f32], lda: usize, b: &[f32], ldb: usize, c: &mut [f32], ldc: usize, kc: usize) {
    lanes::tile::<f32, F32x8>(a.as_ptr(), lda, b.as_ptr(), ldb, c.as_mut_ptr(), ldc, kc)
}

#[target_feature(enable = "avx2,fma")]
unsafe fn tile_f64_avx2(a: &[f64], lda: usize, b: &[f64], ldb: usize, c: &mut [f64], ldc: usize, kc: usize) {
    lanes::tile::<f64, F64x4>(a.as_ptr(), lda, b.as_ptr(), ldb, c.as_mut_ptr(), ldc, kc)
}

#[inline]
pub(crate) fn sum_f32(values: &[f32]) -> f32 {
    // SAFETY: cfg(avx2) guarantees AVX2 and FMA on this CPU.
    unsafe { sum_f32_avx2(values) }
}

#[inline]
pub(crate) fn sum_f64(values: &[f64]) -> f64 {
    // SAFETY: cfg(avx2) guarantees AVX2 and FMA on this CPU.
    unsafe { sum_f64_avx2(values) }
}

#[inline]
pub(crate) fn dot_f32(a: &[f32], b: &[f32]) -> f32 {
    assert_eq!(a.len(), b.len(), "Vectors must be the same length");
    // SAFETY: lengths checked above; cfg(avx2) guarantees the instruction set.
    unsafe { dot_f32_avx2(a, b) }
}

#[inline]
pub(crate) fn dot_f64(a: &[f64], b: &[f64]) -> f64 {
    assert_eq!(a.len(), b.len(), "Vectors must be the same length");
    // SAFETY: lengths checked above; cfg(avx2) guarantees the instruction set.
    unsafe { dot_f64_avx2(a, b) }
}

#[inline]
pub(crate) fn tile_f32(a: &[f32], lda: usize, b: &[f32], ldb: usize, c: &mut [f32], ldc: usize, kc: usize) {
    check_tile(a.len(), lda, b.len(), ldb, c.len(), ldc, TILE_ROWS, F32_TILE_COLS, kc);
    // SAFETY: extents checked above; cfg(avx2) guarantees the instruction set.
    unsafe { tile_f32_avx2(a, lda, b, ldb, c, ldc, kc) }
}

#[inline]
pub(crate) fn tile_f64(a: &[f64], lda: usize, b: &[f64], ldb: usize, c: &mut [f64], ldc: usize, kc: usize) {
    check_tile(a.len(), lda, b.len(), ldb, c.len(), ldc, TILE_ROWS, F64_TILE_COLS, kc);
    // SAFETY: extents checked above; cfg(avx2) guarantees the instruction set.
    unsafe { tile_f64_avx2(a, lda, b, ldb, c, ldc, kc) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sum_covers_every_loop_stage() {
        // 32-wide main loop, one 8-wide register, then a 5-element partial register
        let values: Vec<f32> = (1..=45).map(|i| i as f32).collect();
        assert_eq!(sum_f32(&values), (45 * 46 / 2) as f32);
    }

    #[test]
    fn test_dot_f64_tail_lengths() {
        for len in 0..40 {
            let a: Vec<f64> = (0..len).map(|i| i as f64).collect();
            let b = vec![2.0f64; len];
            let expected = (len * len.saturating_sub(1)) as f64;
            assert_eq!(dot_f64(&a, &b), expected, "len {len}");
        }
    }

    #[test]
    fn test_tile_f64_accumulates_into_c() {
        let kc = 3;
        let lda = kc;
        let ldb = F64_TILE_COLS;
        let ldc = F64_TILE_COLS;
        let a: Vec<f64> = (0..TILE_ROWS * kc).map(|i| i as f64).collect();
        let b: Vec<f64> = (0..kc * ldb).map(|i| (i % 5) as f64).collect();
        let mut c = vec![1.0f64; TILE_ROWS * ldc];

        tile_f64(&a, lda, &b, ldb, &mut c, ldc, kc);

        for r in 0..TILE_ROWS {
            for j in 0..F64_TILE_COLS {
                let mut expected = 1.0;
                for p in 0..kc {
                    expected += a[r * lda + p] * b[p * ldb + j];
                }
                assert_eq!(c[r * ldc + j], expected, "C[{r}, {j}]");
            }
        }
    }

    #[test]
    #[should_panic(expected = "register tile overruns B")]
    fn test_tile_rejects_short_b() {
        let a = vec![0.0f32; TILE_ROWS * 4];
        let b = vec![0.0f32; F32_TILE_COLS];
        let mut c = vec![0.0f32; TILE_ROWS * F32_TILE_COLS];
        tile_f32(&a, 4, &b, F32_TILE_COLS, &mut c, F32_TILE_COLS, 4);
    }
}
