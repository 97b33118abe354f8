//! Portable backend built on fixed-width scalar lane arrays.
//!
//! Used when `build.rs` finds neither AVX2+FMA nor NEON (`cfg(fallback)`), or when
//! `LANEKIT_FORCE_PORTABLE=1` is set. The lane arrays keep the same multi-accumulator
//! structure as the hardware backends, which LLVM is free to map onto whatever vector
//! unit the target has.
//!
//! [`edge_tile`] is compiled into every build: `matmul` uses it for the partial tiles
//! along the right and bottom edges of C regardless of backend.

use num::Float;

use crate::simd::check_tile;

pub const NAME: &str = "portable";

/// Rows of C per register tile.
pub const TILE_ROWS: usize = 4;
/// Columns of C per f32 register tile.
pub const F32_TILE_COLS: usize = 8;
/// Columns of C per f64 register tile.
pub const F64_TILE_COLS: usize = 8;

/// Running totals kept by the f32 reductions.
pub const F32_LANES: usize = 16;
/// Running totals kept by the f64 reductions.
pub const F64_LANES: usize = 8;

// ================================================================================================
// LANE REDUCTIONS
// ================================================================================================

/// Folds `L` running totals by halving: `acc[i] += acc[i + L/2]` until one is left.
#[inline(always)]
fn combine<T: Float, const L: usize>(mut acc: [T; L]) -> T {
    debug_assert!(L.is_power_of_two(), "lane count must be a power of two");

    let mut width = L;
    while width > 1 {
        width /= 2;
        for i in 0..width {
            acc[i] = acc[i] + acc[i + width];
        }
    }
    acc[0]
}

/// Sum with `L` independent running totals; element `i` lands in total `i % L`.
#[inline]
pub fn lane_sum<T: Float, const L: usize>(values: &[T]) -> T {
    let mut acc = [T::zero(); L];

    let chunks = values.chunks_exact(L);
    let rest = chunks.remainder();

    for chunk in chunks {
        for (total, &x) in acc.iter_mut().zip(chunk) {
            *total = *total + x;
        }
    }
    for (total, &x) in acc.iter_mut().zip(rest) {
        *total = *total + x;
    }

    combine(acc)
}

/// Dot product with `L` independent running totals.
///
/// # Panics
///
/// Panics if `a` and `b` have different lengths.
#[inline]
pub fn lane_dot<T: Float, const L: usize>(a: &[T], b: &[T]) -> T {
    assert_eq!(a.len(), b.len(), "Vectors must be the same length");

    let mut acc = [T::zero(); L];

    let a_chunks = a.chunks_exact(L);
    let b_chunks = b.chunks_exact(L);
    let (a_rest, b_rest) = (a_chunks.remainder(), b_chunks.remainder());

    for (ca, cb) in a_chunks.zip(b_chunks) {
        for ((total, &x), &y) in acc.iter_mut().zip(ca).zip(cb) {
            *total = *total + x * y;
        }
    }
    for ((total, &x), &y) in acc.iter_mut().zip(a_rest).zip(b_rest) {
        *total = *total + x * y;
    }

    combine(acc)
}

// ================================================================================================
// REGISTER TILES
// ================================================================================================

/// `C[0..MR, 0..NR] += A[0..MR, 0..kc] · B[0..kc, 0..NR]` with the tile held in a local array.
///
/// # Panics
///
/// Panics if the tile does not fit inside `a`, `b` or `c`.
#[allow(clippy::too_many_arguments)]
#[inline]
pub fn register_tile<T: Float, const MR: usize, const NR: usize>(
    a: &[T],
    lda: usize,
    b: &[T],
    ldb: usize,
    c: &mut [T],
    ldc: usize,
    kc: usize,
) {
    check_tile(a.len(), lda, b.len(), ldb, c.len(), ldc, MR, NR, kc);

    let mut acc = [[T::zero(); NR]; MR];
    for (r, row) in acc.iter_mut().enumerate() {
        row.copy_from_slice(&c[r * ldc..r * ldc + NR]);
    }

    for p in 0..kc {
        let b_row = &b[p * ldb..p * ldb + NR];
        for (r, row) in acc.iter_mut().enumerate() {
            let a_rp = a[r * lda + p];
            for (cell, &b_pj) in row.iter_mut().zip(b_row) {
                *cell = *cell + a_rp * b_pj;
            }
        }
    }

    for (r, row) in acc.iter().enumerate() {
        c[r * ldc..r * ldc + NR].copy_from_slice(row);
    }
}

/// Partial tile `C[0..rows, 0..cols] += A[0..rows, 0..kc] · B[0..kc, 0..cols]`.
///
/// Handles the right and bottom fringes of C that are narrower than a register tile.
/// Each cell accumulates its products in increasing `p` order.
///
/// # Panics
///
/// Panics if the tile does not fit inside `a`, `b` or `c`.
#[allow(clippy::too_many_arguments)]
pub fn edge_tile<T: Float>(
    a: &[T],
    lda: usize,
    b: &[T],
    ldb: usize,
    c: &mut [T],
    ldc: usize,
    rows: usize,
    cols: usize,
    kc: usize,
) {
    check_tile(a.len(), lda, b.len(), ldb, c.len(), ldc, rows, cols, kc);

    for r in 0..rows {
        let a_row = &a[r * lda..];
        let c_row = &mut c[r * ldc..r * ldc + cols];
        for (j, cell) in c_row.iter_mut().enumerate() {
            let mut total = *cell;
            for (p, &a_rp) in a_row[..kc].iter().enumerate() {
                total = total + a_rp * b[p * ldb + j];
            }
            *cell = total;
        }
    }
}

// ================================================================================================
// BACKEND ENTRY POINTS
// ================================================================================================

#[inline]
pub fn sum_f32(values: &[f32]) -> f32 {
    lane_sum::<f32, F32_LANES>(values)
}

#[inline]
pub fn sum_f64(values: &[f64]) -> f64 {
    lane_sum::<f64, F64_LANES>(values)
}

#[inline]
pub fn dot_f32(a: &[f32], b: &[f32]) -> f32 {
    lane_dot::<f32, F32_LANES>(a, b)
}

#[inline]
pub fn dot_f64(a: &[f64], b: &[f64]) -> f64 {
    lane_dot::<f64, F64_LANES>(a, b)
}

#[inline]
pub fn tile_f32(a: &[f32], lda: usize, b: &[f32], ldb: usize, c: &mut [f32], ldc: usize, kc: usize) {
    register_tile::<f32, TILE_ROWS, F32_TILE_COLS>(a, lda, b, ldb, c, ldc, kc)
}

#[inline]
pub fn tile_f64(a: &[f64], lda: usize, b: &[f64], ldb: usize, c: &mut [f64], ldc: usize, kc: usize) {
    register_tile::<f64, TILE_ROWS, F64_TILE_COLS>(a, lda, b, ldb, c, ldc, kc)
}
