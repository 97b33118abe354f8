//! Lane-parallel algorithms shared by the hardware backends.
//!
//! Each function is generic over a [`SimdVec`] register type and is instantiated
//! inside a `#[target_feature]` entry point of the backend, which is where the
//! intrinsics get inlined.
//!
//! # Accumulation order
//!
//! Reductions keep [`ACCUMULATORS`] independent registers, i.e.
//! `ACCUMULATORS * LANE_COUNT` running totals. Element `i` of the main loop lands in
//! total `i % (ACCUMULATORS * LANE_COUNT)`; leftover whole registers go to the first
//! accumulator and the final partial register (zero padded) to the second. The
//! registers are combined pairwise and then reduced horizontally.

use crate::simd::traits::SimdVec;

/// Independent vector accumulators per reduction.
pub(crate) const ACCUMULATORS: usize = 4;

/// Rows of C per register tile.
pub(crate) const TILE_ROWS: usize = 4;

/// Registers per row of a register tile; a tile is `2 * LANE_COUNT` columns wide.
pub(crate) const TILE_REGISTERS: usize = 2;

#[inline(always)]
unsafe fn combine<T, V: SimdVec<T>>(acc: [V; ACCUMULATORS]) -> T {
    ((acc[0] + acc[1]) + (acc[2] + acc[3])).reduce_add()
}

/// Lane-parallel sum of `values`.
///
/// # Safety
///
/// The CPU must support the instruction set of `V`.
#[inline(always)]
pub(crate) unsafe fn sum<T, V: SimdVec<T>>(values: &[T]) -> T {
    let width = V::LANE_COUNT;
    let stride = width * ACCUMULATORS;
    let len = values.len();
    let ptr = values.as_ptr();

    let mut acc = [V::zeros(); ACCUMULATORS];

    let mut i = 0;
    while i + stride <= len {
        for (j, lane) in acc.iter_mut().enumerate() {
            *lane = *lane + V::load(ptr.add(i + j * width));
        }
        i += stride;
    }

    while i + width <= len {
        acc[0] = acc[0] + V::load(ptr.add(i));
        i += width;
    }

    if i < len {
        acc[1] = acc[1] + V::load_partial(ptr.add(i), len - i);
    }

    combine(acc)
}

/// Lane-parallel dot product of two equal-length slices.
///
/// # Safety
///
/// The CPU must support the instruction set of `V`, and `a.len() == b.len()`.
#[inline(always)]
pub(crate) unsafe fn dot<T, V: SimdVec<T>>(a: &[T], b: &[T]) -> T {
    debug_assert_eq!(a.len(), b.len(), "Vectors must be the same length");

    let width = V::LANE_COUNT;
    let stride = width * ACCUMULATORS;
    let len = a.len();
    let pa = a.as_ptr();
    let pb = b.as_ptr();

    let mut acc = [V::zeros(); ACCUMULATORS];

    let mut i = 0;
    while i + stride <= len {
        for (j, lane) in acc.iter_mut().enumerate() {
            let offset = i + j * width;
            *lane = V::load(pa.add(offset)).mul_add(V::load(pb.add(offset)), *lane);
        }
        i += stride;
    }

    while i + width <= len {
        acc[0] = V::load(pa.add(i)).mul_add(V::load(pb.add(i)), acc[0]);
        i += width;
    }

    if i < len {
        let rest = len - i;
        acc[1] = V::load_partial(pa.add(i), rest).mul_add(V::load_partial(pb.add(i), rest), acc[1]);
    }

    combine(acc)
}

/// Register tile update `C[0..TILE_ROWS, 0..2W] += A[0..TILE_ROWS, 0..kc] · B[0..kc, 0..2W]`.
///
/// The tile of C stays in registers for the whole `kc` loop and each cell receives its
/// products in increasing `p` order, the same order as the naive triple loop.
///
/// # Safety
///
/// The CPU must support the instruction set of `V`; `a`, `b`, `c` must cover the tile
/// (see [`crate::simd::check_tile`]).
#[inline(always)]
pub(crate) unsafe fn tile<T: Copy, V: SimdVec<T>>(
    a: *const T,
    lda: usize,
    b: *const T,
    ldb: usize,
    c: *mut T,
    ldc: usize,
    kc: usize,
) {
    let width = V::LANE_COUNT;

    let mut acc = [[V::zeros(); TILE_REGISTERS]; TILE_ROWS];
    for (r, row) in acc.iter_mut().enumerate() {
        for (j, reg) in row.iter_mut().enumerate() {
            *reg = V::load(c.add(r * ldc + j * width));
        }
    }

    for p in 0..kc {
        let b_row = b.add(p * ldb);
        let b0 = V::load(b_row);
        let b1 = V::load(b_row.add(width));

        for (r, row) in acc.iter_mut().enumerate() {
            let a_rp = V::splat(*a.add(r * lda + p));
            row[0] = a_rp.mul_add(b0, row[0]);
            row[1] = a_rp.mul_add(b1, row[1]);
        }
    }

    for (r, row) in acc.iter().enumerate() {
        for (j, reg) in row.iter().enumerate() {
            reg.store_at(c.add(r * ldc + j * width));
        }
    }
}
