//! AVX2 8-lane f32 SIMD vector implementation.
//!
//! `F32x8` wraps Intel's `__m256` register. It is only constructed inside the AVX2
//! backend, which `build.rs` enables when the host CPU reports both AVX2 and FMA.

use std::arch::x86_64::*;
use std::ops::{Add, Mul};

use crate::simd::traits::SimdVec;

/// Number of f32 elements that fit in an AVX2 256-bit vector.
pub(crate) const LANE_COUNT: usize = 8;

/// Lane masks for `_mm256_maskload_ps`, indexed by the number of leading lanes to keep.
const PARTIAL_MASKS: [[i32; LANE_COUNT]; LANE_COUNT] = [
    [0, 0, 0, 0, 0, 0, 0, 0],
    [-1, 0, 0, 0, 0, 0, 0, 0],
    [-1, -1, 0, 0, 0, 0, 0, 0],
    [-1, -1, -1, 0, 0, 0, 0, 0],
    [-1, -1, -1, -1, 0, 0, 0, 0],
    [-1, -1, -1, -1, -1, 0, 0, 0],
    [-1, -1, -1, -1, -1, -1, 0, 0],
    [-1, -1, -1, -1, -1, -1, -1, 0],
];

/// AVX2 SIMD vector containing 8 packed f32 values.
#[derive(Copy, Clone, Debug)]
pub struct F32x8 {
    /// Number of valid elements in the vector (1-8)
    pub size: usize,
    /// AVX2 256-bit vector register containing 8 packed f32 values
    pub elements: __m256,
}

impl SimdVec<f32> for F32x8 {
    const LANE_COUNT: usize = LANE_COUNT;

    #[inline(always)]
    unsafe fn zeros() -> Self {
        Self {
            size: LANE_COUNT,
            elements: _mm256_setzero_ps(),
        }
    }

    #[inline(always)]
    unsafe fn splat(value: f32) -> Self {
        Self {
            size: LANE_COUNT,
            elements: _mm256_set1_ps(value),
        }
    }

    #[inline(always)]
    unsafe fn load(ptr: *const f32) -> Self {
        debug_assert!(!ptr.is_null(), "Pointer must not be null");

        Self {
            size: LANE_COUNT,
            elements: _mm256_loadu_ps(ptr),
        }
    }

    /// Loads fewer than 8 elements with `_mm256_maskload_ps`; masked lanes read as zero
    /// and are never touched in memory.
    #[inline(always)]
    unsafe fn load_partial(ptr: *const f32, size: usize) -> Self {
        debug_assert!(size < LANE_COUNT, "Size must be < {LANE_COUNT}");
        debug_assert!(!ptr.is_null(), "Pointer must not be null");

        let mask = _mm256_loadu_si256(PARTIAL_MASKS[size].as_ptr() as *const __m256i);

        Self {
            size,
            elements: _mm256_maskload_ps(ptr, mask),
        }
    }

    #[inline(always)]
    unsafe fn store_at(&self, ptr: *mut f32) {
        _mm256_storeu_ps(ptr, self.elements)
    }

    #[inline(always)]
    unsafe fn mul_add(self, a: Self, b: Self) -> Self {
        Self {
            size: self.size,
            elements: _mm256_fmadd_ps(self.elements, a.elements, b.elements),
        }
    }

    /// Folds the two 128-bit halves, then the pairs, then the last two lanes.
    #[inline(always)]
    unsafe fn reduce_add(self) -> f32 {
        let low = _mm256_castps256_ps128(self.elements);
        let high = _mm256_extractf128_ps::<1>(self.elements);
        let quad = _mm_add_ps(low, high);
        let dual = _mm_add_ps(quad, _mm_movehl_ps(quad, quad));
        let single = _mm_add_ss(dual, _mm_shuffle_ps::<0b01>(dual, dual));
        _mm_cvtss_f32(single)
    }
}

/// Element-wise addition using `_mm256_add_ps`.
impl Add for F32x8 {
    type Output = Self;

    #[inline(always)]
    fn add(self, rhs: Self) -> Self::Output {
        Self {
            size: self.size.max(rhs.size),
            elements: unsafe { _mm256_add_ps(self.elements, rhs.elements) },
        }
    }
}

/// Element-wise multiplication using `_mm256_mul_ps`.
impl Mul for F32x8 {
    type Output = Self;

    #[inline(always)]
    fn mul(self, rhs: Self) -> Self::Output {
        Self {
            size: self.size.max(rhs.size),
            elements: unsafe { _mm256_mul_ps(self.elements, rhs.elements) },
        }
    }
}
