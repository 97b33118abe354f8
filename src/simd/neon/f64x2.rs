use std::arch::aarch64::*;
use std::ops::Add;
use std::ptr;

use crate::simd::traits::SimdVec;

pub const LANE_COUNT: usize = 2;

/// A SIMD vector of 2 64-bit floating point values
#[derive(Copy, Clone, Debug)]
pub struct F64x2 {
    size: usize,
    elements: float64x2_t,
}

impl SimdVec<f64> for F64x2 {
    const LANE_COUNT: usize = LANE_COUNT;

    #[inline(always)]
    unsafe fn zeros() -> Self {
        Self::splat(0.0)
    }

    #[inline(always)]
    unsafe fn splat(value: f64) -> Self {
        Self {
            elements: vdupq_n_f64(value),
            size: LANE_COUNT,
        }
    }

    #[inline(always)]
    unsafe fn load(ptr: *const f64) -> Self {
        debug_assert!(!ptr.is_null(), "Pointer must not be null");

        Self {
            elements: vld1q_f64(ptr),
            size: LANE_COUNT,
        }
    }

    #[inline(always)]
    unsafe fn load_partial(ptr: *const f64, size: usize) -> Self {
        debug_assert!(size < LANE_COUNT, "Size must be < {LANE_COUNT}");

        let mut staged = [0.0f64; LANE_COUNT];
        ptr::copy_nonoverlapping(ptr, staged.as_mut_ptr(), size);

        Self {
            elements: vld1q_f64(staged.as_ptr()),
            size,
        }
    }

    #[inline(always)]
    unsafe fn store_at(&self, ptr: *mut f64) {
        vst1q_f64(ptr, self.elements)
    }

    #[inline(always)]
    unsafe fn mul_add(self, a: Self, b: Self) -> Self {
        Self {
            elements: vfmaq_f64(b.elements, self.elements, a.elements),
            size: self.size,
        }
    }

    #[inline(always)]
    unsafe fn reduce_add(self) -> f64 {
        vaddvq_f64(self.elements)
    }
}

impl Add for F64x2 {
    type Output = Self;

    #[inline(always)]
    fn add(self, rhs: Self) -> Self::Output {
        Self {
            elements: unsafe { vaddq_f64(self.elements, rhs.elements) },
            size: self.size.max(rhs.size),
        }
    }
}
