use std::arch::aarch64::*;
use std::ops::Add;
use std::ptr;

use crate::simd::traits::SimdVec;

pub const LANE_COUNT: usize = 4;

/// A SIMD vector of 4 32-bit floating point values
#[derive(Copy, Clone, Debug)]
pub struct F32x4 {
    size: usize,
    elements: float32x4_t,
}

impl SimdVec<f32> for F32x4 {
    const LANE_COUNT: usize = LANE_COUNT;

    #[inline(always)]
    unsafe fn zeros() -> Self {
        Self::splat(0.0)
    }

    #[inline(always)]
    unsafe fn splat(value: f32) -> Self {
        Self {
            elements: vdupq_n_f32(value),
            size: LANE_COUNT,
        }
    }

    #[inline(always)]
    unsafe fn load(ptr: *const f32) -> Self {
        debug_assert!(!ptr.is_null(), "Pointer must not be null");

        Self {
            elements: vld1q_f32(ptr),
            size: LANE_COUNT,
        }
    }

    /// Copies the valid elements into a zeroed staging array so nothing past `size` is read.
    #[inline(always)]
    unsafe fn load_partial(ptr: *const f32, size: usize) -> Self {
        debug_assert!(size < LANE_COUNT, "Size must be < {LANE_COUNT}");
        debug_assert!(!ptr.is_null(), "Pointer must not be null");

        let mut staged = [0.0f32; LANE_COUNT];
        ptr::copy_nonoverlapping(ptr, staged.as_mut_ptr(), size);

        Self {
            elements: vld1q_f32(staged.as_ptr()),
            size,
        }
    }

    #[inline(always)]
    unsafe fn store_at(&self, ptr: *mut f32) {
        vst1q_f32(ptr, self.elements)
    }

    #[inline(always)]
    unsafe fn mul_add(self, a: Self, b: Self) -> Self {
        Self {
            elements: vfmaq_f32(b.elements, self.elements, a.elements),
            size: self.size,
        }
    }

    #[inline(always)]
    unsafe fn reduce_add(self) -> f32 {
        vaddvq_f32(self.elements)
    }
}

impl Add for F32x4 {
    type Output = Self;

    #[inline(always)]
    fn add(self, rhs: Self) -> Self::Output {
        Self {
            elements: unsafe { vaddq_f32(self.elements, rhs.elements) },
            size: self.size.max(rhs.size),
        }
    }
}
