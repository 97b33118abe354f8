//! AVX2 4-lane f64 SIMD vector implementation wrapping `__m256d`.

use std::arch::x86_64::*;
use std::ops::Add;

use crate::simd::traits::SimdVec;

/// Number of f64 elements that fit in an AVX2 256-bit vector.
pub(crate) const LANE_COUNT: usize = 4;

/// 64-bit lane masks for `_mm256_maskload_pd`, indexed by the number of lanes to keep.
const PARTIAL_MASKS: [[i64; LANE_COUNT]; LANE_COUNT] = [
    [0, 0, 0, 0],
    [-1, 0, 0, 0],
    [-1, -1, 0, 0],
    [-1, -1, -1, 0],
];

/// AVX2 SIMD vector containing 4 packed f64 values.
#[derive(Copy, Clone, Debug)]
pub struct F64x4 {
    /// Number of valid elements in the vector (1-4)
    pub size: usize,
    /// AVX2 256-bit vector register containing 4 packed f64 values
    pub elements: __m256d,
}

impl SimdVec<f64> for F64x4 {
    const LANE_COUNT: usize = LANE_COUNT;

    #[inline(always)]
    unsafe fn zeros() -> Self {
        Self {
            size: LANE_COUNT,
            elements: _mm256_setzero_pd(),
        }
    }

    #[inline(always)]
    unsafe fn splat(value: f64) -> Self {
        Self {
            size: LANE_COUNT,
            elements: _mm256_set1_pd(value),
        }
    }

    #[inline(always)]
    unsafe fn load(ptr: *const f64) -> Self {
        debug_assert!(!ptr.is_null(), "Pointer must not be null");

        Self {
            size: LANE_COUNT,
            elements: _mm256_loadu_pd(ptr),
        }
    }

    #[inline(always)]
    unsafe fn load_partial(ptr: *const f64, size: usize) -> Self {
        debug_assert!(size < LANE_COUNT, "Size must be < {LANE_COUNT}");
        debug_assert!(!ptr.is_null(), "Pointer must not be null");

        let mask = _mm256_loadu_si256(PARTIAL_MASKS[size].as_ptr() as *const __m256i);

        Self {
            size,
            elements: _mm256_maskload_pd(ptr, mask),
        }
    }

    #[inline(always)]
    unsafe fn store_at(&self, ptr: *mut f64) {
        _mm256_storeu_pd(ptr, self.elements)
    }

    #[inline(always)]
    unsafe fn mul_add(self, a: Self, b: Self) -> Self {
        Self {
            size: self.size,
            elements: _mm256_fmadd_pd(self.elements, a.elements, b.elements),
        }
    }

    #[inline(always)]
    unsafe fn reduce_add(self) -> f64 {
        let low = _mm256_castpd256_pd128(self.elements);
        let high = _mm256_extractf128_pd::<1>(self.elements);
        let pair = _mm_add_pd(low, high);
        let single = _mm_add_sd(pair, _mm_unpackhi_pd(pair, pair));
        _mm_cvtsd_f64(single)
    }
}

impl Add for F64x4 {
    type Output = Self;

    #[inline(always)]
    fn add(self, rhs: Self) -> Self::Output {
        Self {
            size: self.size.max(rhs.size),
            elements: unsafe { _mm256_add_pd(self.elements, rhs.elements) },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract_elements(vec: &F64x4) -> [f64; 4] {
        let mut result = [0.0f64; 4];
        unsafe { vec.store_at(result.as_mut_ptr()) };
        result
    }

    #[test]
    fn test_load_partial_each_size() {
        let data = [1.0f64, 2.0, 3.0];
        for size in 1..LANE_COUNT {
            let vec = unsafe { F64x4::load_partial(data.as_ptr(), size) };
            let lanes = extract_elements(&vec);
            for (i, &lane) in lanes.iter().enumerate() {
                let expected = if i < size { data[i] } else { 0.0 };
                assert_eq!(lane, expected, "size {size}, lane {i}");
            }
        }
    }

    #[test]
    fn test_mul_add_and_reduce() {
        let a = [1.0f64, 2.0, 3.0, 4.0];
        let b = [0.5f64, 0.25, 2.0, -1.0];
        let dot = unsafe {
            F64x4::load(a.as_ptr())
                .mul_add(F64x4::load(b.as_ptr()), F64x4::zeros())
                .reduce_add()
        };
        assert_eq!(dot, 0.5 + 0.5 + 6.0 - 4.0);
    }

    #[test]
    fn test_add_operator() {
        let a = unsafe { F64x4::splat(1.25) };
        let b = unsafe { F64x4::splat(-0.25) };
        assert_eq!(extract_elements(&(a + b)), [1.0; 4]);
    }
}
