use std::ops::Add;

/// A hardware vector register holding `LANE_COUNT` values of `T`.
///
/// Implemented by the backend vector types (`F32x8`, `F64x4`, `F32x4`, `F64x2`);
/// the lane algorithms in `simd::lanes` are written once against this trait.
pub trait SimdVec<T>: Copy + Add<Output = Self> {
    /// Number of `T` values in one register.
    const LANE_COUNT: usize;

    /// All lanes set to zero.
    ///
    /// # Safety
    ///
    /// The CPU must support the backend's instruction set.
    unsafe fn zeros() -> Self;

    /// All lanes set to `value`.
    ///
    /// # Safety
    ///
    /// The CPU must support the backend's instruction set.
    unsafe fn splat(value: T) -> Self;

    /// Loads `LANE_COUNT` values.
    ///
    /// # Safety
    ///
    /// `ptr` must be valid for `LANE_COUNT` reads. No alignment is required.
    unsafe fn load(ptr: *const T) -> Self;

    /// Loads `size < LANE_COUNT` values, the remaining lanes are zero.
    ///
    /// # Safety
    ///
    /// `ptr` must be valid for `size` reads.
    unsafe fn load_partial(ptr: *const T, size: usize) -> Self;

    /// Stores `LANE_COUNT` values.
    ///
    /// # Safety
    ///
    /// `ptr` must be valid for `LANE_COUNT` writes.
    unsafe fn store_at(&self, ptr: *mut T);

    /// `self * a + b` per lane (fused where the hardware supports it).
    ///
    /// # Safety
    ///
    /// The CPU must support the backend's instruction set.
    unsafe fn mul_add(self, a: Self, b: Self) -> Self;

    /// Horizontal sum of all lanes, combined pairwise.
    ///
    /// # Safety
    ///
    /// The CPU must support the backend's instruction set.
    unsafe fn reduce_add(self) -> T;
}

/// Lane-parallel summation of a sequence.
pub trait SimdSum {
    type Output;

    /// Sums with the build's SIMD backend (multiple accumulators, reordered rounding).
    fn simd_sum(self) -> Self::Output;
    /// Sums strictly left to right.
    fn scalar_sum(self) -> Self::Output;
}

/// Lane-parallel dot product of two equal-length sequences.
pub trait SimdDot<Rhs = Self> {
    type Output;

    /// Dot product with the build's SIMD backend.
    ///
    /// # Panics
    ///
    /// Panics if the operands have different lengths.
    fn simd_dot(self, rhs: Rhs) -> Self::Output;
    /// Dot product accumulated strictly left to right.
    ///
    /// # Panics
    ///
    /// Panics if the operands have different lengths.
    fn scalar_dot(self, rhs: Rhs) -> Self::Output;
}
