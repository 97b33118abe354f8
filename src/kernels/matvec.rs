use rayon::prelude::*;

use crate::{
    shape::{check_matvec, require},
    Element, PARALLEL_THRESHOLD,
};

/// Matrix-vector product `out[r] = Σ_c matrix[r*cols + c] · vector[c]`.
///
/// `matrix` is `rows x cols`, row-major. Every row is reduced with the same lane
/// strategy as [`crate::dot`]. `out` is fully overwritten; with `cols == 0` it is
/// zero-filled.
///
/// # Panics
///
/// Panics unless `matrix.len() == rows * cols`, `vector.len() == cols` and
/// `out.len() == rows`.
///
/// # Examples
///
/// ```rust
/// let matrix = [1.0f64, 2.0, 3.0, 4.0, 5.0, 6.0];
/// let mut out = [0.0; 2];
/// lanekit::matvec(&matrix, 2, 3, &[1.0, 0.0, -1.0], &mut out);
/// assert_eq!(out, [-2.0, -2.0]);
/// ```
#[track_caller]
pub fn matvec<T: Element>(matrix: &[T], rows: usize, cols: usize, vector: &[T], out: &mut [T]) {
    require(check_matvec(matrix.len(), rows, cols, vector.len(), out.len()));

    if cols == 0 {
        out.fill(T::zero());
        return;
    }

    for (slot, row) in out.iter_mut().zip(matrix.chunks_exact(cols)) {
        *slot = T::lane_dot(row, vector);
    }
}

/// [`matvec`] with the output rows split across the Rayon thread pool.
///
/// Each row is computed exactly as in [`matvec`], so both give bit-identical results.
/// Runs sequentially when `rows * cols` is below [`PARALLEL_THRESHOLD`].
///
/// # Panics
///
/// Same preconditions as [`matvec`].
#[track_caller]
pub fn par_matvec<T: Element>(matrix: &[T], rows: usize, cols: usize, vector: &[T], out: &mut [T]) {
    require(check_matvec(matrix.len(), rows, cols, vector.len(), out.len()));

    if cols == 0 || rows * cols < PARALLEL_THRESHOLD {
        return matvec(matrix, rows, cols, vector, out);
    }

    out.par_iter_mut()
        .zip(matrix.par_chunks_exact(cols))
        .for_each(|(slot, row)| *slot = T::lane_dot(row, vector));
}
