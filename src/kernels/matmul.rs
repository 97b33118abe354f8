use rayon::prelude::*;

use crate::{
    shape::{check_matmul, require},
    simd::portable::edge_tile,
    Element, KC, MC, NC, PARALLEL_THRESHOLD,
};

/// Matrix product `C = A·B` for row-major A (`m x k`), B (`k x n`) and C (`m x n`).
///
/// C is zero-filled first and then accumulated. The loop nest is blocked for the cache
/// hierarchy: `NC`-column panels of B, `KC`-deep slices of A and B, `MC`-row blocks of A,
/// and inside a block an MR×NR register tile of C that stays in registers across the
/// whole `KC` slice. Tiles along the right and bottom edges of C are computed with
/// their exact extents. Nothing is packed or allocated.
///
/// Each cell of C receives its products in increasing `k` order, the same order as the
/// naive triple loop; only the use of fused multiply-add can change the rounding.
/// When any of `m`, `n`, `k` is zero, C is left all zeros.
///
/// # Panics
///
/// Panics unless `a.len() == m * k`, `b.len() == k * n` and `c.len() == m * n`.
///
/// # Examples
///
/// ```rust
/// // 2x2 · 2x3
/// let a = [1.0f32, 2.0, 3.0, 4.0];
/// let b = [1.0f32, 0.0, 1.0, 0.0, 1.0, 1.0];
/// let mut c = [0.0; 6];
/// lanekit::matmul(&a, &b, &mut c, 2, 3, 2);
/// assert_eq!(c, [1.0, 2.0, 3.0, 3.0, 4.0, 7.0]);
/// ```
#[track_caller]
pub fn matmul<T: Element>(a: &[T], b: &[T], c: &mut [T], m: usize, n: usize, k: usize) {
    require(check_matmul(a.len(), b.len(), c.len(), m, n, k));

    c.fill(T::zero());
    if m == 0 || n == 0 || k == 0 {
        return;
    }

    gemm_rows(a, b, c, m, n, k);
}

/// [`matmul`] with C split into `MC`-row bands across the Rayon thread pool.
///
/// Every band runs the same blocked loop nest as [`matmul`] over its rows, so the two
/// are bit-identical. Runs sequentially when `m * n * k` is below
/// [`PARALLEL_THRESHOLD`].
///
/// # Panics
///
/// Same preconditions as [`matmul`].
#[track_caller]
pub fn par_matmul<T: Element>(a: &[T], b: &[T], c: &mut [T], m: usize, n: usize, k: usize) {
    require(check_matmul(a.len(), b.len(), c.len(), m, n, k));

    let work = m.saturating_mul(n).saturating_mul(k);
    if work < PARALLEL_THRESHOLD {
        return matmul(a, b, c, m, n, k);
    }

    c.par_chunks_mut(MC * n)
        .zip(a.par_chunks(MC * k))
        .for_each(|(c_band, a_band)| {
            let rows = c_band.len() / n;
            c_band.fill(T::zero());
            gemm_rows(a_band, b, c_band, rows, n, k);
        });
}

/// `C += A·B` over `rows` rows, blocked `jc → pc → ic`.
fn gemm_rows<T: Element>(a: &[T], b: &[T], c: &mut [T], rows: usize, n: usize, k: usize) {
    for jc in (0..n).step_by(NC) {
        let nc = NC.min(n - jc);

        for pc in (0..k).step_by(KC) {
            let kc = KC.min(k - pc);

            for ic in (0..rows).step_by(MC) {
                let mc = MC.min(rows - ic);

                block(
                    &a[ic * k + pc..],
                    k,
                    &b[pc * n + jc..],
                    n,
                    &mut c[ic * n + jc..],
                    n,
                    mc,
                    nc,
                    kc,
                );
            }
        }
    }
}

/// One `mc x nc` block of C over depth `kc`, walked in register tiles `jr → ir`.
#[allow(clippy::too_many_arguments)]
#[inline]
fn block<T: Element>(
    a: &[T],
    lda: usize,
    b: &[T],
    ldb: usize,
    c: &mut [T],
    ldc: usize,
    mc: usize,
    nc: usize,
    kc: usize,
) {
    let (mr, nr) = (T::TILE_ROWS, T::TILE_COLS);

    for jr in (0..nc).step_by(nr) {
        let cols = nr.min(nc - jr);

        for ir in (0..mc).step_by(mr) {
            let rows = mr.min(mc - ir);

            let a_tile = &a[ir * lda..];
            let b_tile = &b[jr..];
            let c_tile = &mut c[ir * ldc + jr..];

            if rows == mr && cols == nr {
                T::register_tile(a_tile, lda, b_tile, ldb, c_tile, ldc, kc);
            } else {
                edge_tile(a_tile, lda, b_tile, ldb, c_tile, ldc, rows, cols, kc);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn naive(a: &[f64], b: &[f64], m: usize, n: usize, k: usize) -> Vec<f64> {
        let mut c = vec![0.0; m * n];
        for i in 0..m {
            for p in 0..k {
                for j in 0..n {
                    c[i * n + j] += a[i * k + p] * b[p * n + j];
                }
            }
        }
        c
    }

    fn small_ints(len: usize, salt: usize) -> Vec<f64> {
        (0..len).map(|i| ((i * 31 + salt) % 9) as f64 - 4.0).collect()
    }

    #[test]
    fn test_integer_inputs_match_naive_exactly() {
        // Integer products and sums below 2^53 are exact under any rounding.
        for &(m, n, k) in &[(1, 1, 1), (4, 8, 3), (5, 9, 7), (13, 17, 11), (64, 64, 64), (65, 257, 33), (3, 300, 260)] {
            let a = small_ints(m * k, 1);
            let b = small_ints(k * n, 2);
            let mut c = vec![f64::NAN; m * n];

            matmul(&a, &b, &mut c, m, n, k);
            assert_eq!(c, naive(&a, &b, m, n, k), "shape {m}x{n}x{k}");
        }
    }

    #[test]
    fn test_zero_depth_clears_c() {
        let mut c = vec![7.0f32; 12];
        matmul(&[], &[], &mut c, 3, 4, 0);
        assert!(c.iter().all(|&x| x == 0.0));
    }

    #[test]
    fn test_empty_output() {
        let mut c: Vec<f64> = Vec::new();
        matmul(&[], &[1.0; 5], &mut c, 0, 5, 1);
        matmul(&[1.0; 5], &[], &mut c, 5, 0, 1);
    }

    #[test]
    #[should_panic(expected = "Shape mismatch: C is declared 2x2 (4 elements) but holds 5")]
    fn test_wrong_output_size_panics() {
        let mut c = [0.0f64; 5];
        matmul(&[1.0; 4], &[1.0; 4], &mut c, 2, 2, 2);
    }

    #[test]
    fn test_parallel_is_bit_identical() {
        let (m, n, k) = (150, 70, 90);
        let a: Vec<f64> = (0..m * k).map(|i| ((i as f64) * 0.37).sin()).collect();
        let b: Vec<f64> = (0..k * n).map(|i| ((i as f64) * 0.11).cos()).collect();

        let mut seq = vec![0.0; m * n];
        let mut par = vec![1.0; m * n];
        matmul(&a, &b, &mut seq, m, n, k);
        par_matmul(&a, &b, &mut par, m, n, k);

        assert_eq!(seq, par);
    }
}
