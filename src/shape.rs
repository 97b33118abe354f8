//! Shape validation for kernel operands.
//!
//! Every `check_*` function returns `Ok(())` exactly when the corresponding kernel
//! accepts its operands. The kernels run the same checks through [`require`] and
//! panic on failure, before touching any output.

use crate::error::{length_mismatch, shape_mismatch, KernelError, Result};

/// Number of elements in a `rows x cols` matrix.
pub fn element_count(rows: usize, cols: usize) -> Result<usize> {
    rows.checked_mul(cols)
        .ok_or(KernelError::DimensionOverflow { rows, cols })
}

/// Checks that `actual` is the length of a `rows x cols` buffer.
pub fn check_matrix(operand: &'static str, actual: usize, rows: usize, cols: usize) -> Result<()> {
    if element_count(rows, cols)? != actual {
        return Err(shape_mismatch(operand, rows, cols, actual));
    }
    Ok(())
}

/// Operands of [`crate::dot`] must have equal lengths.
pub fn check_dot(a_len: usize, b_len: usize) -> Result<()> {
    if a_len != b_len {
        return Err(length_mismatch(a_len, b_len));
    }
    Ok(())
}

/// Operands of [`crate::matvec`]: a `rows x cols` matrix, a `cols` vector, a `rows` output.
pub fn check_matvec(
    matrix_len: usize,
    rows: usize,
    cols: usize,
    vector_len: usize,
    out_len: usize,
) -> Result<()> {
    check_matrix("matrix", matrix_len, rows, cols)?;
    check_matrix("vector", vector_len, cols, 1)?;
    check_matrix("output", out_len, rows, 1)
}

/// Operands of [`crate::matmul`]: A is `m x k`, B is `k x n`, C is `m x n`.
pub fn check_matmul(
    a_len: usize,
    b_len: usize,
    c_len: usize,
    m: usize,
    n: usize,
    k: usize,
) -> Result<()> {
    check_matrix("A", a_len, m, k)?;
    check_matrix("B", b_len, k, n)?;
    check_matrix("C", c_len, m, n)
}

/// Turns a failed check into the kernels' contract-violation panic.
#[inline]
#[track_caller]
pub(crate) fn require(check: Result<()>) {
    if let Err(error) = check {
        panic!("{error}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_dot() {
        assert!(check_dot(0, 0).is_ok());
        assert!(check_dot(17, 17).is_ok());
        assert_eq!(check_dot(17, 16), Err(length_mismatch(17, 16)));
    }

    #[test]
    fn test_check_matvec_accepts_exact_shapes() {
        assert!(check_matvec(32 * 64, 32, 64, 64, 32).is_ok());
        assert!(check_matvec(0, 0, 5, 5, 0).is_ok());
        assert!(check_matvec(0, 3, 0, 0, 3).is_ok());
    }

    #[test]
    fn test_check_matvec_reports_the_wrong_operand() {
        let err = check_matvec(32 * 64, 32, 64, 63, 32).unwrap_err();
        assert_eq!(err, shape_mismatch("vector", 64, 1, 63));

        let err = check_matvec(32 * 64, 32, 64, 64, 33).unwrap_err();
        assert_eq!(err, shape_mismatch("output", 32, 1, 33));

        let err = check_matvec(100, 32, 64, 64, 32).unwrap_err();
        assert_eq!(err, shape_mismatch("matrix", 32, 64, 100));
    }

    #[test]
    fn test_check_matmul() {
        assert!(check_matmul(144 * 72, 72 * 216, 144 * 216, 144, 216, 72).is_ok());
        assert!(check_matmul(0, 0, 12, 3, 4, 0).is_ok());

        let err = check_matmul(6, 6, 5, 2, 3, 3).unwrap_err();
        assert_eq!(err, shape_mismatch("B", 3, 3, 6));
    }

    #[test]
    fn test_overflow_is_reported() {
        let err = check_matrix("A", 0, usize::MAX, 2).unwrap_err();
        assert_eq!(
            err,
            KernelError::DimensionOverflow {
                rows: usize::MAX,
                cols: 2
            }
        );
    }

    #[test]
    #[should_panic(expected = "Length mismatch")]
    fn test_require_panics_with_error_message() {
        require(check_dot(1, 2));
    }
}
