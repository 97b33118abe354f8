//! Error types describing kernel contract violations.
//!
//! The kernels treat a mismatched shape as a caller bug and panic with the
//! message of the corresponding [`KernelError`]. Callers who prefer to check
//! first use the functions in [`crate::shape`], which return these errors.

use thiserror::Error;

/// A shape or length contract violation between kernel operands.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KernelError {
    /// Two sequences that must have the same length do not.
    #[error("Length mismatch: left operand has {left} elements, right operand has {right}")]
    LengthMismatch {
        /// Length of the left operand.
        left: usize,
        /// Length of the right operand.
        right: usize,
    },
    /// A buffer does not hold exactly `rows * cols` elements.
    #[error(
        "Shape mismatch: {operand} is declared {rows}x{cols} ({expected} elements) but holds {actual}"
    )]
    ShapeMismatch {
        /// Which operand is wrong (`"A"`, `"matrix"`, `"output"`, ...).
        operand: &'static str,
        /// Declared number of rows.
        rows: usize,
        /// Declared number of columns.
        cols: usize,
        /// `rows * cols`.
        expected: usize,
        /// Actual buffer length.
        actual: usize,
    },
    /// `rows * cols` does not fit in `usize`.
    #[error("Dimension overflow: {rows}x{cols} elements do not fit in usize")]
    DimensionOverflow {
        /// Declared number of rows.
        rows: usize,
        /// Declared number of columns.
        cols: usize,
    },
}

/// Result type alias for shape validation.
pub type Result<T> = std::result::Result<T, KernelError>;

/// Creates a length mismatch error.
pub fn length_mismatch(left: usize, right: usize) -> KernelError {
    KernelError::LengthMismatch { left, right }
}

/// Creates a shape mismatch error for `operand`.
pub fn shape_mismatch(operand: &'static str, rows: usize, cols: usize, actual: usize) -> KernelError {
    KernelError::ShapeMismatch {
        operand,
        rows,
        cols,
        expected: rows.saturating_mul(cols),
        actual,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_mismatch_display() {
        let error = length_mismatch(512, 511);
        let display = format!("{error}");
        assert!(display.contains("Length mismatch"));
        assert!(display.contains("512"));
        assert!(display.contains("511"));
    }

    #[test]
    fn test_shape_mismatch_display() {
        let error = shape_mismatch("B", 72, 144, 10);
        let display = format!("{error}");
        assert!(display.contains("B is declared 72x144"));
        assert!(display.contains("10368 elements"));
        assert!(display.contains("holds 10"));
    }

    #[test]
    fn test_overflow_display() {
        let error = KernelError::DimensionOverflow {
            rows: usize::MAX,
            cols: 2,
        };
        assert!(format!("{error}").contains("do not fit in usize"));
    }

    #[test]
    fn test_error_equality() {
        assert_eq!(length_mismatch(3, 4), length_mismatch(3, 4));
        assert_ne!(length_mismatch(3, 4), length_mismatch(4, 3));
    }

    #[test]
    fn test_error_trait_implementation() {
        let error = shape_mismatch("C", 2, 2, 3);
        let _: &dyn std::error::Error = &error;
        assert!(std::error::Error::source(&error).is_none());
    }
}
