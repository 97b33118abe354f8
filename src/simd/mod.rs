//! Build-time selected SIMD backends.
//!
//! `build.rs` emits exactly one of `cfg(avx2)`, `cfg(neon)` or `cfg(fallback)`.
//! The chosen module is re-exported as `backend`; [`crate::Element`] routes every
//! kernel through it, so a single code path is compiled per build.

#[cfg(avx2)]
pub mod avx2;

#[cfg(neon)]
pub mod neon;

pub mod portable;

#[cfg(any(avx2, neon))]
pub(crate) mod lanes;

pub mod traits;

#[cfg(avx2)]
pub(crate) use avx2::kernels as backend;

#[cfg(neon)]
pub(crate) use neon::kernels as backend;

#[cfg(not(any(avx2, neon)))]
pub(crate) use portable as backend;

/// Name of the backend compiled into this build (`"avx2"`, `"neon"` or `"portable"`).
pub const BACKEND: &str = backend::NAME;

/// Panics unless a register tile with the given extents fits inside its operands.
///
/// `a` holds `rows` rows of stride `lda` with `kc` used columns, `b` holds `kc` rows of
/// stride `ldb` with `cols` used columns, `c` holds `rows` rows of stride `ldc`.
#[allow(clippy::too_many_arguments)]
#[inline(always)]
pub(crate) fn check_tile(
    a_len: usize,
    lda: usize,
    b_len: usize,
    ldb: usize,
    c_len: usize,
    ldc: usize,
    rows: usize,
    cols: usize,
    kc: usize,
) {
    if rows == 0 || cols == 0 {
        return;
    }
    assert!(c_len >= (rows - 1) * ldc + cols, "register tile overruns C");
    if kc == 0 {
        return;
    }
    assert!(a_len >= (rows - 1) * lda + kc, "register tile overruns A");
    assert!(b_len >= (kc - 1) * ldb + cols, "register tile overruns B");
}
