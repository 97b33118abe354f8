//! The four public kernels.
//!
//! All kernels take flat row-major buffers plus explicit dimensions, write only their
//! output buffer and never allocate. Shape violations panic before any output is
//! written; see [`crate::shape`] for the fallible checks.

mod dot;
mod matmul;
mod matvec;
mod sum;

pub use self::dot::dot;
pub use self::matmul::{matmul, par_matmul};
pub use self::matvec::{matvec, par_matvec};
pub use self::sum::sum;
