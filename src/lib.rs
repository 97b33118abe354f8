//! Hand-optimized dense kernels over flat, row-major buffers.
//!
//! Four leaf kernels are provided, each generic over [`Element`] (`f32` and `f64`):
//!
//! | Kernel | Computes |
//! |--------|----------|
//! | [`sum`] | Σ x\[i\] |
//! | [`dot`] | Σ a\[i\]·b\[i\] |
//! | [`matvec`] | out\[r\] = Σ_c M\[r,c\]·v\[c\] for a row-major R×C matrix |
//! | [`matmul`] | C = A·B for row-major A (M×K), B (K×N), C (M×N) |
//!
//! Reductions use several independent SIMD accumulators that are combined at the end,
//! so results differ from strict left-to-right accumulation by a small rounding amount.
//! `matmul` is cache blocked (`NC`/`KC`/`MC` panels) around an MR×NR register tile.
//!
//! The SIMD backend is chosen once at build time by `build.rs` (AVX2+FMA on x86_64,
//! NEON on aarch64, portable lane arrays otherwise); [`BACKEND`] names the one in use.
//!
//! Shape mismatches are caller bugs: the kernels panic before computing anything.
//! Use the [`shape`] checks to validate dimensions up front.
//!
//! ```rust
//! use lanekit::{dot, matmul, sum};
//!
//! let x = [1.0f64, 2.0, 3.0, 4.0, 5.0];
//! assert_eq!(sum(&x), 15.0);
//! assert_eq!(dot(&x, &x), 55.0);
//!
//! // 2x3 · 3x2
//! let a = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
//! let b = [7.0, 8.0, 9.0, 10.0, 11.0, 12.0];
//! let mut c = [f64::NAN; 4];
//! matmul(&a, &b, &mut c, 2, 2, 3);
//! assert_eq!(c, [58.0, 64.0, 139.0, 154.0]);
//! ```

pub mod element;
pub mod error;
pub mod kernels;
pub mod reference;
pub mod shape;
pub mod simd;

pub use element::Element;
pub use error::{KernelError, Result};
pub use kernels::{dot, matmul, matvec, par_matmul, par_matvec, sum};
pub use simd::traits::{SimdDot, SimdSum};
pub use simd::BACKEND;

/// Rows of A (and C) per L2 block.
pub const MC: usize = 64;
/// Columns of B (and C) per L3 panel.
pub const NC: usize = 256;
/// Depth of the A block and B panel kept resident while a C tile accumulates.
pub const KC: usize = 256;

/// Minimum number of multiply-adds before the `par_*` kernels hand work to Rayon.
pub const PARALLEL_THRESHOLD: usize = 1 << 16;
