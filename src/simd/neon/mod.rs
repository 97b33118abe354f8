//! ARM NEON SIMD implementations for 128-bit vector operations.
//!
//! This module contains the aarch64 backend, built on ARM's Advanced SIMD (NEON)
//! instruction set, available on all AArch64 processors including Apple Silicon and
//! AWS Graviton.
//!
//! # Available Types
//!
//! - [`f32x4::F32x4`]: 4 packed single-precision values
//! - [`f64x2::F64x2`]: 2 packed double-precision values
//!
//! # Conditional Compilation
//!
//! This module is only compiled when `build.rs` emits `cfg(neon)`. Horizontal sums use
//! `vaddvq`, and multiply-adds use the fused `vfmaq` instructions.

pub mod f32x4;

pub mod f64x2;

pub(crate) mod kernels;
