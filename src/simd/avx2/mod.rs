//! AVX2 SIMD implementations for 256-bit vector operations.
//!
//! This module contains the x86_64 backend, built on Intel's Advanced Vector Extensions 2
//! together with fused multiply-add (FMA3). Both are available on Intel processors since
//! Haswell (2013) and AMD processors since Excavator (2015).
//!
//! # Architecture Requirements
//!
//! - **CPU Support**: AVX2 and FMA
//! - **Target Architecture**: x86_64
//! - **Detection**: `build.rs` enables this module only when the host reports both features
//!
//! # Available Types
//!
//! - [`f32x8::F32x8`]: 8 packed single-precision values
//! - [`f64x4::F64x4`]: 4 packed double-precision values
//!
//! The kernels themselves (`kernels`) instantiate the shared lane algorithms with these
//! register types inside `#[target_feature(enable = "avx2,fma")]` functions.

pub mod f32x8;

pub mod f64x4;

pub(crate) mod kernels;
