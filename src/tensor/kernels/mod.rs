//! Kernel implementations for matrix operations
//!
//! A fully-connected layer only ever multiplies a matrix by a single vector,
//! so the kernels here are GEMV-shaped rather than GEMM-shaped.

pub mod gemv;

pub use gemv::{axpy, matvec, matvec_transposed, outer};
