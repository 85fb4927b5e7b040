//! Dense linear algebra used by the network engine
//!
//! This module provides the row-major `Matrix` type holding a layer's weights
//! and the matrix-vector kernels behind forward and backward propagation.

mod core;
pub mod kernels;

pub use self::core::{sample_grid_vector, Matrix, INIT_SCALE, INIT_STEPS};
