//! A minimal feedforward neural network engine
//!
//! Networks are strict chains of fully-connected layers sharing one activation
//! function. The crate provides construction, forward propagation, mean squared
//! error, backpropagation and plain gradient descent, plus a small trainer that
//! keeps a loss history.
//!
//! ```
//! use simple_nn::Network;
//!
//! let mut net = Network::new(&[2, 3, 1], "Sigmoid")?;
//! let gradient = net.backprop(&[1.0, 0.5], &[0.8])?;
//! net.apply_gradient(&gradient, 0.1)?;
//! # Ok::<(), simple_nn::NetError>(())
//! ```

pub mod config;
pub mod error;
pub mod nn;
pub mod tensor;

// Re-export commonly used types for convenience
pub use config::TrainingConfig;
pub use error::{NetError, Result};
pub use nn::*;
pub use tensor::Matrix;
