//! Feedforward network engine: activations, loss, backpropagation and training

pub mod activation;
pub mod inspect;
pub mod loss;
pub mod network;
pub mod optim;
pub mod train;

pub use activation::Activation;
pub use inspect::EdgeInspection;
pub use loss::mse_loss;
pub use network::{ForwardTrace, Gradient, Network};
pub use optim::SGD;
pub use train::{Trainer, LOSS_WINDOW};
