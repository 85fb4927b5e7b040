use tracing::instrument;

use crate::error::Result;
use crate::nn::network::{Gradient, Network};

/// Plain gradient descent
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SGD {
    pub learning_rate: f64,
}

impl SGD {
    /// Create a new SGD optimizer with given learning rate
    pub fn new(learning_rate: f64) -> Self {
        Self { learning_rate }
    }

    /// Update parameters using their gradients
    /// Formula: param = param - learning_rate * grad
    #[instrument(skip(self, network, gradient), fields(lr = self.learning_rate, loss = gradient.loss))]
    pub fn step(&self, network: &mut Network, gradient: &Gradient) -> Result<()> {
        network.apply_gradient(gradient, self.learning_rate)
    }
}

impl Default for SGD {
    fn default() -> Self {
        Self::new(0.1)
    }
}
