use tracing::{info, instrument};

use crate::config::TrainingConfig;
use crate::error::{NetError, Result};
use crate::nn::network::Network;
use crate::nn::optim::SGD;

/// Number of most recent losses a loss plot shows
pub const LOSS_WINDOW: usize = 200;

/// Repeated single-sample gradient descent on one network, with its loss history
#[derive(Debug, Clone)]
pub struct Trainer {
    network: Network,
    optimizer: SGD,
    loss_history: Vec<f64>,
    steps: usize,
}

impl Trainer {
    pub fn new(network: Network, learning_rate: f64) -> Self {
        Self {
            network,
            optimizer: SGD::new(learning_rate),
            loss_history: Vec::new(),
            steps: 0,
        }
    }

    pub fn from_config(config: &TrainingConfig) -> Result<Self> {
        Ok(Self::new(config.build_network()?, config.learning_rate))
    }

    pub fn network(&self) -> &Network {
        &self.network
    }

    pub fn into_network(self) -> Network {
        self.network
    }

    pub fn learning_rate(&self) -> f64 {
        self.optimizer.learning_rate
    }

    pub fn set_learning_rate(&mut self, learning_rate: f64) {
        self.optimizer.learning_rate = learning_rate;
    }

    /// Number of gradient updates applied since the last reset
    pub fn steps(&self) -> usize {
        self.steps
    }

    pub fn loss_history(&self) -> &[f64] {
        &self.loss_history
    }

    /// The last `n` recorded losses, oldest first
    pub fn recent_losses(&self, n: usize) -> &[f64] {
        let start = self.loss_history.len().saturating_sub(n);
        &self.loss_history[start..]
    }

    pub fn last_loss(&self) -> Option<f64> {
        self.loss_history.last().copied()
    }

    /// Run `iterations` backprop/update rounds on one sample and return the
    /// loss of the final round. Zero iterations runs a single round.
    ///
    /// Input and target widths are checked before the network is touched.
    #[instrument(skip(self, input, target), fields(step = self.steps))]
    pub fn train_step(&mut self, input: &[f64], target: &[f64], iterations: usize) -> Result<f64> {
        if input.len() != self.network.input_size() {
            return Err(NetError::shape("input", self.network.input_size(), input.len()));
        }
        if target.len() != self.network.output_size() {
            return Err(NetError::shape("target", self.network.output_size(), target.len()));
        }

        let mut loss = f64::NAN;
        for _ in 0..iterations.max(1) {
            let gradient = self.network.backprop(input, target)?;
            self.optimizer.step(&mut self.network, &gradient)?;
            loss = gradient.loss;
            self.loss_history.push(loss);
            self.steps += 1;
        }

        info!(steps = self.steps, loss, "training step complete");
        Ok(loss)
    }

    /// Replace the network with a freshly initialised one and clear the history
    pub fn reset(&mut self, sizes: &[usize], activation_name: &str) -> Result<()> {
        self.network = Network::new(sizes, activation_name)?;
        self.loss_history.clear();
        self.steps = 0;
        Ok(())
    }

    /// Swap in a prepared network and clear the history
    pub fn replace_network(&mut self, network: Network) {
        self.network = network;
        self.loss_history.clear();
        self.steps = 0;
    }
}
