//! Training configuration

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{NetError, Result};
use crate::nn::network::Network;

/// Architecture, activation and sample for a training session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingConfig {
    pub input_size: usize,
    /// Hidden widths in order; zero entries are dropped
    pub hidden_sizes: Vec<usize>,
    pub output_size: usize,
    /// Activation name; unknown names resolve to Sigmoid
    pub activation: String,
    pub learning_rate: f64,
    /// Backprop/update rounds per training step
    pub iterations_per_step: usize,
    pub inputs: Vec<f64>,
    pub targets: Vec<f64>,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            input_size: 2,
            hidden_sizes: Vec::new(),
            output_size: 1,
            activation: "Sigmoid".to_string(),
            learning_rate: 0.1,
            iterations_per_step: 1,
            inputs: vec![1.0, 0.5],
            targets: vec![0.8],
        }
    }
}

impl TrainingConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| NetError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_json_str(&contents)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// `[input, hidden.., output]`
    pub fn layer_sizes(&self) -> Vec<usize> {
        let mut sizes = Vec::with_capacity(self.hidden_sizes.len() + 2);
        sizes.push(self.input_size);
        sizes.extend(self.hidden_sizes.iter().copied().filter(|&h| h > 0));
        sizes.push(self.output_size);
        sizes
    }

    pub fn build_network(&self) -> Result<Network> {
        Network::new(&self.layer_sizes(), &self.activation)
    }

    pub fn with_input_size(mut self, input_size: usize) -> Self {
        self.input_size = input_size;
        self
    }

    pub fn with_hidden_sizes(mut self, hidden_sizes: Vec<usize>) -> Self {
        self.hidden_sizes = hidden_sizes;
        self
    }

    pub fn with_output_size(mut self, output_size: usize) -> Self {
        self.output_size = output_size;
        self
    }

    pub fn with_activation(mut self, activation: impl Into<String>) -> Self {
        self.activation = activation.into();
        self
    }

    pub fn with_learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    pub fn with_iterations_per_step(mut self, iterations: usize) -> Self {
        self.iterations_per_step = iterations;
        self
    }

    pub fn with_sample(mut self, inputs: Vec<f64>, targets: Vec<f64>) -> Self {
        self.inputs = inputs;
        self.targets = targets;
        self
    }
}
