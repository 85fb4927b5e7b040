use rand::Rng;
use tracing::{instrument, warn};

use crate::error::{NetError, Result};
use crate::nn::activation::Activation;
use crate::nn::loss::mse_loss;
use crate::tensor::{sample_grid_vector, Matrix};

/// Intermediate values of one forward pass.
///
/// `z[l]` is the pre-activation of layer `l + 1` and `a[l]` the activation of
/// layer `l`, so `a[0]` is the raw input and the last entry of `a` is the
/// network output.
#[derive(Debug, Clone, PartialEq)]
pub struct ForwardTrace {
    pub z: Vec<Vec<f64>>,
    pub a: Vec<Vec<f64>>,
}

impl ForwardTrace {
    pub fn output(&self) -> &[f64] {
        self.a.last().map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Per-layer gradients of one sample, shaped like the network's parameters.
///
/// The weight and bias gradients are those of `½ Σ (o_i - t_i)^2`; `loss` is
/// the mean squared error of the same sample.
#[derive(Debug, Clone, PartialEq)]
pub struct Gradient {
    pub weights: Vec<Matrix>,
    pub biases: Vec<Vec<f64>>,
    pub loss: f64,
}

/// Fully-connected feedforward network with one activation shared by every
/// non-input layer.
///
/// `weights[l]` has shape `sizes[l + 1] x sizes[l]`; row `i` holds the incoming
/// weights of unit `i` in layer `l + 1`. `biases[l]` has length `sizes[l + 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Network {
    sizes: Vec<usize>,
    activation_name: String,
    activation: Activation,
    weights: Vec<Matrix>,
    biases: Vec<Vec<f64>>,
}

fn validate_sizes(sizes: &[usize]) -> Result<()> {
    if sizes.len() < 2 {
        return Err(NetError::InvalidArchitecture(format!(
            "need at least an input and an output layer, got {} layer(s)",
            sizes.len()
        )));
    }
    if let Some(pos) = sizes.iter().position(|&s| s == 0) {
        return Err(NetError::InvalidArchitecture(format!(
            "layer {} has zero units in {:?}",
            pos, sizes
        )));
    }
    Ok(())
}

impl Network {
    /// Build a network with freshly sampled parameters
    pub fn new(sizes: &[usize], activation_name: &str) -> Result<Self> {
        Self::with_rng(sizes, activation_name, &mut rand::thread_rng())
    }

    /// Build a network drawing its parameters from `rng`.
    ///
    /// Every weight and bias is an integer in `[-10, 10]` scaled by 0.1.
    #[instrument(skip(rng))]
    pub fn with_rng<R: Rng + ?Sized>(
        sizes: &[usize],
        activation_name: &str,
        rng: &mut R,
    ) -> Result<Self> {
        validate_sizes(sizes)?;

        let mut weights = Vec::with_capacity(sizes.len() - 1);
        let mut biases = Vec::with_capacity(sizes.len() - 1);
        for pair in sizes.windows(2) {
            let (cols, rows) = (pair[0], pair[1]);
            weights.push(Matrix::random_grid(rows, cols, rng));
            biases.push(sample_grid_vector(rows, rng));
        }

        Ok(Network {
            sizes: sizes.to_vec(),
            activation_name: activation_name.to_string(),
            activation: Activation::from_name(activation_name),
            weights,
            biases,
        })
    }

    /// Build a network around explicit parameters
    pub fn from_parameters(
        sizes: &[usize],
        activation_name: &str,
        weights: Vec<Matrix>,
        biases: Vec<Vec<f64>>,
    ) -> Result<Self> {
        validate_sizes(sizes)?;
        let transitions = sizes.len() - 1;
        if weights.len() != transitions || biases.len() != transitions {
            return Err(NetError::InvalidArchitecture(format!(
                "{} layer transitions need {} weight matrices and bias vectors, got {} and {}",
                transitions,
                transitions,
                weights.len(),
                biases.len()
            )));
        }
        for (l, pair) in sizes.windows(2).enumerate() {
            let expected = [pair[1], pair[0]];
            if weights[l].shape() != expected {
                return Err(NetError::InvalidArchitecture(format!(
                    "weights[{}] is {:?}, expected {:?}",
                    l,
                    weights[l].shape(),
                    expected
                )));
            }
            if biases[l].len() != pair[1] {
                return Err(NetError::InvalidArchitecture(format!(
                    "biases[{}] has length {}, expected {}",
                    l,
                    biases[l].len(),
                    pair[1]
                )));
            }
        }

        Ok(Network {
            sizes: sizes.to_vec(),
            activation_name: activation_name.to_string(),
            activation: Activation::from_name(activation_name),
            weights,
            biases,
        })
    }

    pub fn sizes(&self) -> &[usize] {
        &self.sizes
    }

    /// The activation name as supplied at construction, even if it fell back to Sigmoid
    pub fn activation_name(&self) -> &str {
        &self.activation_name
    }

    pub fn activation(&self) -> Activation {
        self.activation
    }

    pub fn weights(&self) -> &[Matrix] {
        &self.weights
    }

    pub fn biases(&self) -> &[Vec<f64>] {
        &self.biases
    }

    pub fn input_size(&self) -> usize {
        self.sizes[0]
    }

    pub fn output_size(&self) -> usize {
        self.sizes[self.sizes.len() - 1]
    }

    /// Number of layer transitions (weight matrices)
    pub fn num_transitions(&self) -> usize {
        self.weights.len()
    }

    pub fn num_parameters(&self) -> usize {
        self.weights
            .iter()
            .zip(self.biases.iter())
            .map(|(w, b)| w.numel() + b.len())
            .sum()
    }

    /// Weight from unit `j` of layer `l` to unit `i` of layer `l + 1`
    pub fn weight(&self, l: usize, i: usize, j: usize) -> Result<f64> {
        self.weights
            .get(l)
            .and_then(|w| w.get(i, j))
            .ok_or_else(|| out_of_range("weight", l, i, Some(j)))
    }

    /// Bias of unit `i` of layer `l + 1`
    pub fn bias(&self, l: usize, i: usize) -> Result<f64> {
        self.biases
            .get(l)
            .and_then(|b| b.get(i).copied())
            .ok_or_else(|| out_of_range("bias", l, i, None))
    }

    pub fn set_weight(&mut self, l: usize, i: usize, j: usize, value: f64) -> Result<()> {
        match self.weights.get_mut(l) {
            Some(w) => w.set(i, j, value),
            None => Err(out_of_range("weight", l, i, Some(j))),
        }
    }

    pub fn set_bias(&mut self, l: usize, i: usize, value: f64) -> Result<()> {
        match self.biases.get_mut(l).and_then(|b| b.get_mut(i)) {
            Some(b) => {
                *b = value;
                Ok(())
            }
            None => Err(out_of_range("bias", l, i, None)),
        }
    }

    /// Forward pass: z = W a + b, a' = f(z) for every layer transition
    #[instrument(skip(self, input), fields(sizes = ?self.sizes))]
    pub fn forward(&self, input: &[f64]) -> Result<ForwardTrace> {
        if input.len() != self.input_size() {
            return Err(NetError::shape("input", self.input_size(), input.len()));
        }

        let mut a = Vec::with_capacity(self.sizes.len());
        let mut z = Vec::with_capacity(self.weights.len());
        a.push(input.to_vec());

        for (w, b) in self.weights.iter().zip(self.biases.iter()) {
            let mut zcur = w.matvec(&a[a.len() - 1]);
            zcur.iter_mut().zip(b.iter()).for_each(|(z, b)| *z += b);
            let acur = self.activation.apply(&zcur);
            z.push(zcur);
            a.push(acur);
        }

        Ok(ForwardTrace { z, a })
    }

    /// Network output for `input`
    pub fn predict(&self, input: &[f64]) -> Result<Vec<f64>> {
        let mut trace = self.forward(input)?;
        Ok(trace.a.pop().unwrap_or_default())
    }

    /// Mean squared error of the network's output for one sample
    pub fn loss(&self, input: &[f64], target: &[f64]) -> Result<f64> {
        let trace = self.forward(input)?;
        mse_loss(trace.output(), target)
    }

    /// Backpropagation for a single (input, target) sample.
    ///
    /// Error signals travel through the current weights; nothing is mutated.
    #[instrument(skip(self, input, target), fields(sizes = ?self.sizes))]
    pub fn backprop(&self, input: &[f64], target: &[f64]) -> Result<Gradient> {
        if target.len() != self.output_size() {
            return Err(NetError::shape("target", self.output_size(), target.len()));
        }
        let trace = self.forward(input)?;
        let output = trace.output();
        let last = self.weights.len() - 1;

        let mut grad_w: Vec<Matrix> = self
            .weights
            .iter()
            .map(|w| Matrix::zeros(w.rows(), w.cols()))
            .collect();
        let mut grad_b: Vec<Vec<f64>> = self.biases.iter().map(|b| vec![0.0; b.len()]).collect();

        // output layer: (a - t) * f'(z)
        let mut delta: Vec<f64> = output
            .iter()
            .zip(target.iter())
            .zip(self.activation.derivative(&trace.z[last]))
            .map(|((o, t), d)| (o - t) * d)
            .collect();
        grad_w[last] = Matrix::outer(&delta, &trace.a[last]);
        grad_b[last] = delta.clone();

        // hidden layers, empty when there are none
        for l in (0..last).rev() {
            let propagated = self.weights[l + 1].matvec_transposed(&delta);
            delta = propagated
                .iter()
                .zip(self.activation.derivative(&trace.z[l]))
                .map(|(s, d)| s * d)
                .collect();
            grad_w[l] = Matrix::outer(&delta, &trace.a[l]);
            grad_b[l] = delta.clone();
        }

        let loss = mse_loss(output, target)?;
        Ok(Gradient {
            weights: grad_w,
            biases: grad_b,
            loss,
        })
    }

    /// Gradient descent step: W -= lr * ∇W, b -= lr * ∇b.
    ///
    /// All shapes are checked before any parameter changes.
    #[instrument(skip(self, grad_w, grad_b), fields(sizes = ?self.sizes))]
    pub fn apply_gradients(
        &mut self,
        grad_w: &[Matrix],
        grad_b: &[Vec<f64>],
        learning_rate: f64,
    ) -> Result<()> {
        if grad_w.len() != self.weights.len() {
            return Err(NetError::shape("weight gradients", self.weights.len(), grad_w.len()));
        }
        if grad_b.len() != self.biases.len() {
            return Err(NetError::shape("bias gradients", self.biases.len(), grad_b.len()));
        }
        for (w, gw) in self.weights.iter().zip(grad_w.iter()) {
            if w.shape() != gw.shape() {
                return Err(NetError::shape("weight gradient", w.numel(), gw.numel()));
            }
        }
        for (b, gb) in self.biases.iter().zip(grad_b.iter()) {
            if b.len() != gb.len() {
                return Err(NetError::shape("bias gradient", b.len(), gb.len()));
            }
        }
        if !learning_rate.is_finite() {
            warn!(learning_rate, "non-finite learning rate, parameters will become non-finite");
        }

        for (w, gw) in self.weights.iter_mut().zip(grad_w.iter()) {
            w.axpy(-learning_rate, gw)?;
        }
        for (b, gb) in self.biases.iter_mut().zip(grad_b.iter()) {
            b.iter_mut()
                .zip(gb.iter())
                .for_each(|(b, g)| *b -= learning_rate * g);
        }
        Ok(())
    }

    pub fn apply_gradient(&mut self, gradient: &Gradient, learning_rate: f64) -> Result<()> {
        self.apply_gradients(&gradient.weights, &gradient.biases, learning_rate)
    }
}

fn out_of_range(kind: &str, l: usize, i: usize, j: Option<usize>) -> NetError {
    match j {
        Some(j) => NetError::IndexOutOfRange(format!("{} (l={}, i={}, j={})", kind, l, i, j)),
        None => NetError::IndexOutOfRange(format!("{} (l={}, i={})", kind, l, i)),
    }
}
