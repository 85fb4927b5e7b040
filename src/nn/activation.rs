use std::fmt;

use tracing::debug;

/// Scalar activation applied to every non-input layer.
///
/// Derivatives are evaluated at the pre-activation value `z`, not at the
/// activated value `f(z)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Activation {
    /// Identity: f(z) = z, f'(z) = 1
    None,
    /// Logistic: f(z) = 1 / (1 + e^-z), f'(z) = f(z)(1 - f(z))
    Sigmoid,
    /// Rectifier: f(z) = max(z, 0), f'(z) = 1 for z > 0 and 0 otherwise (including z == 0)
    ReLU,
}

impl Activation {
    pub const ALL: [Activation; 3] = [Activation::None, Activation::Sigmoid, Activation::ReLU];

    /// Look up an activation by name.
    ///
    /// Names that match no variant resolve to `Sigmoid` instead of failing, so
    /// `"Swish"` or a misspelt `"relu"` silently produce a sigmoid network.
    pub fn from_name(name: &str) -> Self {
        match name {
            "None" => Activation::None,
            "Sigmoid" => Activation::Sigmoid,
            "ReLU" => Activation::ReLU,
            other => {
                debug!(name = other, "unknown activation, falling back to Sigmoid");
                Activation::Sigmoid
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Activation::None => "None",
            Activation::Sigmoid => "Sigmoid",
            Activation::ReLU => "ReLU",
        }
    }

    /// f(z)
    pub fn f(&self, z: f64) -> f64 {
        match self {
            Activation::None => z,
            Activation::Sigmoid => sigmoid(z),
            Activation::ReLU => {
                if z > 0.0 {
                    z
                } else {
                    0.0
                }
            }
        }
    }

    /// f'(z)
    pub fn df(&self, z: f64) -> f64 {
        match self {
            Activation::None => 1.0,
            Activation::Sigmoid => {
                let s = sigmoid(z);
                s * (1.0 - s)
            }
            Activation::ReLU => {
                if z > 0.0 {
                    1.0
                } else {
                    0.0
                }
            }
        }
    }

    pub fn apply(&self, z: &[f64]) -> Vec<f64> {
        z.iter().map(|&v| self.f(v)).collect()
    }

    pub fn derivative(&self, z: &[f64]) -> Vec<f64> {
        z.iter().map(|&v| self.df(v)).collect()
    }
}

impl fmt::Display for Activation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}
