use std::f64::consts::E;
use std::str::FromStr;

use crate::error::Error;

/// The supported element-wise activation functions.
///
/// Each variant is a pure scalar pair `(f, f')`. The derivative is always
/// evaluated at the pre-activation value, the one convention that works for
/// every variant: ReLU's slope cannot be recovered from its output alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    Sigmoid,
    Tanh,
    ReLU,
}

impl Activation {
    /// Element-wise activation `f(x)`.
    pub fn function(&self, x: f64) -> f64 {
        match self {
            Activation::Sigmoid => 1.0 / (1.0 + E.powf(-x)),
            Activation::Tanh => x.tanh(),
            Activation::ReLU => if x > 0.0 { x } else { 0.0 },
        }
    }

    /// Derivative `f'(x)`, evaluated at the pre-activation value `x`.
    pub fn derivative(&self, x: f64) -> f64 {
        match self {
            Activation::Sigmoid => {
                let fx = self.function(x);
                fx * (1.0 - fx)
            }
            Activation::Tanh => {
                let t = x.tanh();
                1.0 - t * t
            }
            Activation::ReLU => if x > 0.0 { 1.0 } else { 0.0 },
        }
    }
}

impl FromStr for Activation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sigmoid" => Ok(Activation::Sigmoid),
            "tanh" => Ok(Activation::Tanh),
            "relu" => Ok(Activation::ReLU),
            other => Err(Error::UnknownActivation(other.to_string())),
        }
    }
}
