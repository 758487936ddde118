use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use crate::classify::softmax;

/// Activation applied after a dense layer's linear transform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ActivationFunction {
    Sigmoid,
    ReLU,
    Identity,
    /// Vector-valued; normalizes the whole layer output.
    Softmax,
    Tanh,
    LeakyReLU { alpha: f64 },
    Elu { alpha: f64 },
    Gelu,
    Swish,
}

impl ActivationFunction {
    /// Applies the activation to a full layer output in place.
    pub fn apply(&self, z: &mut [f64]) {
        if let ActivationFunction::Softmax = self {
            let probs = softmax(z);
            z.copy_from_slice(&probs);
            return;
        }
        for v in z.iter_mut() {
            *v = self.scalar(*v);
        }
    }

    fn scalar(&self, x: f64) -> f64 {
        match self {
            ActivationFunction::Sigmoid => 1.0 / (1.0 + (-x).exp()),
            ActivationFunction::ReLU => x.max(0.0),
            ActivationFunction::Identity | ActivationFunction::Softmax => x,
            ActivationFunction::Tanh => x.tanh(),
            ActivationFunction::LeakyReLU { alpha } => if x > 0.0 { x } else { alpha * x },
            ActivationFunction::Elu { alpha } => if x > 0.0 { x } else { alpha * (x.exp() - 1.0) },
            ActivationFunction::Gelu => {
                let c = (2.0_f64 / PI).sqrt();
                0.5 * x * (1.0 + (c * (x + 0.044715 * x.powi(3))).tanh())
            }
            ActivationFunction::Swish => x / (1.0 + (-x).exp()),
        }
    }
}
