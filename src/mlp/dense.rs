use serde::{Deserialize, Serialize};

use crate::mlp::{activation::ActivationFunction, matrix::Matrix};

/// One fully connected layer: `a = f(x · W + b)`.
///
/// `weights` is `input_size × size`, `biases` is `1 × size`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Layer {
    pub weights: Matrix,
    pub biases: Matrix,
    pub activator: ActivationFunction,
}

impl Layer {
    pub fn input_size(&self) -> usize {
        self.weights.rows
    }

    pub fn size(&self) -> usize {
        self.weights.cols
    }

    /// Shape problems, if any, as a human-readable reason.
    pub fn shape_error(&self) -> Option<String> {
        if !self.weights.is_well_formed() {
            return Some(format!(
                "weights are not a finite {}x{} matrix",
                self.weights.rows, self.weights.cols
            ));
        }
        if !self.biases.is_well_formed() || self.biases.rows != 1 || self.biases.cols != self.size() {
            return Some(format!("biases must be a finite 1x{} matrix", self.size()));
        }
        None
    }

    pub fn forward(&self, input: &[f64]) -> Vec<f64> {
        let mut z = self.weights.left_mul(input);
        for (v, b) in z.iter_mut().zip(&self.biases.data[0]) {
            *v += b;
        }
        self.activator.apply(&mut z);
        z
    }
}
