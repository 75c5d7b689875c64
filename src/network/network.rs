use std::fmt;

use rand::Rng;

use crate::activation::activation::{sigmoid, sigmoid_prime};
use crate::layers::dense::Layer;
use crate::math::matrix::{Matrix, MatrixError};
use crate::network::spec::NetworkSpec;

/// Failure of a single `predict` or `train` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkError {
    /// The input vector length does not match the first layer's input size.
    InputSizeMismatch { expected: usize, got: usize },
    /// The target vector length does not match the last layer's output size.
    TargetSizeMismatch { expected: usize, got: usize },
    /// An internal matrix operation failed.
    Matrix(MatrixError),
}

impl fmt::Display for NetworkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetworkError::InputSizeMismatch { expected, got } => write!(
                f,
                "input vector length {got} does not match the network input size {expected}"
            ),
            NetworkError::TargetSizeMismatch { expected, got } => write!(
                f,
                "target vector length {got} does not match the network output size {expected}"
            ),
            NetworkError::Matrix(err) => write!(f, "matrix operation failed: {err}"),
        }
    }
}

impl std::error::Error for NetworkError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            NetworkError::Matrix(err) => Some(err),
            _ => None,
        }
    }
}

impl From<MatrixError> for NetworkError {
    fn from(err: MatrixError) -> NetworkError {
        NetworkError::Matrix(err)
    }
}

/// An ordered stack of dense layers plus a fixed learning rate.
///
/// For a spec `[s0, s1, ..., sn]`, `layers[i]` maps an activation vector of
/// length `s_i` to length `s_(i+1)`, so each layer's output feeds the next.
/// The only state mutated after construction is the layers' weight and bias
/// buffers, rewritten in place by `train`.
#[derive(Debug)]
pub struct Network {
    layers: Vec<Layer>,
    learning_rate: f64,
}

impl Network {
    /// Builds a randomly initialized network. The caller owns and seeds the
    /// generator; the network never touches global random state.
    pub fn new(spec: &NetworkSpec, learning_rate: f64, rng: &mut impl Rng) -> Network {
        debug_assert!(learning_rate > 0.0);
        let layers = spec
            .layer_sizes()
            .windows(2)
            .map(|pair| Layer::new(pair[1], pair[0], rng))
            .collect();
        Network {
            layers,
            learning_rate,
        }
    }

    /// Builds an all-zero network. Deterministic; useful for installing
    /// known parameters through the layer setters.
    pub fn zeroed(spec: &NetworkSpec, learning_rate: f64) -> Network {
        debug_assert!(learning_rate > 0.0);
        let layers = spec
            .layer_sizes()
            .windows(2)
            .map(|pair| Layer::zeroed(pair[1], pair[0]))
            .collect();
        Network {
            layers,
            learning_rate,
        }
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn layers_mut(&mut self) -> &mut [Layer] {
        &mut self.layers
    }

    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    /// Length of the input vector this network accepts.
    pub fn input_size(&self) -> usize {
        self.layers[0].cols()
    }

    /// Length of the output vector this network produces.
    pub fn output_size(&self) -> usize {
        self.layers[self.layers.len() - 1].rows()
    }

    /// Forward inference: `a = sigmoid(W·a + b)` through every layer.
    /// Does not touch network state.
    pub fn predict(&self, input: &[f64]) -> Result<Vec<f64>, NetworkError> {
        if input.len() != self.input_size() {
            return Err(NetworkError::InputSizeMismatch {
                expected: self.input_size(),
                got: input.len(),
            });
        }

        let mut activation = Matrix::column(input.to_vec());
        for layer in &self.layers {
            let z = layer.weights().dot(&activation)?.add(layer.biases())?;
            activation = z.map(sigmoid);
        }
        Ok(activation.into_vec())
    }

    /// One online gradient-descent step on a single example.
    ///
    /// Both vector lengths are validated before any parameter is touched,
    /// so a failed call leaves the network exactly as it was.
    pub fn train(&mut self, input: &[f64], expected: &[f64]) -> Result<(), NetworkError> {
        if input.len() != self.input_size() {
            return Err(NetworkError::InputSizeMismatch {
                expected: self.input_size(),
                got: input.len(),
            });
        }
        if expected.len() != self.output_size() {
            return Err(NetworkError::TargetSizeMismatch {
                expected: self.output_size(),
                got: expected.len(),
            });
        }

        // Forward pass, retaining each layer's pre-activation and
        // activation. activations[i] is the vector entering layer i; the
        // last entry is the network output.
        let mut pre_activations = Vec::with_capacity(self.layers.len());
        let mut activations = Vec::with_capacity(self.layers.len() + 1);
        activations.push(Matrix::column(input.to_vec()));
        for (i, layer) in self.layers.iter().enumerate() {
            let z = layer.weights().dot(&activations[i])?.add(layer.biases())?;
            pre_activations.push(z);
            activations.push(pre_activations[i].map(sigmoid));
        }

        // Output delta: (expected - output), scaled element-wise by the
        // sigmoid derivative of the output activation.
        let output = &activations[self.layers.len()];
        let error = Matrix::column(expected.to_vec()).sub(output)?;
        let mut delta = error.mul(&output.map(sigmoid_prime))?;

        // Backward pass, last layer to first.
        for i in (0..self.layers.len()).rev() {
            let rate = self.learning_rate;
            let prev_activation = &activations[i];
            let layer = &mut self.layers[i];

            let mut biases = layer.biases().data().to_vec();
            for (j, bias) in biases.iter_mut().enumerate() {
                *bias += rate * delta.data()[j];
            }
            layer.set_biases(Matrix::column(biases));

            // Outer product of this layer's delta and the activation that
            // fed it in the forward pass.
            let rows = layer.rows();
            let cols = layer.cols();
            let mut weights = layer.weights().data().to_vec();
            for j in 0..rows {
                for k in 0..cols {
                    weights[j * cols + k] += rate * delta.data()[j] * prev_activation.data()[k];
                }
            }
            layer.set_weights(Matrix::from_vec(rows, cols, weights));

            // Propagate the error one layer back. This reads the weight
            // buffer just replaced above: the backward delta flows through
            // the updated weights, not the ones used in the forward pass.
            if i > 0 {
                let back = layer.weights().transpose().dot(&delta)?;
                delta = back.mul(&prev_activation.map(sigmoid_prime))?;
            }
        }

        Ok(())
    }
}
