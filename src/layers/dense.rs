use rand::Rng;

use crate::math::matrix::Matrix;

/// One dense (fully connected) layer: a weight matrix of shape
/// (output_size × input_size) and a bias column of length output_size.
///
/// `weights[r * cols + c]` connects input neuron `c` to output neuron `r`.
/// Shapes are fixed at construction; training rewrites the buffers whole
/// through `set_weights` / `set_biases`, which is the only mutation path.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    weights: Matrix,
    biases: Matrix,
}

impl Layer {
    /// Randomized construction from a caller-supplied generator.
    ///
    /// Weights are drawn uniformly from `[-scale, +scale]` with
    /// `scale = sqrt(2 / cols)`; biases uniformly from `[-0.01, +0.01]`.
    pub fn new(rows: usize, cols: usize, rng: &mut impl Rng) -> Layer {
        let scale = (2.0 / cols as f64).sqrt();
        Layer {
            weights: Matrix::random(rows, cols, scale, rng),
            biases: Matrix::random(rows, 1, 0.01, rng),
        }
    }

    /// All-zero weights and biases. Deterministic; pair with `set_weights`
    /// and `set_biases` to install known parameters.
    pub fn zeroed(rows: usize, cols: usize) -> Layer {
        Layer {
            weights: Matrix::zeros(rows, cols),
            biases: Matrix::zeros(rows, 1),
        }
    }

    /// Output size of this layer.
    pub fn rows(&self) -> usize {
        self.weights.rows()
    }

    /// Input size of this layer.
    pub fn cols(&self) -> usize {
        self.weights.cols()
    }

    pub fn weights(&self) -> &Matrix {
        &self.weights
    }

    pub fn biases(&self) -> &Matrix {
        &self.biases
    }

    /// Replaces the whole weight buffer. The replacement must keep this
    /// layer's (rows × cols) shape; that is a caller contract.
    pub fn set_weights(&mut self, weights: Matrix) {
        debug_assert_eq!((weights.rows(), weights.cols()), (self.rows(), self.cols()));
        self.weights = weights;
    }

    /// Replaces the whole bias buffer. Same contract as `set_weights`.
    pub fn set_biases(&mut self, biases: Matrix) {
        debug_assert_eq!((biases.rows(), biases.cols()), (self.rows(), 1));
        self.biases = biases;
    }
}
