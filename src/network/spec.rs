use std::fmt;

use serde::{Deserialize, Serialize};

/// A validated layer-size specification.
///
/// `[a, b, c]` describes a network taking `a` inputs through one hidden
/// layer of `b` neurons to `c` outputs. At least two sizes are required
/// (input and output), and every size must be nonzero; construction rejects
/// anything else so the layer stack built from a spec is always well formed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkSpec {
    layer_sizes: Vec<usize>,
}

/// Rejection reasons for a layer-size specification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecError {
    /// Fewer than two sizes; a network needs at least an input and an
    /// output layer.
    TooFewLayers { got: usize },
    /// A layer with zero neurons at the given position.
    ZeroLayerSize { index: usize },
    /// A token in a comma-separated size list failed to parse.
    UnparsableSize { token: String },
}

impl fmt::Display for SpecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpecError::TooFewLayers { got } => {
                write!(f, "a network needs at least 2 layer sizes, got {got}")
            }
            SpecError::ZeroLayerSize { index } => {
                write!(f, "layer size at position {index} is zero")
            }
            SpecError::UnparsableSize { token } => {
                write!(f, "cannot parse layer size '{token}'")
            }
        }
    }
}

impl std::error::Error for SpecError {}

impl NetworkSpec {
    pub fn new(layer_sizes: Vec<usize>) -> Result<NetworkSpec, SpecError> {
        if layer_sizes.len() < 2 {
            return Err(SpecError::TooFewLayers {
                got: layer_sizes.len(),
            });
        }
        if let Some(index) = layer_sizes.iter().position(|&size| size == 0) {
            return Err(SpecError::ZeroLayerSize { index });
        }
        Ok(NetworkSpec { layer_sizes })
    }

    /// Parses a comma-separated size list such as `"2,4,1"`.
    pub fn parse(text: &str) -> Result<NetworkSpec, SpecError> {
        let sizes = text
            .split(',')
            .map(|token| {
                let token = token.trim();
                token
                    .parse::<usize>()
                    .map_err(|_| SpecError::UnparsableSize {
                        token: token.to_string(),
                    })
            })
            .collect::<Result<Vec<usize>, SpecError>>()?;
        NetworkSpec::new(sizes)
    }

    /// Ordered layer sizes, input first.
    pub fn layer_sizes(&self) -> &[usize] {
        &self.layer_sizes
    }

    /// Length of the input vector the network accepts.
    pub fn input_size(&self) -> usize {
        self.layer_sizes[0]
    }

    /// Length of the output vector the network produces.
    pub fn output_size(&self) -> usize {
        self.layer_sizes[self.layer_sizes.len() - 1]
    }
}
