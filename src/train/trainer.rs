use std::fmt;

use crate::loss::mse::MseLoss;
use crate::network::network::{Network, NetworkError};

/// Failure of a dataset-level training or evaluation call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrainError {
    /// The dataset has no samples.
    EmptyDataset,
    /// `inputs` and `targets` differ in sample count.
    SampleCountMismatch { inputs: usize, targets: usize },
    /// A single train or predict step failed.
    Network(NetworkError),
}

impl fmt::Display for TrainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrainError::EmptyDataset => write!(f, "the dataset has no samples"),
            TrainError::SampleCountMismatch { inputs, targets } => write!(
                f,
                "dataset halves differ in length: {inputs} inputs vs {targets} targets"
            ),
            TrainError::Network(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for TrainError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TrainError::Network(err) => Some(err),
            _ => None,
        }
    }
}

impl From<NetworkError> for TrainError {
    fn from(err: NetworkError) -> TrainError {
        TrainError::Network(err)
    }
}

/// Runs one full pass of online gradient descent over the dataset, one
/// `train` call per example in order. Returns the mean squared error, with
/// each sample's loss measured just before its update.
///
/// Stops at the first failed step and propagates its error; a run must not
/// silently continue past a failed update.
pub fn train_epoch(
    network: &mut Network,
    inputs: &[Vec<f64>],
    targets: &[Vec<f64>],
) -> Result<f64, TrainError> {
    check_dataset(inputs, targets)?;

    let mut total_loss = 0.0;
    for (input, target) in inputs.iter().zip(targets.iter()) {
        let output = network.predict(input)?;
        total_loss += MseLoss::loss(&output, target);
        network.train(input, target)?;
    }
    Ok(total_loss / inputs.len() as f64)
}

/// Mean squared error over a dataset without touching any parameters.
pub fn evaluate(
    network: &Network,
    inputs: &[Vec<f64>],
    targets: &[Vec<f64>],
) -> Result<f64, TrainError> {
    check_dataset(inputs, targets)?;

    let mut total_loss = 0.0;
    for (input, target) in inputs.iter().zip(targets.iter()) {
        let output = network.predict(input)?;
        total_loss += MseLoss::loss(&output, target);
    }
    Ok(total_loss / inputs.len() as f64)
}

fn check_dataset(inputs: &[Vec<f64>], targets: &[Vec<f64>]) -> Result<(), TrainError> {
    if inputs.is_empty() {
        return Err(TrainError::EmptyDataset);
    }
    if inputs.len() != targets.len() {
        return Err(TrainError::SampleCountMismatch {
            inputs: inputs.len(),
            targets: targets.len(),
        });
    }
    Ok(())
}
