use std::time::Instant;

use crate::network::network::Network;
use crate::train::epoch_stats::EpochStats;
use crate::train::train_config::TrainConfig;
use crate::train::trainer::{train_epoch, TrainError};

/// Trains `network` for `config.epochs` epochs and returns the mean training
/// loss of the last completed epoch.
///
/// Runs synchronously on the caller's thread. If a `progress_tx` channel is
/// configured, one `EpochStats` is sent per completed epoch; a dropped
/// receiver ends the loop early, which counts as a clean shutdown rather
/// than an error.
pub fn train_loop(
    network: &mut Network,
    inputs: &[Vec<f64>],
    targets: &[Vec<f64>],
    config: &TrainConfig,
) -> Result<f64, TrainError> {
    let mut last_loss = 0.0;

    for epoch in 1..=config.epochs {
        let started = Instant::now();
        let train_loss = train_epoch(network, inputs, targets)?;
        last_loss = train_loss;

        if let Some(ref tx) = config.progress_tx {
            let stats = EpochStats {
                epoch,
                total_epochs: config.epochs,
                train_loss,
                elapsed_ms: started.elapsed().as_millis() as u64,
            };
            if tx.send(stats).is_err() {
                break;
            }
        }
    }

    Ok(last_loss)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::spec::NetworkSpec;
    use std::sync::mpsc;

    #[test]
    fn emits_one_stats_record_per_epoch() {
        let spec = NetworkSpec::new(vec![2, 2, 1]).unwrap();
        let mut network = Network::zeroed(&spec, 0.1);
        let inputs = vec![vec![0.0, 1.0], vec![1.0, 0.0]];
        let targets = vec![vec![1.0], vec![1.0]];

        let (tx, rx) = mpsc::channel();
        let config = TrainConfig {
            epochs: 5,
            progress_tx: Some(tx),
        };
        train_loop(&mut network, &inputs, &targets, &config).unwrap();

        let stats: Vec<EpochStats> = rx.try_iter().collect();
        assert_eq!(stats.len(), 5);
        assert_eq!(stats[0].epoch, 1);
        assert_eq!(stats[4].epoch, 5);
        assert!(stats.iter().all(|s| s.total_epochs == 5));
    }

    #[test]
    fn stops_early_when_the_receiver_is_gone() {
        let spec = NetworkSpec::new(vec![2, 1]).unwrap();
        let mut network = Network::zeroed(&spec, 0.1);
        let inputs = vec![vec![0.0, 1.0]];
        let targets = vec![vec![1.0]];

        let (tx, rx) = mpsc::channel();
        drop(rx);
        let config = TrainConfig {
            epochs: 1000,
            progress_tx: Some(tx),
        };
        // Finishes immediately instead of training all 1000 epochs.
        train_loop(&mut network, &inputs, &targets, &config).unwrap();
    }
}
