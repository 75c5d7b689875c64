//! End-to-end training behavior on the XOR dataset.

use rand::rngs::StdRng;
use rand::SeedableRng;

use magnetite_nn::{
    evaluate, train_epoch, train_loop, Matrix, Network, NetworkError, NetworkSpec, TrainConfig,
};

fn xor_dataset() -> (Vec<Vec<f64>>, Vec<Vec<f64>>) {
    let inputs = vec![
        vec![0.0, 0.0],
        vec![0.0, 1.0],
        vec![1.0, 0.0],
        vec![1.0, 1.0],
    ];
    let targets = vec![vec![0.0], vec![1.0], vec![1.0], vec![0.0]];
    (inputs, targets)
}

#[test]
fn xor_converges_for_most_seeds() {
    let spec = NetworkSpec::new(vec![2, 2, 1]).unwrap();
    let (inputs, targets) = xor_dataset();

    // A random 2-2-1 start sometimes lands in a local minimum, so
    // convergence is asserted across a fixed seed set rather than for any
    // single seed. Roughly three quarters of starts converge; requiring 4
    // of 12 keeps the test far from the noise floor.
    let mut converged = 0;
    for seed in 0..12u64 {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut network = Network::new(&spec, 0.1, &mut rng);
        let config = TrainConfig::new(10_000);
        train_loop(&mut network, &inputs, &targets, &config).unwrap();

        let mse = evaluate(&network, &inputs, &targets).unwrap();
        let all_correct = inputs.iter().zip(targets.iter()).all(|(input, target)| {
            let output = network.predict(input).unwrap();
            (output[0] >= 0.5) == (target[0] >= 0.5)
        });
        if mse < 0.05 && all_correct {
            converged += 1;
        }
    }
    assert!(converged >= 4, "only {converged} of 12 seeds converged");
}

#[test]
fn failed_train_call_leaves_parameters_untouched() {
    let spec = NetworkSpec::new(vec![2, 3, 1]).unwrap();
    let mut rng = StdRng::seed_from_u64(42);
    let mut network = Network::new(&spec, 0.1, &mut rng);

    let snapshot = |network: &Network| -> Vec<Matrix> {
        network
            .layers()
            .iter()
            .flat_map(|layer| [layer.weights().clone(), layer.biases().clone()])
            .collect()
    };
    let before = snapshot(&network);

    assert_eq!(
        network.train(&[0.5, 0.5], &[1.0, 0.0]),
        Err(NetworkError::TargetSizeMismatch {
            expected: 1,
            got: 2,
        })
    );
    assert_eq!(
        network.train(&[0.5], &[1.0]),
        Err(NetworkError::InputSizeMismatch {
            expected: 2,
            got: 1,
        })
    );

    assert_eq!(snapshot(&network), before);
}

#[test]
fn identical_networks_stay_identical() {
    let spec = NetworkSpec::new(vec![2, 4, 1]).unwrap();
    let (inputs, targets) = xor_dataset();

    let mut first = Network::new(&spec, 0.1, &mut StdRng::seed_from_u64(7));
    let mut second = Network::new(&spec, 0.1, &mut StdRng::seed_from_u64(7));

    for _ in 0..250 {
        train_epoch(&mut first, &inputs, &targets).unwrap();
        train_epoch(&mut second, &inputs, &targets).unwrap();
    }

    for (a, b) in first.layers().iter().zip(second.layers().iter()) {
        assert_eq!(a.weights(), b.weights());
        assert_eq!(a.biases(), b.biases());
    }
}

#[test]
fn prediction_does_not_change_parameters() {
    let spec = NetworkSpec::new(vec![2, 2, 1]).unwrap();
    let mut rng = StdRng::seed_from_u64(9);
    let network = Network::new(&spec, 0.1, &mut rng);

    let weights_before: Vec<Matrix> = network
        .layers()
        .iter()
        .map(|layer| layer.weights().clone())
        .collect();

    for _ in 0..10 {
        network.predict(&[1.0, 0.0]).unwrap();
    }

    for (layer, before) in network.layers().iter().zip(weights_before.iter()) {
        assert_eq!(layer.weights(), before);
    }
}
