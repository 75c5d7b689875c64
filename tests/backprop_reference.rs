//! Numeric behavior of a single training step, checked against
//! hand-computed values for a fixed 2 -> 2 -> 1 network.
//!
//! The backward pass propagates its delta through the weight buffer the
//! current layer just wrote, not the forward-pass weights; the hidden-layer
//! expectations below pin that ordering.

use magnetite_nn::{Matrix, Network, NetworkSpec};

fn fixed_network() -> Network {
    let spec = NetworkSpec::new(vec![2, 2, 1]).unwrap();
    let mut network = Network::zeroed(&spec, 0.5);
    network.layers_mut()[0].set_weights(Matrix::from_vec(2, 2, vec![0.15, 0.20, 0.25, 0.30]));
    network.layers_mut()[0].set_biases(Matrix::column(vec![0.35, 0.35]));
    network.layers_mut()[1].set_weights(Matrix::from_vec(1, 2, vec![0.40, 0.45]));
    network.layers_mut()[1].set_biases(Matrix::column(vec![0.60]));
    network
}

fn assert_close(actual: &[f64], expected: &[f64]) {
    assert_eq!(actual.len(), expected.len());
    for (a, e) in actual.iter().zip(expected.iter()) {
        assert!((a - e).abs() < 1e-12, "got {a}, want {e}");
    }
}

#[test]
fn forward_pass_matches_reference() {
    let network = fixed_network();
    let output = network.predict(&[0.05, 0.10]).unwrap();
    assert_close(&output, &[0.7513650695523157]);
}

#[test]
fn one_step_updates_match_reference() {
    let mut network = fixed_network();
    network.train(&[0.05, 0.10], &[0.01]).unwrap();

    // Output layer: delta = (0.01 - out) * out * (1 - out); weights move by
    // learning_rate * delta * hidden_activation, biases by
    // learning_rate * delta.
    assert_close(
        network.layers()[1].weights().data(),
        &[0.35891647971788465, 0.4086661860762334],
    );
    assert_close(network.layers()[1].biases().data(), &[0.5307507191857215]);

    // Hidden layer: its delta was computed from the output weights after
    // their update above, so these values hold only under that ordering.
    assert_close(
        network.layers()[0].weights().data(),
        &[
            0.14970012706629177,
            0.19940025413258355,
            0.24965953394576895,
            0.2993190678915379,
        ],
    );
    assert_close(
        network.layers()[0].biases().data(),
        &[0.3440025413258355, 0.34319067891537913],
    );
}

#[test]
fn one_step_moves_the_output_toward_the_target() {
    let mut network = fixed_network();
    let before = network.predict(&[0.05, 0.10]).unwrap()[0];
    network.train(&[0.05, 0.10], &[0.01]).unwrap();
    let after = network.predict(&[0.05, 0.10]).unwrap()[0];

    assert_close(&[after], &[0.7283776466588294]);
    assert!(after < before, "output did not move toward 0.01: {before} -> {after}");
}
