/// Logistic sigmoid: `1 / (1 + e^-x)`. Maps any finite input into (0, 1).
pub fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// Derivative of the sigmoid, expressed in terms of the sigmoid's own
/// output: for `a = sigmoid(x)`, the derivative at `x` is `a * (1 - a)`.
///
/// Callers pass the already-activated value, not the raw pre-activation.
pub fn sigmoid_prime(a: f64) -> f64 {
    a * (1.0 - a)
}
