/// Mean squared error, used for progress reporting and convergence checks.
pub struct MseLoss;

impl MseLoss {
    /// Mean of the squared per-element differences. The slices are expected
    /// to have equal length.
    pub fn loss(predicted: &[f64], expected: &[f64]) -> f64 {
        if predicted.is_empty() {
            return 0.0;
        }
        let sum: f64 = predicted
            .iter()
            .zip(expected.iter())
            .map(|(p, e)| (p - e) * (p - e))
            .sum();
        sum / predicted.len() as f64
    }
}
