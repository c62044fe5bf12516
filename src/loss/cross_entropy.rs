use super::LossFunction;

/// Categorical cross-entropy loss for use with softmax output rows.
pub struct CrossEntropyLoss;

/// Small epsilon added inside log() to prevent log(0) = -inf.
const EPS: f64 = 1e-12;

impl LossFunction<Vec<Vec<f64>>, Vec<Vec<f64>>> for CrossEntropyLoss {
    /// Mean cross-entropy over the batch:
    ///   L = mean_over_samples(-sum(expected[i] * log(predicted[i] + eps)))
    ///
    /// `output` — softmax probability rows, shape [batch][n_classes]
    /// `target` — one-hot (or soft) target rows, same shape
    fn loss(&self, output: &Vec<Vec<f64>>, target: &Vec<Vec<f64>>) -> f64 {
        let n = output.len().max(1) as f64;
        output
            .iter()
            .zip(target.iter())
            .map(|(predicted, expected)| {
                predicted
                    .iter()
                    .zip(expected.iter())
                    .map(|(p, e)| -e * (p + EPS).ln())
                    .sum::<f64>()
            })
            .sum::<f64>()
            / n
    }

    /// Gradient of the combined Softmax + cross-entropy w.r.t. the
    /// pre-softmax logits, which simplifies to `predicted - expected`
    /// element-wise. A softmax output stage must pass this delta through
    /// unchanged so the combined gradient is not double-applied.
    fn gradient(&self, output: &Vec<Vec<f64>>, target: &Vec<Vec<f64>>) -> Vec<Vec<f64>> {
        output
            .iter()
            .zip(target.iter())
            .map(|(predicted, expected)| {
                predicted
                    .iter()
                    .zip(expected.iter())
                    .map(|(p, e)| p - e)
                    .collect()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perfect_prediction_has_near_zero_loss() {
        let output = vec![vec![1.0, 0.0, 0.0]];
        let target = vec![vec![1.0, 0.0, 0.0]];
        assert!(CrossEntropyLoss.loss(&output, &target).abs() < 1e-9);
    }

    #[test]
    fn gradient_is_predicted_minus_expected() {
        let output = vec![vec![0.7, 0.2, 0.1]];
        let target = vec![vec![1.0, 0.0, 0.0]];
        let grad = CrossEntropyLoss.gradient(&output, &target);
        assert!((grad[0][0] + 0.3).abs() < 1e-12);
        assert!((grad[0][1] - 0.2).abs() < 1e-12);
    }
}
