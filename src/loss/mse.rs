use super::LossFunction;

/// Mean-squared error over a batch of output rows.
pub struct MseLoss;

impl LossFunction<Vec<Vec<f64>>, Vec<Vec<f64>>> for MseLoss {
    /// Scalar MSE: mean over the batch of mean((predicted - expected)²).
    fn loss(&self, output: &Vec<Vec<f64>>, target: &Vec<Vec<f64>>) -> f64 {
        let n = output.len().max(1) as f64;
        output
            .iter()
            .zip(target.iter())
            .map(|(predicted, expected)| {
                let width = predicted.len().max(1) as f64;
                predicted
                    .iter()
                    .zip(expected.iter())
                    .map(|(a, b)| (a - b).powi(2))
                    .sum::<f64>()
                    / width
            })
            .sum::<f64>()
            / n
    }

    /// Per-output gradient rows: predicted - expected.
    fn gradient(&self, output: &Vec<Vec<f64>>, target: &Vec<Vec<f64>>) -> Vec<Vec<f64>> {
        output
            .iter()
            .zip(target.iter())
            .map(|(predicted, expected)| {
                predicted
                    .iter()
                    .zip(expected.iter())
                    .map(|(a, b)| a - b)
                    .collect()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loss_is_mean_squared_difference() {
        let output = vec![vec![1.0, 0.0], vec![0.0, 1.0]];
        let target = vec![vec![0.0, 0.0], vec![0.0, 1.0]];
        // Sample 0: ((1-0)² + 0²) / 2 = 0.5; sample 1: 0. Mean = 0.25.
        let loss = MseLoss.loss(&output, &target);
        assert!((loss - 0.25).abs() < 1e-12);
    }

    #[test]
    fn gradient_is_elementwise_difference() {
        let output = vec![vec![0.8, 0.2]];
        let target = vec![vec![1.0, 0.0]];
        let grad = MseLoss.gradient(&output, &target);
        assert!((grad[0][0] + 0.2).abs() < 1e-12);
        assert!((grad[0][1] - 0.2).abs() < 1e-12);
    }
}
