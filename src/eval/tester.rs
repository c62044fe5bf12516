use crate::data::{DataSource, DatasetDescriptor};
use crate::device::{DevicePlacement, ToDevice};
use crate::loss::LossFunction;
use crate::model::Model;

use super::class_accuracy::ClassAccuracy;
use super::predictions::{ClassLabels, ClassPredictions};

/// Result of one full test pass.
#[derive(Debug, Clone)]
pub struct TestReport {
    /// Mean test loss, normalized by the source's total sample count — not
    /// by the number of retained batches.
    pub mean_loss: f64,
    /// Per-class counts, indexed by label id.
    pub classes: Vec<ClassAccuracy>,
}

impl TestReport {
    /// Overall accuracy: Σ correct / Σ total across all classes. Classes
    /// with zero observed samples contribute zero to the denominator.
    /// `None` when the pass retained no samples at all.
    pub fn overall_accuracy(&self) -> Option<f64> {
        let total: usize = self.classes.iter().map(|c| c.total).sum();
        if total == 0 {
            return None;
        }
        let correct: usize = self.classes.iter().map(|c| c.correct).sum();
        Some(correct as f64 / total as f64)
    }

    /// Prints the per-class accuracy table and the overall accuracy, with
    /// "N/A" for classes that had no test samples.
    pub fn print_summary(&self) {
        println!("Test Loss: {:.6}\n", self.mean_loss);

        for class in &self.classes {
            match class.accuracy() {
                Some(acc) => println!(
                    "Test Accuracy of {:>8}: {:2.0}% ({}/{})",
                    class.name,
                    acc * 100.0,
                    class.correct,
                    class.total
                ),
                None => println!(
                    "Test Accuracy of {:>8}: N/A (no test examples)",
                    class.name
                ),
            }
        }

        match self.overall_accuracy() {
            Some(acc) => {
                let correct: usize = self.classes.iter().map(|c| c.correct).sum();
                let total: usize = self.classes.iter().map(|c| c.total).sum();
                println!(
                    "\nTest Accuracy (Overall): {:2.0}% ({}/{})",
                    acc * 100.0,
                    correct,
                    total
                );
            }
            None => println!("\nTest Accuracy (Overall): N/A (no test examples)"),
        }
    }
}

/// Runs inference over the test source and accumulates loss plus per-class
/// accuracy counts.
///
/// Boundary policy: a batch shorter than `batch_size` ends the pass — the
/// trailing short batch contributes to neither the loss sum nor the counts.
/// This is deliberate, matching the fixed-batch contract of the test
/// partition; the mean loss is still normalized by the full sample count.
pub fn test_model<M, L, D>(
    model: &mut M,
    criterion: &L,
    data: &D,
    descriptor: &DatasetDescriptor,
    batch_size: usize,
    device: DevicePlacement,
) -> TestReport
where
    M: Model,
    M::Input: ToDevice,
    M::Output: ClassPredictions,
    L: LossFunction<M::Output, D::Target>,
    D: DataSource<Input = M::Input>,
    D::Target: ToDevice + ClassLabels,
{
    model.eval_mode();

    let mut loss_sum = 0.0;
    let mut correct = vec![0usize; descriptor.class_count()];
    let mut total = vec![0usize; descriptor.class_count()];

    for mut batch in data.batches() {
        if batch.len < batch_size {
            break;
        }
        batch.place(device);

        let output = model.forward(&batch.input);
        let loss = criterion.loss(&output, &batch.target);
        loss_sum += loss * batch.len as f64;

        let predictions = output.predicted_classes();
        let labels = batch.target.class_labels();
        for (&predicted, &label) in predictions.iter().zip(labels.iter()) {
            if predicted == label {
                correct[label] += 1;
            }
            total[label] += 1;
        }
    }

    let mean_loss = if data.sample_count() == 0 {
        0.0
    } else {
        loss_sum / data.sample_count() as f64
    };

    let classes = descriptor
        .class_names()
        .iter()
        .zip(correct.into_iter().zip(total.into_iter()))
        .map(|(name, (correct, total))| ClassAccuracy {
            name: name.clone(),
            correct,
            total,
        })
        .collect();

    TestReport { mean_loss, classes }
}
