use std::io;
use std::time::Instant;

use crate::checkpoint::CheckpointSink;
use crate::data::DataSource;
use crate::device::{DevicePlacement, ToDevice};
use crate::loss::LossFunction;
use crate::model::Model;

use super::epoch_stats::EpochStats;
use super::state::TrainingState;

/// Runs one forward-only pass over the validation source, records this
/// epoch's complete `EpochStats` into `state.history`, and applies the
/// checkpoint decision.
///
/// Both loss sums are normalized by their source's underlying sample count
/// (not by batch count). The history entry carries the caller-supplied
/// training-phase duration alongside the evaluation duration measured here,
/// checkpoint write included. Checkpoint policy: a validation mean ≤
/// best-so-far persists a parameter snapshot tagged with `epoch` and resets
/// the no-improvement counter; anything else increments it. Returns the
/// (possibly updated) best-so-far for the caller to carry forward.
#[allow(clippy::too_many_arguments)]
pub fn evaluate_epoch<M, L, D, C>(
    model: &mut M,
    criterion: &L,
    data: &D,
    checkpoints: &mut C,
    state: &mut TrainingState,
    train_loss_sum: f64,
    train_sample_count: usize,
    train_secs: f64,
    epoch: usize,
    total_epochs: usize,
    device: DevicePlacement,
) -> io::Result<f64>
where
    M: Model,
    M::Input: ToDevice,
    L: LossFunction<M::Output, D::Target>,
    D: DataSource<Input = M::Input>,
    D::Target: ToDevice,
    C: CheckpointSink<M::Snapshot>,
{
    let eval_start = Instant::now();
    println!("Evaluation");
    model.eval_mode();

    let mut valid_loss_sum = 0.0;
    for mut batch in data.batches() {
        batch.place(device);
        let output = model.forward(&batch.input);
        let loss = criterion.loss(&output, &batch.target);
        valid_loss_sum += loss * batch.len as f64;
    }

    let train_loss = if train_sample_count == 0 {
        0.0
    } else {
        train_loss_sum / train_sample_count as f64
    };
    let valid_loss = if data.sample_count() == 0 {
        0.0
    } else {
        valid_loss_sum / data.sample_count() as f64
    };

    println!(
        "\nEpoch: {}/{} \tTraining Loss: {:.6} \tValidation Loss: {:.6}",
        epoch, total_epochs, train_loss, valid_loss
    );

    let previous_best = state.best_valid_loss;
    if state.observe(valid_loss) {
        println!(
            "Validation loss decreased ({:.6} --> {:.6}).  Saving model ...",
            previous_best, valid_loss
        );
        checkpoints.save(&model.snapshot(), epoch)?;
    } else {
        println!("No improvement for {} epochs", state.no_improvement);
    }

    state.history.push(EpochStats {
        epoch,
        total_epochs,
        train_loss,
        valid_loss,
        train_secs,
        eval_secs: eval_start.elapsed().as_secs_f64(),
    });

    Ok(state.best_valid_loss)
}
