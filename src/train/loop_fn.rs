use std::io;
use std::time::Instant;

use crate::checkpoint::CheckpointSink;
use crate::data::DataSource;
use crate::device::ToDevice;
use crate::loss::LossFunction;
use crate::model::Model;
use crate::optim::Optimizer;

use super::epoch_stats::EpochStats;
use super::evaluator::evaluate_epoch;
use super::run_config::RunConfig;
use super::state::TrainingState;
use super::trainer::train_epoch;

// ---------------------------------------------------------------------------
// Public entry point
// ---------------------------------------------------------------------------

/// Runs the full epoch loop: train, evaluate, checkpoint, early-stop.
///
/// # Arguments
/// - `model`       — mutable collaborator; parameters updated in place
/// - `optimizer`   — update strategy bound to the model's parameters
/// - `criterion`   — loss used for both training and validation passes
/// - `train_data`  — training source; one full gradient pass per epoch
/// - `valid_data`  — validation source; one forward-only pass per epoch
/// - `checkpoints` — sink that persists improving-epoch parameter snapshots
/// - `config`      — epoch count, patience, batch size, device placement
///
/// # Early stopping
/// Before each epoch the no-improvement counter is compared against
/// `config.patience`; once the counter has reached patience the loop halts
/// without starting a partial epoch.
///
/// # Errors
/// Only checkpoint persistence can fail. The error aborts the run and the
/// history collected so far is lost; checkpoints already written survive.
pub fn train_loop<M, O, L, Dt, Dv, C>(
    model: &mut M,
    optimizer: &mut O,
    criterion: &L,
    train_data: &Dt,
    valid_data: &Dv,
    checkpoints: &mut C,
    config: &RunConfig,
) -> io::Result<Vec<EpochStats>>
where
    M: Model,
    M::Input: ToDevice,
    O: Optimizer<M>,
    L: LossFunction<M::Output, Dt::Target> + LossFunction<M::Output, Dv::Target>,
    Dt: DataSource<Input = M::Input>,
    Dv: DataSource<Input = M::Input>,
    Dt::Target: ToDevice,
    Dv::Target: ToDevice,
    C: CheckpointSink<M::Snapshot>,
{
    let run_start = Instant::now();
    let mut state = TrainingState::new();
    let mut train_secs_total = 0.0;
    let mut eval_secs_total = 0.0;

    for epoch in 1..=config.epochs {
        // Early stopping is checked before the epoch starts, so the epoch at
        // which the counter reaches patience never runs at all.
        if state.should_stop(config.patience) {
            println!(
                "Stopping early: no improvement for {} epochs",
                state.no_improvement
            );
            break;
        }

        let train_start = Instant::now();
        let train_loss_sum = train_epoch(
            model,
            optimizer,
            criterion,
            train_data,
            config.device,
            epoch,
        );
        let train_secs = train_start.elapsed().as_secs_f64();
        println!("Training epoch {} took {:.2} seconds", epoch, train_secs);
        train_secs_total += train_secs;

        evaluate_epoch(
            model,
            criterion,
            valid_data,
            checkpoints,
            &mut state,
            train_loss_sum,
            train_data.sample_count(),
            train_secs,
            epoch,
            config.epochs,
            config.device,
        )?;
        // The evaluator times its own phase and records the full entry.
        let eval_secs = state.history.last().map(|s| s.eval_secs).unwrap_or(0.0);
        println!("Evaluating epoch {} took {:.2} seconds\n", epoch, eval_secs);
        eval_secs_total += eval_secs;
    }

    println!(
        "Total learning took {:.2} seconds",
        run_start.elapsed().as_secs_f64()
    );
    println!("Training took {:.2} seconds", train_secs_total);
    println!("Evaluation took {:.2} seconds", eval_secs_total);

    Ok(state.history)
}
