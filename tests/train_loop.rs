use std::path::PathBuf;

use ferrite_train::train::{evaluate_epoch, train_epoch};
use ferrite_train::{
    train_loop, Batch, CheckpointSink, DevicePlacement, InMemoryDataSource, LossFunction, Model,
    Optimizer, RunConfig, TrainingState,
};

// ---------------------------------------------------------------------------
// Harness doubles
// ---------------------------------------------------------------------------

/// Model whose evaluation-mode forward emits a scripted loss value per eval
/// pass, so validation losses can be chosen exactly per epoch.
struct ScriptedModel {
    valid_losses: Vec<f64>,
    eval_passes: usize,
    training: bool,
}

impl ScriptedModel {
    fn new(valid_losses: &[f64]) -> ScriptedModel {
        ScriptedModel {
            valid_losses: valid_losses.to_vec(),
            eval_passes: 0,
            training: false,
        }
    }
}

impl Model for ScriptedModel {
    type Input = Vec<Vec<f64>>;
    type Output = Vec<Vec<f64>>;
    type Snapshot = Vec<f64>;

    fn train_mode(&mut self) {
        self.training = true;
    }

    fn eval_mode(&mut self) {
        self.training = false;
        self.eval_passes += 1;
    }

    fn forward(&mut self, input: &Vec<Vec<f64>>) -> Vec<Vec<f64>> {
        if self.training {
            vec![vec![0.25]; input.len()]
        } else {
            vec![vec![self.valid_losses[self.eval_passes - 1]]; input.len()]
        }
    }

    fn backward(&mut self, _output_grad: &Vec<Vec<f64>>) {}

    fn snapshot(&self) -> Vec<f64> {
        vec![self.eval_passes as f64]
    }
}

/// Criterion that reads the loss straight out of the first output row.
struct OutputLoss;

impl LossFunction<Vec<Vec<f64>>, Vec<Vec<f64>>> for OutputLoss {
    fn loss(&self, output: &Vec<Vec<f64>>, _target: &Vec<Vec<f64>>) -> f64 {
        output[0][0]
    }

    fn gradient(&self, output: &Vec<Vec<f64>>, _target: &Vec<Vec<f64>>) -> Vec<Vec<f64>> {
        output.iter().map(|row| vec![0.0; row.len()]).collect()
    }
}

struct NoOpOptimizer;

impl Optimizer<ScriptedModel> for NoOpOptimizer {
    fn zero_grad(&mut self, _model: &mut ScriptedModel) {}
    fn step(&mut self, _model: &mut ScriptedModel) {}
}

/// Records which epochs were checkpointed instead of touching the disk.
struct RecordingSink {
    saved_epochs: Vec<usize>,
}

impl CheckpointSink<Vec<f64>> for RecordingSink {
    fn save(&mut self, _snapshot: &Vec<f64>, epoch: usize) -> std::io::Result<PathBuf> {
        self.saved_epochs.push(epoch);
        Ok(PathBuf::from(format!("{:03}model_cifar.pt", epoch)))
    }
}

fn single_batch_source() -> InMemoryDataSource<Vec<Vec<f64>>, Vec<Vec<f64>>> {
    InMemoryDataSource::new(vec![Batch::new(vec![vec![0.0]], vec![vec![0.0]], 1)])
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[test]
fn early_stopping_halts_before_the_third_epoch() {
    // Validation losses 0.5, 0.6, 0.4 with patience 1: epoch 1 improves
    // (checkpoint, counter 0), epoch 2 does not (counter 1 == patience), so
    // epoch 3 never runs even though its loss would have improved.
    let mut model = ScriptedModel::new(&[0.5, 0.6, 0.4]);
    let mut optimizer = NoOpOptimizer;
    let mut sink = RecordingSink {
        saved_epochs: Vec::new(),
    };
    let config = RunConfig::new(3, 1).with_patience(1);

    let history = train_loop(
        &mut model,
        &mut optimizer,
        &OutputLoss,
        &single_batch_source(),
        &single_batch_source(),
        &mut sink,
        &config,
    )
    .unwrap();

    assert_eq!(history.len(), 2);
    assert_eq!(history[0].valid_loss, 0.5);
    assert_eq!(history[1].valid_loss, 0.6);
    assert_eq!(sink.saved_epochs, vec![1]);
    assert_eq!(model.eval_passes, 2);
}

#[test]
fn trainer_accumulates_loss_times_batch_size() {
    // One batch of 4 samples with constant loss 0.25 → sum is 4 × 0.25.
    let mut model = ScriptedModel::new(&[]);
    let mut optimizer = NoOpOptimizer;
    let source = InMemoryDataSource::new(vec![Batch::new(
        vec![vec![0.0]; 4],
        vec![vec![0.0]; 4],
        4,
    )]);

    let sum = train_epoch(
        &mut model,
        &mut optimizer,
        &OutputLoss,
        &source,
        DevicePlacement::Host,
        1,
    );
    assert!((sum - 1.0).abs() < 1e-12);
}

#[test]
fn trainer_processes_every_batch() {
    // Three batches of one sample each at loss 0.25: the pass must not
    // return after the first batch, so the sum is 0.75, not 0.25.
    let mut model = ScriptedModel::new(&[]);
    let mut optimizer = NoOpOptimizer;
    let source = InMemoryDataSource::new(vec![
        Batch::new(vec![vec![0.0]], vec![vec![0.0]], 1),
        Batch::new(vec![vec![0.0]], vec![vec![0.0]], 1),
        Batch::new(vec![vec![0.0]], vec![vec![0.0]], 1),
    ]);

    let sum = train_epoch(
        &mut model,
        &mut optimizer,
        &OutputLoss,
        &source,
        DevicePlacement::Host,
        1,
    );
    assert!((sum - 0.75).abs() < 1e-12);
}

#[test]
fn empty_training_source_yields_zero_loss() {
    let mut model = ScriptedModel::new(&[]);
    let mut optimizer = NoOpOptimizer;
    let source: InMemoryDataSource<Vec<Vec<f64>>, Vec<Vec<f64>>> =
        InMemoryDataSource::new(Vec::new());

    let sum = train_epoch(
        &mut model,
        &mut optimizer,
        &OutputLoss,
        &source,
        DevicePlacement::Host,
        1,
    );
    assert_eq!(sum, 0.0);
}

#[test]
fn evaluator_records_complete_epoch_stats() {
    // Called directly, outside the loop: the recorded entry must carry the
    // supplied training duration and a measured evaluation duration, not
    // placeholders awaiting a later patch.
    let mut model = ScriptedModel::new(&[0.5]);
    let mut sink = RecordingSink {
        saved_epochs: Vec::new(),
    };
    let mut state = TrainingState::new();

    evaluate_epoch(
        &mut model,
        &OutputLoss,
        &single_batch_source(),
        &mut sink,
        &mut state,
        1.0,
        4,
        1.5,
        1,
        1,
        DevicePlacement::Host,
    )
    .unwrap();

    assert_eq!(state.history.len(), 1);
    let stats = &state.history[0];
    assert_eq!(stats.train_secs, 1.5);
    assert!(stats.eval_secs >= 0.0);
    assert_eq!(stats.train_loss, 0.25);
    assert_eq!(stats.valid_loss, 0.5);
    assert_eq!(sink.saved_epochs, vec![1]);
}

#[test]
fn checkpoint_written_iff_validation_improves() {
    // 0.9 improves, 0.7 improves, 0.8 does not, 0.6 improves, and the final
    // 0.6 equals the best — strict-or-equal, so it checkpoints again.
    let mut model = ScriptedModel::new(&[0.9, 0.7, 0.8, 0.6, 0.6]);
    let mut optimizer = NoOpOptimizer;
    let mut sink = RecordingSink {
        saved_epochs: Vec::new(),
    };
    let config = RunConfig::new(5, 1).with_patience(10);

    let history = train_loop(
        &mut model,
        &mut optimizer,
        &OutputLoss,
        &single_batch_source(),
        &single_batch_source(),
        &mut sink,
        &config,
    )
    .unwrap();

    assert_eq!(history.len(), 5);
    assert_eq!(sink.saved_epochs, vec![1, 2, 4, 5]);

    // Best-so-far over the recorded history never increases.
    let mut best = f64::INFINITY;
    for stats in &history {
        best = best.min(stats.valid_loss);
        assert!(best <= stats.valid_loss);
    }
}

#[test]
fn zero_patience_runs_no_epochs() {
    let mut model = ScriptedModel::new(&[0.5]);
    let mut optimizer = NoOpOptimizer;
    let mut sink = RecordingSink {
        saved_epochs: Vec::new(),
    };
    let config = RunConfig::new(3, 1).with_patience(0);

    let history = train_loop(
        &mut model,
        &mut optimizer,
        &OutputLoss,
        &single_batch_source(),
        &single_batch_source(),
        &mut sink,
        &config,
    )
    .unwrap();

    assert!(history.is_empty());
    assert!(sink.saved_epochs.is_empty());
    assert_eq!(model.eval_passes, 0);
}

#[test]
fn default_patience_never_stops_early() {
    let mut model = ScriptedModel::new(&[0.5, 0.6, 0.7]);
    let mut optimizer = NoOpOptimizer;
    let mut sink = RecordingSink {
        saved_epochs: Vec::new(),
    };
    let config = RunConfig::new(3, 1);

    let history = train_loop(
        &mut model,
        &mut optimizer,
        &OutputLoss,
        &single_batch_source(),
        &single_batch_source(),
        &mut sink,
        &config,
    )
    .unwrap();

    assert_eq!(history.len(), 3);
    assert_eq!(sink.saved_epochs, vec![1]);
}
