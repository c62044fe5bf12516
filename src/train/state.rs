use super::epoch_stats::EpochStats;

/// Mutable bookkeeping for one training run.
///
/// Threaded explicitly through the epoch loop instead of living in
/// module-level variables, so runs are deterministic and parallel test runs
/// cannot interfere with each other. Created by `train_loop` and consumed
/// when it returns.
#[derive(Debug)]
pub struct TrainingState {
    /// Best mean validation loss seen so far. Starts at +infinity so the
    /// first evaluated epoch always counts as an improvement.
    pub best_valid_loss: f64,
    /// Consecutive epochs without an improvement.
    pub no_improvement: usize,
    /// Ordered per-epoch results.
    pub history: Vec<EpochStats>,
}

impl TrainingState {
    pub fn new() -> TrainingState {
        TrainingState {
            best_valid_loss: f64::INFINITY,
            no_improvement: 0,
            history: Vec::new(),
        }
    }

    /// Records one epoch's validation loss and returns `true` when it
    /// improves on the best seen so far (checkpoint-worthy).
    ///
    /// "Improvement" is strict-or-equal: a validation loss equal to the
    /// current best still resets the counter and re-checkpoints.
    pub fn observe(&mut self, valid_loss: f64) -> bool {
        if valid_loss <= self.best_valid_loss {
            self.best_valid_loss = valid_loss;
            self.no_improvement = 0;
            true
        } else {
            self.no_improvement += 1;
            false
        }
    }

    /// Whether the run is out of patience.
    pub fn should_stop(&self, patience: usize) -> bool {
        self.no_improvement >= patience
    }
}

impl Default for TrainingState {
    fn default() -> Self {
        TrainingState::new()
    }
}
