use serde::{Deserialize, Serialize};

/// Per-epoch statistics collected by `train_loop`.
///
/// One value is appended to the run history at the end of every completed
/// epoch; the full ordered vector is returned when the loop finishes and
/// backs the `history.json` file in a written report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpochStats {
    /// 1-based epoch number.
    pub epoch: usize,
    /// Total epochs requested for this run.
    pub total_epochs: usize,
    /// Mean training loss over all training samples in this epoch.
    pub train_loss: f64,
    /// Mean validation loss over all validation samples.
    pub valid_loss: f64,
    /// Wall-clock duration of the training phase in seconds.
    pub train_secs: f64,
    /// Wall-clock duration of the evaluation phase in seconds.
    pub eval_secs: f64,
}
