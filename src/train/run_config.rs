use crate::device::DevicePlacement;

/// Configuration for a `train_loop` run.
///
/// # Fields
/// - `epochs`     — total number of full passes over the training data
/// - `patience`   — consecutive non-improving epochs tolerated before the
///                  loop stops early; `0` stops before the first epoch
/// - `batch_size` — samples per mini-batch as produced by the data sources;
///                  the tester drops trailing batches shorter than this
/// - `device`     — batch placement applied uniformly for the whole run
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub epochs: usize,
    pub patience: usize,
    pub batch_size: usize,
    pub device: DevicePlacement,
}

impl RunConfig {
    /// Creates a host-resident config with the given epoch count and batch
    /// size, and patience large enough to never trigger early stopping.
    pub fn new(epochs: usize, batch_size: usize) -> RunConfig {
        RunConfig {
            epochs,
            patience: usize::MAX,
            batch_size,
            device: DevicePlacement::Host,
        }
    }

    pub fn with_patience(mut self, patience: usize) -> RunConfig {
        self.patience = patience;
        self
    }

    pub fn on_device(mut self, device: DevicePlacement) -> RunConfig {
        self.device = device;
        self
    }
}
