pub mod file;

pub use file::FileCheckpointSink;

use std::io;
use std::path::PathBuf;

/// Destination for model-parameter snapshots.
///
/// `save` is synchronous and blocks the epoch loop until the write returns.
/// The evaluator calls it at most once per epoch, so no two writes can ever
/// be in flight at the same time.
pub trait CheckpointSink<S> {
    /// Persists `snapshot` keyed by the 1-based epoch index and returns the
    /// path it was written to.
    fn save(&mut self, snapshot: &S, epoch: usize) -> io::Result<PathBuf>;
}
