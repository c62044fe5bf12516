use std::fs;
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};

use serde::Serialize;

use super::CheckpointSink;

/// Writes snapshots as pretty-printed JSON files named
/// `<epoch:3-digit-zero-padded>model_cifar.pt` inside a fixed directory.
///
/// No versioning beyond the epoch tag: re-running with overlapping epoch
/// numbers overwrites prior files. Whoever consumes the run is expected to
/// load the latest improving checkpoint themselves.
pub struct FileCheckpointSink {
    dir: PathBuf,
}

impl FileCheckpointSink {
    /// Creates the sink, creating `dir` if it does not exist yet.
    pub fn new<P: AsRef<Path>>(dir: P) -> io::Result<FileCheckpointSink> {
        fs::create_dir_all(dir.as_ref())?;
        Ok(FileCheckpointSink {
            dir: dir.as_ref().to_path_buf(),
        })
    }

    /// Checkpoint filename for a given epoch, e.g. `007model_cifar.pt`.
    pub fn file_name(epoch: usize) -> String {
        format!("{:03}model_cifar.pt", epoch)
    }
}

impl<S: Serialize> CheckpointSink<S> for FileCheckpointSink {
    fn save(&mut self, snapshot: &S, epoch: usize) -> io::Result<PathBuf> {
        let path = self.dir.join(Self::file_name(epoch));
        let file = fs::File::create(&path)?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, snapshot)
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_name_is_zero_padded() {
        assert_eq!(FileCheckpointSink::file_name(7), "007model_cifar.pt");
        assert_eq!(FileCheckpointSink::file_name(123), "123model_cifar.pt");
    }

    #[test]
    fn save_writes_json_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = FileCheckpointSink::new(dir.path()).unwrap();
        let snapshot = vec![1.0f64, 2.0, 3.0];

        let path = sink.save(&snapshot, 2).unwrap();
        assert!(path.ends_with("002model_cifar.pt"));

        let restored: Vec<f64> =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(restored, snapshot);
    }

    #[test]
    fn overlapping_epochs_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = FileCheckpointSink::new(dir.path()).unwrap();
        sink.save(&vec![1.0f64], 1).unwrap();
        let path = sink.save(&vec![2.0f64], 1).unwrap();

        let restored: Vec<f64> =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(restored, vec![2.0]);
    }
}
