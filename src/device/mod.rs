use serde::{Deserialize, Serialize};

/// Where batches live for the duration of one run.
///
/// Selected once in `RunConfig` and applied uniformly to every batch; the
/// trainer, evaluator and tester never branch on it themselves — they hand
/// each batch to `ToDevice::place` and let the collaborator decide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DevicePlacement {
    /// Host memory. `ToDevice::place` is a no-op.
    Host,
    /// Accelerator memory. Collaborators that support it transfer the batch;
    /// host-only collaborators keep the default no-op.
    Accelerator,
}

/// Per-batch transfer capability.
///
/// The default body is a no-op so host-only input and target types can opt
/// in with an empty impl.
pub trait ToDevice {
    fn place(&mut self, _target: DevicePlacement) {}
}

impl ToDevice for Vec<Vec<f64>> {}
impl ToDevice for Vec<usize> {}
