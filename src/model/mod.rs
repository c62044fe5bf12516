use serde::Serialize;

/// Capability surface the harness requires from a trainable model.
///
/// The harness flips the model into training mode for gradient passes and
/// into evaluation mode for validation/testing, and otherwise treats the
/// architecture as opaque — any model satisfying this trait can be driven
/// through the epoch loop.
pub trait Model {
    /// One batch of inputs, as produced by the run's data sources.
    type Input;
    /// One batch of outputs (per-sample score vectors for classifiers).
    type Output;
    /// Serializable snapshot of the learnable-parameter values.
    type Snapshot: Serialize;

    /// Switches to training mode; `backward` accumulates gradients.
    fn train_mode(&mut self);

    /// Switches to evaluation mode; parameters are read-only until the next
    /// `train_mode` call.
    fn eval_mode(&mut self);

    /// Forward pass over one input batch.
    ///
    /// Takes `&mut self` so implementations can cache activations for the
    /// backward pass.
    fn forward(&mut self, input: &Self::Input) -> Self::Output;

    /// Backpropagates the loss gradient w.r.t. the output of the preceding
    /// `forward` call, accumulating parameter gradients for the next
    /// optimizer step. Only meaningful in training mode.
    fn backward(&mut self, output_grad: &Self::Output);

    /// Snapshot of the current learnable-parameter values, used by the
    /// evaluator when persisting a checkpoint.
    fn snapshot(&self) -> Self::Snapshot;
}
