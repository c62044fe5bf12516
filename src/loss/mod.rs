pub mod cross_entropy;
pub mod mse;

pub use cross_entropy::CrossEntropyLoss;
pub use mse::MseLoss;

/// Criterion over one (output batch, target batch) pair.
///
/// `loss` is the scalar mean loss over the batch; `gradient` is the loss
/// derivative w.r.t. the output batch, which the trainer feeds back through
/// `Model::backward`.
pub trait LossFunction<O, T> {
    fn loss(&self, output: &O, target: &T) -> f64;
    fn gradient(&self, output: &O, target: &T) -> O;
}
