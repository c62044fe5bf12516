use crate::model::Model;

/// Parameter-update strategy bound to a model's learnable parameters.
///
/// The trainer calls `zero_grad` before each batch's backward pass and
/// `step` after it, exactly once per batch.
pub trait Optimizer<M: Model> {
    /// Clears gradients accumulated by previous backward passes.
    fn zero_grad(&mut self, model: &mut M);

    /// Applies one update step using the gradients currently held by the
    /// model. Mutates the model parameters in place.
    fn step(&mut self, model: &mut M);
}
