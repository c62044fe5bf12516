use crate::device::{DevicePlacement, ToDevice};

/// One mini-batch: an input batch, its target batch, and the number of
/// samples both contain.
#[derive(Debug, Clone)]
pub struct Batch<I, T> {
    pub input: I,
    pub target: T,
    pub len: usize,
}

impl<I, T> Batch<I, T> {
    pub fn new(input: I, target: T, len: usize) -> Batch<I, T> {
        Batch { input, target, len }
    }
}

impl<I: ToDevice, T: ToDevice> Batch<I, T> {
    /// Moves both halves of the batch to the requested placement.
    pub fn place(&mut self, placement: DevicePlacement) {
        self.input.place(placement);
        self.target.place(placement);
    }
}

/// A finite, restartable sequence of mini-batches.
///
/// Every call to `batches` starts a fresh pass over the same underlying
/// sample set. `sample_count` is the size of that sample set, not the batch
/// count — epoch losses are normalized by it.
pub trait DataSource {
    type Input;
    type Target;

    fn batches(&self) -> Box<dyn Iterator<Item = Batch<Self::Input, Self::Target>> + '_>;

    fn sample_count(&self) -> usize;
}
