use rand::seq::SliceRandom;

use super::source::{Batch, DataSource};

/// In-memory data source over pre-collated batches.
///
/// Cheap to iterate repeatedly (batches are cloned per pass), which makes it
/// the natural backing for validation and test partitions as well as for
/// harness tests. Training sources usually want `shuffled()` so each epoch
/// sees the batches in a different order.
pub struct InMemoryDataSource<I, T> {
    batches: Vec<Batch<I, T>>,
    sample_count: usize,
    shuffle: bool,
}

impl<I: Clone, T: Clone> InMemoryDataSource<I, T> {
    pub fn new(batches: Vec<Batch<I, T>>) -> InMemoryDataSource<I, T> {
        let sample_count = batches.iter().map(|b| b.len).sum();
        InMemoryDataSource {
            batches,
            sample_count,
            shuffle: false,
        }
    }

    /// Shuffles batch order on every pass.
    pub fn shuffled(mut self) -> InMemoryDataSource<I, T> {
        self.shuffle = true;
        self
    }
}

impl<I: Clone, T: Clone> DataSource for InMemoryDataSource<I, T> {
    type Input = I;
    type Target = T;

    fn batches(&self) -> Box<dyn Iterator<Item = Batch<I, T>> + '_> {
        if self.shuffle {
            let mut order: Vec<usize> = (0..self.batches.len()).collect();
            order.shuffle(&mut rand::thread_rng());
            Box::new(order.into_iter().map(move |i| self.batches[i].clone()))
        } else {
            Box::new(self.batches.iter().cloned())
        }
    }

    fn sample_count(&self) -> usize {
        self.sample_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_source() -> InMemoryDataSource<Vec<Vec<f64>>, Vec<usize>> {
        InMemoryDataSource::new(vec![
            Batch::new(vec![vec![0.0], vec![1.0]], vec![0, 1], 2),
            Batch::new(vec![vec![2.0]], vec![0], 1),
        ])
    }

    #[test]
    fn sample_count_sums_batch_lengths() {
        assert_eq!(sample_source().sample_count(), 3);
    }

    #[test]
    fn passes_are_restartable() {
        let source = sample_source();
        assert_eq!(source.batches().count(), 2);
        // A second pass yields the same batches again.
        assert_eq!(source.batches().count(), 2);
    }

    #[test]
    fn shuffled_pass_keeps_every_batch() {
        let source = sample_source().shuffled();
        let total: usize = source.batches().map(|b| b.len).sum();
        assert_eq!(total, 3);
    }
}
