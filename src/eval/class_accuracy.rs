use serde::{Deserialize, Serialize};

/// Correct/total counts for one class over a test pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassAccuracy {
    pub name: String,
    pub correct: usize,
    pub total: usize,
}

impl ClassAccuracy {
    /// Fraction correct in [0, 1], or `None` when the class had no observed
    /// samples (reported as "N/A").
    pub fn accuracy(&self) -> Option<f64> {
        if self.total == 0 {
            None
        } else {
            Some(self.correct as f64 / self.total as f64)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_total_has_no_accuracy() {
        let class = ClassAccuracy {
            name: "bird".into(),
            correct: 0,
            total: 0,
        };
        assert!(class.accuracy().is_none());
    }

    #[test]
    fn accuracy_is_correct_over_total() {
        let class = ClassAccuracy {
            name: "cat".into(),
            correct: 3,
            total: 4,
        };
        assert_eq!(class.accuracy(), Some(0.75));
    }
}
