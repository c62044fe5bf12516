/// Hard class predictions from one model output batch.
pub trait ClassPredictions {
    /// Predicted label id (index of the maximum score) for each sample.
    fn predicted_classes(&self) -> Vec<usize>;
}

/// Ground-truth label ids from one target batch.
pub trait ClassLabels {
    fn class_labels(&self) -> Vec<usize>;
}

/// Index of the maximum element in a slice; ties resolve to the first.
pub(crate) fn argmax(row: &[f64]) -> usize {
    let mut best = 0;
    for (i, v) in row.iter().enumerate().skip(1) {
        // Strictly greater only, so an earlier index wins a tie.
        if *v > row[best] {
            best = i;
        }
    }
    best
}

/// Score rows: the prediction is the argmax of each row.
impl ClassPredictions for Vec<Vec<f64>> {
    fn predicted_classes(&self) -> Vec<usize> {
        self.iter().map(|row| argmax(row)).collect()
    }
}

/// Plain label-id targets.
impl ClassLabels for Vec<usize> {
    fn class_labels(&self) -> Vec<usize> {
        self.clone()
    }
}

/// One-hot (or soft) target rows: the label is the argmax of each row.
impl ClassLabels for Vec<Vec<f64>> {
    fn class_labels(&self) -> Vec<usize> {
        self.iter().map(|row| argmax(row)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn argmax_picks_first_on_ties() {
        assert_eq!(argmax(&[0.5, 0.5, 0.1]), 0);
        assert_eq!(argmax(&[0.1, 0.2, 0.9]), 2);
        assert_eq!(argmax(&[0.3, 0.3, 0.3]), 0);
    }

    #[test]
    fn degenerate_soft_targets_decode_to_first_class() {
        let target = vec![vec![0.5, 0.5]];
        assert_eq!(target.class_labels(), vec![0]);
    }

    #[test]
    fn score_rows_predict_by_argmax() {
        let output = vec![vec![0.1, 0.8, 0.1], vec![0.9, 0.05, 0.05]];
        assert_eq!(output.predicted_classes(), vec![1, 0]);
    }

    #[test]
    fn one_hot_targets_yield_label_ids() {
        let target = vec![vec![0.0, 1.0], vec![1.0, 0.0]];
        assert_eq!(target.class_labels(), vec![1, 0]);
    }
}
