//! Confusion matrix and per-class classification metrics.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;

use crate::error::Id3Error;
use crate::example::Example;
use crate::tree::DecisionTree;

/// A confusion matrix over string class labels.
///
/// Entry `matrix[t][p]` counts samples whose true label is `classes[t]`
/// and whose predicted label is `classes[p]`. Classes are ordered by first
/// appearance among the true labels, followed by labels that were only
/// ever predicted (such as the unknown label).
#[derive(Debug, Clone)]
pub struct ConfusionMatrix {
    classes: Vec<String>,
    matrix: Vec<Vec<usize>>,
}

/// Per-class precision, recall, and F1 score.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ClassMetrics {
    /// The class label.
    pub class: String,
    /// Precision: TP / (TP + FP). 0.0 if no predictions for this class.
    pub precision: f64,
    /// Recall: TP / (TP + FN). 0.0 if no true samples for this class.
    pub recall: f64,
    /// F1: 2 * precision * recall / (precision + recall). 0.0 if both are zero.
    pub f1: f64,
    /// Number of true samples in this class.
    pub support: usize,
}

impl ConfusionMatrix {
    /// Build a confusion matrix from true and predicted labels.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`Id3Error::EmptyDataset`] | Zero labels provided |
    /// | [`Id3Error::LabelCountMismatch`] | Slices differ in length |
    pub fn from_labels<T: AsRef<str>, P: AsRef<str>>(
        true_labels: &[T],
        predicted: &[P],
    ) -> Result<Self, Id3Error> {
        if true_labels.is_empty() {
            return Err(Id3Error::EmptyDataset);
        }
        if true_labels.len() != predicted.len() {
            return Err(Id3Error::LabelCountMismatch {
                expected: true_labels.len(),
                predicted: predicted.len(),
            });
        }

        let mut classes: Vec<String> = Vec::new();
        let mut index: HashMap<&str, usize> = HashMap::new();
        let all_labels = true_labels
            .iter()
            .map(|t| t.as_ref())
            .chain(predicted.iter().map(|p| p.as_ref()));
        for label in all_labels {
            index.entry(label).or_insert_with(|| {
                classes.push(label.to_string());
                classes.len() - 1
            });
        }

        let n_classes = classes.len();
        let mut matrix = vec![vec![0usize; n_classes]; n_classes];
        for (t, p) in true_labels.iter().zip(predicted) {
            matrix[index[t.as_ref()]][index[p.as_ref()]] += 1;
        }
        Ok(Self { classes, matrix })
    }

    /// Overall accuracy: proportion of correct predictions.
    #[must_use]
    pub fn accuracy(&self) -> f64 {
        let correct: usize = (0..self.n_classes()).map(|i| self.matrix[i][i]).sum();
        let total: usize = self.matrix.iter().flat_map(|row| row.iter()).sum();
        if total == 0 {
            0.0
        } else {
            correct as f64 / total as f64
        }
    }

    /// Per-class precision, recall, F1, and support.
    #[must_use]
    pub fn class_metrics(&self) -> Vec<ClassMetrics> {
        let n = self.n_classes();
        (0..n)
            .map(|c| {
                let tp = self.matrix[c][c];
                let fp: usize = (0..n).filter(|&i| i != c).map(|i| self.matrix[i][c]).sum();
                let fn_: usize = (0..n).filter(|&j| j != c).map(|j| self.matrix[c][j]).sum();
                let support = tp + fn_;
                let precision = if tp + fp == 0 {
                    0.0
                } else {
                    tp as f64 / (tp + fp) as f64
                };
                let recall = if support == 0 {
                    0.0
                } else {
                    tp as f64 / support as f64
                };
                let f1 = if precision + recall == 0.0 {
                    0.0
                } else {
                    2.0 * precision * recall / (precision + recall)
                };
                ClassMetrics {
                    class: self.classes[c].clone(),
                    precision,
                    recall,
                    f1,
                    support,
                }
            })
            .collect()
    }

    /// Return the class labels, in matrix order.
    #[must_use]
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Return the underlying matrix rows.
    #[must_use]
    pub fn as_rows(&self) -> &[Vec<usize>] {
        &self.matrix
    }

    /// Return the number of classes.
    #[must_use]
    pub fn n_classes(&self) -> usize {
        self.classes.len()
    }
}

impl fmt::Display for ConfusionMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self
            .classes
            .iter()
            .map(String::len)
            .max()
            .unwrap_or(0)
            .max(5);
        write!(f, "{:>width$}", "")?;
        for class in &self.classes {
            write!(f, " {class:>width$}")?;
        }
        writeln!(f)?;
        for (class, row) in self.classes.iter().zip(&self.matrix) {
            write!(f, "{class:>width$}")?;
            for count in row {
                write!(f, " {count:>width$}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl DecisionTree {
    /// Predict every labeled example and tabulate the outcomes.
    ///
    /// Unlabeled examples are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`Id3Error::EmptyDataset`] when no example carries a label.
    pub fn evaluate<E: Borrow<Example>>(&self, examples: &[E]) -> Result<ConfusionMatrix, Id3Error> {
        let mut truth: Vec<&str> = Vec::with_capacity(examples.len());
        let mut predicted: Vec<&str> = Vec::with_capacity(examples.len());
        for e in examples {
            let e: &Example = e.borrow();
            if e.is_labeled() {
                truth.push(e.label());
                predicted.push(self.predict(e));
            }
        }
        ConfusionMatrix::from_labels(&truth, &predicted)
    }
}
