//! Evaluation metrics.
//!
//! Metrics are computed from predictions only; they never feed back into training.

use std::fmt;

use crate::{Dataset, Error, LinearClassifier, Matrix, Result};

/// Recall reported for a class that has no samples in the evaluated set.
///
/// Keeps "no data" distinguishable from "0% recall".
pub const NO_SAMPLES_RECALL: f64 = -1.0;

/// Accuracy and per-class recall of a classifier on a labeled batch.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    /// Fraction of correctly predicted samples, in `[0, 1]`.
    pub accuracy: f64,
    /// Per-class recall, length `num_classes`; [`NO_SAMPLES_RECALL`] for absent classes.
    pub recall: Vec<f64>,
}

impl Evaluation {
    /// Compute accuracy and per-class recall from predictions and true labels.
    ///
    /// Both slices must have the same non-zero length and every label must be in
    /// `[0, num_classes)`.
    pub fn from_predictions(
        predicted: &[usize],
        labels: &[usize],
        num_classes: usize,
    ) -> Result<Self> {
        if predicted.len() != labels.len() {
            return Err(Error::ShapeMismatch(format!(
                "{} predictions for {} labels",
                predicted.len(),
                labels.len()
            )));
        }
        if labels.is_empty() {
            return Err(Error::InvalidArgument(
                "cannot evaluate on zero samples".to_owned(),
            ));
        }

        let mut class_counts = vec![0_usize; num_classes];
        let mut correct_counts = vec![0_usize; num_classes];
        let mut correct = 0_usize;
        for (i, (&p, &y)) in predicted.iter().zip(labels).enumerate() {
            if y >= num_classes {
                return Err(Error::InvalidArgument(format!(
                    "label {y} at row {i} is outside [0, {num_classes})"
                )));
            }
            class_counts[y] += 1;
            if p == y {
                correct_counts[y] += 1;
                correct += 1;
            }
        }

        let recall = class_counts
            .iter()
            .zip(&correct_counts)
            .map(|(&total, &hit)| {
                if total == 0 {
                    NO_SAMPLES_RECALL
                } else {
                    hit as f64 / total as f64
                }
            })
            .collect();

        Ok(Self {
            accuracy: correct as f64 / labels.len() as f64,
            recall,
        })
    }

    /// Recall of `class`, or `None` if it had no samples (or is out of range).
    pub fn recall_of(&self, class: usize) -> Option<f64> {
        self.recall
            .get(class)
            .copied()
            .filter(|&r| r != NO_SAMPLES_RECALL)
    }
}

impl fmt::Display for Evaluation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "accuracy: {:.2}%", self.accuracy * 100.0)?;
        for class in 0..self.recall.len() {
            match self.recall_of(class) {
                Some(r) => writeln!(f, "class {class} recall: {:.2}%", r * 100.0)?,
                None => writeln!(f, "class {class} recall: no samples")?,
            }
        }
        Ok(())
    }
}

impl LinearClassifier {
    /// Predict `x` and score the predictions against `y`.
    pub fn evaluate(&self, x: &Matrix, y: &[usize]) -> Result<Evaluation> {
        self.trained_scaling()?;
        self.check_labeled(x, y)?;
        let predicted = self.predict(x)?;
        Evaluation::from_predictions(&predicted, y, self.num_classes())
    }

    /// [`LinearClassifier::evaluate`] on a [`Dataset`].
    pub fn evaluate_dataset(&self, data: &Dataset) -> Result<Evaluation> {
        self.evaluate(data.features(), data.labels())
    }
}
