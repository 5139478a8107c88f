//! Labeled datasets.
//!
//! A [`Dataset`] pairs a feature matrix `X` (`m × n`) with a label vector `y`
//! (length `m`). The classifier never shuffles; [`Dataset::split`] keeps row
//! order, so callers shuffle beforehand if they need a random split.

use crate::{Error, Matrix, Result};

/// A feature matrix and its class labels.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    features: Matrix,
    labels: Vec<usize>,
}

impl Dataset {
    /// Pair `features` with `labels`; `labels.len()` must equal `features.rows()`.
    pub fn new(features: Matrix, labels: Vec<usize>) -> Result<Self> {
        if features.rows() != labels.len() {
            return Err(Error::ShapeMismatch(format!(
                "{} labels for {} samples",
                labels.len(),
                features.rows()
            )));
        }
        Ok(Self { features, labels })
    }

    /// Build a dataset from a flat row-major feature buffer.
    pub fn from_flat(features: Vec<f64>, labels: Vec<usize>, num_features: usize) -> Result<Self> {
        let features = Matrix::from_flat(features, labels.len(), num_features)?;
        Self::new(features, labels)
    }

    /// Build a dataset from per-sample feature rows.
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R], labels: &[usize]) -> Result<Self> {
        Self::new(Matrix::from_rows(rows)?, labels.to_vec())
    }

    /// Build a dataset from rows whose final column is the class label.
    ///
    /// This is the layout of recorded training files: `n` feature values followed
    /// by the label, stored as a number. Labels must be non-negative integers.
    pub fn from_labeled_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self> {
        let mut features = Vec::with_capacity(rows.len());
        let mut labels = Vec::with_capacity(rows.len());
        for (i, row) in rows.iter().enumerate() {
            let (&label, feats) = row.as_ref().split_last().ok_or_else(|| {
                Error::ShapeMismatch(format!("row {i} has no label column"))
            })?;
            if feats.is_empty() {
                return Err(Error::ShapeMismatch(format!("row {i} has no feature columns")));
            }
            if !(label.is_finite() && label >= 0.0 && label.fract() == 0.0) {
                return Err(Error::InvalidArgument(format!(
                    "row {i} label {label} is not a non-negative integer"
                )));
            }
            features.push(feats);
            labels.push(label as usize);
        }
        Self::new(Matrix::from_rows(&features)?, labels)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    #[inline]
    pub fn num_features(&self) -> usize {
        self.features.cols()
    }

    #[inline]
    pub fn features(&self) -> &Matrix {
        &self.features
    }

    #[inline]
    pub fn labels(&self) -> &[usize] {
        &self.labels
    }

    /// Split into `(head, tail)` where `head` holds the first `floor(proportion * len)` rows.
    ///
    /// `proportion` must lie in `[0, 1)`.
    pub fn split(&self, proportion: f64) -> Result<(Dataset, Dataset)> {
        if !(0.0..1.0).contains(&proportion) {
            return Err(Error::InvalidArgument(format!(
                "split proportion must be in [0, 1), got {proportion}"
            )));
        }
        let at = (proportion * self.len() as f64) as usize;
        let n = self.num_features();
        let (head_x, tail_x) = self.features.as_slice().split_at(at * n);
        let (head_y, tail_y) = self.labels.split_at(at);

        let head = Dataset::from_flat(head_x.to_vec(), head_y.to_vec(), n)?;
        let tail = Dataset::from_flat(tail_x.to_vec(), tail_y.to_vec(), n)?;
        Ok((head, tail))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_validates_label_count() {
        let err = Dataset::new(Matrix::zeros(3, 2), vec![0, 1]).unwrap_err();
        assert!(matches!(err, Error::ShapeMismatch(_)));
    }

    #[test]
    fn labeled_rows_take_label_from_last_column() {
        let data = Dataset::from_labeled_rows(&[[1.0, 2.0, 3.0], [4.0, 5.0, 0.0]]).unwrap();
        assert_eq!(data.labels(), &[3, 0]);
        assert_eq!(data.features().as_slice(), &[1.0, 2.0, 4.0, 5.0]);
    }

    #[test]
    fn labeled_rows_reject_fractional_or_negative_labels() {
        assert!(matches!(
            Dataset::from_labeled_rows(&[[1.0, 0.5]]),
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            Dataset::from_labeled_rows(&[[1.0, -1.0]]),
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            Dataset::from_labeled_rows(&[[1.0]]),
            Err(Error::ShapeMismatch(_))
        ));
    }

    #[test]
    fn split_keeps_row_order() {
        let rows: Vec<Vec<f64>> = (0..10).map(|i| vec![i as f64]).collect();
        let labels: Vec<usize> = (0..10).map(|i| i % 2).collect();
        let data = Dataset::from_rows(&rows, &labels).unwrap();

        let (train, test) = data.split(0.8).unwrap();
        assert_eq!(train.len(), 8);
        assert_eq!(test.len(), 2);
        assert_eq!(test.features().as_slice(), &[8.0, 9.0]);
        assert_eq!(test.labels(), &[0, 1]);

        assert!(data.split(1.0).is_err());
        let (empty, all) = data.split(0.0).unwrap();
        assert!(empty.is_empty());
        assert_eq!(all, data);
    }
}
