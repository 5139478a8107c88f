//! Mean normalization.
//!
//! Each feature column is shifted by its training-set mean and divided by its
//! training-set range: `x' = (x - offset) / divisor`. The statistics are fitted
//! once, from the training set only, and then applied unchanged to every batch the
//! classifier scores afterwards.
//!
//! A column whose range is exactly zero cannot be normalized. Both fitting and
//! applying reject it with [`Error::DivisionByZeroFeature`] instead of producing
//! `inf`/`NaN` features.

use crate::{Error, Matrix, Result};

/// Per-feature `(offset, divisor)` pair, each of length `num_features`.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureScaling {
    offset: Vec<f64>,
    divisor: Vec<f64>,
}

impl FeatureScaling {
    /// Fit `offset = mean(X, axis=0)` and `divisor = max(X, axis=0) - min(X, axis=0)`.
    pub fn fit(x: &Matrix) -> Result<Self> {
        if x.rows() == 0 {
            return Err(Error::InvalidArgument(
                "cannot fit feature scaling on zero samples".to_owned(),
            ));
        }
        Self::from_parts(x.column_means(), x.column_ranges())
    }

    /// Rebuild statistics from stored vectors (e.g. a loaded archive).
    pub fn from_parts(offset: Vec<f64>, divisor: Vec<f64>) -> Result<Self> {
        if offset.len() != divisor.len() {
            return Err(Error::ShapeMismatch(format!(
                "offset length {} does not match divisor length {}",
                offset.len(),
                divisor.len()
            )));
        }
        if let Some(feature) = divisor.iter().position(|&d| d == 0.0) {
            return Err(Error::DivisionByZeroFeature { feature });
        }
        Ok(Self { offset, divisor })
    }

    #[inline]
    pub fn num_features(&self) -> usize {
        self.offset.len()
    }

    #[inline]
    pub fn offset(&self) -> &[f64] {
        &self.offset
    }

    #[inline]
    pub fn divisor(&self) -> &[f64] {
        &self.divisor
    }

    /// Returns `(X - offset) / divisor`, applied column by column.
    pub fn apply(&self, x: &Matrix) -> Result<Matrix> {
        if x.cols() != self.num_features() {
            return Err(Error::ShapeMismatch(format!(
                "input has {} features, scaling was fitted on {}",
                x.cols(),
                self.num_features()
            )));
        }

        let mut out = x.clone();
        let n = self.num_features();
        if n == 0 {
            return Ok(out);
        }
        for row in out.as_mut_slice().chunks_exact_mut(n) {
            for ((v, &o), &d) in row.iter_mut().zip(&self.offset).zip(&self.divisor) {
                *v = (*v - o) / d;
            }
        }
        Ok(out)
    }

    /// Scale a single sample in place.
    pub fn apply_one(&self, features: &mut [f64]) -> Result<()> {
        if features.len() != self.num_features() {
            return Err(Error::ShapeMismatch(format!(
                "sample has {} features, scaling was fitted on {}",
                features.len(),
                self.num_features()
            )));
        }
        for ((v, &o), &d) in features.iter_mut().zip(&self.offset).zip(&self.divisor) {
            *v = (*v - o) / d;
        }
        Ok(())
    }

    /// Element-wise closeness of both vectors.
    pub fn all_close(&self, other: &FeatureScaling, rtol: f64, atol: f64) -> bool {
        crate::matrix::all_close(&self.offset, &other.offset, rtol, atol)
            && crate::matrix::all_close(&self.divisor, &other.divisor, rtol, atol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_uses_mean_and_range() {
        let x = Matrix::from_rows(&[[2.0, 4.0], [100.0, 5.0], [6.0, 88.0], [90.0, 111.0]]).unwrap();
        let s = FeatureScaling::fit(&x).unwrap();
        assert_eq!(s.offset(), &[49.5, 52.0]);
        assert_eq!(s.divisor(), &[98.0, 107.0]);
    }

    #[test]
    fn apply_matches_embedded_fixture() {
        let s = FeatureScaling::from_parts(
            vec![3.0, 4.0, 22.0, 7.0, 0.0, 4.0, 5.0, 10.0],
            vec![2.0, 3.0, 10.0, 9.0, 1.0, 3.0, 7.0, 9.0],
        )
        .unwrap();
        let mut features = [1.0, 10.0, 88.0, 3.0, 9.0, 5.0, 11.0, 1.0];
        s.apply_one(&mut features).unwrap();

        let expected = [-1.0, 2.0, 6.6, -4.0 / 9.0, 9.0, 1.0 / 3.0, 6.0 / 7.0, -1.0];
        for (got, want) in features.iter().zip(expected) {
            assert!((got - want).abs() < 1e-12, "{got} vs {want}");
        }
    }

    #[test]
    fn constant_column_fails_fast() {
        let x = Matrix::from_rows(&[[1.0, 7.0], [2.0, 7.0]]).unwrap();
        assert_eq!(
            FeatureScaling::fit(&x).unwrap_err(),
            Error::DivisionByZeroFeature { feature: 1 }
        );
    }

    #[test]
    fn apply_checks_feature_count() {
        let s = FeatureScaling::from_parts(vec![0.0], vec![1.0]).unwrap();
        assert!(matches!(
            s.apply(&Matrix::zeros(3, 2)),
            Err(Error::ShapeMismatch(_))
        ));
    }

    #[test]
    fn empty_training_set_is_rejected() {
        assert!(matches!(
            FeatureScaling::fit(&Matrix::zeros(0, 2)),
            Err(Error::InvalidArgument(_))
        ));
    }
}
