//! Quadratic feature expansion and the classifier built on it.
//!
//! Each sample `[x_0, .., x_{n-1}]` is extended with every pairwise product
//! `x_i * x_j` for `i <= j`, in row-major order of the upper triangle:
//!
//! ```text
//! [a, b] -> [a, b, a*a, a*b, b*b]
//! ```
//!
//! The expanded matrix has `n + n(n+1)/2` columns and is fed to an ordinary
//! [`LinearClassifier`], so scaling, training, evaluation and persistence are
//! shared. Scaling statistics (and a [`Error::DivisionByZeroFeature`] index)
//! refer to expanded columns.

use crate::{Dataset, Error, Evaluation, LinearClassifier, Matrix, Result, TrainConfig};

/// Column count after expanding `num_features` raw features, or `None` on overflow.
pub fn quadratic_feature_count(num_features: usize) -> Option<usize> {
    let pairs = num_features.checked_mul(num_features.checked_add(1)?)? / 2;
    num_features.checked_add(pairs)
}

/// Append the pairwise products `x_i * x_j` (`i <= j`) to every row of `x`.
pub fn add_quadratic_features(x: &Matrix) -> Result<Matrix> {
    let cols = quadratic_feature_count(x.cols()).ok_or_else(|| {
        Error::InvalidArgument(format!("{} features overflow the quadratic expansion", x.cols()))
    })?;
    let len = x
        .rows()
        .checked_mul(cols)
        .ok_or_else(|| Error::ShapeMismatch(format!("({}, {cols}) overflows", x.rows())))?;

    let mut data = Vec::with_capacity(len);
    for row in x.iter_rows() {
        extend_row(row, &mut data);
    }
    Matrix::from_flat(data, x.rows(), cols)
}

fn extend_row(row: &[f64], out: &mut Vec<f64>) {
    out.extend_from_slice(row);
    for (i, &a) in row.iter().enumerate() {
        out.extend(row[i..].iter().map(|&b| a * b));
    }
}

/// Inverse of [`quadratic_feature_count`] for non-zero counts.
fn base_feature_count(expanded: usize) -> Option<usize> {
    let disc = expanded.checked_mul(8)?.checked_add(9)?;
    let n = (disc.isqrt() - 3) / 2;
    (n > 0 && quadratic_feature_count(n)? == expanded).then_some(n)
}

/// A [`LinearClassifier`] over quadratically expanded features.
///
/// Inputs are always raw `m × num_features` matrices; the expansion happens
/// internally before scaling.
#[derive(Debug, Clone, PartialEq)]
pub struct QuadraticClassifier {
    num_features: usize,
    linear: LinearClassifier,
}

impl QuadraticClassifier {
    /// Create an untrained classifier for `num_features` raw features.
    pub fn new(num_classes: usize, num_features: usize) -> Result<Self> {
        let expanded = quadratic_feature_count(num_features).ok_or_else(|| {
            Error::InvalidArgument(format!(
                "{num_features} features overflow the quadratic expansion"
            ))
        })?;
        Ok(Self {
            num_features,
            linear: LinearClassifier::new(num_classes, expanded)?,
        })
    }

    /// Wrap a linear classifier whose features are a quadratic expansion.
    ///
    /// Fails with [`Error::InvalidArgument`] if its feature count is not
    /// `n + n(n+1)/2` for any `n >= 1`.
    pub fn from_linear(linear: LinearClassifier) -> Result<Self> {
        let num_features = base_feature_count(linear.num_features()).ok_or_else(|| {
            Error::InvalidArgument(format!(
                "{} features is not a quadratic expansion",
                linear.num_features()
            ))
        })?;
        Ok(Self {
            num_features,
            linear,
        })
    }

    #[inline]
    pub fn num_classes(&self) -> usize {
        self.linear.num_classes()
    }

    /// Raw feature count expected by every input.
    #[inline]
    pub fn num_features(&self) -> usize {
        self.num_features
    }

    #[inline]
    pub fn expanded_features(&self) -> usize {
        self.linear.num_features()
    }

    #[inline]
    pub fn is_trained(&self) -> bool {
        self.linear.is_trained()
    }

    /// The underlying model over expanded features.
    pub fn linear(&self) -> &LinearClassifier {
        &self.linear
    }

    pub fn into_linear(self) -> LinearClassifier {
        self.linear
    }

    /// Expand `x` and train the underlying model. See [`LinearClassifier::train`].
    pub fn train(
        &mut self,
        x: &Matrix,
        y: &[usize],
        rate: f64,
        num_iter: usize,
    ) -> Result<Matrix> {
        let expanded = self.expand(x)?;
        log::debug!(
            "expanded {} features into {} quadratic terms",
            self.num_features,
            expanded.cols()
        );
        self.linear.train(&expanded, y, rate, num_iter)
    }

    pub fn train_with(&mut self, x: &Matrix, y: &[usize], cfg: TrainConfig) -> Result<Matrix> {
        self.train(x, y, cfg.rate, cfg.num_iter)
    }

    pub fn fit(&mut self, data: &Dataset, cfg: TrainConfig) -> Result<Matrix> {
        self.train_with(data.features(), data.labels(), cfg)
    }

    pub fn decision_scores(&self, x: &Matrix) -> Result<Matrix> {
        self.linear.decision_scores(&self.expand(x)?)
    }

    /// Predicted class per row of `x` (`m × num_features`).
    pub fn predict(&self, x: &Matrix) -> Result<Vec<usize>> {
        self.linear.predict(&self.expand(x)?)
    }

    pub fn predict_one(&self, features: &[f64]) -> Result<usize> {
        if features.len() != self.num_features {
            return Err(Error::ShapeMismatch(format!(
                "input has {} features, classifier expects {}",
                features.len(),
                self.num_features
            )));
        }
        let mut expanded = Vec::with_capacity(self.expanded_features());
        extend_row(features, &mut expanded);
        self.linear.predict_one(&expanded)
    }

    pub fn evaluate(&self, x: &Matrix, y: &[usize]) -> Result<Evaluation> {
        self.linear.evaluate(&self.expand(x)?, y)
    }

    pub fn evaluate_dataset(&self, data: &Dataset) -> Result<Evaluation> {
        self.evaluate(data.features(), data.labels())
    }

    fn expand(&self, x: &Matrix) -> Result<Matrix> {
        if x.cols() != self.num_features {
            return Err(Error::ShapeMismatch(format!(
                "input has {} features, classifier expects {}",
                x.cols(),
                self.num_features
            )));
        }
        add_quadratic_features(x)
    }
}

/// Stored as the underlying linear archive; `num_features` there is the
/// expanded count.
#[cfg(feature = "serde")]
impl QuadraticClassifier {
    pub fn to_json_string_pretty(&self) -> Result<String> {
        self.linear.to_json_string_pretty()
    }

    pub fn to_json_string(&self) -> Result<String> {
        self.linear.to_json_string()
    }

    pub fn from_json_str(s: &str) -> Result<Self> {
        Self::from_persisted(LinearClassifier::from_json_str(s)?)
    }

    pub fn save<P: AsRef<std::path::Path>>(&self, path: P) -> Result<()> {
        self.linear.save(path)
    }

    pub fn load<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        Self::from_persisted(LinearClassifier::load(path)?)
    }

    fn from_persisted(linear: LinearClassifier) -> Result<Self> {
        Self::from_linear(linear)
            .map_err(|e| Error::Persistence(format!("not a quadratic classifier: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appends_upper_triangle_products() {
        let x = Matrix::from_rows(&[[0.0, 1.0], [2.0, 3.0]]).unwrap();
        let quad = add_quadratic_features(&x).unwrap();
        let expected =
            Matrix::from_rows(&[[0.0, 1.0, 0.0, 0.0, 1.0], [2.0, 3.0, 4.0, 6.0, 9.0]]).unwrap();
        assert_eq!(quad, expected);
    }

    #[test]
    fn expansion_keeps_empty_batches_empty() {
        let quad = add_quadratic_features(&Matrix::zeros(0, 3)).unwrap();
        assert_eq!(quad.shape(), (0, 9));
    }

    #[test]
    fn feature_counts_invert() {
        assert_eq!(quadratic_feature_count(1), Some(2));
        assert_eq!(quadratic_feature_count(8), Some(44));
        assert_eq!(quadratic_feature_count(usize::MAX), None);
        for n in 1..200 {
            let expanded = quadratic_feature_count(n).unwrap();
            assert_eq!(base_feature_count(expanded), Some(n));
            assert_eq!(base_feature_count(expanded + 1), None, "{}", expanded + 1);
        }
        assert_eq!(base_feature_count(0), None);
        assert_eq!(base_feature_count(usize::MAX), None);
    }

    #[test]
    fn new_sizes_weight_for_expanded_features() {
        let c = QuadraticClassifier::new(3, 2).unwrap();
        assert_eq!(c.expanded_features(), 5);
        assert_eq!(c.linear().weight().shape(), (6, 3));
        assert!(matches!(
            QuadraticClassifier::new(2, 0),
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            QuadraticClassifier::new(2, usize::MAX),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn from_linear_requires_expansion_count() {
        let ok = LinearClassifier::new(2, 9).unwrap();
        assert_eq!(QuadraticClassifier::from_linear(ok).unwrap().num_features(), 3);

        let bad = LinearClassifier::new(2, 4).unwrap();
        assert!(matches!(
            QuadraticClassifier::from_linear(bad),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn inputs_are_checked_against_raw_feature_count() {
        let mut c = QuadraticClassifier::new(2, 2).unwrap();
        let expanded_width = Matrix::zeros(3, 5);
        assert!(matches!(
            c.train(&expanded_width, &[0, 1, 0], 0.1, 5),
            Err(Error::ShapeMismatch(_))
        ));
        assert!(!c.is_trained());
        assert!(matches!(
            c.predict_one(&[1.0, 2.0, 3.0]),
            Err(Error::ShapeMismatch(_))
        ));
    }

    #[test]
    fn predict_one_matches_batch_prediction() {
        let x = Matrix::from_rows(&[[0.0, 0.5], [3.0, 1.0], [-2.0, 2.0], [1.0, -3.0]]).unwrap();
        let mut c = QuadraticClassifier::new(2, 2).unwrap();
        c.train(&x, &[0, 1, 1, 1], 0.1, 50).unwrap();

        let batch = c.predict(&x).unwrap();
        for (i, row) in x.iter_rows().enumerate() {
            assert_eq!(c.predict_one(row).unwrap(), batch[i]);
        }
    }
}
