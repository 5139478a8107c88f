//! The classifier state and its scoring/cost engine.

use crate::activation::sigmoid_in_place;
use crate::cost::{logistic_cost, one_hot, subtract_targets};
use crate::{Error, FeatureScaling, Matrix, Result};

/// Relative tolerance used by classifier equality.
pub const EQ_RTOL: f64 = 1e-5;
/// Absolute tolerance used by classifier equality.
pub const EQ_ATOL: f64 = 1e-8;

/// Multiclass linear (one-vs-rest logistic) classifier.
///
/// - `weight` has shape `(num_features + 1, num_classes)`; row 0 is the bias.
/// - `scaling` is `None` until the classifier is trained or loaded. Scoring
///   (`predict`, `evaluate`, `save`, header export) requires it.
///
/// Equality compares `num_classes`/`num_features` exactly and parameters within
/// [`EQ_RTOL`]/[`EQ_ATOL`], so it is not transitive.
#[derive(Debug, Clone)]
pub struct LinearClassifier {
    num_classes: usize,
    num_features: usize,
    pub(crate) weight: Matrix,
    pub(crate) scaling: Option<FeatureScaling>,
}

impl LinearClassifier {
    /// Create an untrained classifier with a zero weight matrix.
    pub fn new(num_classes: usize, num_features: usize) -> Result<Self> {
        let rows = validate_dims(num_classes, num_features)?;
        Ok(Self {
            num_classes,
            num_features,
            weight: Matrix::zeros(rows, num_classes),
            scaling: None,
        })
    }

    /// Create an untrained classifier with an explicit initial weight matrix.
    ///
    /// `weight` must have shape `(num_features + 1, num_classes)`.
    pub fn with_weight(num_classes: usize, num_features: usize, weight: Matrix) -> Result<Self> {
        let rows = validate_dims(num_classes, num_features)?;
        if weight.shape() != (rows, num_classes) {
            return Err(Error::InvalidArgument(format!(
                "initial weight has shape {:?}, expected ({rows}, {num_classes})",
                weight.shape()
            )));
        }
        Ok(Self {
            num_classes,
            num_features,
            weight,
            scaling: None,
        })
    }

    /// Reassemble a trained classifier from validated parts.
    pub fn from_parts(
        num_classes: usize,
        num_features: usize,
        weight: Matrix,
        scaling: FeatureScaling,
    ) -> Result<Self> {
        let mut classifier = Self::with_weight(num_classes, num_features, weight)?;
        if scaling.num_features() != num_features {
            return Err(Error::ShapeMismatch(format!(
                "scaling covers {} features, classifier has {num_features}",
                scaling.num_features()
            )));
        }
        classifier.scaling = Some(scaling);
        Ok(classifier)
    }

    #[inline]
    pub fn num_classes(&self) -> usize {
        self.num_classes
    }

    #[inline]
    pub fn num_features(&self) -> usize {
        self.num_features
    }

    #[inline]
    pub fn weight(&self) -> &Matrix {
        &self.weight
    }

    #[inline]
    pub fn scaling(&self) -> Option<&FeatureScaling> {
        self.scaling.as_ref()
    }

    #[inline]
    pub fn is_trained(&self) -> bool {
        self.scaling.is_some()
    }

    pub(crate) fn trained_scaling(&self) -> Result<&FeatureScaling> {
        self.scaling.as_ref().ok_or(Error::NotTrained)
    }

    /// Apply the fitted mean normalization to `x` (`m × num_features`).
    pub fn scale_features(&self, x: &Matrix) -> Result<Matrix> {
        self.trained_scaling()?.apply(x)
    }

    /// Per-class logistic cost of the current weights on an augmented batch.
    ///
    /// `x_aug` already carries the leading ones column: shape `(m, num_features + 1)`.
    /// Returns a vector of length `num_classes`.
    pub fn cost(&self, x_aug: &Matrix, y: &[usize]) -> Result<Vec<f64>> {
        self.check_augmented(x_aug, y)?;
        let targets = one_hot(y, self.num_classes)?;
        self.cost_against(x_aug, &targets)
    }

    /// Gradient `X_augᵀ · (h - Y)` of the summed cost, shape `(num_features + 1, num_classes)`.
    ///
    /// Not divided by `m`; the learning rate absorbs the scale.
    pub fn cost_gradient(&self, x_aug: &Matrix, y: &[usize]) -> Result<Matrix> {
        self.check_augmented(x_aug, y)?;
        let targets = one_hot(y, self.num_classes)?;
        self.gradient_against(x_aug, &targets)
    }

    /// Probabilities `sigmoid(X_aug · W)`, shape `(m, num_classes)`.
    pub fn probabilities(&self, x_aug: &Matrix) -> Result<Matrix> {
        let mut h = x_aug.matmul(&self.weight)?;
        sigmoid_in_place(h.as_mut_slice());
        Ok(h)
    }

    pub(crate) fn cost_against(&self, x_aug: &Matrix, targets: &Matrix) -> Result<Vec<f64>> {
        let h = self.probabilities(x_aug)?;
        Ok(logistic_cost(&h, targets))
    }

    pub(crate) fn gradient_against(&self, x_aug: &Matrix, targets: &Matrix) -> Result<Matrix> {
        let mut h = self.probabilities(x_aug)?;
        subtract_targets(&mut h, targets);
        x_aug.t_matmul(&h)
    }

    /// Raw linear scores `scale(X)_aug · W`, shape `(m, num_classes)`.
    pub fn decision_scores(&self, x: &Matrix) -> Result<Matrix> {
        let scaling = self.trained_scaling()?;
        self.check_features(x)?;
        scaling.apply(x)?.with_leading_ones().matmul(&self.weight)
    }

    /// Predicted class per row of `x` (`m × num_features`).
    ///
    /// Ties resolve to the lowest class index.
    pub fn predict(&self, x: &Matrix) -> Result<Vec<usize>> {
        Ok(self.decision_scores(x)?.argmax_rows())
    }

    /// Predicted class for a single unscaled sample.
    pub fn predict_one(&self, features: &[f64]) -> Result<usize> {
        let x = Matrix::from_flat(features.to_vec(), 1, features.len())?;
        Ok(self.predict(&x)?[0])
    }

    fn check_features(&self, x: &Matrix) -> Result<()> {
        if x.cols() != self.num_features {
            return Err(Error::ShapeMismatch(format!(
                "input has {} features, classifier expects {}",
                x.cols(),
                self.num_features
            )));
        }
        Ok(())
    }

    pub(crate) fn check_labeled(&self, x: &Matrix, y: &[usize]) -> Result<()> {
        self.check_features(x)?;
        if y.len() != x.rows() {
            return Err(Error::ShapeMismatch(format!(
                "{} labels for {} samples",
                y.len(),
                x.rows()
            )));
        }
        Ok(())
    }

    fn check_augmented(&self, x_aug: &Matrix, y: &[usize]) -> Result<()> {
        if x_aug.cols() != self.num_features + 1 {
            return Err(Error::ShapeMismatch(format!(
                "augmented input has {} columns, expected {}",
                x_aug.cols(),
                self.num_features + 1
            )));
        }
        if y.len() != x_aug.rows() {
            return Err(Error::ShapeMismatch(format!(
                "{} labels for {} samples",
                y.len(),
                x_aug.rows()
            )));
        }
        if x_aug.rows() == 0 {
            return Err(Error::InvalidArgument(
                "cost is undefined on zero samples".to_owned(),
            ));
        }
        Ok(())
    }
}

impl PartialEq for LinearClassifier {
    fn eq(&self, other: &Self) -> bool {
        self.num_classes == other.num_classes
            && self.num_features == other.num_features
            && self.weight.all_close(&other.weight, EQ_RTOL, EQ_ATOL)
            && match (&self.scaling, &other.scaling) {
                (Some(a), Some(b)) => a.all_close(b, EQ_RTOL, EQ_ATOL),
                (None, None) => true,
                _ => false,
            }
    }
}

/// Largest weight buffer (in elements) a `Vec<f64>` can hold.
const MAX_WEIGHT_LEN: usize = isize::MAX as usize / std::mem::size_of::<f64>();

/// Checks the class/feature counts and returns the weight row count.
fn validate_dims(num_classes: usize, num_features: usize) -> Result<usize> {
    if num_classes < 2 {
        return Err(Error::InvalidArgument(format!(
            "num_classes must be >= 2, got {num_classes}"
        )));
    }
    if num_features == 0 {
        return Err(Error::InvalidArgument("num_features must be > 0".to_owned()));
    }
    num_features
        .checked_add(1)
        .filter(|rows| {
            rows.checked_mul(num_classes)
                .is_some_and(|len| len <= MAX_WEIGHT_LEN)
        })
        .ok_or_else(|| {
            Error::InvalidArgument(format!(
                "weight for {num_features} features and {num_classes} classes is too large"
            ))
        })
}
