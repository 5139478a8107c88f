//! Logistic cost kernels.
//!
//! These are the vectorized building blocks behind [`crate::LinearClassifier::cost`]
//! and [`crate::LinearClassifier::cost_gradient`]:
//!
//! - expand integer labels into a one-hot matrix `Y` (`m × c`)
//! - turn scores into probabilities `h = sigmoid(X_aug · W)` (`m × c`)
//! - reduce `h` against `Y` into a per-class cost, or into the residual `h - Y`
//!
//! The kernels assert their shape contract; the classifier validates shapes
//! before calling them.

use crate::{Error, Matrix, Result};

/// Expand labels into an `m × num_classes` matrix of 0/1 indicators.
///
/// `Y[(i, j)] == 1.0` iff `labels[i] == j`.
pub fn one_hot(labels: &[usize], num_classes: usize) -> Result<Matrix> {
    let mut out = Matrix::zeros(labels.len(), num_classes);
    for (i, &label) in labels.iter().enumerate() {
        if label >= num_classes {
            return Err(Error::InvalidArgument(format!(
                "label {label} at row {i} is outside [0, {num_classes})"
            )));
        }
        out[(i, label)] = 1.0;
    }
    Ok(out)
}

/// Per-class logistic cost: `-mean_i [Y ln h + (1 - Y) ln(1 - h)]`.
///
/// Returns a vector of length `h.cols()`. Terms whose indicator weight is zero are
/// skipped, so a saturated but correct probability contributes `0` rather than
/// `0 * -inf`.
///
/// Shape contract: `h.shape() == targets.shape()`.
pub fn logistic_cost(h: &Matrix, targets: &Matrix) -> Vec<f64> {
    assert_eq!(
        h.shape(),
        targets.shape(),
        "probabilities {:?} do not match targets {:?}",
        h.shape(),
        targets.shape()
    );

    let mut sums = vec![0.0_f64; h.cols()];
    for (h_row, t_row) in h.iter_rows().zip(targets.iter_rows()) {
        for (j, (&p, &t)) in h_row.iter().zip(t_row).enumerate() {
            if t != 0.0 {
                sums[j] -= t * p.ln();
            }
            if t != 1.0 {
                sums[j] -= (1.0 - t) * (1.0 - p).ln();
            }
        }
    }

    let inv_m = 1.0 / h.rows() as f64;
    for s in &mut sums {
        *s *= inv_m;
    }
    sums
}

/// Overwrites `h` with the residual `h - Y`.
///
/// Shape contract: `h.shape() == targets.shape()`.
pub fn subtract_targets(h: &mut Matrix, targets: &Matrix) {
    assert_eq!(
        h.shape(),
        targets.shape(),
        "probabilities {:?} do not match targets {:?}",
        h.shape(),
        targets.shape()
    );
    for (p, &t) in h.as_mut_slice().iter_mut().zip(targets.as_slice()) {
        *p -= t;
    }
}
