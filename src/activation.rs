//! Logistic activation.
//!
//! The classifier maps linear scores `z = X_aug · W` to per-class probabilities
//! with the element-wise sigmoid `1 / (1 + exp(-z))`.
//!
//! Inputs produced from mean-normalized features stay well inside the range where
//! the sigmoid is informative. Raw, unscaled features can push `|z|` past ~37, where
//! `sigmoid(z)` rounds to exactly `1.0` and the cost's `ln(1 - h)` term becomes
//! `-inf`. Always scale features before scoring.

/// Logistic sigmoid.
#[inline]
pub fn sigmoid(z: f64) -> f64 {
    // Evaluate exp on a non-positive argument so it never overflows.
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}

/// Applies [`sigmoid`] to every element of `zs`.
#[inline]
pub fn sigmoid_in_place(zs: &mut [f64]) {
    for z in zs {
        *z = sigmoid(*z);
    }
}
