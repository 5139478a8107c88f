//! Batch gradient descent.
//!
//! The optimizer is a fixed-iteration loop over the classifier's weight matrix:
//!
//! ```text
//! repeat num_iter times:
//!     W <- W - rate * gradient_fn(W)
//!     history.push(cost_fn(W))
//! ```
//!
//! There is no convergence test, line search, or early stopping, so a run is fully
//! determined by its inputs. Non-finite gradients or costs are recorded as-is.
//!
//! For mean-normalized features a `rate` between roughly `0.01` and `0.1` works
//! well; larger rates may diverge. Neither `rate` nor `num_iter` is bounded here.

use crate::{Error, LinearClassifier, Matrix, Result};

impl LinearClassifier {
    /// Run `num_iter` steps of gradient descent on the weight matrix.
    ///
    /// - `gradient_fn` returns a matrix shaped like [`LinearClassifier::weight`].
    /// - `cost_fn` returns one cost per class.
    ///
    /// Both callbacks observe the classifier as it is at that point of the loop.
    /// Returns the cost history, shape `(num_iter, num_classes)`; row `i` is the
    /// cost after update `i`.
    pub fn gradient_descent<G, C>(
        &mut self,
        mut gradient_fn: G,
        mut cost_fn: C,
        rate: f64,
        num_iter: usize,
    ) -> Result<Matrix>
    where
        G: FnMut(&LinearClassifier) -> Result<Matrix>,
        C: FnMut(&LinearClassifier) -> Result<Vec<f64>>,
    {
        let num_classes = self.num_classes();
        let mut history = Vec::with_capacity(num_iter * num_classes);

        for iter in 0..num_iter {
            let grad = gradient_fn(self)?;
            self.weight.scaled_sub_assign(rate, &grad)?;

            let cost = cost_fn(self)?;
            if cost.len() != num_classes {
                return Err(Error::ShapeMismatch(format!(
                    "cost function returned {} values for {num_classes} classes",
                    cost.len()
                )));
            }
            log::trace!("iteration {iter}: cost {cost:?}");
            history.extend_from_slice(&cost);
        }

        Matrix::from_flat(history, num_iter, num_classes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constant_gradient_moves_weight_linearly() {
        let init = Matrix::from_rows(&[[1.0, -2.0, 0.5], [3.0, 0.0, -1.0]]).unwrap();
        let g = Matrix::from_rows(&[[0.5, 1.0, -2.0], [0.0, 4.0, 1.5]]).unwrap();
        let mut c = LinearClassifier::with_weight(3, 1, init.clone()).unwrap();

        let (rate, k) = (0.25, 8);
        let history = c
            .gradient_descent(|_| Ok(g.clone()), |_| Ok(vec![0.0; 3]), rate, k)
            .unwrap();

        assert_eq!(history.shape(), (k, 3));
        for ((w, w0), dg) in c
            .weight()
            .as_slice()
            .iter()
            .zip(init.as_slice())
            .zip(g.as_slice())
        {
            let expected = w0 - rate * k as f64 * dg;
            assert!((w - expected).abs() < 1e-12, "{w} vs {expected}");
        }
    }

    #[test]
    fn history_records_cost_after_each_update() {
        let mut c = LinearClassifier::new(2, 1).unwrap();
        let ones = Matrix::from_rows(&[[1.0, 1.0], [1.0, 1.0]]).unwrap();
        let history = c
            .gradient_descent(
                |_| Ok(ones.clone()),
                |c| Ok(vec![c.weight()[(0, 0)], c.weight()[(1, 1)]]),
                1.0,
                3,
            )
            .unwrap();
        assert_eq!(history.as_slice(), &[-1.0, -1.0, -2.0, -2.0, -3.0, -3.0]);
    }

    #[test]
    fn zero_iterations_leave_weight_untouched() {
        let mut c = LinearClassifier::new(2, 2).unwrap();
        let history = c
            .gradient_descent(
                |_| unreachable!("no iterations"),
                |_| unreachable!("no iterations"),
                0.1,
                0,
            )
            .unwrap();
        assert_eq!(history.shape(), (0, 2));
        assert!(c.weight().as_slice().iter().all(|&w| w == 0.0));
    }

    #[test]
    fn mis_shaped_gradient_is_rejected() {
        let mut c = LinearClassifier::new(2, 2).unwrap();
        let err = c
            .gradient_descent(|_| Ok(Matrix::zeros(2, 2)), |_| Ok(vec![0.0; 2]), 0.1, 1)
            .unwrap_err();
        assert!(matches!(err, Error::ShapeMismatch(_)));
    }

    #[test]
    fn non_finite_steps_propagate() {
        let mut c = LinearClassifier::new(2, 1).unwrap();
        let nan = Matrix::from_flat(vec![f64::NAN; 4], 2, 2).unwrap();
        let history = c
            .gradient_descent(
                |_| Ok(nan.clone()),
                |c| Ok(vec![c.weight()[(0, 0)]; 2]),
                0.1,
                2,
            )
            .unwrap();
        assert!(history.as_slice().iter().all(|v| v.is_nan()));
    }
}
