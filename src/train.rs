use crate::cost::one_hot;
use crate::{Dataset, FeatureScaling, LinearClassifier, Matrix, Result};

/// Hyper-parameters for [`LinearClassifier::train_with`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrainConfig {
    /// Learning rate applied to the unnormalized gradient.
    pub rate: f64,
    /// Number of gradient descent iterations.
    pub num_iter: usize,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            rate: 0.02,
            num_iter: 1500,
        }
    }
}

impl LinearClassifier {
    /// Fit the classifier on `x` (`m × num_features`) and labels `y` (length `m`).
    ///
    /// 1. fits mean-normalization statistics on `x` (once, from this set only)
    /// 2. scales `x` and prepends the bias column
    /// 3. runs [`LinearClassifier::gradient_descent`] with the logistic cost/gradient
    ///
    /// Returns the `(num_iter, num_classes)` cost history.
    ///
    /// All validation (shapes, labels, zero-range features) happens before any state
    /// is changed. Training continues from the current weights.
    pub fn train(
        &mut self,
        x: &Matrix,
        y: &[usize],
        rate: f64,
        num_iter: usize,
    ) -> Result<Matrix> {
        self.check_labeled(x, y)?;
        let scaling = FeatureScaling::fit(x)?;
        let x_aug = scaling.apply(x)?.with_leading_ones();
        let targets = one_hot(y, self.num_classes())?;

        log::info!(
            "training linear classifier: {} samples, {} features, {} classes, \
             rate {rate}, {num_iter} iterations",
            x.rows(),
            self.num_features(),
            self.num_classes()
        );
        log::debug!(
            "feature scaling: offset {:?}, divisor {:?}",
            scaling.offset(),
            scaling.divisor()
        );
        self.scaling = Some(scaling);

        let history = self.gradient_descent(
            |c| c.gradient_against(&x_aug, &targets),
            |c| c.cost_against(&x_aug, &targets),
            rate,
            num_iter,
        )?;

        if let Some(last) = history.iter_rows().last() {
            if last.iter().any(|v| !v.is_finite()) {
                log::warn!("training finished with non-finite cost {last:?}");
            } else {
                log::debug!("final cost {last:?}");
            }
        }
        Ok(history)
    }

    /// [`LinearClassifier::train`] with hyper-parameters from a [`TrainConfig`].
    pub fn train_with(&mut self, x: &Matrix, y: &[usize], cfg: TrainConfig) -> Result<Matrix> {
        self.train(x, y, cfg.rate, cfg.num_iter)
    }

    /// [`LinearClassifier::train`] on a [`Dataset`].
    pub fn fit(&mut self, data: &Dataset, cfg: TrainConfig) -> Result<Matrix> {
        self.train_with(data.features(), data.labels(), cfg)
    }
}
