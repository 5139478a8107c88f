//! A multiclass linear (logistic-regression) classifier.
//!
//! `linear-classifier` is a small, self-contained numeric engine: it holds a weight
//! matrix, fits it with fixed-iteration batch gradient descent on a one-vs-rest
//! logistic cost, predicts by arg-max scoring, reports accuracy and per-class
//! recall, and persists trained parameters together with their feature-scaling
//! statistics.
//!
//! # Model
//!
//! - `c` classes, `n` features, `m` samples. Scalars are `f64`.
//! - Features are mean-normalized with statistics fitted on the training set:
//!   `x' = (x - offset) / divisor`, where `offset` is the column mean and
//!   `divisor` the column range.
//! - A ones column is prepended (`X_aug`, `m × (n+1)`), and the weight matrix `W`
//!   is `(n+1) × c` with the bias in row 0.
//! - Probabilities: `h = sigmoid(X_aug · W)`. Cost per class:
//!   `-mean_i [Y ln h + (1 - Y) ln(1 - h)]`, with `Y` the one-hot labels.
//! - Gradient: `X_augᵀ · (h - Y)` (not divided by `m`).
//! - Prediction: `argmax_j (X_aug · W)[i, j]`, ties to the lowest class.
//!
//! # Lifecycle
//!
//! A classifier is *untrained* until [`LinearClassifier::train`] (or
//! [`LinearClassifier::load`]) provides scaling statistics. Prediction, evaluation,
//! saving and header export return [`Error::NotTrained`] before that.
//!
//! # Errors
//!
//! Every public operation validates shapes at the boundary and returns
//! [`Result`]. Numerical blow-ups during training (`NaN`/`inf` costs from a
//! diverging learning rate or non-finite inputs) are not errors; they show up in
//! the returned cost history.
//!
//! # Quick start
//!
//! ```rust
//! use linear_classifier::{LinearClassifier, Matrix};
//!
//! # fn main() -> linear_classifier::Result<()> {
//! let x = Matrix::from_rows(&[[2.0, 4.0], [100.0, 5.0], [6.0, 88.0], [90.0, 111.0]])?;
//! let y = [0, 1, 2, 3];
//!
//! let mut classifier = LinearClassifier::new(4, 2)?;
//! let history = classifier.train(&x, &y, 0.1, 100)?;
//! assert_eq!(history.shape(), (100, 4));
//!
//! let eval = classifier.evaluate(&x, &y)?;
//! assert_eq!(eval.accuracy, 1.0);
//! # Ok(())
//! # }
//! ```
//!
//! # Quadratic features
//!
//! [`QuadraticClassifier`] appends every pairwise product `x_i * x_j` (`i <= j`)
//! to the raw features and trains the same linear model on the result, which
//! separates classes bounded by conic sections.
//!
//! # Features
//!
//! - `serde` (default): JSON persistence via [`LinearClassifier::save`] /
//!   [`LinearClassifier::load`].
//! - `matrixmultiply`: use the `matrixmultiply` GEMM backend for matrix products.

pub mod activation;
pub mod classifier;
pub mod cost;
pub mod data;
pub mod error;
pub mod export;
pub(crate) mod matmul;
pub mod matrix;
pub mod metrics;
pub mod optim;
pub mod quadratic;
pub mod scaling;
pub mod train;

#[cfg(feature = "serde")]
pub mod serde_model;

pub use activation::sigmoid;
pub use classifier::LinearClassifier;
pub use cost::one_hot;
pub use data::Dataset;
pub use error::{Error, Result};
pub use matrix::Matrix;
pub use metrics::{Evaluation, NO_SAMPLES_RECALL};
pub use quadratic::{QuadraticClassifier, add_quadratic_features, quadratic_feature_count};
pub use scaling::FeatureScaling;
pub use train::TrainConfig;

#[cfg(feature = "serde")]
pub use serde_model::SerializedClassifier;
