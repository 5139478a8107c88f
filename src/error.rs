use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Bad construction parameters, out-of-range labels, or a mis-shaped injected weight.
    InvalidArgument(String),
    /// Matrix or label dimensions violate an operation's contract.
    ShapeMismatch(String),
    /// Scaling statistics are required but the classifier has not been trained or loaded.
    NotTrained,
    /// A feature column has zero range, so it cannot be mean-normalized.
    DivisionByZeroFeature { feature: usize },
    /// A model archive could not be written, read, or validated.
    Persistence(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidArgument(msg) => write!(f, "invalid argument: {msg}"),
            Error::ShapeMismatch(msg) => write!(f, "shape mismatch: {msg}"),
            Error::NotTrained => write!(
                f,
                "classifier has no scaling statistics; train or load it first"
            ),
            Error::DivisionByZeroFeature { feature } => {
                write!(f, "feature {feature} has zero range and cannot be scaled")
            }
            Error::Persistence(msg) => write!(f, "persistence error: {msg}"),
        }
    }
}

impl std::error::Error for Error {}
