use ndarray_linalg::error::LinalgError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, FastIcaError>;

/// An error when modeling FastICA algorithm
#[derive(Error, Debug)]
pub enum FastIcaError {
    /// When the mixture holds fewer than two samples per signal
    #[error("Mixture must contain at least two samples, got {0}")]
    NotEnoughSamples(usize),
    /// When any of the hyperparameters are set the wrong value
    #[error("Invalid value encountered: {0}")]
    InvalidValue(String),
    /// When the requested number of components is zero or exceeds the number of signals
    #[error("ncomponents must be between 1 and the number of signals ({nsignals}), got {ncomponents}")]
    InvalidComponents { ncomponents: usize, nsignals: usize },
    /// When a record matrix has a different number of signals than the fitted mixture
    #[error("expected records with {expected} signals, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
    /// When a selected eigenvalue of the covariance matrix is too small to whiten with,
    /// typically caused by duplicated or linearly dependent signals
    #[error("covariance matrix is ill-conditioned: eigenvalue {index} is {eigenvalue:e}, threshold {threshold:e}")]
    IllConditioned {
        index: usize,
        eigenvalue: f64,
        threshold: f64,
    },
    /// When the unmixing matrix is requested before it has been optimized
    #[error("the unmixing matrix is not available before calling `optimize`")]
    NotOptimized,
    /// When an unmixing direction collapses to zero or stops being finite
    #[error("component {0} degenerated during the fixed-point update")]
    Degenerate(usize),
    #[error("tolerance should be positive but is {0}")]
    InvalidTolerance(f32),
    #[error("max_iter should be at least one")]
    InvalidMaxIter,
    #[error("rcond should be in [0, 1) but is {0}")]
    InvalidRcond(f32),
    /// Errors encountered during linear algebra operations
    #[error("Linalg Error: {0}")]
    Linalg(#[from] LinalgError),
    #[error(transparent)]
    UnmixError(#[from] unmix::error::Error),
}
