//! `unmix` provides the shared building blocks for blind source separation in Rust.
//!
//! The crate itself is small: it defines the floating point bound used across the
//! workspace, the [`Fit`](traits::Fit) and [`Transformer`](traits::Transformer) traits
//! implemented by the estimators, hyperparameter checking via [`ParamGuard`], and the
//! metrics used to score separated sources against a known ground truth.
//!
//! The estimators themselves live in their own crates:
//!
//! * `unmix-ica`: FastICA, fixed-point Independent Component Analysis
//!
//! Signal matrices follow the convention of the signal processing literature: every
//! row is one (mixed or separated) signal and every column one sample in time.
//!
//! ## Scoring a separation
//!
//! ```
//! use ndarray::array;
//! use unmix::prelude::*;
//!
//! let sources = array![[1., -1., 1., -1.], [0., 1., 2., 3.]];
//! // estimates come back in arbitrary order, sign and scale
//! let estimated = array![[-3., -1., 1., 3.], [-2., 2., -2., 2.]];
//!
//! let error = sources.estimation_error(&estimated).unwrap();
//! assert!(error < 1e-12);
//! ```

pub mod correlation;
pub mod error;
mod float;
mod lapack_bounds;
mod metrics_separation;
mod param_guard;
pub mod prelude;
mod records;
pub mod traits;

#[cfg(feature = "benchmarks")]
pub mod benchmarks;

pub use float::Float;
pub use lapack_bounds::{WithLapack, WithLapackData, WithoutLapack, WithoutLapackData};
pub use param_guard::ParamGuard;
pub use records::Records;

/// Metrics for scoring estimated sources against reference signals
pub mod metrics {
    pub use crate::metrics_separation::{standardize_rows, SeparationMetrics, SourceMatch};
}
