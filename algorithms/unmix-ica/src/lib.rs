//! # Independent Component Analysis (ICA)
//!
//! `unmix-ica` provides a pure Rust implementation of FastICA, the fixed-point algorithm of
//! Hyvärinen and Oja.
//!
//! ICA separates multivariate signals into their additive, independent subcomponents. Every row
//! of a mixture matrix is one observed signal and every column one sample. The mixture is
//! centered and whitened (the correlation between signals is removed) before the unmixing
//! directions are searched, one at a time or all at once.
//!
//! ## The Big Picture
//!
//! `unmix-ica` is the estimator crate of the `unmix` workspace. The shared traits, the float
//! bound and the separation metrics live in the [`unmix`] core crate, synthetic signals for
//! experiments in `unmix-datasets`.
//!
//! ## Current state
//!
//! - whitening through the eigendecomposition of the sample covariance, see [`whitening`]
//! - deflationary and symmetric fixed-point iterations, see [`Algorithm`]
//! - the `logcosh`, `exp` and `cube` contrast functions, see [`Contrast`]
//!
//! ## Example
//!
//! ```
//! use ndarray::{array, Axis};
//! use unmix::traits::Fit;
//! use unmix_ica::{Contrast, FastIca};
//!
//! let t = ndarray::Array1::linspace(0., 8., 2000);
//! let sources = ndarray::stack![Axis(0), t.mapv(|t| (2. * t).sin()), t.mapv(|t| t % 1.)];
//! let mixture = array![[1., 1.], [0.5, 2.]].dot(&sources);
//!
//! let ica = FastIca::params()
//!     .contrast(Contrast::Cube)
//!     .random_state(42)
//!     .fit(&mixture)?
//!     .optimize()?;
//!
//! assert_eq!(ica.unwhitened_unmixer().dim(), (2, 2));
//! let estimated = ica.separate_sources(&mixture)?;
//! # Ok::<(), unmix_ica::FastIcaError>(())
//! ```

pub mod contrast;
pub mod error;
pub mod fast_ica;
pub mod fixed_point;
pub mod hyperparams;
pub mod whitening;

pub use contrast::Contrast;
pub use error::{FastIcaError, Result};
pub use fast_ica::{Constructed, FastIca, Optimized};
pub use fixed_point::{Algorithm, ComponentStatus};
pub use hyperparams::{FastIcaParams, FastIcaValidParams};
pub use whitening::Whitening;
